//! Placement rules.
//!
//! Two foundation regimes exist and a solver commits to one of them:
//!
//! - `Descending`: nothing may be placed on an empty pile; a foundation is
//!   stacked same-suit *downwards* (`a.rank == b.rank - 1`), which also
//!   makes it usable as an auxiliary pile that cards can be taken back
//!   from.
//! - `Ascending`: the usual game. Empty columns take only Kings, empty
//!   foundations take only Aces, foundations build same-suit upwards.
//!
//! Tableau placement is the same in both: opposite color, one rank lower.
//! Foundation `i` belongs to `Suit::ALL[i]`.

use crate::board::{PileKind, PileRef};
use crate::card::{Card, Rank, Suit};
use crate::moves::MoveCategory;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Regime {
    Descending,
    #[default]
    Ascending,
}

const DESCENDING_ORDER: [MoveCategory; 5] = [
    MoveCategory::TableauToTableau,
    MoveCategory::TableauToFoundation,
    MoveCategory::WasteToFoundation,
    MoveCategory::WasteToTableau,
    MoveCategory::FoundationToTableau,
];

const ASCENDING_ORDER: [MoveCategory; 4] = [
    MoveCategory::TableauToTableau,
    MoveCategory::TableauToFoundation,
    MoveCategory::WasteToFoundation,
    MoveCategory::WasteToTableau,
];

/// True if `above` may be placed onto `below` in a tableau column.
#[inline]
pub fn is_one_lower_opposite_color(above: Card, below: Card) -> bool {
    above.rank_number() + 1 == below.rank_number() && above.is_red() != below.is_red()
}

/// The suit foundation `index` is built in.
#[inline]
pub fn foundation_suit(index: u8) -> Suit {
    Suit::ALL[usize::from(index) % Suit::ALL.len()]
}

impl Regime {
    /// Can `card` be placed on a pile whose exposed card is `onto`
    /// (`None` for an empty pile)?
    pub fn can_move(self, card: Card, onto: Option<Card>, to_foundation: bool) -> bool {
        match (self, onto) {
            (Regime::Descending, None) => false,
            (Regime::Ascending, None) if to_foundation => card.rank == Rank::Ace,
            (Regime::Ascending, None) => card.rank == Rank::King,
            (_, Some(below)) if !to_foundation => is_one_lower_opposite_color(card, below),
            (Regime::Descending, Some(below)) => {
                card.suit == below.suit && card.rank_number() + 1 == below.rank_number()
            }
            (Regime::Ascending, Some(below)) => {
                card.suit == below.suit && card.rank_number() == below.rank_number() + 1
            }
        }
    }

    /// Can `card` go onto pile `to`, whose exposed card is `onto`?
    ///
    /// Same as [`Regime::can_move`], except that an empty foundation only
    /// starts with its own suit.
    pub fn can_place(
        self,
        card: Card,
        to: PileRef,
        onto: Option<Card>,
        foundation_rule: bool,
    ) -> bool {
        let wrong_home = to.kind == PileKind::Foundation && card.suit != foundation_suit(to.index);
        if onto.is_none() && wrong_home {
            return false;
        }
        self.can_move(card, onto, foundation_rule)
    }

    /// Move categories in the order the search tries them.
    ///
    /// Taking cards back off a foundation is only part of the `Descending`
    /// game.
    pub fn categories(self) -> &'static [MoveCategory] {
        match self {
            Regime::Descending => &DESCENDING_ORDER,
            Regime::Ascending => &ASCENDING_ORDER,
        }
    }
}
