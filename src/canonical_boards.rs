//! Canonical fixed boards used in tests.
//!
//! These are hand-built positions whose outcome is known without running
//! the solver:
//!   * one move away from a win, for either foundation regime;
//!   * a small stuck position with a redeal cycle and a king that can
//!     wander between empty columns, but no way to finish.

use crate::board::{Board, Pile};
use crate::card::{Card, Rank, Suit};
use crate::rules::Regime;

/// Cards of one suit from `low` to `high` inclusive, ascending bottom-to-top.
pub fn suit_pile(suit: Suit, low: Rank, high: Rank) -> Pile {
    Pile::from_cards(
        Rank::ALL
            .iter()
            .filter(|&&r| r >= low && r <= high)
            .map(|&r| Card::new(suit, r))
            .collect(),
    )
}

/// Same range as [`suit_pile`], stacked King-first (descending build).
pub fn suit_pile_descending(suit: Suit, low: Rank, high: Rank) -> Pile {
    let mut cards = suit_pile(suit, low, high).take_all();
    cards.reverse();
    Pile::from_cards(cards)
}

/// Three full foundations, the fourth (spades) missing one card, and the
/// missing card as the only tableau card.
///
/// Under `Ascending` the last foundation holds A..Q and the KS is exposed;
/// under `Descending` it holds K..2 and the AS is exposed.
pub fn one_move_from_win(regime: Regime) -> Board {
    let mut board = Board::new_empty();
    for (i, &suit) in Suit::ALL.iter().enumerate() {
        let (pile, missing) = match (regime, suit) {
            (Regime::Ascending, Suit::Spades) => (
                suit_pile(suit, Rank::Ace, Rank::Queen),
                Some(Card::new(suit, Rank::King)),
            ),
            (Regime::Descending, Suit::Spades) => (
                suit_pile_descending(suit, Rank::Two, Rank::King),
                Some(Card::new(suit, Rank::Ace)),
            ),
            (Regime::Ascending, _) => (suit_pile(suit, Rank::Ace, Rank::King), None),
            (Regime::Descending, _) => {
                (suit_pile_descending(suit, Rank::Ace, Rank::King), None)
            }
        };
        board.foundations[i] = pile;
        if let Some(card) = missing {
            board.tableau[0].push(card);
        }
    }
    board
}

/// A position with no win under `Ascending`.
///
/// Hearts stop at the Ten; the Jack is buried under the Queen in column 1
/// and the King sits alone in the stock. The King can be drawn, redealt
/// and moved between the six empty columns forever, so the search only
/// terminates because of path memoization.
pub fn stuck_king_board() -> Board {
    let mut board = Board::new_empty();
    board.foundations[0] = suit_pile(Suit::Hearts, Rank::Ace, Rank::Ten);
    board.foundations[1] = suit_pile(Suit::Clubs, Rank::Ace, Rank::King);
    board.foundations[2] = suit_pile(Suit::Diamonds, Rank::Ace, Rank::King);
    board.foundations[3] = suit_pile(Suit::Spades, Rank::Ace, Rank::King);
    board.tableau[0].push(Card::new(Suit::Hearts, Rank::Jack));
    board.tableau[0].push(Card::new(Suit::Hearts, Rank::Queen));
    board.stock.push(Card::new(Suit::Hearts, Rank::King));
    board
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_boards_hold_full_decks() {
        for board in [
            one_move_from_win(Regime::Ascending),
            one_move_from_win(Regime::Descending),
            stuck_king_board(),
        ] {
            assert!(board.check_conservation().is_ok());
            assert!(!board.is_won());
        }
    }

    #[test]
    fn descending_pile_starts_with_king() {
        let pile = suit_pile_descending(Suit::Clubs, Rank::Ace, Rank::King);
        assert_eq!(pile.as_slice()[0], Card::new(Suit::Clubs, Rank::King));
        assert_eq!(pile.top(), Some(Card::new(Suit::Clubs, Rank::Ace)));
    }
}
