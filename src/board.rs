//! Board state: seven tableau columns, four foundations, waste and stock.
//!
//! Every pile is stored bottom-to-top, so the exposed (playable) card is
//! always the last element. The stock follows the same convention: its
//! last element is the next card to be drawn.

use thiserror::Error;

use crate::card::{Card, CARDS_PER_DECK};

/// Number of tableau columns.
pub const NUM_COLS: usize = 7;
/// Number of foundation piles.
pub const NUM_FOUNDATIONS: usize = 4;
/// Cards a foundation holds when complete.
pub const FOUNDATION_FULL: usize = 13;

/// Integrity violations found by [`Board::check_conservation`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board holds {found} cards, expected {expected}")]
    WrongCardCount { found: usize, expected: usize },
    #[error("card {card} appears more than once")]
    DuplicateCard { card: String },
}

/// One ordered pile of cards; only the last card is exposed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Pile { cards }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The exposed card, if any.
    #[inline]
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    #[inline]
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Bottom-to-top iteration.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Remove every card, returning them bottom-to-top.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}

/// The four pile categories on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PileKind {
    Tableau,
    Foundation,
    Waste,
    Stock,
}

/// Address of a single pile on the board.
///
/// `index` selects the column or foundation; it is always 0 for waste and
/// stock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PileRef {
    pub kind: PileKind,
    pub index: u8,
}

impl PileRef {
    pub const WASTE: PileRef = PileRef {
        kind: PileKind::Waste,
        index: 0,
    };
    pub const STOCK: PileRef = PileRef {
        kind: PileKind::Stock,
        index: 0,
    };

    pub fn tableau(index: usize) -> Self {
        debug_assert!(index < NUM_COLS);
        PileRef {
            kind: PileKind::Tableau,
            index: index as u8,
        }
    }

    pub fn foundation(index: usize) -> Self {
        debug_assert!(index < NUM_FOUNDATIONS);
        PileRef {
            kind: PileKind::Foundation,
            index: index as u8,
        }
    }
}

/// Complete board state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    pub tableau: [Pile; NUM_COLS],
    pub foundations: [Pile; NUM_FOUNDATIONS],
    pub waste: Pile,
    pub stock: Pile,
}

impl Board {
    /// A board with every pile empty.
    pub fn new_empty() -> Self {
        Board::default()
    }

    pub fn pile(&self, at: PileRef) -> &Pile {
        match at.kind {
            PileKind::Tableau => &self.tableau[at.index as usize],
            PileKind::Foundation => &self.foundations[at.index as usize],
            PileKind::Waste => &self.waste,
            PileKind::Stock => &self.stock,
        }
    }

    pub fn pile_mut(&mut self, at: PileRef) -> &mut Pile {
        match at.kind {
            PileKind::Tableau => &mut self.tableau[at.index as usize],
            PileKind::Foundation => &mut self.foundations[at.index as usize],
            PileKind::Waste => &mut self.waste,
            PileKind::Stock => &mut self.stock,
        }
    }

    /// All four foundations complete.
    pub fn is_won(&self) -> bool {
        self.foundations
            .iter()
            .all(|f| f.len() == FOUNDATION_FULL)
    }

    /// Every card on the board, pile by pile (tableau, foundations, waste,
    /// stock), bottom-to-top within each pile.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.tableau
            .iter()
            .chain(self.foundations.iter())
            .chain(std::iter::once(&self.waste))
            .chain(std::iter::once(&self.stock))
            .flat_map(|p| p.iter())
    }

    pub fn card_count(&self) -> usize {
        self.tableau.iter().map(Pile::len).sum::<usize>()
            + self.foundations.iter().map(Pile::len).sum::<usize>()
            + self.waste.len()
            + self.stock.len()
    }

    /// Verify the board holds each of the 52 cards exactly once.
    pub fn check_conservation(&self) -> Result<(), BoardError> {
        let expected = CARDS_PER_DECK as usize;
        let found = self.card_count();
        if found != expected {
            return Err(BoardError::WrongCardCount { found, expected });
        }
        let mut seen = [false; CARDS_PER_DECK as usize];
        for card in self.cards() {
            let idx = card.index() as usize;
            if seen[idx] {
                return Err(BoardError::DuplicateCard {
                    card: card.short_str(),
                });
            }
            seen[idx] = true;
        }
        Ok(())
    }
}
