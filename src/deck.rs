//! Building, shuffling and dealing the deck.
//!
//! Dealing model: column `c` (0-based) receives `c + 1` cards, all but the
//! last face-down. The 24 cards left over go to the stock in dealt order,
//! so the last card of the deck ends up on top of the stock.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::card::{Card, Rank, Suit, CARDS_PER_DECK};

/// Local convenience: our deck length as `usize`.
pub const DECK_LEN: usize = CARDS_PER_DECK as usize;

/// Generate a standard 52-card deck in a fixed order.
///
/// Suits follow `Suit::ALL` order, and ranks follow `Rank::ALL` order.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_LEN);
    for &suit in Suit::ALL.iter() {
        for &rank in Rank::ALL.iter() {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

/// Shuffle `deck` in place with `passes` uniform permutations.
///
/// One pass is already uniform; extra passes are accepted for callers that
/// want them but change nothing about correctness.
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R, passes: usize) {
    for _ in 0..passes.max(1) {
        deck.shuffle(rng);
    }
}

/// Deal an already-ordered deck into the initial layout.
pub fn deal_from_deck(deck: Vec<Card>) -> Board {
    debug_assert_eq!(deck.len(), DECK_LEN);
    let mut board = Board::new_empty();
    let mut draw = deck.into_iter();

    for (col_idx, col) in board.tableau.iter_mut().enumerate() {
        for row in 0..=col_idx {
            let Some(mut card) = draw.next() else {
                return board;
            };
            card.hidden = row != col_idx;
            col.push(card);
        }
    }

    for mut card in draw {
        card.hidden = true;
        board.stock.push(card);
    }

    board
}

/// Shuffle a fresh deck with `rng` and deal it.
pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut deck = standard_deck();
    shuffle_deck(&mut deck, rng, 1);
    deal_from_deck(deck)
}

/// Reproducible deal for a given seed.
pub fn deal_seeded(seed: u64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    deal(&mut rng)
}
