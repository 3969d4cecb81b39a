//! Canonical text encoding of a board.
//!
//! The encoding is both the memoization key of the search and the text
//! printed for a won game:
//!
//! ```text
//! t:-<cards>-,-<cards>-,...|f:-<cards>-,...|w:<cards>|s:<cards>
//! ```
//!
//! Sections are the 7 tableau columns, the 4 foundations, the waste and
//! the stock. Cards are `(rank,suit)` pairs such as `(13,S)`, listed
//! bottom-to-top and separated by commas. The face-down flag is not part
//! of the encoding, so two boards encode equal exactly when every pile
//! holds the same cards in the same order.

use std::fmt::Write as _;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, BoardError, Pile, NUM_COLS, NUM_FOUNDATIONS};
use crate::card::{Card, Rank, Suit};

const SECTION_SEP: char = '|';
const PILE_SEP: &str = "-,-";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected section `{expected}` at position {position}")]
    MissingSection {
        expected: &'static str,
        position: usize,
    },
    #[error("trailing data after stock section: {0:?}")]
    TrailingData(String),
    #[error("section `{section}` must hold {expected} piles, found {found}")]
    WrongPileCount {
        section: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("pile list in section `{section}` is not wrapped in dashes: {text:?}")]
    BadPileList { section: &'static str, text: String },
    #[error("malformed card {0:?}")]
    BadCard(String),
    #[error("decoded board is inconsistent: {0}")]
    Inconsistent(#[from] BoardError),
}

fn push_card(out: &mut String, card: &Card) {
    // Writing to a String cannot fail.
    let _ = write!(out, "({},{})", card.rank_number(), card.suit.short_char());
}

fn push_cards(out: &mut String, pile: &Pile) {
    for (i, card) in pile.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_card(out, card);
    }
}

fn push_piles(out: &mut String, piles: &[Pile]) {
    for (i, pile) in piles.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('-');
        push_cards(out, pile);
        out.push('-');
    }
}

/// Encode `board` as its canonical string.
pub fn encode(board: &Board) -> String {
    let mut out = String::with_capacity(64 + 8 * board.card_count());
    out.push_str("t:");
    push_piles(&mut out, &board.tableau);
    out.push(SECTION_SEP);
    out.push_str("f:");
    push_piles(&mut out, &board.foundations);
    out.push(SECTION_SEP);
    out.push_str("w:");
    push_cards(&mut out, &board.waste);
    out.push(SECTION_SEP);
    out.push_str("s:");
    push_cards(&mut out, &board.stock);
    out
}

fn parse_card(text: &str) -> Result<Card, ParseBoardError> {
    let bad = || ParseBoardError::BadCard(text.to_string());
    let (rank, suit) = text.split_once(',').ok_or_else(bad)?;
    let rank = rank
        .parse::<u8>()
        .ok()
        .and_then(Rank::from_number)
        .ok_or_else(bad)?;
    let mut suit_chars = suit.chars();
    let suit = match (suit_chars.next(), suit_chars.next()) {
        (Some(ch), None) => Suit::from_char(ch).ok_or_else(bad)?,
        _ => return Err(bad()),
    };
    Ok(Card::new(suit, rank))
}

/// Parse a comma-separated list of `(rank,suit)` cards.
fn parse_cards(mut text: &str) -> Result<Pile, ParseBoardError> {
    let mut cards = Vec::new();
    while !text.is_empty() {
        let body = text
            .strip_prefix('(')
            .ok_or_else(|| ParseBoardError::BadCard(text.to_string()))?;
        let close = body
            .find(')')
            .ok_or_else(|| ParseBoardError::BadCard(text.to_string()))?;
        cards.push(parse_card(&body[..close])?);
        text = &body[close + 1..];
        if let Some(rest) = text.strip_prefix(',') {
            if rest.is_empty() {
                return Err(ParseBoardError::BadCard(",".to_string()));
            }
            text = rest;
        } else if !text.is_empty() {
            return Err(ParseBoardError::BadCard(text.to_string()));
        }
    }
    Ok(Pile::from_cards(cards))
}

fn parse_piles<const N: usize>(
    section: &'static str,
    text: &str,
) -> Result<[Pile; N], ParseBoardError> {
    let inner = text
        .strip_prefix('-')
        .and_then(|t| t.strip_suffix('-'))
        .ok_or_else(|| ParseBoardError::BadPileList {
            section,
            text: text.to_string(),
        })?;
    let piles = inner
        .split(PILE_SEP)
        .map(parse_cards)
        .collect::<Result<Vec<_>, _>>()?;
    let found = piles.len();
    piles
        .try_into()
        .map_err(|_| ParseBoardError::WrongPileCount {
            section,
            expected: N,
            found,
        })
}

/// Split the next `|`-separated section and check its prefix.
fn take_section<'a>(
    sections: &mut std::str::Split<'a, char>,
    expected: &'static str,
    position: usize,
) -> Result<&'a str, ParseBoardError> {
    sections
        .next()
        .and_then(|s| s.strip_prefix(expected))
        .ok_or(ParseBoardError::MissingSection { expected, position })
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Decode a board from [`encode`] output. Cards come back face-up.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sections = s.trim().split(SECTION_SEP);

        let tableau = parse_piles::<NUM_COLS>("t:", take_section(&mut sections, "t:", 0)?)?;
        let foundations =
            parse_piles::<NUM_FOUNDATIONS>("f:", take_section(&mut sections, "f:", 1)?)?;
        let waste = parse_cards(take_section(&mut sections, "w:", 2)?)?;
        let stock = parse_cards(take_section(&mut sections, "s:", 3)?)?;

        let rest: Vec<&str> = sections.collect();
        if !rest.is_empty() {
            return Err(ParseBoardError::TrailingData(rest.join("|")));
        }

        let board = Board {
            tableau,
            foundations,
            waste,
            stock,
        };
        board.check_conservation()?;
        Ok(board)
    }
}
