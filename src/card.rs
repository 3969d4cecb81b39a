//! Card, Suit, and Rank types for a standard 52-card deck.
//!
//! - `Suit` is a small integer whose parity gives the color
//!   (even = red, odd = black).
//! - `Rank` runs Ace=1 through King=13.
//! - `Card` pairs the two with a `hidden` flag that only the deal and the
//!   display care about.

use core::fmt;

/// Number of suits in a standard deck.
pub const NUM_SUITS: u8 = 4;
/// Number of ranks in a standard deck.
pub const NUM_RANKS: u8 = 13;
/// Number of cards in a standard deck.
pub const CARDS_PER_DECK: u8 = NUM_SUITS * NUM_RANKS;

/// The four suits, numbered so that `suit as u8 % 2` is the color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Suit {
    Hearts = 0,
    Clubs = 1,
    Diamonds = 2,
    Spades = 3,
}

/// The thirteen ranks, Ace low.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King, // 13
}

/// A single playing card.
///
/// `hidden` is set while dealing for cards buried in a tableau column. It
/// has no bearing on legality, the win test or the state encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub hidden: bool,
}

impl Card {
    /// Create a new face-up card.
    #[inline]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card {
            suit,
            rank,
            hidden: false,
        }
    }

    /// Identity of the card in 0..52, independent of `hidden`:
    /// ```text
    /// index = suit * 13 + (rank - 1)
    /// ```
    #[inline]
    pub fn index(self) -> u8 {
        self.suit as u8 * NUM_RANKS + (self.rank as u8 - 1)
    }

    /// Rank number in 1..=13.
    #[inline]
    pub fn rank_number(self) -> u8 {
        self.rank as u8
    }

    /// True for hearts and diamonds.
    #[inline]
    pub fn is_red(self) -> bool {
        self.suit.is_red()
    }

    /// Same card with the face-down flag cleared.
    #[inline]
    pub fn face_up(self) -> Self {
        Card {
            hidden: false,
            ..self
        }
    }

    /// Short string like "AH", "7C", "TD", "KS".
    pub fn short_str(self) -> String {
        format!("{}{}", self.rank.short_char(), self.suit.short_char())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_str())
    }
}

impl Suit {
    /// All suits in a fixed, reproducible order.
    pub const ALL: [Suit; NUM_SUITS as usize] =
        [Suit::Hearts, Suit::Clubs, Suit::Diamonds, Suit::Spades];

    /// Color parity: even suits are red.
    #[inline]
    pub fn is_red(self) -> bool {
        self as u8 % 2 == 0
    }

    /// Single-character representation: 'H', 'C', 'D', or 'S'.
    #[inline]
    pub fn short_char(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Spades => 'S',
        }
    }

    /// Inverse of `short_char`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'H' => Some(Suit::Hearts),
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl Rank {
    /// All ranks in a fixed, reproducible order (Ace..King).
    pub const ALL: [Rank; NUM_RANKS as usize] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Construct a rank from its number 1..=13.
    #[inline]
    pub fn from_number(n: u8) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Rank::ALL.get(i as usize))
            .copied()
    }

    fn short_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }
}
