use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseCardError;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Represents one of the four suits in a standard 52-card deck.
/// The discriminant is the suit index used by the integer card encoding.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit (♠), index 0
    Spades,
    /// Hearts suit (♥), index 1
    Hearts,
    /// Diamonds suit (♦), index 2
    Diamonds,
    /// Clubs suit (♣), index 3
    Clubs,
}

impl Suit {
    pub fn from_index(v: u8) -> Suit {
        match v {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            _ => Suit::Clubs,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// The discriminant is the rank index (0 = Two … 12 = Ace).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 0,
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
    King,
    Ace,
}

const RANK_SYMBOLS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

impl Rank {
    pub fn from_index(v: u8) -> Rank {
        match v {
            0 => Rank::Two,
            1 => Rank::Three,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            _ => Rank::Ace,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        RANK_SYMBOLS[self as usize]
    }
}

/// Rank symbol for a raw rank index (0..13).
pub fn rank_symbol(rank: u8) -> char {
    RANK_SYMBOLS[(rank as usize).min(12)]
}

/// A single playing card encoded as an integer in `0..52`.
///
/// `rank = card / 4` and `suit = card % 4`, so cards order by rank first.
/// The encoding is also the serialized form.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card(rank.index() * 4 + suit.index())
    }

    /// Builds a card from raw rank (0..13) and suit (0..4) indices.
    pub fn from_parts(rank: u8, suit: u8) -> Card {
        debug_assert!(rank < 13 && suit < 4, "rank {rank} suit {suit}");
        Card(rank * 4 + suit)
    }

    pub fn from_index(index: u8) -> Option<Card> {
        (usize::from(index) < DECK_SIZE).then_some(Card(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn rank_index(self) -> u8 {
        self.0 / 4
    }

    pub fn suit_index(self) -> u8 {
        self.0 % 4
    }

    pub fn rank(self) -> Rank {
        Rank::from_index(self.rank_index())
    }

    pub fn suit(self) -> Suit {
        Suit::from_index(self.suit_index())
    }

    /// Bit for this card in a 52-bit card mask.
    pub fn mask(self) -> u64 {
        1u64 << self.0
    }
}

impl TryFrom<u8> for Card {
    type Error = ParseCardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Card::from_index(value).ok_or(ParseCardError::OutOfRange(value))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().symbol(), self.suit().symbol())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses two-character notation such as `As`, `Td` or `7c`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError::Invalid(s.to_string()));
        };
        let rank = RANK_SYMBOLS
            .iter()
            .position(|&c| c == r.to_ascii_uppercase())
            .ok_or_else(|| ParseCardError::Invalid(s.to_string()))?;
        let suit = match su.to_ascii_lowercase() {
            's' => Suit::Spades,
            'h' => Suit::Hearts,
            'd' => Suit::Diamonds,
            'c' => Suit::Clubs,
            _ => return Err(ParseCardError::Invalid(s.to_string())),
        };
        Ok(Card::new(Rank::from_index(rank as u8), suit))
    }
}

/// Parses a whitespace- or comma-separated list of cards, e.g. `"As Kd, 7c"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

/// Space-separated labels, e.g. `"As Kd"`.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds a card mask from a slice of cards.
pub fn mask_of(cards: &[Card]) -> u64 {
    cards.iter().fold(0u64, |m, c| m | c.mask())
}

pub fn full_deck() -> Vec<Card> {
    (0..DECK_SIZE as u8).map(Card).collect()
}
