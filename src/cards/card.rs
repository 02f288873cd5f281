//! Card representation.
//!
//! This module provides the card types used throughout the decision core:
//! - `Card`: A single playing card with rank and suit
//! - `HoleCards`: Hero's or an opponent's two private cards
//! - `Board`: Community cards (0-5 cards)
//! - `Deck`: The residual deck once known cards are removed

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_5: u8 = 3;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

/// Rank characters for display.
pub(crate) const RANK_CHARS: [char; 13] =
    ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Parse a single rank character (case-insensitive).
pub(crate) fn parse_rank(c: char) -> Option<u8> {
    RANK_CHARS
        .iter()
        .position(|&r| r == c.to_ascii_uppercase())
        .map(|r| r as u8)
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Parse a card from strings like "As", "Kh", "2c" or "10d".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        // "10" is accepted as an alias for the canonical 'T'.
        let (rank_part, suit_part) = if let Some(rest) = s.strip_prefix("10") {
            ("T", rest)
        } else {
            s.split_at(s.char_indices().nth(1).map(|(i, _)| i)?)
        };

        let mut rank_chars = rank_part.chars();
        let mut suit_chars = suit_part.chars();
        let (rank_char, suit_char) = (rank_chars.next()?, suit_chars.next()?);
        if rank_chars.next().is_some() || suit_chars.next().is_some() {
            return None;
        }

        let rank = parse_rank(rank_char)?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == suit_char.to_ascii_lowercase())?;
        Some(Self::new(rank, suit as u8))
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Single-bit mask of this card, for dead-card sets.
    #[inline]
    pub fn mask(&self) -> u64 {
        1u64 << self.id
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl FromStr for Card {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::parse(s).ok_or_else(|| CoreError::InvalidCard(s.to_string()))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for Card {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a list of cards such as "AhKs", "Ah Ks" or "10h,9c".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CoreError> {
    let mut cards = Vec::new();
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let mut rest = compact.as_str();
    while !rest.is_empty() {
        let len = if rest.starts_with("10") { 3 } else { 2 };
        let end = rest
            .char_indices()
            .nth(len)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let token = &rest[..end];
        cards.push(token.parse()?);
        rest = &rest[end..];
    }
    Ok(cards)
}

/// Fail on the first card that appears twice.
pub fn ensure_distinct(cards: &[Card]) -> Result<u64, CoreError> {
    let mut mask = 0u64;
    for card in cards {
        if mask & card.mask() != 0 {
            return Err(CoreError::DuplicateCard(*card));
        }
        mask |= card.mask();
    }
    Ok(mask)
}

/// A player's two hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards {
    /// First card (higher rank by convention).
    pub card1: Card,
    /// Second card.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards, ordering by rank (higher first).
    pub fn new(card1: Card, card2: Card) -> Self {
        if card1.rank() >= card2.rank() {
            Self { card1, card2 }
        } else {
            Self {
                card1: card2,
                card2: card1,
            }
        }
    }

    /// Build hole cards from a card slice; exactly two distinct cards are required.
    pub fn from_slice(cards: &[Card]) -> Result<Self, CoreError> {
        match cards {
            [a, b] => {
                if a == b {
                    Err(CoreError::DuplicateCard(*a))
                } else {
                    Ok(Self::new(*a, *b))
                }
            }
            _ => Err(CoreError::NotEnoughHoleCards(cards.len())),
        }
    }

    /// Check if hole cards are suited.
    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    /// Check if hole cards are a pair.
    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }

    /// Get both cards as an array.
    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    /// Dead-card mask of both cards.
    pub fn mask(&self) -> u64 {
        self.card1.mask() | self.card2.mask()
    }

    /// Check if a card conflicts with these hole cards.
    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }
}

impl FromStr for HoleCards {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HoleCards::from_slice(&parse_cards(s)?)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Community cards on the board.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(5),
        }
    }

    /// Create a board from cards.
    ///
    /// Only dealt boards are accepted: 0, 3, 4 or 5 cards.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, CoreError> {
        match cards.len() {
            0 | 3..=5 => Ok(Self { cards }),
            1 | 2 => Err(CoreError::IncompleteBoard(cards.len())),
            n => Err(CoreError::TooManyBoardCards(n)),
        }
    }

    /// Get the number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if board is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the cards on the board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Check if the board contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Get the current street based on board cards.
    pub fn street(&self) -> Street {
        match self.cards.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }
}

impl FromStr for Board {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_cards(parse_cards(s)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// Street in a poker hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "preflop"),
            Street::Flop => write!(f, "flop"),
            Street::Turn => write!(f, "turn"),
            Street::River => write!(f, "river"),
        }
    }
}

/// The cards left once known cards are removed.
#[derive(Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a deck with every card in `dead_mask` removed.
    pub fn without_mask(dead_mask: u64) -> Self {
        let cards = (0..52u8)
            .map(Card::from_id)
            .filter(|c| dead_mask & c.mask() == 0)
            .collect();
        Self { cards }
    }

    /// Get the number of remaining cards.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Get remaining cards as a slice.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}
