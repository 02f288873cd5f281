//! Poker hand evaluation.
//!
//! The equity simulator only needs a total order over 5-7 card hands. That
//! contract is the [`HandRanker`] trait (lower rank = stronger hand), so any
//! evaluator can be plugged in. [`HandEvaluator`] is the built-in
//! implementation: it scores the best five cards of up to seven directly from
//! rank/suit bitmasks without enumerating the 21 five-card subsets.

use std::cmp::Ordering;
use std::fmt;

use super::card::Card;

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A comparable hand value. Higher values are better hands.
/// Format: category (4 bits) | kicker1 (4 bits) | kicker2 (4 bits) | ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRank(u32);

/// One past the largest possible packed value.
const RANK_CEILING: u32 = 9 << 20;

impl HandRank {
    fn new(category: HandCategory, kickers: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &k) in kickers.iter().take(5).enumerate() {
            value |= (k as u32) << (16 - i * 4);
        }
        Self(value)
    }

    /// Get the raw rank value for comparison.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        match self.0 >> 20 {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Showdown ranking used by the equity simulator.
///
/// Takes 5-7 cards and returns a totally ordered rank where a lower value is
/// a stronger hand; equal values split the pot.
pub trait HandRanker: Sync {
    /// Rank the best five-card hand contained in `cards`.
    fn rank(&self, cards: &[Card]) -> u32;
}

/// Built-in bitmask hand evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandEvaluator;

impl HandEvaluator {
    /// Create a new hand evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the best five-card hand out of 5-7 cards.
    pub fn evaluate(&self, cards: &[Card]) -> HandRank {
        debug_assert!(cards.len() <= 7, "at most 7 cards");

        let mut rank_counts = [0u8; 13];
        let mut suit_counts = [0u8; 4];
        let mut suit_bits = [0u16; 4];
        let mut rank_bits = 0u16;

        for card in cards {
            rank_counts[card.rank() as usize] += 1;
            suit_counts[card.suit() as usize] += 1;
            suit_bits[card.suit() as usize] |= 1 << card.rank();
            rank_bits |= 1 << card.rank();
        }

        let flush_bits = suit_counts
            .iter()
            .position(|&c| c >= 5)
            .map(|suit| suit_bits[suit]);

        if let Some(bits) = flush_bits {
            if let Some(high) = find_straight(bits) {
                return HandRank::new(HandCategory::StraightFlush, &[high]);
            }
        }

        let mut quads = None;
        let mut trips = [0u8; 2];
        let mut num_trips = 0;
        let mut pairs = [0u8; 3];
        let mut num_pairs = 0;

        for rank in (0..13u8).rev() {
            match rank_counts[rank as usize] {
                4 => quads = quads.or(Some(rank)),
                3 => {
                    trips[num_trips] = rank;
                    num_trips += 1;
                }
                2 => {
                    pairs[num_pairs] = rank;
                    num_pairs += 1;
                }
                _ => {}
            }
        }

        if let Some(quad) = quads {
            let kicker = top_ranks(rank_bits & !(1 << quad), 1);
            return HandRank::new(HandCategory::FourOfAKind, &[quad, kicker[0]]);
        }

        if num_trips >= 1 && (num_trips >= 2 || num_pairs >= 1) {
            let pair = if num_trips >= 2 {
                // A second set beats any pair below it.
                trips[1].max(pairs[0])
            } else {
                pairs[0]
            };
            return HandRank::new(HandCategory::FullHouse, &[trips[0], pair]);
        }

        if let Some(bits) = flush_bits {
            return HandRank::new(HandCategory::Flush, &top_ranks(bits, 5));
        }

        if let Some(high) = find_straight(rank_bits) {
            return HandRank::new(HandCategory::Straight, &[high]);
        }

        if num_trips == 1 {
            let kickers = top_ranks(rank_bits & !(1 << trips[0]), 2);
            return HandRank::new(
                HandCategory::ThreeOfAKind,
                &[trips[0], kickers[0], kickers[1]],
            );
        }

        if num_pairs >= 2 {
            let rest = rank_bits & !(1 << pairs[0]) & !(1 << pairs[1]);
            let kicker = top_ranks(rest, 1);
            return HandRank::new(HandCategory::TwoPair, &[pairs[0], pairs[1], kicker[0]]);
        }

        if num_pairs == 1 {
            let k = top_ranks(rank_bits & !(1 << pairs[0]), 3);
            return HandRank::new(HandCategory::OnePair, &[pairs[0], k[0], k[1], k[2]]);
        }

        HandRank::new(HandCategory::HighCard, &top_ranks(rank_bits, 5))
    }

}

impl HandRanker for HandEvaluator {
    fn rank(&self, cards: &[Card]) -> u32 {
        RANK_CEILING - self.evaluate(cards).value()
    }
}

/// Highest `n` ranks set in `bits`, descending. Missing slots are 0.
fn top_ranks(bits: u16, n: usize) -> [u8; 5] {
    let mut out = [0u8; 5];
    let mut found = 0;
    for rank in (0..13u8).rev() {
        if found == n {
            break;
        }
        if bits & (1 << rank) != 0 {
            out[found] = rank;
            found += 1;
        }
    }
    out
}

/// Find the highest straight from a rank bitmask.
/// Returns the rank of the straight's top card, or None if no straight.
fn find_straight(rank_bits: u16) -> Option<u8> {
    for high in (4..13u8).rev() {
        let mask = 0b11111u16 << (high - 4);
        if rank_bits & mask == mask {
            return Some(high);
        }
    }
    // Wheel: A-2-3-4-5, five-high.
    const WHEEL: u16 = 0b1_0000_0000_1111;
    (rank_bits & WHEEL == WHEEL).then_some(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn category(s: &str) -> HandCategory {
        HandEvaluator::new().evaluate(&parse_cards(s).unwrap()).category()
    }

    fn rank(s: &str) -> u32 {
        HandEvaluator::new().rank(&parse_cards(s).unwrap())
    }

    #[test]
    fn test_categories() {
        assert_eq!(category("As Kd Qh Jc 9s"), HandCategory::HighCard);
        assert_eq!(category("As Ad Kh Qc Js"), HandCategory::OnePair);
        assert_eq!(category("As Ad Kh Kc Js"), HandCategory::TwoPair);
        assert_eq!(category("As Ad Ah Kc Js"), HandCategory::ThreeOfAKind);
        assert_eq!(category("Ts 9d 8h 7c 6s"), HandCategory::Straight);
        assert_eq!(category("5s 4d 3h 2c As"), HandCategory::Straight);
        assert_eq!(category("As Ks 9s 7s 2s"), HandCategory::Flush);
        assert_eq!(category("As Ad Ah Kc Kd"), HandCategory::FullHouse);
        assert_eq!(category("As Ad Ah Ac Ks"), HandCategory::FourOfAKind);
        assert_eq!(category("9s 8s 7s 6s 5s"), HandCategory::StraightFlush);
    }

    #[test]
    fn test_seven_card_best_hand() {
        assert_eq!(category("Ah As Ad Ac Kh Qs Jd"), HandCategory::FourOfAKind);
        // Two sets make a full house.
        assert_eq!(category("Kh Ks Kd 7c 7h 7s 2d"), HandCategory::FullHouse);
        // Flush plus unrelated straight is a flush, not a straight flush.
        assert_eq!(category("2h 5h 9h Jh Kh Tc Qd"), HandCategory::Flush);
        assert_eq!(category("6h 7h 8h 9h Th 2c 3d"), HandCategory::StraightFlush);
    }

    #[test]
    fn test_lower_rank_is_stronger() {
        assert!(rank("As Ad Kh Qc Js") < rank("As Kd Qh Jc 9s"));
        assert!(rank("9s 8s 7s 6s 5s") < rank("As Ad Ah Ac Ks"));
        // Wheel is the lowest straight.
        assert!(rank("6s 5d 4h 3c 2s") < rank("5s 4d 3h 2c As"));
    }

    #[test]
    fn test_kickers_and_ties() {
        assert!(rank("As Ad Kh Qc Js") < rank("As Ad Kh Qc Ts"));
        assert_eq!(rank("As Ad Kh Qc Js 3c 2d"), rank("Ah Ac Kd Qs Jh 4c 2s"));
        // Two pair kicker may come from a third pair.
        assert!(rank("Ks Kd Qh Qc 9s 9d 2c") < rank("Ks Kd Qh Qc 8s 7d 2c"));
    }

    #[test]
    fn test_showdown_on_shared_board() {
        assert!(rank("Ah Ad Qs Jc 7d 3s 2h") < rank("Kh Kd Qs Jc 7d 3s 2h"));
        // Board plays: both hands hold the same straight.
        assert_eq!(rank("2c 3d Ts Js Qh Kc Ad"), rank("4c 5d Ts Js Qh Kc Ad"));
        assert_eq!(category("Ah Ad Qs Jc 7d").to_string(), "One Pair");
    }
}
