//! The 169 canonical starting-hand classes.
//!
//! There are 169 strategically distinct preflop hands:
//! - 13 pairs (AA, KK, ..., 22)
//! - 78 suited hands (AKs, AQs, ..., 32s)
//! - 78 offsuit hands (AKo, AQo, ..., 32o)
//!
//! Index layout: pairs 0-12 (22-AA), suited 13-90, offsuit 91-168, with
//! non-pairs packed in triangular order (32, 42, 43, 52, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::card::{parse_rank, Card, HoleCards, RANK_CHARS};

/// Number of canonical hand classes.
pub const NUM_CLASSES: usize = 169;

/// A canonical two-card hand class. `rank1 >= rank2` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandClass {
    /// Rank of first card (higher)
    pub rank1: u8,
    /// Rank of second card (lower or equal)
    pub rank2: u8,
    /// Whether suited (always false for pairs)
    pub suited: bool,
}

impl HandClass {
    /// Build a class from two ranks in any order.
    ///
    /// Pairs ignore `suited`.
    pub fn new(a: u8, b: u8, suited: bool) -> Self {
        let (rank1, rank2) = if a >= b { (a, b) } else { (b, a) };
        Self {
            rank1,
            rank2,
            suited: suited && rank1 != rank2,
        }
    }

    /// The class of a concrete two-card holding.
    pub fn of(hole: &HoleCards) -> Self {
        Self::new(hole.card1.rank(), hole.card2.rank(), hole.is_suited())
    }

    /// Get hand class from index (0-168).
    pub fn from_index(index: u8) -> Self {
        debug_assert!((index as usize) < NUM_CLASSES);
        if index < 13 {
            Self {
                rank1: index,
                rank2: index,
                suited: false,
            }
        } else if index < 91 {
            let (r1, r2) = decode_triangular(index - 13);
            Self {
                rank1: r1,
                rank2: r2,
                suited: true,
            }
        } else {
            let (r1, r2) = decode_triangular(index - 91);
            Self {
                rank1: r1,
                rank2: r2,
                suited: false,
            }
        }
    }

    /// Get the hand class index (0-168).
    pub fn index(&self) -> u8 {
        if self.rank1 == self.rank2 {
            self.rank1
        } else if self.suited {
            13 + encode_triangular(self.rank1, self.rank2)
        } else {
            91 + encode_triangular(self.rank1, self.rank2)
        }
    }

    /// Iterate over all 169 classes in index order.
    pub fn all() -> impl Iterator<Item = HandClass> {
        (0..NUM_CLASSES as u8).map(HandClass::from_index)
    }

    /// Parse canonical notation: "AA", "AKs", "AKo".
    ///
    /// Rank order is normalised, so "KAs" parses as "AKs". Non-pairs need an
    /// explicit suitedness suffix.
    pub fn parse(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.trim().chars().collect();
        match chars.as_slice() {
            [a, b] => {
                let (r1, r2) = (parse_rank(*a)?, parse_rank(*b)?);
                (r1 == r2).then(|| Self::new(r1, r2, false))
            }
            [a, b, suffix] => {
                let (r1, r2) = (parse_rank(*a)?, parse_rank(*b)?);
                if r1 == r2 {
                    return None;
                }
                match suffix {
                    's' | 'S' => Some(Self::new(r1, r2, true)),
                    'o' | 'O' => Some(Self::new(r1, r2, false)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Check if this is a pocket pair.
    pub fn is_pair(&self) -> bool {
        self.rank1 == self.rank2
    }

    /// Number of combinations for this hand class.
    pub fn num_combos(&self) -> u8 {
        if self.is_pair() {
            6
        } else if self.suited {
            4
        } else {
            12
        }
    }

    /// Enumerate all specific combos for this hand class.
    pub fn combos(&self) -> Vec<HoleCards> {
        let mut combos = Vec::with_capacity(self.num_combos() as usize);

        if self.is_pair() {
            for s1 in 0..4u8 {
                for s2 in (s1 + 1)..4u8 {
                    combos.push(HoleCards::new(
                        Card::new(self.rank1, s1),
                        Card::new(self.rank2, s2),
                    ));
                }
            }
        } else if self.suited {
            for suit in 0..4u8 {
                combos.push(HoleCards::new(
                    Card::new(self.rank1, suit),
                    Card::new(self.rank2, suit),
                ));
            }
        } else {
            for s1 in 0..4u8 {
                for s2 in 0..4u8 {
                    if s1 != s2 {
                        combos.push(HoleCards::new(
                            Card::new(self.rank1, s1),
                            Card::new(self.rank2, s2),
                        ));
                    }
                }
            }
        }

        combos
    }

    /// Combos that share no card with `dead_mask`.
    pub fn live_combos(&self, dead_mask: u64) -> impl Iterator<Item = HoleCards> {
        self.combos()
            .into_iter()
            .filter(move |hc| hc.mask() & dead_mask == 0)
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hi, lo) = (
            RANK_CHARS[self.rank1 as usize],
            RANK_CHARS[self.rank2 as usize],
        );
        if self.is_pair() {
            write!(f, "{}{}", hi, lo)
        } else {
            write!(f, "{}{}{}", hi, lo, if self.suited { 's' } else { 'o' })
        }
    }
}

/// Error returned when hand-class notation is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHandClassError(pub String);

impl fmt::Display for ParseHandClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid hand class: {:?}", self.0)
    }
}

impl std::error::Error for ParseHandClassError {}

impl FromStr for HandClass {
    type Err = ParseHandClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandClass::parse(s).ok_or_else(|| ParseHandClassError(s.to_string()))
    }
}

impl Serialize for HandClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HandClass {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Encode two ranks (r1 > r2) to triangular index.
fn encode_triangular(r1: u8, r2: u8) -> u8 {
    debug_assert!(r1 > r2);
    r1 * (r1 - 1) / 2 + r2
}

/// Decode triangular index to two ranks (r1 > r2).
fn decode_triangular(idx: u8) -> (u8, u8) {
    let mut r1 = 1u8;
    let mut remaining = idx;

    while remaining >= r1 {
        remaining -= r1;
        r1 += 1;
    }

    (r1, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_index_roundtrip() {
        for idx in 0..NUM_CLASSES as u8 {
            let hc = HandClass::from_index(idx);
            assert_eq!(hc.index(), idx, "roundtrip failed for index {}", idx);
            assert!(hc.rank1 >= hc.rank2);
        }
    }

    #[test]
    fn test_exactly_169_distinct_names() {
        let names: HashSet<String> = HandClass::all().map(|hc| hc.to_string()).collect();
        assert_eq!(names.len(), 169);
        let combos: u32 = HandClass::all().map(|hc| hc.num_combos() as u32).sum();
        assert_eq!(combos, 1326);
    }

    #[test]
    fn test_parse() {
        assert_eq!(HandClass::parse("AA").unwrap().index(), 12);
        assert_eq!(HandClass::parse("22").unwrap().index(), 0);
        assert_eq!(HandClass::parse("32s").unwrap().index(), 13);
        assert_eq!(HandClass::parse("KAs").unwrap().to_string(), "AKs");
        assert_eq!(HandClass::parse("t9o").unwrap().to_string(), "T9o");
        assert!(HandClass::parse("AK").is_none());
        assert!(HandClass::parse("AAs").is_none());
        assert!(HandClass::parse("AKx").is_none());
        assert!(HandClass::parse("").is_none());
    }

    #[test]
    fn test_of_hole_cards() {
        let hole: HoleCards = "7c2d".parse().unwrap();
        assert_eq!(HandClass::of(&hole).to_string(), "72o");
        let hole: HoleCards = "QhJh".parse().unwrap();
        assert_eq!(HandClass::of(&hole).to_string(), "QJs");
    }

    #[test]
    fn test_combos() {
        let aa = HandClass::parse("AA").unwrap();
        assert_eq!(aa.combos().len(), 6);

        let aks = HandClass::parse("AKs").unwrap();
        assert!(aks.combos().iter().all(|c| c.is_suited()));
        assert_eq!(aks.combos().len(), 4);

        let ako = HandClass::parse("AKo").unwrap();
        assert!(ako.combos().iter().all(|c| !c.is_suited()));
        assert_eq!(ako.combos().len(), 12);
    }

    #[test]
    fn test_live_combos() {
        let aa = HandClass::parse("AA").unwrap();
        let ah = Card::parse("Ah").unwrap();
        assert_eq!(aa.live_combos(ah.mask()).count(), 3);
    }
}
