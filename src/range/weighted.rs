//! Weighted hand ranges over the 169 hand classes.
//!
//! A range holds one relative-likelihood weight per hand class. Weights are
//! not probabilities until [`OpponentRange::normalize`] is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::card::parse_rank;
use crate::cards::{HandClass, NUM_CLASSES};
use crate::strength::strength_of;

/// Weight below which a class counts as eliminated.
pub const ACTIVE_WEIGHT: f64 = 0.1;

/// A hand class paired with its relative weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedHand {
    pub class: HandClass,
    pub weight: f64,
}

/// Belief distribution over one opponent's 169 possible hand classes.
#[derive(Clone, PartialEq)]
pub struct OpponentRange {
    /// Weight per class, indexed by `HandClass::index()`.
    weights: [f64; NUM_CLASSES],
}

impl OpponentRange {
    /// Every class at weight 1.0.
    pub fn uniform() -> Self {
        Self {
            weights: [1.0; NUM_CLASSES],
        }
    }

    /// Every class at weight 0.0.
    pub fn empty() -> Self {
        Self {
            weights: [0.0; NUM_CLASSES],
        }
    }

    /// Weight of one class.
    pub fn weight(&self, class: &HandClass) -> f64 {
        self.weights[class.index() as usize]
    }

    /// Set the weight of one class, clamped to [0, 1].
    pub fn set_weight(&mut self, class: &HandClass, weight: f64) {
        self.weights[class.index() as usize] = weight.clamp(0.0, 1.0);
    }

    /// Iterate all 169 entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = WeightedHand> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| WeightedHand {
                class: HandClass::from_index(i as u8),
                weight,
            })
    }

    /// Apply `f(class, weight) -> new weight` to every class.
    pub fn map(&self, mut f: impl FnMut(&HandClass, f64) -> f64) -> Self {
        let mut out = self.clone();
        for (i, w) in out.weights.iter_mut().enumerate() {
            *w = f(&HandClass::from_index(i as u8), *w);
        }
        out
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// A range whose weights are all zero carries no information.
    pub fn is_degenerate(&self) -> bool {
        self.total_weight() == 0.0
    }

    /// Rescale weights to sum to 1. A zero-sum range is returned unchanged.
    pub fn normalize(&self) -> Self {
        let total = self.total_weight();
        if total == 0.0 {
            return self.clone();
        }
        let mut out = self.clone();
        for w in out.weights.iter_mut() {
            *w /= total;
        }
        out
    }

    /// Number of classes whose weight is at least [`ACTIVE_WEIGHT`].
    pub fn active_classes(&self) -> usize {
        self.weights.iter().filter(|&&w| w >= ACTIVE_WEIGHT).count()
    }

    /// Weighted number of concrete combos (1326 for a uniform range).
    pub fn combo_count(&self) -> f64 {
        self.iter()
            .map(|wh| wh.weight * wh.class.num_combos() as f64)
            .sum()
    }

    /// The `n` heaviest classes, strongest first among equal weights.
    pub fn top_classes(&self, n: usize) -> Vec<WeightedHand> {
        let mut hands: Vec<WeightedHand> = self.iter().filter(|wh| wh.weight > 0.0).collect();
        hands.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then_with(|| strength_of(&b.class).cmp(&strength_of(&a.class)))
        });
        hands.truncate(n);
        hands
    }

    /// Short human-readable width summary (tight / medium / wide).
    pub fn describe(&self) -> String {
        let active = self.active_classes();
        let band = match active {
            0 => return "unknown range (no live hands)".to_string(),
            1..=25 => "tight",
            26..=70 => "medium",
            _ => "wide",
        };
        let examples: Vec<String> = self
            .top_classes(3)
            .iter()
            .map(|wh| wh.class.to_string())
            .collect();
        format!(
            "{} range ({} hand classes, e.g. {})",
            band,
            active,
            examples.join(", ")
        )
    }

    /// Build a range from notation such as "TT+, AQs+, KQo, A5s-A2s".
    ///
    /// Listed classes get weight 1.0, everything else 0.0.
    pub fn from_notation(notation: &str) -> Result<Self, RangeParseError> {
        let mut range = Self::empty();

        for part in notation.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            for class in parse_part(part)? {
                range.set_weight(&class, 1.0);
            }
        }

        Ok(range)
    }
}

impl Default for OpponentRange {
    fn default() -> Self {
        Self::uniform()
    }
}

impl fmt::Debug for OpponentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OpponentRange({} active, total weight {:.2})",
            self.active_classes(),
            self.total_weight()
        )
    }
}

/// Expand one comma-separated notation part into hand classes.
fn parse_part(part: &str) -> Result<Vec<HandClass>, RangeParseError> {
    if let Some((start, end)) = part.split_once('-') {
        return parse_span(start.trim(), end.trim());
    }
    if let Some(hand) = part.strip_suffix('+') {
        return parse_plus(hand);
    }
    parse_single(part)
}

/// Suitedness filter from an optional 's'/'o' suffix.
#[derive(Clone, Copy, PartialEq)]
enum Suitedness {
    Suited,
    Offsuit,
    Both,
}

impl Suitedness {
    fn classes(self, high: u8, low: u8) -> Vec<HandClass> {
        match self {
            Suitedness::Suited => vec![HandClass::new(high, low, true)],
            Suitedness::Offsuit => vec![HandClass::new(high, low, false)],
            Suitedness::Both => vec![HandClass::new(high, low, true), HandClass::new(high, low, false)],
        }
    }
}

/// Split "AKs" into (high, low, suitedness).
fn parse_hand(hand: &str) -> Result<(u8, u8, Suitedness), RangeParseError> {
    let chars: Vec<char> = hand.chars().collect();
    if chars.len() < 2 || chars.len() > 3 {
        return Err(RangeParseError::InvalidFormat(hand.to_string()));
    }

    let r1 = parse_rank(chars[0]).ok_or(RangeParseError::InvalidRank(chars[0]))?;
    let r2 = parse_rank(chars[1]).ok_or(RangeParseError::InvalidRank(chars[1]))?;
    let suitedness = match chars.get(2).copied() {
        None => Suitedness::Both,
        Some('s' | 'S') => Suitedness::Suited,
        Some('o' | 'O') => Suitedness::Offsuit,
        Some(c) => return Err(RangeParseError::InvalidSuffix(c)),
    };

    Ok((r1.max(r2), r1.min(r2), suitedness))
}

/// "AA", "AKs", "AKo", "AK".
fn parse_single(hand: &str) -> Result<Vec<HandClass>, RangeParseError> {
    let (high, low, suitedness) = parse_hand(hand)?;
    if high == low {
        return Ok(vec![HandClass::new(high, low, false)]);
    }
    Ok(suitedness.classes(high, low))
}

/// "TT+" (pairs upward) or "AQs+" (kicker upward to just below the high card).
fn parse_plus(hand: &str) -> Result<Vec<HandClass>, RangeParseError> {
    let (high, low, suitedness) = parse_hand(hand)?;
    if high == low {
        return Ok((high..13).map(|r| HandClass::new(r, r, false)).collect());
    }
    Ok((low..high)
        .flat_map(|kicker| suitedness.classes(high, kicker))
        .collect())
}

/// "A5s-A2s" (same high card) or "99-66" (pairs).
fn parse_span(start: &str, end: &str) -> Result<Vec<HandClass>, RangeParseError> {
    let (s_high, s_low, s_suit) = parse_hand(start)?;
    let (e_high, e_low, e_suit) = parse_hand(end)?;
    let span = format!("{}-{}", start, end);

    if s_high == s_low && e_high == e_low {
        let (lo, hi) = (s_high.min(e_high), s_high.max(e_high));
        return Ok((lo..=hi).map(|r| HandClass::new(r, r, false)).collect());
    }

    if s_high != e_high || s_high == s_low || e_high == e_low || s_suit != e_suit {
        return Err(RangeParseError::InvalidRange(span));
    }

    let (lo, hi) = (s_low.min(e_low), s_low.max(e_low));
    Ok((lo..=hi)
        .flat_map(|kicker| s_suit.classes(s_high, kicker))
        .collect())
}

/// Error type for range parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeParseError {
    InvalidFormat(String),
    InvalidRank(char),
    InvalidSuffix(char),
    InvalidRange(String),
}

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid hand format: {}", s),
            Self::InvalidRank(c) => write!(f, "Invalid rank character: {}", c),
            Self::InvalidSuffix(c) => write!(f, "Invalid suffix: {} (expected 's' or 'o')", c),
            Self::InvalidRange(s) => write!(f, "Invalid range notation: {}", s),
        }
    }
}

impl std::error::Error for RangeParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> HandClass {
        HandClass::parse(name).unwrap()
    }

    #[test]
    fn test_uniform_and_empty() {
        let all = OpponentRange::uniform();
        assert_eq!(all.active_classes(), 169);
        assert!((all.combo_count() - 1326.0).abs() < 1e-9);
        assert!(OpponentRange::empty().is_degenerate());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut range = OpponentRange::uniform();
        range.set_weight(&class("AA"), 0.25);
        range.set_weight(&class("72o"), 0.0);

        let once = range.normalize();
        let twice = once.normalize();
        assert!((once.total_weight() - 1.0).abs() < 1e-9);
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!((a.weight - b.weight).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normalize_zero_range_is_noop() {
        let empty = OpponentRange::empty();
        assert_eq!(empty.normalize(), empty);
    }

    #[test]
    fn test_parse_notation() {
        let range = OpponentRange::from_notation("TT+, AQs+, KQo").unwrap();
        assert_eq!(range.active_classes(), 5 + 2 + 1);
        assert_eq!(range.weight(&class("JJ")), 1.0);
        assert_eq!(range.weight(&class("AQo")), 0.0);

        let both = OpponentRange::from_notation("AK").unwrap();
        assert!((both.combo_count() - 16.0).abs() < 1e-9);

        let wheel = OpponentRange::from_notation("A5s-A2s").unwrap();
        assert_eq!(wheel.active_classes(), 4);
        assert_eq!(wheel.weight(&class("A3s")), 1.0);

        let pairs = OpponentRange::from_notation("99-66").unwrap();
        assert_eq!(pairs.active_classes(), 4);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            OpponentRange::from_notation("AX"),
            Err(RangeParseError::InvalidRank('X'))
        );
        assert_eq!(
            OpponentRange::from_notation("AKq"),
            Err(RangeParseError::InvalidSuffix('q'))
        );
        assert!(matches!(
            OpponentRange::from_notation("A5s-K2s"),
            Err(RangeParseError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_describe_bands() {
        let tight = OpponentRange::from_notation("QQ+, AKs").unwrap();
        assert!(tight.describe().starts_with("tight range (4 hand classes, e.g. AA"));
        assert!(OpponentRange::uniform().describe().starts_with("wide"));
        assert!(OpponentRange::empty().describe().starts_with("unknown"));
    }
}
