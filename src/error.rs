//! Error types for the decision core.
//!
//! The core prefers defined defaults over failure. Only input that cannot be
//! given a sensible meaning (unparseable cards, a single hole card, negative
//! chip amounts) surfaces as a [`CoreError`].

use std::fmt;

use crate::cards::Card;
use crate::config::ConfigError;
use crate::range::RangeParseError;

/// Hard failures of the decision core.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A card string could not be parsed (expected e.g. "As", "Td", "10h").
    InvalidCard(String),
    /// The same card appears more than once among the known cards.
    DuplicateCard(Card),
    /// Hero must hold exactly two cards.
    NotEnoughHoleCards(usize),
    /// A board holds at most five cards.
    TooManyBoardCards(usize),
    /// One or two board cards: no street deals that many.
    IncompleteBoard(usize),
    /// A pot, stack or bet amount was negative (or not a number).
    NegativeAmount {
        /// Which quantity was invalid.
        what: &'static str,
        /// The offending value.
        value: f64,
    },
    /// Range notation could not be parsed.
    InvalidRange(RangeParseError),
    /// Engine configuration failed validation.
    InvalidConfig(ConfigError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidCard(s) => write!(f, "Invalid card: {:?}", s),
            CoreError::DuplicateCard(card) => write!(f, "Card {} appears more than once", card),
            CoreError::NotEnoughHoleCards(n) => {
                write!(f, "Expected 2 hole cards, got {}", n)
            }
            CoreError::TooManyBoardCards(n) => {
                write!(f, "Board has {} cards, at most 5 allowed", n)
            }
            CoreError::IncompleteBoard(n) => {
                write!(f, "Board has {} cards, expected 0, 3, 4 or 5", n)
            }
            CoreError::NegativeAmount { what, value } => {
                write!(f, "{} must be a non-negative number, got {}", what, value)
            }
            CoreError::InvalidRange(e) => write!(f, "Invalid range: {}", e),
            CoreError::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::InvalidRange(e) => Some(e),
            CoreError::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RangeParseError> for CoreError {
    fn from(e: RangeParseError) -> Self {
        CoreError::InvalidRange(e)
    }
}

impl From<ConfigError> for CoreError {
    fn from(e: ConfigError) -> Self {
        CoreError::InvalidConfig(e)
    }
}

/// Reject negative or NaN chip amounts.
pub(crate) fn check_amount(what: &'static str, value: f64) -> Result<f64, CoreError> {
    if value.is_nan() || value < 0.0 {
        Err(CoreError::NegativeAmount { what, value })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_amount() {
        assert_eq!(check_amount("pot", 0.0), Ok(0.0));
        assert_eq!(check_amount("pot", 12.5), Ok(12.5));
        assert!(matches!(
            check_amount("stack", -1.0),
            Err(CoreError::NegativeAmount { what: "stack", .. })
        ));
        assert!(check_amount("stack", f64::NAN).is_err());
    }

    #[test]
    fn test_display() {
        let err = CoreError::NotEnoughHoleCards(1);
        assert_eq!(err.to_string(), "Expected 2 hole cards, got 1");
        assert_eq!(
            CoreError::IncompleteBoard(2).to_string(),
            "Board has 2 cards, expected 0, 3, 4 or 5"
        );
    }
}
