//! Output types of the decision engines.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::ActionKind;
use crate::cards::Street;

/// A recommended action. The only value the core hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: ActionKind,
    /// Total size of the action in big blinds (0 for fold / check).
    pub amount_bb: f64,
    /// Confidence in [0, 1]. Zero means the caller should defer to a fallback.
    pub confidence: f64,
    /// Human-readable justification.
    pub reasoning: String,
    pub street: Street,
}

impl Decision {
    pub fn new(
        street: Street,
        action: ActionKind,
        amount_bb: f64,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            action,
            amount_bb,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            street,
        }
    }

    pub fn fold(street: Street, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self::new(street, ActionKind::Fold, 0.0, confidence, reasoning)
    }

    pub fn check(street: Street, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self::new(street, ActionKind::Check, 0.0, confidence, reasoning)
    }

    /// Zero-confidence decision signalling "escalate to the fallback".
    pub fn unhandled(street: Street, action: ActionKind, reasoning: impl Into<String>) -> Self {
        Self::new(street, action, 0.0, 0.0, reasoning)
    }

    /// Check if the caller should consult its fallback.
    pub fn is_unhandled(&self) -> bool {
        self.confidence == 0.0
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount_bb > 0.0 {
            write!(
                f,
                "{} {:.1}bb (confidence {:.2}): {}",
                self.action, self.amount_bb, self.confidence, self.reasoning
            )
        } else {
            write!(
                f,
                "{} (confidence {:.2}): {}",
                self.action, self.confidence, self.reasoning
            )
        }
    }
}

/// One scored candidate of the postflop EV search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEv {
    pub action: ActionKind,
    /// Total chips the action puts in, in big blinds.
    pub amount_bb: f64,
    /// Expected value in big blinds.
    pub ev_bb: f64,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        let d = Decision::new(Street::Flop, ActionKind::Bet, 5.0, 1.7, "value");
        assert_eq!(d.confidence, 1.0);
        assert!(Decision::unhandled(Street::Preflop, ActionKind::Fold, "?").is_unhandled());
    }

    #[test]
    fn test_json_shape() {
        let d = Decision::new(Street::Preflop, ActionKind::AllIn, 12.0, 0.8, "shove");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["action"], "all-in");
        assert_eq!(json["street"], "preflop");
        assert_eq!(json["amount_bb"], 12.0);
    }
}
