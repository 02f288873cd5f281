//! Betting actions and the action log.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::position::Position;

/// Kind of betting action, observed or recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    #[serde(rename = "all-in", alias = "allin", alias = "all_in")]
    AllIn,
}

impl ActionKind {
    /// Check if this is an aggressive action.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn)
    }

    /// Check if this action puts chips in voluntarily.
    pub fn is_voluntary(&self) -> bool {
        !matches!(self, ActionKind::Fold | ActionKind::Check)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all-in",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One entry of the betting-action log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BettingAction {
    /// Opponent identity as known to the statistics provider.
    pub actor: String,
    /// Seat position of the actor this hand.
    pub position: Position,
    pub kind: ActionKind,
    /// Total amount the actor has committed on this street after the action, in BB.
    #[serde(default)]
    pub amount: f64,
}

impl BettingAction {
    pub fn new(actor: impl Into<String>, position: Position, kind: ActionKind, amount: f64) -> Self {
        Self {
            actor: actor.into(),
            position,
            kind,
            amount,
        }
    }
}

impl fmt::Display for BettingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Fold | ActionKind::Check => write!(f, "{} ({}) {}", self.actor, self.position, self.kind),
            _ => write!(f, "{} ({}) {} {:.1}bb", self.actor, self.position, self.kind, self.amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggressive_actions() {
        assert!(!ActionKind::Fold.is_aggressive());
        assert!(!ActionKind::Call.is_aggressive());
        assert!(ActionKind::Raise.is_aggressive());
        assert!(ActionKind::AllIn.is_aggressive());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ActionKind::AllIn).unwrap(), "\"all-in\"");
        let kind: ActionKind = serde_json::from_str("\"allin\"").unwrap();
        assert_eq!(kind, ActionKind::AllIn);
        let kind: ActionKind = serde_json::from_str("\"raise\"").unwrap();
        assert_eq!(kind, ActionKind::Raise);
    }

    #[test]
    fn test_display() {
        let a = BettingAction::new("villain", Position::CO, ActionKind::Raise, 2.5);
        assert_eq!(a.to_string(), "villain (CO) raise 2.5bb");
    }
}
