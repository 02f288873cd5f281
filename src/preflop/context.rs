//! Preflop betting context derived from the action log.

use std::fmt;

use crate::action::{ActionKind, BettingAction};
use crate::position::Position;

/// Immutable snapshot of the preflop betting round from hero's seat.
///
/// Rebuilt from the action log for every decision; never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PreflopContext {
    pub hero: Position,
    /// Nobody has voluntarily entered the pot.
    pub first_in: bool,
    /// Exactly one raise so far.
    pub facing_open: bool,
    /// Two raises so far.
    pub facing_3bet: bool,
    /// Three raises so far.
    pub facing_4bet: bool,
    /// Only limps so far.
    pub facing_limp: bool,
    /// The last raise was an all-in.
    pub facing_all_in: bool,
    pub raise_count: u8,
    /// Calls made before the first raise.
    pub limpers: u8,
    /// Calls made after the last raise.
    pub callers: u8,
    /// Position of the last raiser.
    pub aggressor: Option<Position>,
    /// Raise-to amount of the last raise in BB (1.0 when unopened).
    pub last_raise: f64,
    /// Pot before hero acts, in BB.
    pub pot: f64,
    /// Hero acts after the player it is contesting the pot with.
    pub in_position: bool,
    /// Players still contesting the pot, hero included.
    pub players_in_pot: u8,
}

impl PreflopContext {
    /// Derive the context for `hero` from this hand's preflop actions.
    pub fn from_actions(actions: &[BettingAction], hero: Position, pot: f64) -> Self {
        let mut raise_count = 0u8;
        let mut limpers = 0u8;
        let mut callers = 0u8;
        let mut aggressor = None;
        let mut first_limper = None;
        let mut last_raise = 1.0;
        let mut facing_all_in = false;
        let mut live: Vec<Position> = Vec::new();

        for action in actions {
            let raises = match action.kind {
                ActionKind::Bet | ActionKind::Raise => true,
                // A short all-in that does not exceed the current bet is a call.
                ActionKind::AllIn => action.amount > last_raise,
                _ => false,
            };

            if raises {
                raise_count += 1;
                callers = 0;
                aggressor = Some(action.position);
                last_raise = action.amount;
                facing_all_in = action.kind == ActionKind::AllIn;
            } else if matches!(action.kind, ActionKind::Call | ActionKind::AllIn) {
                if raise_count == 0 {
                    limpers += 1;
                    first_limper.get_or_insert(action.position);
                } else {
                    callers += 1;
                }
            }

            if action.position == hero {
                continue;
            }
            match action.kind {
                ActionKind::Fold => live.retain(|&p| p != action.position),
                kind if kind.is_voluntary() && !live.contains(&action.position) => {
                    live.push(action.position)
                }
                _ => {}
            }
        }

        let in_position = match aggressor.filter(|&a| a != hero).or(first_limper) {
            Some(villain) => hero.is_ip_vs(villain),
            None => hero == Position::BU,
        };

        Self {
            hero,
            first_in: raise_count == 0 && limpers == 0,
            facing_open: raise_count == 1,
            facing_3bet: raise_count == 2,
            facing_4bet: raise_count == 3,
            facing_limp: raise_count == 0 && limpers > 0,
            facing_all_in,
            raise_count,
            limpers,
            callers,
            aggressor,
            last_raise,
            pot,
            in_position,
            players_in_pot: 1 + live.len() as u8,
        }
    }

    /// Extra players in the pot beyond a heads-up confrontation.
    pub fn extra_players(&self) -> i32 {
        (self.players_in_pot as i32 - 2).max(0)
    }
}

impl fmt::Display for PreflopContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.raise_count {
            0 if self.limpers > 0 => format!("{} limper(s)", self.limpers),
            0 => "unopened".to_string(),
            1 => "facing open".to_string(),
            2 => "facing 3-bet".to_string(),
            3 => "facing 4-bet".to_string(),
            n => format!("facing {}-bet", n + 1),
        };
        write!(f, "{} {}", self.hero, level)?;
        if let Some(a) = self.aggressor {
            write!(f, " from {} to {:.1}bb", a, self.last_raise)?;
        }
        write!(
            f,
            ", {} in pot, {}",
            self.players_in_pot,
            if self.in_position { "IP" } else { "OOP" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(position: Position, kind: ActionKind, amount: f64) -> BettingAction {
        BettingAction::new(position.name(), position, kind, amount)
    }

    #[test]
    fn test_unopened() {
        let log = vec![
            act(Position::UTG, ActionKind::Fold, 0.0),
            act(Position::EP, ActionKind::Fold, 0.0),
        ];
        let ctx = PreflopContext::from_actions(&log, Position::MP, 1.5);
        assert!(ctx.first_in);
        assert!(!ctx.facing_open);
        assert_eq!(ctx.raise_count, 0);
        assert_eq!(ctx.players_in_pot, 1);
        assert_eq!(ctx.aggressor, None);
    }

    #[test]
    fn test_facing_open_with_caller() {
        let log = vec![
            act(Position::UTG, ActionKind::Raise, 2.5),
            act(Position::EP, ActionKind::Fold, 0.0),
            act(Position::MP, ActionKind::Call, 2.5),
            act(Position::HJ, ActionKind::Fold, 0.0),
        ];
        let ctx = PreflopContext::from_actions(&log, Position::BU, 6.5);
        assert!(ctx.facing_open);
        assert_eq!(ctx.aggressor, Some(Position::UTG));
        assert_eq!(ctx.last_raise, 2.5);
        assert_eq!(ctx.callers, 1);
        assert_eq!(ctx.players_in_pot, 3);
        assert_eq!(ctx.extra_players(), 1);
        assert!(ctx.in_position);
    }

    #[test]
    fn test_hero_faces_three_bet() {
        let log = vec![
            act(Position::CO, ActionKind::Raise, 2.5),
            act(Position::BU, ActionKind::Fold, 0.0),
            act(Position::SB, ActionKind::Fold, 0.0),
            act(Position::BB, ActionKind::Raise, 10.0),
        ];
        let ctx = PreflopContext::from_actions(&log, Position::CO, 13.0);
        assert!(ctx.facing_3bet);
        assert_eq!(ctx.aggressor, Some(Position::BB));
        assert!(ctx.in_position);
        assert_eq!(ctx.players_in_pot, 2);
    }

    #[test]
    fn test_limpers_and_short_all_in() {
        let log = vec![
            act(Position::UTG, ActionKind::Call, 1.0),
            act(Position::MP, ActionKind::AllIn, 0.8),
        ];
        let ctx = PreflopContext::from_actions(&log, Position::CO, 3.3);
        assert!(ctx.facing_limp);
        assert_eq!(ctx.limpers, 2);
        assert!(!ctx.facing_all_in);
        assert!(ctx.in_position);

        let shove = vec![act(Position::HJ, ActionKind::AllIn, 15.0)];
        let ctx = PreflopContext::from_actions(&shove, Position::BB, 16.5);
        assert!(ctx.facing_open);
        assert!(ctx.facing_all_in);
        assert!(!ctx.in_position);
    }
}
