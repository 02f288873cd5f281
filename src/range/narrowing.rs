//! Seeding and narrowing opponent ranges from position and observed actions.
//!
//! Every factor is a deterministic function of the class strength, the action
//! and the bet size, so `narrow` may be applied any number of times per street.

use log::warn;

use crate::action::ActionKind;
use crate::cards::{HandClass, Street};
use crate::position::Position;
use crate::stats::{OpponentStats, PlayerType};
use crate::strength::strength_of;

use super::weighted::OpponentRange;

/// Classes kept at reduced weight when they appear in a 3-bet (blockers and suited connectors).
pub const THREE_BET_BLUFFS: [&str; 7] = ["A5s", "A4s", "A3s", "K9s", "76s", "65s", "54s"];

/// Strength needed to 4-bet or 5-bet for value.
const FOUR_BET_CUTOFF: u8 = 94;

/// Factor applied to classes that are implausible for the observed action.
const NEAR_ZERO: f64 = 0.02;

/// Betting situation in which an action was observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrowContext {
    pub street: Street,
    /// Position of the player who acted.
    pub position: Position,
    /// Bet or raise size as a fraction of the pot before the action.
    pub bet_fraction: f64,
    /// Raises already made on this street before the action.
    pub raises_before: u8,
}

impl NarrowContext {
    pub fn preflop(position: Position, raises_before: u8) -> Self {
        Self {
            street: Street::Preflop,
            position,
            bet_fraction: 0.0,
            raises_before,
        }
    }

    pub fn postflop(street: Street, position: Position, bet_fraction: f64) -> Self {
        Self {
            street,
            position,
            bet_fraction,
            raises_before: 0,
        }
    }
}

/// Opening range for a player in `position`.
///
/// Classes at or above the position's RFI cutoff, shifted by the player's
/// archetype, get weight 1.0 and the rest 0.0.
pub fn starting_range(position: Position, stats: Option<&OpponentStats>) -> OpponentRange {
    let delta = PlayerType::classify(stats).range_delta();
    let cutoff = (position.open_cutoff() as i32 + delta).clamp(0, 100);

    OpponentRange::empty().map(|class, _| {
        if strength_of(class) as i32 >= cutoff {
            1.0
        } else {
            0.0
        }
    })
}

/// Reweight `range` after the player took `action` in `ctx`.
pub fn narrow(range: &OpponentRange, action: ActionKind, ctx: &NarrowContext) -> OpponentRange {
    let narrowed = range.map(|class, weight| weight * narrow_factor(class, action, ctx));
    if narrowed.is_degenerate() && !range.is_degenerate() {
        warn!(
            "{} by {} eliminated every hand class; range is now degenerate",
            action, ctx.position
        );
    }
    narrowed
}

/// Rescale weights to sum to 1 (identity for an all-zero range).
pub fn normalize(range: &OpponentRange) -> OpponentRange {
    if range.is_degenerate() {
        warn!("normalizing a zero-weight range; leaving it unchanged");
    }
    range.normalize()
}

/// Multiplicative weight factor for one class.
pub fn narrow_factor(class: &HandClass, action: ActionKind, ctx: &NarrowContext) -> f64 {
    let strength = strength_of(class);
    if ctx.street == Street::Preflop {
        preflop_factor(class, strength, action, ctx)
    } else {
        postflop_factor(strength, action, ctx.bet_fraction)
    }
}

fn is_three_bet_bluff(class: &HandClass) -> bool {
    THREE_BET_BLUFFS
        .iter()
        .any(|name| HandClass::parse(name).as_ref() == Some(class))
}

fn preflop_factor(class: &HandClass, strength: u8, action: ActionKind, ctx: &NarrowContext) -> f64 {
    match action {
        ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn => match ctx.raises_before {
            0 => {
                if strength >= ctx.position.open_cutoff() {
                    1.0
                } else {
                    0.05
                }
            }
            1 => {
                if strength >= ctx.position.three_bet_cutoff() {
                    1.0
                } else if is_three_bet_bluff(class) {
                    0.35
                } else {
                    NEAR_ZERO
                }
            }
            _ => {
                if strength >= FOUR_BET_CUTOFF {
                    1.0
                } else {
                    NEAR_ZERO
                }
            }
        },
        ActionKind::Call => {
            if ctx.raises_before == 0 {
                // Limp: strong hands would have raised.
                if strength >= ctx.position.three_bet_cutoff() {
                    0.3
                } else {
                    1.0
                }
            } else if strength >= ctx.position.three_bet_cutoff() {
                0.15
            } else if strength < ctx.position.call_floor() {
                0.05
            } else {
                1.0
            }
        }
        ActionKind::Fold | ActionKind::Check => 1.0,
    }
}

fn postflop_factor(strength: u8, action: ActionKind, bet_fraction: f64) -> f64 {
    match action {
        ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn => {
            // 0 for a tiny bet, 1 at 150% pot and above.
            let polarization = (bet_fraction / 1.5).clamp(0.0, 1.0);
            match strength {
                85.. => 1.0,
                60..=84 => 0.85 - 0.55 * polarization,
                35..=59 => 0.55 - 0.40 * polarization,
                _ => 0.30 + 0.10 * polarization,
            }
        }
        ActionKind::Check => match strength {
            90.. => 0.3,
            80..=89 => 0.6,
            _ => 1.0,
        },
        ActionKind::Call => match strength {
            96.. => 0.4,
            50..=95 => 1.0,
            _ => 0.3,
        },
        ActionKind::Fold => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> HandClass {
        HandClass::parse(name).unwrap()
    }

    #[test]
    fn test_utg_starting_range() {
        let range = starting_range(Position::UTG, None);
        let cutoff = Position::UTG.open_cutoff();
        for wh in range.iter() {
            if strength_of(&wh.class) >= cutoff {
                assert_eq!(wh.weight, 1.0, "{}", wh.class);
            } else {
                assert_eq!(wh.weight, 0.0, "{}", wh.class);
            }
        }
        assert_eq!(range.weight(&class("AA")), 1.0);
        assert_eq!(range.weight(&class("72o")), 0.0);
    }

    #[test]
    fn test_station_starts_wider() {
        let station = OpponentStats {
            hands: 100,
            vpip_hands: 45,
            pfr_hands: 8,
            ..Default::default()
        };
        let default = starting_range(Position::CO, None);
        let wide = starting_range(Position::CO, Some(&station));
        assert!(wide.active_classes() > default.active_classes());
    }

    #[test]
    fn test_preflop_open_near_eliminates_weak_hands() {
        let ctx = NarrowContext::preflop(Position::UTG, 0);
        let range = narrow(&OpponentRange::uniform(), ActionKind::Raise, &ctx);
        assert_eq!(range.weight(&class("AA")), 1.0);
        assert!((range.weight(&class("72o")) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_three_bet_keeps_bluff_candidates() {
        let ctx = NarrowContext::preflop(Position::BU, 1);
        let range = narrow(&OpponentRange::uniform(), ActionKind::Raise, &ctx);
        assert_eq!(range.weight(&class("KK")), 1.0);
        assert!((range.weight(&class("A5s")) - 0.35).abs() < 1e-12);
        assert!((range.weight(&class("T8o")) - NEAR_ZERO).abs() < 1e-12);
    }

    #[test]
    fn test_flat_call_caps_range() {
        let ctx = NarrowContext::preflop(Position::CO, 1);
        let range = narrow(&OpponentRange::uniform(), ActionKind::Call, &ctx);
        assert!((range.weight(&class("AA")) - 0.15).abs() < 1e-12);
        assert!((range.weight(&class("72o")) - 0.05).abs() < 1e-12);
        assert_eq!(range.weight(&class("A9s")), 1.0);
    }

    #[test]
    fn test_big_bets_polarize() {
        let small = NarrowContext::postflop(Street::Flop, Position::BB, 0.33);
        let big = NarrowContext::postflop(Street::Flop, Position::BB, 1.5);
        let medium = class("K9o");
        let weak = class("72o");
        assert!(narrow_factor(&medium, ActionKind::Bet, &big) < narrow_factor(&medium, ActionKind::Bet, &small));
        assert!(narrow_factor(&weak, ActionKind::Bet, &big) > narrow_factor(&weak, ActionKind::Bet, &small));
        assert_eq!(narrow_factor(&class("AA"), ActionKind::Bet, &big), 1.0);
    }

    #[test]
    fn test_postflop_check_and_call() {
        let ctx = NarrowContext::postflop(Street::Turn, Position::BU, 0.0);
        assert!(narrow_factor(&class("AA"), ActionKind::Check, &ctx) < 1.0);
        assert_eq!(narrow_factor(&class("72o"), ActionKind::Check, &ctx), 1.0);
        assert_eq!(narrow_factor(&class("KJs"), ActionKind::Call, &ctx), 1.0);
        assert!(narrow_factor(&class("AA"), ActionKind::Call, &ctx) < 1.0);
        assert!(narrow_factor(&class("72o"), ActionKind::Call, &ctx) < 1.0);
    }

    #[test]
    fn test_narrow_is_repeatable_and_pure() {
        let ctx = NarrowContext::postflop(Street::River, Position::SB, 0.75);
        let start = starting_range(Position::SB, None);
        let once = narrow(&start, ActionKind::Bet, &ctx);
        let twice = narrow(&once, ActionKind::Bet, &ctx);
        assert_eq!(start, starting_range(Position::SB, None));
        assert!(twice.total_weight() <= once.total_weight());
    }
}
