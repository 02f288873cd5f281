//! Postflop expected-value search.
//!
//! Every feasible action is scored in big blinds and the best one wins. The
//! gap to the runner-up becomes the confidence, so near-ties come back with
//! low confidence.

use log::{debug, warn};

use crate::action::ActionKind;
use crate::cards::Street;
use crate::decision::{ActionEv, Decision};
use crate::error::{check_amount, CoreError};
use crate::stats::PlayerType;

use super::fold_equity::fold_equity;

/// Candidate bet and raise sizes as fractions of the pot.
pub const BET_FRACTIONS: [f64; 5] = [0.33, 0.5, 0.75, 1.0, 1.5];

/// All-in is considered once the stack is at most this many pots.
pub const ALL_IN_SPR: f64 = 2.0;

/// Inputs of one postflop decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostflopSpot {
    /// Hero's showdown equity in percent (0-100).
    pub equity: f64,
    /// Pot in BB, including any bet hero is facing.
    pub pot: f64,
    /// Hero's remaining stack in BB.
    pub stack: f64,
    /// Amount hero must call in BB (0 when not facing a bet).
    pub to_call: f64,
    pub street: Street,
    /// Archetype of the opponent, for fold equity.
    pub villain: PlayerType,
}

impl PostflopSpot {
    pub fn new(equity: f64, pot: f64, stack: f64, to_call: f64, street: Street) -> Self {
        Self {
            equity,
            pot,
            stack,
            to_call,
            street,
            villain: PlayerType::Unknown,
        }
    }

    /// Builder method: set the opponent archetype.
    pub fn against(mut self, villain: PlayerType) -> Self {
        self.villain = villain;
        self
    }

    pub fn facing_bet(&self) -> bool {
        self.to_call > 0.0
    }

    fn validate(&self) -> Result<(), CoreError> {
        check_amount("pot", self.pot)?;
        check_amount("stack", self.stack)?;
        check_amount("to_call", self.to_call)?;
        Ok(())
    }
}

/// Stateless EV engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostflopEngine;

impl PostflopEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score every feasible action, best first.
    pub fn evaluate(&self, spot: &PostflopSpot) -> Result<Vec<ActionEv>, CoreError> {
        spot.validate()?;
        let eq = spot.equity.clamp(0.0, 100.0) / 100.0;
        let pot = spot.pot;
        let mut candidates = Vec::new();

        // EV of putting `size` in with fold equity priced at `size / pot`.
        let aggressive_ev = |size: f64| {
            let fe = fold_equity(spot.villain, size / pot.max(f64::EPSILON), spot.street);
            let showdown = eq * (pot + 2.0 * size) - (1.0 - eq) * size;
            (fe, fe * pot + (1.0 - fe) * showdown)
        };

        if spot.facing_bet() {
            candidates.push(ActionEv {
                action: ActionKind::Fold,
                amount_bb: 0.0,
                ev_bb: 0.0,
                reasoning: "Fold gives up the pot".to_string(),
            });

            let call = spot.to_call.min(spot.stack);
            candidates.push(ActionEv {
                action: ActionKind::Call,
                amount_bb: call,
                ev_bb: eq * (pot + call) - (1.0 - eq) * call,
                reasoning: format!(
                    "Call {:.1}bb with {:.1}% equity (needs {:.1}%)",
                    call,
                    eq * 100.0,
                    100.0 * call / (pot + 2.0 * call).max(f64::EPSILON)
                ),
            });

            let behind = spot.stack - spot.to_call;
            let mut jam_offered = false;
            for fraction in BET_FRACTIONS {
                let raise = (fraction * pot).min(behind);
                if raise <= 0.0 {
                    continue;
                }
                if raise >= behind {
                    // Clipped to the stack; larger fractions clip to the same jam.
                    let (fe, ev) = aggressive_ev(behind);
                    candidates.push(ActionEv {
                        action: ActionKind::AllIn,
                        amount_bb: spot.stack,
                        ev_bb: ev,
                        reasoning: format!(
                            "Jam {:.1}bb ({:.0}% pot raise clipped to stack), fold equity {:.0}%",
                            spot.stack,
                            fraction * 100.0,
                            fe * 100.0
                        ),
                    });
                    jam_offered = true;
                    break;
                }
                let (fe, ev) = aggressive_ev(raise);
                candidates.push(ActionEv {
                    action: ActionKind::Raise,
                    amount_bb: spot.to_call + raise,
                    ev_bb: ev,
                    reasoning: format!(
                        "Raise {:.0}% pot ({:.1}bb over the call), fold equity {:.0}%",
                        fraction * 100.0,
                        raise,
                        fe * 100.0
                    ),
                });
            }

            if !jam_offered && behind > 0.0 && spot.stack <= ALL_IN_SPR * pot {
                let (fe, ev) = aggressive_ev(behind);
                candidates.push(ActionEv {
                    action: ActionKind::AllIn,
                    amount_bb: spot.stack,
                    ev_bb: ev,
                    reasoning: format!("Jam {:.1}bb, fold equity {:.0}%", spot.stack, fe * 100.0),
                });
            }
        } else {
            candidates.push(ActionEv {
                action: ActionKind::Check,
                amount_bb: 0.0,
                ev_bb: eq * pot,
                reasoning: format!("Check and realise {:.1}% equity", eq * 100.0),
            });

            let mut jam_offered = false;
            for fraction in BET_FRACTIONS {
                let bet = (fraction * pot).min(spot.stack);
                if bet <= 0.0 {
                    continue;
                }
                if bet >= spot.stack {
                    let (fe, ev) = aggressive_ev(spot.stack);
                    candidates.push(ActionEv {
                        action: ActionKind::AllIn,
                        amount_bb: spot.stack,
                        ev_bb: ev,
                        reasoning: format!(
                            "Jam {:.1}bb ({:.0}% pot bet clipped to stack), fold equity {:.0}%",
                            spot.stack,
                            fraction * 100.0,
                            fe * 100.0
                        ),
                    });
                    jam_offered = true;
                    break;
                }
                let (fe, ev) = aggressive_ev(bet);
                candidates.push(ActionEv {
                    action: ActionKind::Bet,
                    amount_bb: bet,
                    ev_bb: ev,
                    reasoning: format!(
                        "Bet {:.0}% pot ({:.1}bb), fold equity {:.0}%",
                        fraction * 100.0,
                        bet,
                        fe * 100.0
                    ),
                });
            }

            if !jam_offered && spot.stack > 0.0 && spot.stack <= ALL_IN_SPR * pot {
                let (fe, ev) = aggressive_ev(spot.stack);
                candidates.push(ActionEv {
                    action: ActionKind::AllIn,
                    amount_bb: spot.stack,
                    ev_bb: ev,
                    reasoning: format!("Jam {:.1}bb, fold equity {:.0}%", spot.stack, fe * 100.0),
                });
            }
        }

        candidates.retain(|c| c.ev_bb.is_finite());
        candidates.sort_by(|a, b| b.ev_bb.total_cmp(&a.ev_bb));
        Ok(candidates)
    }

    /// Pick the highest-EV action.
    pub fn decide(&self, spot: &PostflopSpot) -> Result<Decision, CoreError> {
        let candidates = self.evaluate(spot)?;

        let Some(best) = candidates.first() else {
            warn!("no postflop action could be scored; defaulting to check");
            return Ok(Decision::check(
                spot.street,
                0.0,
                "No action could be evaluated",
            ));
        };

        let confidence = match candidates.get(1) {
            Some(runner_up) => ((best.ev_bb - runner_up.ev_bb) / 3.0).clamp(0.1, 0.95),
            None => 0.95,
        };

        debug!(
            "postflop {} equity {:.1}% pot {:.1} stack {:.1} to call {:.1} vs {}: {} {:.1}bb (EV {:.2}, {} candidates)",
            spot.street,
            spot.equity,
            spot.pot,
            spot.stack,
            spot.to_call,
            spot.villain,
            best.action,
            best.amount_bb,
            best.ev_bb,
            candidates.len()
        );

        Ok(Decision::new(
            spot.street,
            best.action,
            best.amount_bb,
            confidence,
            format!("{} (EV {:+.2}bb)", best.reasoning, best.ev_bb),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_river_hand_bets() {
        let spot = PostflopSpot::new(80.0, 10.0, 40.0, 0.0, Street::River);
        let decision = PostflopEngine::new().decide(&spot).unwrap();
        assert_eq!(decision.action, ActionKind::Bet);
        assert!(decision.amount_bb > 0.0 && decision.amount_bb < 40.0);

        let evs = PostflopEngine::new().evaluate(&spot).unwrap();
        let check = evs.iter().find(|e| e.action == ActionKind::Check).unwrap();
        assert!((check.ev_bb - 8.0).abs() < 1e-9);
        assert!(evs[0].ev_bb > check.ev_bb);
    }

    #[test]
    fn test_facing_bet_candidates() {
        let spot = PostflopSpot::new(10.0, 15.0, 100.0, 5.0, Street::Turn).against(PlayerType::CallingStation);
        let evs = PostflopEngine::new().evaluate(&spot).unwrap();
        assert!(evs.iter().any(|e| e.action == ActionKind::Fold && e.ev_bb == 0.0));
        assert!(evs.iter().all(|e| e.action != ActionKind::Check && e.action != ActionKind::Bet));
        // No all-in: stack is far more than two pots.
        assert!(evs.iter().all(|e| e.action != ActionKind::AllIn));
        assert!(evs.windows(2).all(|w| w[0].ev_bb >= w[1].ev_bb));

        // 10% equity: calling 5 into 15 loses money and ranks below folding.
        let call = evs.iter().position(|e| e.action == ActionKind::Call).unwrap();
        let fold = evs.iter().position(|e| e.action == ActionKind::Fold).unwrap();
        assert!((evs[call].ev_bb + 2.5).abs() < 1e-9);
        assert!(fold < call);
        assert_ne!(PostflopEngine::new().decide(&spot).unwrap().action, ActionKind::Call);
    }

    #[test]
    fn test_all_in_offered_when_shallow() {
        let spot = PostflopSpot::new(70.0, 20.0, 30.0, 0.0, Street::Flop);
        let evs = PostflopEngine::new().evaluate(&spot).unwrap();
        let all_in = evs.iter().find(|e| e.action == ActionKind::AllIn).unwrap();
        assert_eq!(all_in.amount_bb, 30.0);
        // 150% pot (30bb) clips to the stack and becomes the only jam.
        assert_eq!(evs.iter().filter(|e| e.action == ActionKind::Bet).count(), 4);
        assert_eq!(evs.iter().filter(|e| e.action == ActionKind::AllIn).count(), 1);
    }

    #[test]
    fn test_oversized_raise_clips_to_jam() {
        // 14bb behind: the 150% pot raise (15bb) clips to a jam even though
        // the stack is more than two pots.
        let spot = PostflopSpot::new(95.0, 10.0, 22.0, 8.0, Street::River);
        let evs = PostflopEngine::new().evaluate(&spot).unwrap();

        let jams: Vec<_> = evs.iter().filter(|e| e.action == ActionKind::AllIn).collect();
        assert_eq!(jams.len(), 1);
        assert_eq!(jams[0].amount_bb, 22.0);
        assert_eq!(evs.iter().filter(|e| e.action == ActionKind::Raise).count(), 4);
        assert!(evs.iter().all(|e| e.amount_bb <= spot.stack));

        let decision = PostflopEngine::new().decide(&spot).unwrap();
        assert_eq!(decision.action, ActionKind::AllIn);
        assert_eq!(decision.amount_bb, 22.0);
    }

    #[test]
    fn test_empty_pot_has_no_zero_bets() {
        let evs = PostflopEngine::new()
            .evaluate(&PostflopSpot::new(60.0, 0.0, 50.0, 0.0, Street::Flop))
            .unwrap();
        assert_eq!(evs.len(), 1);
        assert_eq!(evs[0].action, ActionKind::Check);
    }

    #[test]
    fn test_confidence_bounds() {
        let engine = PostflopEngine::new();
        let near_tie = engine
            .decide(&PostflopSpot::new(50.0, 0.3, 100.0, 0.0, Street::Flop))
            .unwrap();
        assert!((near_tie.confidence - 0.1).abs() < 1e-9);

        let no_chips = engine
            .decide(&PostflopSpot::new(60.0, 10.0, 0.0, 0.0, Street::River))
            .unwrap();
        assert_eq!(no_chips.action, ActionKind::Check);
    }

    #[test]
    fn test_degenerate_equity_defaults_to_check() {
        let decision = PostflopEngine::new()
            .decide(&PostflopSpot::new(f64::NAN, 10.0, 50.0, 0.0, Street::Flop))
            .unwrap();
        assert_eq!(decision.action, ActionKind::Check);
        assert_eq!(decision.confidence, 0.0);
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let engine = PostflopEngine::new();
        assert!(matches!(
            engine.decide(&PostflopSpot::new(50.0, -1.0, 50.0, 0.0, Street::Flop)),
            Err(CoreError::NegativeAmount { what: "pot", .. })
        ));
        assert!(matches!(
            engine.evaluate(&PostflopSpot::new(50.0, 10.0, -5.0, 0.0, Street::Flop)),
            Err(CoreError::NegativeAmount { what: "stack", .. })
        ));
    }
}
