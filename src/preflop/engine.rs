//! Preflop decision engine.
//!
//! [`PreflopSituation::classify`] maps a context to exactly one situation and
//! [`PreflopEngine::decide`] dispatches to one pure handler per situation.

use log::{debug, warn};
use rand::Rng;
use std::fmt;

use crate::action::ActionKind;
use crate::cards::{HandClass, HoleCards, Street};
use crate::config::{ConfigError, PreflopConfig};
use crate::decision::Decision;
use crate::error::{check_amount, CoreError};
use crate::position::Position;
use crate::stats::ExploitAdjustment;
use crate::strength::strength_of;

use super::context::PreflopContext;
use super::push_fold::{call_shove_threshold, shove_threshold, StackBucket, SHORT_OPEN_BB};
use super::thresholds::*;

/// Confidence assigned to a mixed-strategy bluff.
const BLUFF_CONFIDENCE: f64 = 0.6;

/// Which branch of the preflop policy applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreflopSituation {
    /// Effective stack below the push/fold threshold. Overrides everything else.
    ShortStack(StackBucket),
    /// Unopened pot, or only limpers.
    Rfi,
    FacingOpen,
    Facing3Bet,
    Facing4Bet,
    /// Anything the policy has no answer for (5-bet pots, a walk in the BB).
    Unhandled(&'static str),
}

impl PreflopSituation {
    pub fn classify(ctx: &PreflopContext, effective_stack: f64, short_stack_bb: f64) -> Self {
        if effective_stack < short_stack_bb {
            return PreflopSituation::ShortStack(StackBucket::from_stack(effective_stack));
        }
        match ctx.raise_count {
            0 if ctx.first_in && ctx.hero == Position::BB => {
                PreflopSituation::Unhandled("pot folded to the big blind")
            }
            0 => PreflopSituation::Rfi,
            1 => PreflopSituation::FacingOpen,
            2 => PreflopSituation::Facing3Bet,
            3 => PreflopSituation::Facing4Bet,
            _ => PreflopSituation::Unhandled("5-bet or larger pot"),
        }
    }
}

impl fmt::Display for PreflopSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflopSituation::ShortStack(bucket) => write!(f, "short stack ({})", bucket),
            PreflopSituation::Rfi => write!(f, "RFI"),
            PreflopSituation::FacingOpen => write!(f, "facing open"),
            PreflopSituation::Facing3Bet => write!(f, "facing 3-bet"),
            PreflopSituation::Facing4Bet => write!(f, "facing 4-bet"),
            PreflopSituation::Unhandled(why) => write!(f, "unhandled ({})", why),
        }
    }
}

/// Confidence that grows with the distance from the deciding threshold.
fn margin_confidence(strength: u8, threshold: i32) -> f64 {
    let margin = (strength as i32 - threshold).unsigned_abs() as f64;
    (0.55 + margin / 40.0).clamp(0.55, 0.95)
}

/// Hand facts shared by every handler.
struct Spot<'a> {
    class: HandClass,
    strength: u8,
    ctx: &'a PreflopContext,
    stack: f64,
    exploit: &'a ExploitAdjustment,
}

impl Spot<'_> {
    fn raise(&self, amount: f64, threshold: i32, why: String) -> Decision {
        let confidence = margin_confidence(self.strength, threshold);
        if amount >= self.stack {
            Decision::new(Street::Preflop, ActionKind::AllIn, self.stack, confidence, why)
        } else {
            Decision::new(Street::Preflop, ActionKind::Raise, amount, confidence, why)
        }
    }

    fn call(&self, threshold: i32, why: String) -> Decision {
        let confidence = margin_confidence(self.strength, threshold);
        if self.ctx.last_raise >= self.stack {
            Decision::new(Street::Preflop, ActionKind::AllIn, self.stack, confidence, why)
        } else {
            Decision::new(Street::Preflop, ActionKind::Call, self.ctx.last_raise, confidence, why)
        }
    }

    fn fold(&self, threshold: i32, why: String) -> Decision {
        Decision::fold(Street::Preflop, margin_confidence(self.strength, threshold), why)
    }

    fn shove(&self, threshold: i32, why: String) -> Decision {
        Decision::new(
            Street::Preflop,
            ActionKind::AllIn,
            self.stack,
            margin_confidence(self.strength, threshold),
            why,
        )
    }
}

/// Threshold-driven preflop policy.
#[derive(Debug, Clone)]
pub struct PreflopEngine {
    config: PreflopConfig,
    short_stack_bb: f64,
}

impl Default for PreflopEngine {
    fn default() -> Self {
        Self {
            config: PreflopConfig::default(),
            short_stack_bb: 25.0,
        }
    }
}

impl PreflopEngine {
    /// Create an engine, rejecting invalid sizes or frequencies.
    pub fn new(config: PreflopConfig, short_stack_bb: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        if !(short_stack_bb >= 0.0) {
            return Err(ConfigError::InvalidAmount("short_stack_bb", short_stack_bb));
        }
        Ok(Self {
            config,
            short_stack_bb,
        })
    }

    /// Recommend a preflop action.
    ///
    /// `effective_stack` is hero's stack in BB. Mixed-strategy bluffs draw
    /// from `rng`; every other branch is deterministic.
    ///
    /// # Errors
    /// Returns an error if `effective_stack` is negative or NaN.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        hole: &HoleCards,
        ctx: &PreflopContext,
        effective_stack: f64,
        exploit: &ExploitAdjustment,
        rng: &mut R,
    ) -> Result<Decision, CoreError> {
        check_amount("stack", effective_stack)?;
        let class = HandClass::of(hole);
        let spot = Spot {
            class,
            strength: strength_of(&class),
            ctx,
            stack: effective_stack,
            exploit,
        };
        let situation = PreflopSituation::classify(ctx, effective_stack, self.short_stack_bb);

        let decision = match situation {
            PreflopSituation::ShortStack(bucket) => self.short_stack(&spot, bucket),
            PreflopSituation::Rfi => self.raise_first_in(&spot),
            PreflopSituation::FacingOpen if ctx.hero == Position::BB => self.big_blind_defense(&spot),
            PreflopSituation::FacingOpen => self.facing_open(&spot, rng),
            PreflopSituation::Facing3Bet => self.facing_three_bet(&spot, rng),
            PreflopSituation::Facing4Bet => self.facing_four_bet(&spot),
            PreflopSituation::Unhandled(why) => {
                warn!("no preflop policy for {}: {}", ctx, why);
                let fallback = if ctx.first_in { ActionKind::Check } else { ActionKind::Fold };
                Decision::unhandled(Street::Preflop, fallback, format!("Unhandled spot: {}", why))
            }
        };

        debug!(
            "preflop {} [{}] strength {} in {}: {}",
            class, situation, spot.strength, ctx, decision
        );
        Ok(decision)
    }

    fn multiway(&self, ctx: &PreflopContext) -> i32 {
        self.config.multiway_penalty * ctx.extra_players()
    }

    fn bluff_frequency(&self, base: f64, exploit: &ExploitAdjustment) -> f64 {
        let freq = if exploit.bluff_more { base * 1.5 } else { base };
        freq.clamp(0.0, 1.0)
    }

    fn raise_first_in(&self, spot: &Spot) -> Decision {
        let ctx = spot.ctx;
        let penalty = self.multiway(ctx);
        let iso = self.config.limper_increment_bb * ctx.limpers as f64;

        if ctx.hero == Position::BB {
            // Only limpers: free option.
            let threshold = shifted(BB_ISOLATE, spot.exploit.open_delta + penalty);
            if spot.strength as i32 >= threshold {
                let size = self.config.sb_open_size_bb + iso;
                return spot.raise(
                    size,
                    threshold,
                    format!("{} strong enough to raise {} limper(s) from the BB", spot.class, ctx.limpers),
                );
            }
            return Decision::check(
                Street::Preflop,
                margin_confidence(spot.strength, threshold),
                format!("{} checks the option behind limpers", spot.class),
            );
        }

        let threshold = shifted(ctx.hero.open_cutoff(), spot.exploit.open_delta + penalty);
        if spot.strength as i32 >= threshold {
            let base = if ctx.hero == Position::SB {
                self.config.sb_open_size_bb
            } else {
                self.config.open_size_bb
            };
            let reason = if ctx.limpers > 0 {
                format!(
                    "{} ({}) isolates {} limper(s) from {} (threshold {})",
                    spot.class, spot.strength, ctx.limpers, ctx.hero, threshold
                )
            } else {
                format!(
                    "{} ({}) is inside the {} opening range (threshold {})",
                    spot.class, spot.strength, ctx.hero, threshold
                )
            };
            return spot.raise(base + iso, threshold, reason);
        }

        if ctx.hero == Position::SB && spot.class.suited && spot.strength >= SB_COMPLETE_SUITED {
            return Decision::new(
                Street::Preflop,
                ActionKind::Call,
                1.0,
                margin_confidence(spot.strength, SB_COMPLETE_SUITED as i32),
                format!("{} completes from the small blind", spot.class),
            );
        }

        spot.fold(
            threshold,
            format!(
                "{} ({}) is below the {} opening threshold {}",
                spot.class, spot.strength, ctx.hero, threshold
            ),
        )
    }

    fn three_bet_size(&self, ctx: &PreflopContext) -> f64 {
        let multiplier = if ctx.in_position {
            self.config.three_bet_ip_multiplier
        } else {
            self.config.three_bet_oop_multiplier
        };
        ctx.last_raise * (multiplier + ctx.callers as f64)
    }

    fn facing_open<R: Rng + ?Sized>(&self, spot: &Spot, rng: &mut R) -> Decision {
        let ctx = spot.ctx;
        let opener = ctx.aggressor.unwrap_or(Position::UTG);
        let penalty = self.multiway(ctx);

        let value = shifted(value_three_bet(opener), spot.exploit.three_bet_delta + penalty);
        if spot.strength as i32 >= value {
            return spot.raise(
                self.three_bet_size(ctx),
                value,
                format!("{} ({}) 3-bets {} for value (threshold {})", spot.class, spot.strength, opener, value),
            );
        }

        if ctx.players_in_pot <= MAX_BLUFF_PLAYERS
            && is_three_bet_bluff(&spot.class)
            && rng.gen_bool(self.bluff_frequency(self.config.three_bet_bluff_frequency, spot.exploit))
        {
            let mut decision = spot.raise(
                self.three_bet_size(ctx),
                value,
                format!("{} 3-bets {} as a bluff", spot.class, opener),
            );
            decision.confidence = BLUFF_CONFIDENCE;
            return decision;
        }

        let call = shifted(
            call_open(opener),
            position_shift(ctx.in_position) + spot.exploit.call_delta + penalty,
        );
        if spot.strength as i32 >= call {
            return spot.call(
                call,
                format!(
                    "{} ({}) flats {}'s open {} (threshold {})",
                    spot.class,
                    spot.strength,
                    opener,
                    if ctx.in_position { "in position" } else { "out of position" },
                    call
                ),
            );
        }

        spot.fold(
            call,
            format!("{} ({}) is too weak against a {} open (needs {})", spot.class, spot.strength, opener, call),
        )
    }

    fn big_blind_defense(&self, spot: &Spot) -> Decision {
        let ctx = spot.ctx;
        let opener = ctx.aggressor.unwrap_or(Position::UTG);
        let penalty = self.multiway(ctx);

        let raise = shifted(bb_three_bet(opener), spot.exploit.three_bet_delta + penalty);
        if spot.strength as i32 >= raise {
            return spot.raise(
                self.three_bet_size(ctx),
                raise,
                format!("{} ({}) 3-bets {} from the BB", spot.class, spot.strength, opener),
            );
        }

        let oversize = ((ctx.last_raise - self.config.open_size_bb).max(0.0) * BB_DEFEND_PER_BB).round() as i32;
        let defend = shifted(bb_defend(opener), oversize + spot.exploit.call_delta + penalty);
        if spot.strength as i32 >= defend {
            return spot.call(
                defend,
                format!(
                    "{} ({}) defends the BB against {} at {:.1}bb (threshold {})",
                    spot.class, spot.strength, opener, ctx.last_raise, defend
                ),
            );
        }

        spot.fold(
            defend,
            format!("{} ({}) cannot defend the BB against {} (needs {})", spot.class, spot.strength, opener, defend),
        )
    }

    fn facing_three_bet<R: Rng + ?Sized>(&self, spot: &Spot, rng: &mut R) -> Decision {
        let ctx = spot.ctx;
        let penalty = self.multiway(ctx);
        let size = ctx.last_raise * self.config.four_bet_multiplier;

        let value = shifted(FOUR_BET_VALUE, spot.exploit.three_bet_delta + penalty);
        if spot.strength as i32 >= value {
            return spot.raise(
                size,
                value,
                format!("{} ({}) 4-bets for value", spot.class, spot.strength),
            );
        }

        if ctx.players_in_pot <= MAX_BLUFF_PLAYERS
            && is_four_bet_bluff(&spot.class)
            && rng.gen_bool(self.bluff_frequency(self.config.four_bet_bluff_frequency, spot.exploit))
        {
            let mut decision = spot.raise(size, value, format!("{} 4-bets as a blocker bluff", spot.class));
            decision.confidence = BLUFF_CONFIDENCE;
            return decision;
        }

        let base = if ctx.in_position { CALL_THREE_BET_IP } else { CALL_THREE_BET_OOP };
        let call = shifted(base, spot.exploit.call_delta + penalty);
        if spot.strength as i32 >= call {
            return spot.call(
                call,
                format!("{} ({}) calls the 3-bet (threshold {})", spot.class, spot.strength, call),
            );
        }

        spot.fold(
            call,
            format!("{} ({}) folds to the 3-bet (needs {})", spot.class, spot.strength, call),
        )
    }

    fn facing_four_bet(&self, spot: &Spot) -> Decision {
        let shove = FOUR_BET_SHOVE as i32;
        let call = FOUR_BET_CALL as i32;
        if spot.strength as i32 >= shove {
            return spot.shove(shove, format!("{} ({}) jams over the 4-bet", spot.class, spot.strength));
        }
        if spot.strength as i32 >= call {
            return spot.call(call, format!("{} ({}) calls the 4-bet", spot.class, spot.strength));
        }
        spot.fold(call, format!("{} ({}) folds to the 4-bet", spot.class, spot.strength))
    }

    fn short_stack(&self, spot: &Spot, bucket: StackBucket) -> Decision {
        let ctx = spot.ctx;
        let penalty = self.multiway(ctx);

        if ctx.raise_count > 0 {
            let threshold = shifted(
                call_shove_threshold(bucket, ctx.hero),
                position_shift(ctx.in_position) + spot.exploit.call_delta + penalty,
            );
            if spot.strength as i32 >= threshold {
                let why = if ctx.facing_all_in {
                    format!("{} ({}) calls the shove at {} (threshold {})", spot.class, spot.strength, bucket, threshold)
                } else {
                    format!("{} ({}) re-shoves over the raise at {} (threshold {})", spot.class, spot.strength, bucket, threshold)
                };
                if ctx.facing_all_in && ctx.last_raise < spot.stack {
                    return spot.call(threshold, why);
                }
                return spot.shove(threshold, why);
            }
            return spot.fold(
                threshold,
                format!("{} ({}) folds to the raise at {} (needs {})", spot.class, spot.strength, bucket, threshold),
            );
        }

        if ctx.first_in && ctx.hero == Position::BB {
            warn!("short-stacked big blind was given a walk");
            return Decision::unhandled(Street::Preflop, ActionKind::Check, "Pot folded to the big blind");
        }

        let threshold = shifted(shove_threshold(bucket, ctx.hero), spot.exploit.open_delta + penalty);
        if spot.strength as i32 >= threshold {
            if bucket.raises_instead_of_shoving() {
                let size = SHORT_OPEN_BB + self.config.limper_increment_bb * ctx.limpers as f64;
                return spot.raise(
                    size,
                    threshold,
                    format!("{} ({}) raise/folds at {} from {} (threshold {})", spot.class, spot.strength, bucket, ctx.hero, threshold),
                );
            }
            return spot.shove(
                threshold,
                format!("{} ({}) shoves {:.1}bb from {} (threshold {})", spot.class, spot.strength, spot.stack, ctx.hero, threshold),
            );
        }

        if ctx.hero == Position::BB {
            return Decision::check(
                Street::Preflop,
                margin_confidence(spot.strength, threshold),
                format!("{} checks the option short-stacked", spot.class),
            );
        }

        spot.fold(
            threshold,
            format!("{} ({}) is outside the {} {} shoving range (needs {})", spot.class, spot.strength, bucket, ctx.hero, threshold),
        )
    }
}
