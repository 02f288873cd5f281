//! Opponent statistics and the exploit profile derived from them.
//!
//! The decision core only reads these aggregates; collecting and persisting
//! them across sessions belongs to the calling application.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggression factor reported when an opponent has never called but has bet or raised.
pub const AF_SATURATED: f64 = 99.0;

/// Hands required before an opponent is classified into an archetype.
pub const MIN_HANDS_FOR_TYPE: u32 = 15;

/// Hands required before exploit adjustments are applied.
pub const MIN_HANDS_FOR_EXPLOIT: u32 = 20;

/// Read-only snapshot of one opponent's tracked aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentStats {
    /// Total hands observed.
    pub hands: u32,
    /// Hands that folded around to this player's big blind.
    pub walks: u32,
    /// Hands where the player voluntarily put money in preflop.
    pub vpip_hands: u32,
    /// Hands where the player raised preflop.
    pub pfr_hands: u32,
    /// Preflop 3-bets made.
    pub three_bets: u32,
    /// Opportunities to 3-bet.
    pub three_bet_opportunities: u32,
    /// Postflop bets plus raises.
    pub bets_raises: u32,
    /// Postflop calls.
    pub calls: u32,
}

impl OpponentStats {
    /// Hands in which the player had a real decision (walks excluded).
    fn voluntary_base(&self) -> u32 {
        self.hands.saturating_sub(self.walks)
    }

    /// VPIP as a percentage (0-100).
    pub fn vpip(&self) -> f64 {
        percentage(self.vpip_hands, self.voluntary_base())
    }

    /// PFR as a percentage (0-100).
    pub fn pfr(&self) -> f64 {
        percentage(self.pfr_hands, self.voluntary_base())
    }

    /// 3-bet frequency as a percentage of opportunities (0-100).
    pub fn three_bet_pct(&self) -> f64 {
        percentage(self.three_bets, self.three_bet_opportunities)
    }

    /// Postflop aggression factor: (bets + raises) / calls.
    pub fn aggression_factor(&self) -> f64 {
        if self.calls == 0 {
            if self.bets_raises > 0 {
                AF_SATURATED
            } else {
                0.0
            }
        } else {
            self.bets_raises as f64 / self.calls as f64
        }
    }
}

fn percentage(count: u32, base: u32) -> f64 {
    if base == 0 {
        0.0
    } else {
        100.0 * count as f64 / base as f64
    }
}

/// Opponent archetype, derived from VPIP / PFR / AF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerType {
    /// Very tight: VPIP below 18%.
    Nit,
    /// Loose and passive preflop: VPIP above 35% with PFR below 12%.
    CallingStation,
    /// Loose-aggressive: VPIP above 30% and PFR above 22%.
    Lag,
    /// Loose with a low postflop aggression factor.
    LoosePassive,
    /// Tight-aggressive regular.
    Tag,
    /// Not enough data, or no clear pattern.
    Unknown,
}

impl PlayerType {
    /// Classify an opponent; `None` or a small sample is `Unknown`.
    pub fn classify(stats: Option<&OpponentStats>) -> Self {
        let Some(stats) = stats else {
            return PlayerType::Unknown;
        };
        if stats.hands < MIN_HANDS_FOR_TYPE {
            return PlayerType::Unknown;
        }

        let vpip = stats.vpip();
        let pfr = stats.pfr();
        let af = stats.aggression_factor();

        if vpip < 18.0 {
            PlayerType::Nit
        } else if vpip > 35.0 && pfr < 12.0 {
            PlayerType::CallingStation
        } else if vpip > 30.0 && pfr > 22.0 {
            PlayerType::Lag
        } else if vpip > 28.0 && af < 1.5 {
            PlayerType::LoosePassive
        } else if vpip <= 28.0 && pfr >= 14.0 {
            PlayerType::Tag
        } else {
            PlayerType::Unknown
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerType::Nit => "nit",
            PlayerType::CallingStation => "calling station",
            PlayerType::Lag => "LAG",
            PlayerType::LoosePassive => "loose-passive",
            PlayerType::Tag => "TAG",
            PlayerType::Unknown => "unknown",
        }
    }

    /// Percentile shift applied to this player's opening range.
    ///
    /// Positive tightens (fewer hands), negative widens.
    pub fn range_delta(&self) -> i32 {
        match self {
            PlayerType::Nit => 6,
            PlayerType::CallingStation => -20,
            PlayerType::Lag => -12,
            _ => 0,
        }
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Threshold shifts used to exploit a specific opponent.
///
/// Deltas are in strength percentile points and are added to the engine's
/// cutoffs: negative values make hero play more hands, positive fewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExploitAdjustment {
    pub open_delta: i32,
    pub three_bet_delta: i32,
    pub call_delta: i32,
    /// Bluff more often (opponent over-folds).
    pub bluff_more: bool,
    /// Value-bet thinner (opponent over-calls).
    pub value_wider: bool,
}

impl ExploitAdjustment {
    /// No adjustment.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Derive adjustments from an opponent's tracked statistics.
    pub fn from_stats(stats: Option<&OpponentStats>) -> Self {
        let Some(s) = stats else {
            return Self::neutral();
        };
        if s.hands < MIN_HANDS_FOR_EXPLOIT {
            return Self::neutral();
        }

        let mut adj = match PlayerType::classify(Some(s)) {
            // Steal wider; respect their raises.
            PlayerType::Nit => Self {
                open_delta: -5,
                three_bet_delta: 3,
                call_delta: 4,
                bluff_more: true,
                value_wider: false,
            },
            // Isolate for value, never bluff.
            PlayerType::CallingStation => Self {
                open_delta: 2,
                three_bet_delta: -3,
                call_delta: -3,
                bluff_more: false,
                value_wider: true,
            },
            // Fight back against wide opens.
            PlayerType::Lag => Self {
                open_delta: 2,
                three_bet_delta: -5,
                call_delta: -3,
                bluff_more: false,
                value_wider: true,
            },
            PlayerType::LoosePassive => Self {
                open_delta: -2,
                three_bet_delta: -2,
                call_delta: -2,
                bluff_more: false,
                value_wider: true,
            },
            PlayerType::Tag | PlayerType::Unknown => Self::neutral(),
        };

        // Frequent 3-bettors punish loose opens.
        if s.three_bet_opportunities >= 10 && s.three_bet_pct() > 10.0 {
            adj.open_delta += 3;
        }

        adj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(hands: u32, vpip: u32, pfr: u32, bets: u32, calls: u32) -> OpponentStats {
        OpponentStats {
            hands,
            vpip_hands: vpip,
            pfr_hands: pfr,
            bets_raises: bets,
            calls,
            ..Default::default()
        }
    }

    #[test]
    fn test_derived_percentages() {
        let s = OpponentStats {
            hands: 110,
            walks: 10,
            vpip_hands: 25,
            pfr_hands: 20,
            three_bets: 3,
            three_bet_opportunities: 30,
            ..Default::default()
        };
        assert!((s.vpip() - 25.0).abs() < 1e-9);
        assert!((s.pfr() - 20.0).abs() < 1e-9);
        assert!((s.three_bet_pct() - 10.0).abs() < 1e-9);
        assert_eq!(OpponentStats::default().vpip(), 0.0);
    }

    #[test]
    fn test_aggression_factor_saturates() {
        assert_eq!(stats(50, 10, 5, 8, 0).aggression_factor(), AF_SATURATED);
        assert_eq!(stats(50, 10, 5, 0, 0).aggression_factor(), 0.0);
        assert!((stats(50, 10, 5, 6, 3).aggression_factor() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_classify() {
        assert_eq!(PlayerType::classify(None), PlayerType::Unknown);
        assert_eq!(PlayerType::classify(Some(&stats(10, 1, 1, 0, 0))), PlayerType::Unknown);
        assert_eq!(PlayerType::classify(Some(&stats(100, 12, 10, 5, 5))), PlayerType::Nit);
        assert_eq!(
            PlayerType::classify(Some(&stats(100, 45, 8, 5, 20))),
            PlayerType::CallingStation
        );
        assert_eq!(PlayerType::classify(Some(&stats(100, 38, 28, 30, 10))), PlayerType::Lag);
        assert_eq!(
            PlayerType::classify(Some(&stats(100, 32, 15, 5, 10))),
            PlayerType::LoosePassive
        );
        assert_eq!(PlayerType::classify(Some(&stats(100, 22, 18, 20, 10))), PlayerType::Tag);
    }

    #[test]
    fn test_exploit_adjustment() {
        assert_eq!(ExploitAdjustment::from_stats(None), ExploitAdjustment::neutral());

        let nit = ExploitAdjustment::from_stats(Some(&stats(100, 12, 10, 5, 5)));
        assert!(nit.open_delta < 0);
        assert!(nit.bluff_more);

        let station = ExploitAdjustment::from_stats(Some(&stats(100, 45, 8, 5, 20)));
        assert!(station.value_wider);
        assert!(!station.bluff_more);

        let mut three_better = stats(100, 22, 18, 20, 10);
        three_better.three_bets = 5;
        three_better.three_bet_opportunities = 20;
        assert_eq!(ExploitAdjustment::from_stats(Some(&three_better)).open_delta, 3);
    }
}
