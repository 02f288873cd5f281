//! Fold-equity model.

use crate::cards::Street;
use crate::stats::{OpponentStats, PlayerType};

pub const MIN_FOLD_EQUITY: f64 = 0.05;
pub const MAX_FOLD_EQUITY: f64 = 0.85;

/// How often each archetype folds to a pot-sized-ish bet on the flop.
pub fn base_fold_rate(player_type: PlayerType) -> f64 {
    match player_type {
        PlayerType::Nit => 0.65,
        PlayerType::CallingStation => 0.25,
        PlayerType::Tag => 0.50,
        PlayerType::Lag => 0.40,
        PlayerType::LoosePassive => 0.30,
        PlayerType::Unknown => 0.45,
    }
}

/// Larger bets fold out more hands; sizes above 2x pot add nothing.
fn size_factor(bet_fraction: f64) -> f64 {
    0.8 + 0.4 * bet_fraction.clamp(0.0, 2.0)
}

/// Ranges are weaker and more capped on later streets.
fn street_factor(street: Street) -> f64 {
    match street {
        Street::Preflop | Street::Flop => 1.0,
        Street::Turn => 1.08,
        Street::River => 1.15,
    }
}

/// Probability that the opponent folds to a bet of `bet_fraction` x pot.
pub fn fold_equity(player_type: PlayerType, bet_fraction: f64, street: Street) -> f64 {
    let fe = base_fold_rate(player_type) * size_factor(bet_fraction) * street_factor(street);
    fe.clamp(MIN_FOLD_EQUITY, MAX_FOLD_EQUITY)
}

/// [`fold_equity`] for an opponent described by raw statistics.
pub fn fold_equity_against(stats: Option<&OpponentStats>, bet_fraction: f64, street: Street) -> f64 {
    fold_equity(PlayerType::classify(stats), bet_fraction, street)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded() {
        for player_type in [
            PlayerType::Nit,
            PlayerType::CallingStation,
            PlayerType::Tag,
            PlayerType::Lag,
            PlayerType::LoosePassive,
            PlayerType::Unknown,
        ] {
            for fraction in [0.0, 0.33, 1.0, 1.5, 5.0] {
                for street in [Street::Flop, Street::Turn, Street::River] {
                    let fe = fold_equity(player_type, fraction, street);
                    assert!((MIN_FOLD_EQUITY..=MAX_FOLD_EQUITY).contains(&fe));
                }
            }
        }
    }

    #[test]
    fn test_scales_with_size_and_street() {
        let small = fold_equity(PlayerType::Unknown, 0.33, Street::Flop);
        let big = fold_equity(PlayerType::Unknown, 1.0, Street::Flop);
        let river = fold_equity(PlayerType::Unknown, 1.0, Street::River);
        assert!(small < big);
        assert!(big < river);
        // Pot-sized flop bet against an unknown: 0.45 * 1.2.
        assert!((big - 0.54).abs() < 1e-9);
    }

    #[test]
    fn test_archetypes() {
        assert!(
            fold_equity(PlayerType::Nit, 0.5, Street::Turn)
                > fold_equity(PlayerType::CallingStation, 0.5, Street::Turn)
        );
        assert_eq!(
            fold_equity_against(None, 0.5, Street::Flop),
            fold_equity(PlayerType::Unknown, 0.5, Street::Flop)
        );
    }
}
