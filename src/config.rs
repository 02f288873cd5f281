//! Engine configuration.
//!
//! Every value defaults to the calibrated constant the engines were tuned
//! with; a JSON file only needs to list the fields it overrides.
//!
//! # Example
//! ```
//! use holdem_advisor::config::EngineConfig;
//!
//! let config = EngineConfig::default().with_trials(1500).with_seed(7);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.simulation.seed, Some(7));
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration for the decision core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Monte Carlo equity settings.
    pub simulation: SimulationConfig,
    /// Preflop sizing and mixing frequencies.
    pub preflop: PreflopConfig,
    /// Effective stack (BB) below which preflop play switches to push/fold.
    pub short_stack_bb: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            preflop: PreflopConfig::default(),
            short_stack_bb: 25.0,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the number of equity trials.
    pub fn with_trials(mut self, trials: u32) -> Self {
        self.simulation.trials = trials;
        self
    }

    /// Builder method: fix the simulator seed for reproducible estimates.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    /// Builder method: cap simulation wall-clock time.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.simulation.time_budget_ms = Some(ms);
        self
    }

    /// Builder method: set the push/fold stack threshold.
    pub fn with_short_stack_bb(mut self, bb: f64) -> Self {
        self.short_stack_bb = bb;
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.preflop.validate()?;
        if !(self.short_stack_bb >= 0.0) {
            return Err(ConfigError::InvalidAmount("short_stack_bb", self.short_stack_bb));
        }
        Ok(())
    }
}

/// Monte Carlo equity simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Trials per equity estimate. 1500-2500 keeps the error near 2 points.
    pub trials: u32,
    /// Trials per parallel batch; each batch has its own derived RNG.
    pub batch_size: u32,
    /// Range classes below this weight are not expanded into combos.
    pub min_weight: f64,
    /// Optional wall-clock budget; batches not started by then are skipped.
    pub time_budget_ms: Option<u64>,
    /// Fixed base seed. If `None`, the caller's RNG supplies one per call.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 2000,
            batch_size: 250,
            min_weight: 0.001,
            time_budget_ms: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidTrials(self.trials));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        if !(0.0..1.0).contains(&self.min_weight) {
            return Err(ConfigError::InvalidProbability("min_weight", self.min_weight));
        }
        Ok(())
    }
}

/// Preflop sizing and mixed-strategy frequencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflopConfig {
    /// Standard open size (BB).
    pub open_size_bb: f64,
    /// Open size from the small blind (BB).
    pub sb_open_size_bb: f64,
    /// Added to the open size per limper when isolating (BB).
    pub limper_increment_bb: f64,
    /// 3-bet size as a multiple of the open, in position.
    pub three_bet_ip_multiplier: f64,
    /// 3-bet size as a multiple of the open, out of position.
    pub three_bet_oop_multiplier: f64,
    /// 4-bet size as a multiple of the 3-bet.
    pub four_bet_multiplier: f64,
    /// How often a bluff-candidate class 3-bets.
    pub three_bet_bluff_frequency: f64,
    /// How often an ace-blocker 4-bets as a bluff.
    pub four_bet_bluff_frequency: f64,
    /// Percentile added to thresholds per player beyond two in the pot.
    pub multiway_penalty: i32,
}

impl Default for PreflopConfig {
    fn default() -> Self {
        Self {
            open_size_bb: 2.5,
            sb_open_size_bb: 3.0,
            limper_increment_bb: 1.0,
            three_bet_ip_multiplier: 3.0,
            three_bet_oop_multiplier: 3.5,
            four_bet_multiplier: 2.3,
            three_bet_bluff_frequency: 0.40,
            four_bet_bluff_frequency: 0.25,
            multiway_penalty: 5,
        }
    }
}

impl PreflopConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("open_size_bb", self.open_size_bb),
            ("sb_open_size_bb", self.sb_open_size_bb),
            ("three_bet_ip_multiplier", self.three_bet_ip_multiplier),
            ("three_bet_oop_multiplier", self.three_bet_oop_multiplier),
            ("four_bet_multiplier", self.four_bet_multiplier),
        ];
        for (name, value) in sizes {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidAmount(name, value));
            }
        }
        if !(self.limper_increment_bb >= 0.0) {
            return Err(ConfigError::InvalidAmount(
                "limper_increment_bb",
                self.limper_increment_bb,
            ));
        }
        for (name, freq) in [
            ("three_bet_bluff_frequency", self.three_bet_bluff_frequency),
            ("four_bet_bluff_frequency", self.four_bet_bluff_frequency),
        ] {
            if !(0.0..=1.0).contains(&freq) {
                return Err(ConfigError::InvalidProbability(name, freq));
            }
        }
        if self.multiway_penalty < 0 {
            return Err(ConfigError::InvalidAmount(
                "multiway_penalty",
                self.multiway_penalty as f64,
            ));
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    /// Trial count must be positive.
    InvalidTrials(u32),
    /// Batch size must be positive.
    InvalidBatchSize(u32),
    /// A frequency or weight is outside [0, 1].
    InvalidProbability(&'static str, f64),
    /// A size or chip amount is out of range.
    InvalidAmount(&'static str, f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {}", e),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::InvalidTrials(n) => write!(f, "Trial count {} must be positive", n),
            Self::InvalidBatchSize(n) => write!(f, "Batch size {} must be positive", n),
            Self::InvalidProbability(name, val) => {
                write!(f, "{} {} is out of range [0, 1]", name, val)
            }
            Self::InvalidAmount(name, val) => write!(f, "{} {} is out of range", name, val),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.trials, 2000);
        assert_eq!(config.preflop.open_size_bb, 2.5);
        assert_eq!(config.short_stack_bb, 25.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{ "simulation": { "trials": 500, "seed": 42 }, "short_stack_bb": 20 }"#,
        )
        .unwrap();
        assert_eq!(config.simulation.trials, 500);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.batch_size, 250);
        assert_eq!(config.short_stack_bb, 20.0);
        assert_eq!(config.preflop, PreflopConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(
            EngineConfig::default().with_trials(0).validate(),
            Err(ConfigError::InvalidTrials(0))
        );

        let result = EngineConfig::from_json_str(
            r#"{ "preflop": { "three_bet_bluff_frequency": 1.5 } }"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidProbability("three_bet_bluff_frequency", _))
        ));

        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::from_json_file("/nonexistent/advisor.json"),
            Err(ConfigError::IoError(_))
        ));
    }
}
