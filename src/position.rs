//! Table positions (8-max) and per-position opening cutoffs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position at an 8-max table, in preflop action order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    UTG,
    EP,
    MP,
    HJ,
    CO,
    #[serde(alias = "BTN")]
    BU,
    SB,
    BB,
}

impl Position {
    /// All positions in preflop action order.
    pub const ALL: [Position; 8] = [
        Position::UTG,
        Position::EP,
        Position::MP,
        Position::HJ,
        Position::CO,
        Position::BU,
        Position::SB,
        Position::BB,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Position::UTG => "UTG",
            Position::EP => "EP",
            Position::MP => "MP",
            Position::HJ => "HJ",
            Position::CO => "CO",
            Position::BU => "BU",
            Position::SB => "SB",
            Position::BB => "BB",
        }
    }

    /// Preflop action order index (UTG = 0 ... BB = 7).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Postflop action order index (SB = 0, BB = 1, UTG = 2 ... BU = 7).
    pub fn postflop_index(&self) -> usize {
        match self {
            Position::SB => 0,
            Position::BB => 1,
            other => other.index() + 2,
        }
    }

    /// Check if this position acts after `other` on every postflop street.
    pub fn is_ip_vs(&self, other: Position) -> bool {
        self.postflop_index() > other.postflop_index()
    }

    /// Minimum strength to raise first in from this position.
    ///
    /// The big blind never opens, so it has no cutoff (every hand "plays").
    pub fn open_cutoff(&self) -> u8 {
        match self {
            Position::UTG => 86,
            Position::EP => 84,
            Position::MP => 82,
            Position::HJ => 78,
            Position::CO => 70,
            Position::BU => 52,
            Position::SB => 60,
            Position::BB => 0,
        }
    }

    /// Minimum strength of a value 3-bet made from this position.
    pub fn three_bet_cutoff(&self) -> u8 {
        match self {
            Position::UTG | Position::EP => 94,
            Position::MP | Position::HJ => 92,
            Position::CO => 90,
            Position::BU => 88,
            Position::SB | Position::BB => 89,
        }
    }

    /// Weakest hand this position is expected to flat an open with.
    pub fn call_floor(&self) -> u8 {
        match self {
            Position::UTG | Position::EP => 80,
            Position::MP | Position::HJ => 76,
            Position::CO => 72,
            Position::BU => 66,
            Position::SB => 74,
            Position::BB => 45,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a position name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePositionError(pub String);

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown position: {:?}", self.0)
    }
}

impl std::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Accepts the canonical names plus common aliases (BTN, UTG+1, LJ, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UTG" => Ok(Position::UTG),
            "EP" | "UTG1" | "UTG+1" => Ok(Position::EP),
            "MP" | "UTG2" | "UTG+2" | "LJ" => Ok(Position::MP),
            "HJ" | "MP2" => Ok(Position::HJ),
            "CO" => Ok(Position::CO),
            "BU" | "BTN" | "BUTTON" => Ok(Position::BU),
            "SB" => Ok(Position::SB),
            "BB" => Ok(Position::BB),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}
