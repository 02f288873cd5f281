//! Percentile thresholds of the deep-stack preflop policy.
//!
//! All values compare against [`crate::strength`] scores.

use crate::cards::HandClass;
use crate::position::Position;
use crate::range::THREE_BET_BLUFFS;

/// Small-blind completes suited hands at or above this strength.
pub const SB_COMPLETE_SUITED: u8 = 40;

/// Big blind raises limpers with hands at or above this strength.
pub const BB_ISOLATE: u8 = 80;

/// Value 4-bet against a 3-bet.
pub const FOUR_BET_VALUE: u8 = 95;

/// Ace blockers used as occasional 4-bet bluffs.
pub const FOUR_BET_BLUFFS: [&str; 2] = ["A5s", "A4s"];

/// Flat a 3-bet in position / out of position.
pub const CALL_THREE_BET_IP: u8 = 86;
pub const CALL_THREE_BET_OOP: u8 = 89;

/// Facing a 4-bet: shove at or above, call in the band just below.
pub const FOUR_BET_SHOVE: u8 = 97;
pub const FOUR_BET_CALL: u8 = 94;

/// 3-bet bluffs are only made with at most this many players in the pot.
pub const MAX_BLUFF_PLAYERS: u8 = 3;

/// Flat-call threshold shift when hero will act last / first postflop.
pub const IP_CALL_BONUS: i32 = -3;
pub const OOP_CALL_PENALTY: i32 = 4;

/// Value 3-bet threshold against an open from `opener`.
pub fn value_three_bet(opener: Position) -> u8 {
    match opener {
        Position::UTG => 94,
        Position::EP => 93,
        Position::MP => 92,
        Position::HJ => 90,
        Position::CO => 88,
        Position::BU => 86,
        Position::SB | Position::BB => 85,
    }
}

/// Flat-call threshold against an open from `opener`, before the IP/OOP shift.
pub fn call_open(opener: Position) -> u8 {
    match opener {
        Position::UTG => 84,
        Position::EP => 82,
        Position::MP => 80,
        Position::HJ => 77,
        Position::CO => 73,
        Position::BU | Position::SB | Position::BB => 70,
    }
}

/// Shift applied to a call threshold for position.
pub fn position_shift(in_position: bool) -> i32 {
    if in_position {
        IP_CALL_BONUS
    } else {
        OOP_CALL_PENALTY
    }
}

/// Big-blind defend threshold against a standard 2.5bb open.
pub fn bb_defend(opener: Position) -> u8 {
    match opener {
        Position::BU | Position::SB => 45,
        Position::CO => 55,
        Position::HJ | Position::MP => 62,
        Position::UTG | Position::EP | Position::BB => 68,
    }
}

/// Extra defend strength per big blind the open exceeds 2.5bb.
pub const BB_DEFEND_PER_BB: f64 = 4.0;

/// Big-blind 3-bet threshold.
pub fn bb_three_bet(opener: Position) -> u8 {
    match opener {
        Position::CO | Position::BU | Position::SB => 88,
        _ => 92,
    }
}

pub fn is_three_bet_bluff(class: &HandClass) -> bool {
    in_set(class, &THREE_BET_BLUFFS)
}

pub fn is_four_bet_bluff(class: &HandClass) -> bool {
    in_set(class, &FOUR_BET_BLUFFS)
}

fn in_set(class: &HandClass, names: &[&str]) -> bool {
    names
        .iter()
        .filter_map(|name| HandClass::parse(name))
        .any(|c| c == *class)
}

/// Apply an integer shift to a percentile threshold.
pub fn shifted(threshold: u8, delta: i32) -> i32 {
    threshold as i32 + delta
}
