//! Opponent range model.
//!
//! ## Modules
//!
//! - `weighted`: `OpponentRange` over the 169 hand classes, range notation
//! - `narrowing`: Starting ranges by position and Bayesian-style narrowing by action
//! - `arena`: Per-hand storage of every opponent's range

pub mod arena;
pub mod narrowing;
pub mod weighted;

pub use arena::HandRanges;
pub use narrowing::{narrow, narrow_factor, normalize, starting_range, NarrowContext, THREE_BET_BLUFFS};
pub use weighted::{OpponentRange, RangeParseError, WeightedHand, ACTIVE_WEIGHT};
