//! Monte Carlo equity estimation against random hands or a weighted range.
//!
//! ## Modules
//!
//! - `simulator`: Batched, seed-deterministic `EquitySimulator`

pub mod simulator;

pub use simulator::{class_equity_vs_random, EquityEstimate, EquitySimulator, OpponentSpec, NEUTRAL_EQUITY};
