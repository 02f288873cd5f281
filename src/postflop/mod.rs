//! Postflop decisions.
//!
//! ## Modules
//!
//! - `fold_equity`: Opponent fold probability by archetype, size and street
//! - `engine`: EV search over check / bet / call / raise / all-in

pub mod engine;
pub mod fold_equity;

pub use engine::{PostflopEngine, PostflopSpot, ALL_IN_SPR, BET_FRACTIONS};
pub use fold_equity::{fold_equity, fold_equity_against};
