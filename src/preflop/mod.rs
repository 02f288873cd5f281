//! Preflop decision engine.
//!
//! ## Modules
//!
//! - `context`: `PreflopContext` derived from the betting log
//! - `thresholds`: Deep-stack percentile thresholds and bluff sets
//! - `push_fold`: Short-stack shove / call-shove tables
//! - `engine`: `PreflopSituation` classifier and `PreflopEngine`

pub mod context;
pub mod engine;
pub mod push_fold;
pub mod thresholds;

pub use context::PreflopContext;
pub use engine::{PreflopEngine, PreflopSituation};
pub use push_fold::StackBucket;
