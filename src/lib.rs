//! # Hold'em Advisor
//!
//! A probabilistic decision core for No-Limit Texas Hold'em. Given hero's
//! cards, the board, the betting log and whatever is known about the
//! opponents, it recommends one action with a size, a confidence and a
//! short explanation.
//!
//! ## Quick Start
//!
//! ```
//! use holdem_advisor::{Advisor, GameState, HandRanges, Position};
//! use holdem_advisor::cards::parse_cards;
//! use rand::SeedableRng;
//!
//! let state = GameState::new(parse_cards("AsAd").unwrap(), Position::CO, 1.5, 100.0);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let decision = Advisor::default()
//!     .decide(&state, &HandRanges::new(), &mut rng)
//!     .unwrap();
//! assert!(decision.action.is_aggressive());
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Cards, boards, the 169 hand classes and showdown evaluation
//! - [`strength`]: Preflop strength percentile of every hand class
//! - [`position`]: 8-max positions and per-position opening cutoffs
//! - [`stats`]: Opponent statistics, archetypes and exploit adjustments
//! - [`range`]: Weighted opponent ranges, narrowing and the per-hand arena
//! - [`equity`]: Parallel Monte Carlo equity simulation
//! - [`preflop`]: Threshold and push/fold preflop policy
//! - [`postflop`]: Fold-equity model and EV search
//! - [`advisor`]: `GameState` snapshot and the `Advisor` facade
//! - [`config`]: Engine configuration with JSON loading
//!
//! ## Architecture
//!
//! ```text
//!                     GameState + HandRanges
//!                              │
//!                              ▼
//!                         ┌─────────┐
//!                         │ Advisor │
//!                         └────┬────┘
//!               empty board    │    flop / turn / river
//!          ┌───────────────────┴───────────────────┐
//!          ▼                                       ▼
//!   ┌──────────────┐                      ┌─────────────────┐
//!   │ PreflopEngine│                      │ EquitySimulator │
//!   │ thresholds + │                      │ (rayon batches) │
//!   │  push/fold   │                      └────────┬────────┘
//!   └──────┬───────┘                               ▼
//!          │                              ┌─────────────────┐
//!          │                              │ PostflopEngine  │
//!          │                              │   EV search     │
//!          │                              └────────┬────────┘
//!          └───────────────────┬───────────────────┘
//!                              ▼
//!                          Decision
//! ```

pub mod action;
pub mod advisor;
pub mod cards;
pub mod config;
pub mod decision;
pub mod equity;
pub mod error;
pub mod position;
pub mod postflop;
pub mod preflop;
pub mod range;
pub mod stats;
pub mod strength;

// Re-export commonly used types at crate root for convenience
pub use action::{ActionKind, BettingAction};
pub use advisor::{Advisor, GameState};
pub use cards::{Board, Card, HandClass, HoleCards, Street};
pub use config::{ConfigError, EngineConfig};
pub use decision::{ActionEv, Decision};
pub use equity::{EquitySimulator, OpponentSpec};
pub use error::CoreError;
pub use position::Position;
pub use range::{HandRanges, OpponentRange};
pub use stats::{ExploitAdjustment, OpponentStats, PlayerType};
