//! Cards, hand classes and showdown evaluation.
//!
//! ## Modules
//!
//! - `card`: Card, hole cards, board, street and residual deck
//! - `hand_class`: The 169 canonical starting-hand classes
//! - `evaluator`: 5-7 card hand ranking behind the `HandRanker` seam

pub mod card;
pub mod evaluator;
pub mod hand_class;

pub use card::{ensure_distinct, parse_cards, Board, Card, Deck, HoleCards, Street};
pub use evaluator::{HandCategory, HandEvaluator, HandRank, HandRanker};
pub use hand_class::{HandClass, ParseHandClassError, NUM_CLASSES};
