//! Position evaluation
//!
//! - [`weights`]: tunable parameters and the square table
//! - [`heuristic`]: the phase-dependent scoring function

pub mod heuristic;
pub mod weights;

pub use heuristic::{evaluate, terminal_score, Phase};
pub use weights::{EvalParams, DEFAULT_SQUARE_WEIGHTS, HEURISTIC_LIMIT, WIN_SCORE};
