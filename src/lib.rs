//! Othello (Reversi) move engine
//!
//! Given a position and the side to move, the engine picks a legal move or
//! reports a pass before a deadline:
//! - Standard 8x8 board, coordinates 1-based as `(x, y)` from the top left
//! - A move must flank at least one line of opposing discs, which flip
//! - A side with no legal move passes; the game ends when neither can move
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Flanking and move generation
//! - [`state`]: Immutable positions and move application
//! - [`eval`]: Phase-dependent position evaluation
//! - [`search`]: Deadline-bounded alpha-beta search
//! - [`engine`]: Main AI engine integrating all components
//! - [`protocol`], [`server`]: JSON position format and the HTTP service
//! - [`reflector`]: Client that plays a match-server game through a bot
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use othello::{AIEngine, Decision, GameState, Move};
//!
//! let engine = AIEngine::with_config(4, 500);
//! let state = GameState::initial();
//!
//! if let Decision::Move(at) = engine.get_move(&state) {
//!     let next = state.apply(Move { at, by: state.next() }).unwrap();
//!     println!("AI plays {at}\n{next}");
//! }
//! ```
//!
//! # Decision Priority
//!
//! 1. Pass when the side to move has no legal move
//! 2. Take a corner when one is available (configurable)
//! 3. Iterative-deepening alpha-beta search until the deadline

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod protocol;
pub mod reflector;
pub mod rules;
pub mod search;
pub mod server;
pub mod state;
pub mod ui;

use tracing_subscriber::EnvFilter;

// Re-export commonly used types for convenience
pub use board::{Board, Piece, Player, Pos, BOARD_SIZE};
pub use engine::{AIEngine, Decision, EngineConfig, MoveResult, SearchType};
pub use error::{ConfigError, EngineError, MoveError, PositionError, ReflectError};
pub use state::{GameState, Move, Outcome};

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Output goes to stderr
/// so stdout stays free for replies.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
