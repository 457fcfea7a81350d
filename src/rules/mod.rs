//! Game rules for Othello
//!
//! This module implements the rule set:
//! - Capture rules (flanking runs in eight directions)
//! - Legal move generation

pub mod capture;
pub mod movegen;

// Re-exports for convenient access
pub use capture::{captured_positions, captures_in_direction, has_capture, is_valid_move, DIRECTIONS};
pub use movegen::{mobility, valid_moves};
