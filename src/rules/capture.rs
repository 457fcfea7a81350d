//! Capture rules: flanking runs in the eight compass directions
//!
//! A run captures when it starts next to the placed disc, holds at least one
//! opponent disc, and ends on a disc of the mover's colour. Running off the
//! board or into an empty cell captures nothing.

use crate::board::{Bitboard, Board, Piece, Player, Pos};

/// Direction vectors for capture checking (8 directions)
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
    (-1, -1), // NW
];

/// Discs flipped in one direction if `mover` plays at `at`.
///
/// Returns an empty bitboard when the run is not capturing.
pub fn captures_in_direction(board: &Board, at: Pos, mover: Player, dx: i32, dy: i32) -> Bitboard {
    let own = mover.piece();
    let opp = mover.opponent().piece();
    let mut run = Bitboard::new();
    let mut cursor = at;

    loop {
        cursor = match cursor.offset(dx, dy) {
            Some(next) => next,
            // End of board
            None => return Bitboard::new(),
        };
        match board.get(cursor) {
            p if p == opp => run.set(cursor),
            p if p == own => return run,
            _ => return Bitboard::new(),
        }
    }
}

/// Union of the discs flipped across all eight directions.
///
/// Does not check that `at` is empty; see [`crate::state::GameState::legal_move`].
pub fn captured_positions(board: &Board, at: Pos, mover: Player) -> Bitboard {
    DIRECTIONS
        .iter()
        .fold(Bitboard::new(), |acc, &(dx, dy)| {
            acc.union(captures_in_direction(board, at, mover, dx, dy))
        })
}

/// Check if placing at `at` would capture in at least one direction.
#[inline]
pub fn has_capture(board: &Board, at: Pos, mover: Player) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dx, dy)| !captures_in_direction(board, at, mover, dx, dy).is_empty())
}

/// `at` is empty and placing there captures something
#[inline]
pub fn is_valid_move(board: &Board, at: Pos, mover: Player) -> bool {
    board.get(at) == Piece::Empty && has_capture(board, at, mover)
}
