//! Tunable evaluation weights
//!
//! Every number here is policy, not rule. They are grouped in [`EvalParams`]
//! so a config file can override them.

use serde::{Deserialize, Serialize};

use crate::board::{Pos, BOARD_SIZE, TOTAL_CELLS};

/// Score of a decided game before the disc margin is added.
pub const WIN_SCORE: i32 = 1_000_000;

/// Heuristic scores stay strictly inside `±HEURISTIC_LIMIT`, so any decided
/// game outranks any undecided one.
pub const HEURISTIC_LIMIT: i32 = WIN_SCORE / 2;

/// Default square table, indexed `[y-1][x-1]`.
///
/// Corners are worth the most. The diagonal neighbour of a corner
/// (X-square) is the worst cell to hold while that corner is open, the
/// orthogonal neighbours (C-squares) are bad but less so.
pub const DEFAULT_SQUARE_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, 1, 1, 1, 1, -2, 10],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [10, -2, 1, 1, 1, 1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

/// Evaluation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalParams {
    /// Positional weight per cell, `[y-1][x-1]`
    pub square_weights: [[i32; BOARD_SIZE]; BOARD_SIZE],
    /// Per legal move of the side to move
    pub mobility_weight: i32,
    /// Disc count at which the evaluation becomes a plain disc differential
    pub endgame_discs: u32,
    /// Extra reward for owning a corner
    pub corner_bonus: i32,
    /// Replaces the table weight of a corner neighbour whose corner has the same owner
    pub stable_edge_bonus: i32,
    /// Extra cost of holding the diagonal neighbour of an empty corner
    pub x_square_penalty: i32,
    /// Extra cost of holding an orthogonal neighbour of an empty corner
    pub c_square_penalty: i32,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            square_weights: DEFAULT_SQUARE_WEIGHTS,
            mobility_weight: 5,
            endgame_discs: 54,
            corner_bonus: 25,
            stable_edge_bonus: 60,
            x_square_penalty: 40,
            c_square_penalty: 15,
        }
    }
}

impl EvalParams {
    #[inline]
    pub fn square_weight(&self, x: u8, y: u8) -> i32 {
        self.square_weights[y as usize - 1][x as usize - 1]
    }

    /// Worst-case absolute score of the positional phase.
    ///
    /// Sums, over every cell, the largest magnitude any disc there can be
    /// worth, plus a full board of mobility. Computed in `i64` so extreme
    /// weights cannot overflow.
    pub fn max_heuristic_score(&self) -> i64 {
        let stable = i64::from(self.stable_edge_bonus).abs();
        let cells: i64 = (0..TOTAL_CELLS)
            .map(|idx| {
                let pos = Pos::from_index(idx);
                let table = i64::from(self.square_weight(pos.x(), pos.y()));
                let corner = table + i64::from(self.corner_bonus);
                let x_square = table - i64::from(self.x_square_penalty);
                let c_square = table - i64::from(self.c_square_penalty);
                [table, corner, x_square, c_square]
                    .into_iter()
                    .map(i64::abs)
                    .max()
                    .unwrap_or(0)
                    .max(stable)
            })
            .sum();
        cells + TOTAL_CELLS as i64 * i64::from(self.mobility_weight).abs()
    }

    /// Every reachable heuristic score fits inside `±HEURISTIC_LIMIT`
    pub fn is_bounded(&self) -> bool {
        self.max_heuristic_score() < i64::from(HEURISTIC_LIMIT)
    }
}
