//! Heuristic evaluation function for Othello positions
//!
//! Scores are always from the perspective of a fixed player:
//! - Terminal positions: `±WIN_SCORE` plus the disc margin
//! - Endgame phase: plain disc differential
//! - Positional phase: square table, corner rules and mobility

use crate::board::{Board, Player, Pos};
use crate::rules::mobility;
use crate::state::GameState;

use super::weights::{EvalParams, HEURISTIC_LIMIT, WIN_SCORE};

/// Evaluation phase, chosen from how full the board is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Positional,
    Endgame,
}

impl Phase {
    pub fn of(board: &Board, params: &EvalParams) -> Phase {
        if board.disc_count() >= params.endgame_discs {
            Phase::Endgame
        } else {
            Phase::Positional
        }
    }
}

/// Evaluate `state` for `player`.
///
/// Positive is good for `player`. The function is antisymmetric:
/// `evaluate(s, p, w) == -evaluate(s, p.opponent(), w)`. Undecided positions
/// score strictly inside `±HEURISTIC_LIMIT`, whatever the weights.
#[must_use]
pub fn evaluate(state: &GameState, player: Player, params: &EvalParams) -> i32 {
    let board = state.board();
    let to_move = state.next();

    let moves = mobility(board, to_move);
    if moves == 0 && mobility(board, to_move.opponent()) == 0 {
        return terminal_score(board, player);
    }

    match Phase::of(board, params) {
        Phase::Endgame => disc_diff(board, player),
        Phase::Positional => {
            let mobility_score = i64::from(params.mobility_weight) * moves as i64;
            let mobility_score = if to_move == player {
                mobility_score
            } else {
                -mobility_score
            };
            clamp_heuristic(positional_score(board, player, params) + mobility_score)
        }
    }
}

/// Score of a finished game for `player`
#[must_use]
pub fn terminal_score(board: &Board, player: Player) -> i32 {
    let diff = disc_diff(board, player);
    match diff.signum() {
        1 => WIN_SCORE + diff,
        -1 => -WIN_SCORE + diff,
        _ => 0,
    }
}

#[inline]
fn disc_diff(board: &Board, player: Player) -> i32 {
    board.count(player) as i32 - board.count(player.opponent()) as i32
}

/// Symmetric clamp, so antisymmetry survives out-of-range weights
#[allow(clippy::cast_possible_truncation)]
fn clamp_heuristic(score: i64) -> i32 {
    let bound = i64::from(HEURISTIC_LIMIT - 1);
    score.clamp(-bound, bound) as i32
}

/// Square table plus corner rules, summed over every disc on the board
fn positional_score(board: &Board, player: Player, params: &EvalParams) -> i64 {
    let mine: i64 = board
        .discs(player)
        .iter_ones()
        .map(|pos| cell_value(board, pos, player, params))
        .sum();
    let theirs: i64 = board
        .discs(player.opponent())
        .iter_ones()
        .map(|pos| cell_value(board, pos, player.opponent(), params))
        .sum();
    mine - theirs
}

/// Value of `owner` holding `pos`
fn cell_value(board: &Board, pos: Pos, owner: Player, params: &EvalParams) -> i64 {
    let table = i64::from(params.square_weight(pos.x(), pos.y()));

    if pos.is_corner() {
        return table + i64::from(params.corner_bonus);
    }

    let Some((corner, diagonal)) = adjacent_corner(pos) else {
        return table;
    };

    match board.get(corner).owner() {
        None => {
            let penalty = if diagonal {
                params.x_square_penalty
            } else {
                params.c_square_penalty
            };
            table - i64::from(penalty)
        }
        Some(corner_owner) if corner_owner == owner => i64::from(params.stable_edge_bonus),
        Some(_) => 0,
    }
}

/// Corner that `pos` touches, and whether it touches it diagonally (X-square).
/// `None` for corners themselves and for cells away from corners.
fn adjacent_corner(pos: Pos) -> Option<(Pos, bool)> {
    let cx = match pos.x() {
        1 | 2 => 1,
        7 | 8 => 8,
        _ => return None,
    };
    let cy = match pos.y() {
        1 | 2 => 1,
        7 | 8 => 8,
        _ => return None,
    };
    let corner = Pos::new(cx, cy);
    if corner == pos {
        return None;
    }
    Some((corner, pos.x() != cx && pos.y() != cy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::state::Move;

    fn board_with(cells: &[(u8, u8, Piece)]) -> Board {
        let mut board = Board::new();
        for &(x, y, piece) in cells {
            board.place(Pos::new(x, y), piece);
        }
        board
    }

    #[test]
    fn test_evaluate_initial_position() {
        let params = EvalParams::default();
        let state = GameState::initial();
        // Table is zero on the four centre cells; only mobility counts
        assert_eq!(evaluate(&state, Player::Black, &params), 4 * params.mobility_weight);
        assert_eq!(evaluate(&state, Player::White, &params), -4 * params.mobility_weight);
    }

    #[test]
    fn test_evaluate_is_antisymmetric() {
        let params = EvalParams::default();
        let mut state = GameState::initial();
        for _ in 0..6 {
            let b = evaluate(&state, Player::Black, &params);
            let w = evaluate(&state, Player::White, &params);
            assert_eq!(b, -w, "{state}");
            let first = state.valid_moves()[0];
            state = state.apply(first).unwrap();
        }
    }

    #[test]
    fn test_mobility_term_follows_side_to_move() {
        let params = EvalParams {
            square_weights: [[0; 8]; 8],
            ..EvalParams::default()
        };
        let state = GameState::initial().pass();
        // White to move with four moves
        assert_eq!(evaluate(&state, Player::White, &params), 20);
        assert_eq!(evaluate(&state, Player::Black, &params), -20);
    }

    #[test]
    fn test_endgame_phase_is_disc_difference() {
        let params = EvalParams {
            endgame_discs: 4,
            ..EvalParams::default()
        };
        let state = GameState::initial()
            .apply(Move {
                at: Pos::new(4, 3),
                by: Player::Black,
            })
            .unwrap();
        assert_eq!(Phase::of(state.board(), &params), Phase::Endgame);
        assert_eq!(evaluate(&state, Player::Black, &params), 3);
        assert_eq!(evaluate(&state, Player::White, &params), -3);
    }

    #[test]
    fn test_phase_switches_on_disc_count() {
        let params = EvalParams::default();
        assert_eq!(Phase::of(&Board::initial(), &params), Phase::Positional);

        let mut board = Board::new();
        for idx in 0..params.endgame_discs as usize {
            board.place(Pos::from_index(idx), Piece::Black);
        }
        assert_eq!(Phase::of(&board, &params), Phase::Endgame);
    }

    #[test]
    fn test_terminal_full_board() {
        let params = EvalParams::default();
        let mut board = Board::new();
        for idx in 0..64 {
            let piece = if idx < 40 { Piece::Black } else { Piece::White };
            board.place(Pos::from_index(idx), piece);
        }
        let state = GameState::new(board, Player::Black);
        assert_eq!(evaluate(&state, Player::Black, &params), WIN_SCORE + 16);
        assert_eq!(evaluate(&state, Player::White, &params), -WIN_SCORE - 16);
    }

    #[test]
    fn test_terminal_with_empty_cells() {
        // A lone disc: nobody can ever capture
        let params = EvalParams::default();
        let board = board_with(&[(4, 4, Piece::White)]);
        let state = GameState::new(board, Player::Black);
        assert_eq!(evaluate(&state, Player::White, &params), WIN_SCORE + 1);
        assert_eq!(evaluate(&state, Player::Black, &params), -WIN_SCORE - 1);
    }

    #[test]
    fn test_terminal_draw_scores_zero() {
        let board = board_with(&[(1, 1, Piece::Black), (8, 8, Piece::White)]);
        assert_eq!(terminal_score(&board, Player::Black), 0);
    }

    #[test]
    fn test_x_square_next_to_empty_corner() {
        let params = EvalParams::default();
        let board = board_with(&[(2, 2, Piece::Black)]);
        assert_eq!(
            positional_score(&board, Player::Black, &params),
            i64::from(params.square_weight(2, 2) - params.x_square_penalty)
        );
    }

    #[test]
    fn test_c_square_next_to_empty_corner() {
        let params = EvalParams::default();
        let board = board_with(&[(8, 7, Piece::White)]);
        assert_eq!(
            positional_score(&board, Player::White, &params),
            i64::from(params.square_weight(8, 7) - params.c_square_penalty)
        );
    }

    #[test]
    fn test_neighbour_of_own_corner_is_stable() {
        let params = EvalParams::default();
        let board = board_with(&[(1, 1, Piece::Black), (2, 2, Piece::Black)]);
        assert_eq!(
            positional_score(&board, Player::Black, &params),
            i64::from(params.square_weight(1, 1) + params.corner_bonus + params.stable_edge_bonus)
        );
    }

    #[test]
    fn test_neighbour_of_enemy_corner_scores_zero() {
        let params = EvalParams::default();
        let board = board_with(&[(1, 8, Piece::White), (2, 7, Piece::Black)]);
        assert_eq!(
            positional_score(&board, Player::Black, &params),
            -i64::from(params.square_weight(1, 8) + params.corner_bonus)
        );
    }

    #[test]
    fn test_corner_override_dominates_table() {
        // Taking the corner must be worth more than sitting on its X-square
        let params = EvalParams::default();
        let exposed = board_with(&[(7, 2, Piece::Black)]);
        let anchored = board_with(&[(8, 1, Piece::Black), (7, 2, Piece::Black)]);
        assert!(
            positional_score(&anchored, Player::Black, &params)
                > positional_score(&exposed, Player::Black, &params)
        );
        assert!(positional_score(&exposed, Player::Black, &params) < 0);
    }

    #[test]
    fn test_extreme_weights_do_not_overflow() {
        let params = EvalParams {
            mobility_weight: i32::MAX,
            corner_bonus: i32::MIN,
            square_weights: [[i32::MAX; 8]; 8],
            ..EvalParams::default()
        };
        let board = board_with(&[
            (1, 1, Piece::Black),
            (2, 2, Piece::White),
            (4, 4, Piece::White),
            (4, 5, Piece::Black),
            (5, 4, Piece::Black),
            (5, 5, Piece::White),
        ]);
        let state = GameState::new(board, Player::Black);
        let black = evaluate(&state, Player::Black, &params);
        let white = evaluate(&state, Player::White, &params);
        assert!(black.abs() < HEURISTIC_LIMIT);
        assert_eq!(black, -white);

        let opening = evaluate(&GameState::initial(), Player::Black, &params);
        assert_eq!(opening, HEURISTIC_LIMIT - 1);
    }

    #[test]
    fn test_adjacent_corner_mapping() {
        assert_eq!(adjacent_corner(Pos::new(2, 2)), Some((Pos::new(1, 1), true)));
        assert_eq!(adjacent_corner(Pos::new(2, 1)), Some((Pos::new(1, 1), false)));
        assert_eq!(adjacent_corner(Pos::new(8, 2)), Some((Pos::new(8, 1), false)));
        assert_eq!(adjacent_corner(Pos::new(7, 7)), Some((Pos::new(8, 8), true)));
        assert_eq!(adjacent_corner(Pos::new(1, 1)), None);
        assert_eq!(adjacent_corner(Pos::new(3, 1)), None);
        assert_eq!(adjacent_corner(Pos::new(4, 5)), None);
    }
}
