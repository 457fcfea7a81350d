//! Alpha-Beta search with iterative deepening and a hard deadline
//!
//! Minimax with alpha-beta pruning, scored from the point of view of one
//! fixed player. Each [`Searcher`] lives for a single decision.
//!
//! # Features
//!
//! - Iterative deepening from depth 1 up to the requested maximum
//! - Deadline checked on entry to every node; an expired node is scored
//!   statically and the iteration is marked interrupted
//! - Forced passes consume one ply and hand the turn over
//! - Root ties go to the first move in generation order
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use othello::eval::EvalParams;
//! use othello::search::Searcher;
//! use othello::{GameState, Player};
//!
//! let params = EvalParams::default();
//! let deadline = Instant::now() + Duration::from_millis(200);
//! let mut searcher = Searcher::new(Player::Black, deadline, &params);
//!
//! let result = searcher.search(&GameState::initial(), 4);
//! assert!(result.best_move.is_some());
//! ```

use std::time::Instant;

use tracing::{debug, trace};

use crate::board::{Player, Pos};
use crate::eval::{evaluate, terminal_score, EvalParams, WIN_SCORE};
use crate::state::{GameState, Move};

/// Infinity score for alpha-beta bounds
pub(crate) const INF: i32 = WIN_SCORE + 1_000;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total alpha or beta cutoffs
    pub cutoffs: u64,
    /// Cutoffs on the first move tried
    pub first_move_cutoffs: u64,
    /// Nodes where the side to move had to pass
    pub pass_nodes: u64,
    /// Nodes where neither side could move
    pub terminal_nodes: u64,
}

impl SearchStats {
    /// Share of cutoffs produced by the first move, in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.cutoffs as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found; `None` only when the root has no legal move
    pub best_move: Option<Pos>,
    /// Evaluation score of the best move
    pub score: i32,
    /// Deepest iteration that finished before the deadline
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
    /// The deadline cut an iteration short
    pub timed_out: bool,
}

/// Per-decision search state
pub struct Searcher<'a> {
    player: Player,
    deadline: Instant,
    params: &'a EvalParams,
    nodes: u64,
    timed_out: bool,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    /// Searcher choosing for `player`, stopping at `deadline`
    #[must_use]
    pub fn new(player: Player, deadline: Instant, params: &'a EvalParams) -> Self {
        Self {
            player,
            deadline,
            params,
            nodes: 0,
            timed_out: false,
            stats: SearchStats::default(),
        }
    }

    /// Iterative deepening search from `state`, which must have `player` to move.
    ///
    /// Keeps the move of the last iteration that finished in time. The move of
    /// an interrupted iteration is used only when no iteration finished, so a
    /// legal move is returned even when the deadline has already passed.
    #[must_use]
    pub fn search(&mut self, state: &GameState, max_depth: u8) -> SearchResult {
        debug_assert_eq!(state.next(), self.player);

        let mut best_result = SearchResult {
            best_move: None,
            score: evaluate(state, self.player, self.params),
            depth: 0,
            nodes: 0,
            stats: SearchStats::default(),
            timed_out: false,
        };

        if !state.has_moves() {
            return self.finish(best_result);
        }

        for depth in 1..=max_depth.max(1) {
            let (best_move, score) = self.search_root(state, depth);

            if self.timed_out {
                trace!(depth, "iteration interrupted by deadline");
                if best_result.depth == 0 {
                    best_result.best_move = best_move;
                    best_result.score = score;
                }
                break;
            }

            best_result.best_move = best_move;
            best_result.score = score;
            best_result.depth = depth;

            debug!(
                depth,
                score,
                nodes = self.nodes,
                best = ?best_move.map(|p| p.to_string()),
                "iteration complete"
            );

            // Decided within the horizon: deeper iterations cannot change it
            if score.abs() > WIN_SCORE / 2 {
                break;
            }
        }

        self.finish(best_result)
    }

    fn finish(&self, mut result: SearchResult) -> SearchResult {
        result.nodes = self.nodes;
        result.stats = self.stats.clone();
        result.timed_out = self.timed_out;
        result
    }

    #[inline]
    fn deadline_passed(&mut self) -> bool {
        if !self.timed_out && Instant::now() >= self.deadline {
            self.timed_out = true;
        }
        self.timed_out
    }

    /// One full-width root iteration. Alpha is raised only by strictly better
    /// scores, so the first of equally scored moves is kept.
    fn search_root(&mut self, state: &GameState, depth: u8) -> (Option<Pos>, i32) {
        self.nodes += 1;
        // An expired root still walks its children so that a move comes back;
        // each child returns its static score immediately.
        self.deadline_passed();

        let mut best_move = None;
        let mut best_score = -INF;
        let mut alpha = -INF;

        for mv in state.valid_moves() {
            let Ok(child) = state.apply(mv) else {
                continue;
            };
            let score = self.alpha_beta(&child, depth - 1, alpha, INF, false);
            if best_move.is_none() || score > best_score {
                best_move = Some(mv.at);
                best_score = score;
            }
            alpha = alpha.max(best_score);
        }

        (best_move, best_score)
    }

    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// `maximizing` is true when the searching player is to move in `state`.
    fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        debug_assert_eq!(maximizing, state.next() == self.player);
        self.nodes += 1;

        if self.deadline_passed() || depth == 0 {
            return evaluate(state, self.player, self.params);
        }

        let moves = state.valid_moves();
        if moves.is_empty() {
            let passed = state.pass();
            if !passed.has_moves() {
                self.stats.terminal_nodes += 1;
                return terminal_score(state.board(), self.player);
            }
            self.stats.pass_nodes += 1;
            return self.alpha_beta(&passed, depth - 1, alpha, beta, !maximizing);
        }

        if maximizing {
            let mut value = -INF;
            for (i, mv) in moves.iter().enumerate() {
                let Ok(child) = state.apply(*mv) else {
                    continue;
                };
                value = value.max(self.alpha_beta(&child, depth - 1, alpha, beta, false));
                alpha = alpha.max(value);
                if alpha >= beta {
                    self.record_cutoff(i);
                    break;
                }
            }
            value
        } else {
            let mut value = INF;
            for (i, mv) in moves.iter().enumerate() {
                let Ok(child) = state.apply(*mv) else {
                    continue;
                };
                value = value.min(self.alpha_beta(&child, depth - 1, alpha, beta, true));
                beta = beta.min(value);
                if alpha >= beta {
                    self.record_cutoff(i);
                    break;
                }
            }
            value
        }
    }

    #[inline]
    fn record_cutoff(&mut self, move_index: usize) {
        self.stats.cutoffs += 1;
        if move_index == 0 {
            self.stats.first_move_cutoffs += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::board::{Board, Piece};

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(3600)
    }

    /// Plain minimax without pruning, same pass and terminal handling
    fn minimax(state: &GameState, depth: u8, player: Player, params: &EvalParams) -> i32 {
        if depth == 0 {
            return evaluate(state, player, params);
        }
        let moves = state.valid_moves();
        if moves.is_empty() {
            let passed = state.pass();
            if !passed.has_moves() {
                return terminal_score(state.board(), player);
            }
            return minimax(&passed, depth - 1, player, params);
        }
        let scores = moves
            .iter()
            .map(|m| minimax(&state.apply(*m).unwrap(), depth - 1, player, params));
        if state.next() == player {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn minimax_root(state: &GameState, depth: u8, params: &EvalParams) -> (Option<Pos>, i32) {
        let player = state.next();
        let mut best = (None, -INF);
        for m in state.valid_moves() {
            let score = minimax(&state.apply(m).unwrap(), depth - 1, player, params);
            if best.0.is_none() || score > best.1 {
                best = (Some(m.at), score);
            }
        }
        best
    }

    /// Follow the first generated move for `plies` turns, passing when stuck
    fn opening_line(plies: usize) -> GameState {
        let mut state = GameState::initial();
        for i in 0..plies {
            let moves = state.valid_moves();
            state = if moves.is_empty() {
                state.pass()
            } else {
                state.apply(moves[i % moves.len()]).unwrap()
            };
        }
        state
    }

    #[test]
    fn test_search_initial_position() {
        let params = EvalParams::default();
        let state = GameState::initial();
        let mut searcher = Searcher::new(Player::Black, far_deadline(), &params);

        let result = searcher.search(&state, 3);
        let best = result.best_move.unwrap();
        assert!(state.legal_move(best));
        assert_eq!(result.depth, 3);
        assert!(result.nodes > 0);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_pruning_matches_minimax() {
        let params = EvalParams::default();
        for plies in [0, 3, 8, 13] {
            let state = opening_line(plies);
            for depth in 1..=4 {
                let mut searcher = Searcher::new(state.next(), far_deadline(), &params);
                let (best, score) = searcher.search_root(&state, depth);
                let (expected_best, expected_score) = minimax_root(&state, depth, &params);
                assert_eq!(best, expected_best, "plies {plies} depth {depth}");
                assert_eq!(score, expected_score, "plies {plies} depth {depth}");
            }
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let params = EvalParams::default();
        let state = opening_line(8);
        let mut searcher = Searcher::new(state.next(), far_deadline(), &params);
        let _ = searcher.search_root(&state, 5);
        assert!(searcher.stats.cutoffs > 0);
    }

    #[test]
    fn test_search_is_deterministic() {
        let params = EvalParams::default();
        let state = opening_line(6);
        let a = Searcher::new(state.next(), far_deadline(), &params).search(&state, 4);
        let b = Searcher::new(state.next(), far_deadline(), &params).search(&state, 4);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn test_expired_deadline_still_returns_legal_move() {
        let params = EvalParams::default();
        let state = opening_line(5);
        let mut searcher = Searcher::new(state.next(), Instant::now(), &params);

        let result = searcher.search(&state, 8);
        assert!(result.timed_out);
        assert_eq!(result.depth, 0);
        assert!(state.legal_move(result.best_move.unwrap()));
    }

    #[test]
    fn test_deadline_interrupts_running_search() {
        let params = EvalParams::default();
        let state = GameState::initial();
        let start = Instant::now();
        let mut searcher = Searcher::new(Player::Black, start + Duration::from_millis(100), &params);

        let result = searcher.search(&state, 60);
        let elapsed = start.elapsed();

        assert!(result.timed_out);
        assert!(result.depth >= 1 && result.depth < 60, "depth {}", result.depth);
        assert!(state.legal_move(result.best_move.unwrap()));
        assert!(elapsed < Duration::from_secs(5), "search ran for {elapsed:?}");
    }

    #[test]
    fn test_no_moves_at_root() {
        let params = EvalParams::default();
        let mut board = Board::new();
        board.place(Pos::new(1, 1), Piece::White);
        board.place(Pos::new(2, 1), Piece::Black);
        let state = GameState::new(board, Player::Black);

        let result = Searcher::new(Player::Black, far_deadline(), &params).search(&state, 4);
        assert_eq!(result.best_move, None);
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn test_search_takes_game_winning_move() {
        // Black captures the last White disc and the game ends
        let params = EvalParams::default();
        let mut board = Board::new();
        board.place(Pos::new(4, 4), Piece::White);
        board.place(Pos::new(4, 5), Piece::Black);
        let state = GameState::new(board, Player::Black);

        let result = Searcher::new(Player::Black, far_deadline(), &params).search(&state, 6);
        assert_eq!(result.best_move, Some(Pos::new(4, 3)));
        assert_eq!(result.score, WIN_SCORE + 3);
        // Decided at depth 1, no deeper iterations needed
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_search_plays_through_forced_pass() {
        // Whichever capture Black makes first, White must pass and Black
        // takes the other one, wiping White out.
        let params = EvalParams::default();
        let mut board = Board::new();
        board.place(Pos::new(1, 1), Piece::Black);
        board.place(Pos::new(2, 1), Piece::White);
        board.place(Pos::new(8, 8), Piece::Black);
        board.place(Pos::new(7, 8), Piece::White);
        let state = GameState::new(board, Player::Black);

        let after = state
            .apply(Move {
                at: Pos::new(3, 1),
                by: Player::Black,
            })
            .unwrap();
        assert!(!after.has_moves());

        let mut searcher = Searcher::new(Player::Black, far_deadline(), &params);
        let result = searcher.search(&state, 5);
        assert_eq!(result.best_move, Some(Pos::new(3, 1)));
        assert_eq!(result.score, WIN_SCORE + 6);
        assert_eq!(result.depth, 3);
        assert!(result.stats.pass_nodes > 0);
    }
}
