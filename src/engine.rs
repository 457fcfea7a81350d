//! Main AI Engine wrapping the search
//!
//! The engine turns a position into a decision. The priority is:
//!
//! 1. **Pass**: the side to move has no legal move
//! 2. **Corner shortcut**: a corner is available (can be disabled in config)
//! 3. **Alpha-Beta**: iterative deepening search until depth or deadline
//!
//! The corner shortcut is a heuristic override of the search. It takes the
//! first corner in generation order without looking further, even when a
//! deeper line would prefer another move.
//!
//! # Example
//!
//! ```
//! use othello::{AIEngine, Decision, GameState};
//!
//! let engine = AIEngine::with_config(4, 500);
//! let state = GameState::initial();
//!
//! let result = engine.get_move_with_stats(&state);
//! if let Decision::Move(pos) = result.decision {
//!     println!("Best move: {pos} ({:?}, {}ms)", result.search_type, result.time_ms);
//! }
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::board::{Player, Pos};
use crate::error::EngineError;
use crate::eval::{evaluate, EvalParams};
use crate::search::{SearchResult, Searcher};
use crate::state::{GameState, Move};

/// What the side to move should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Move(Pos),
    Pass,
}

impl Decision {
    #[inline]
    pub fn as_move(self) -> Option<Pos> {
        match self {
            Decision::Move(pos) => Some(pos),
            Decision::Pass => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Move(pos) => write!(f, "{pos}"),
            Decision::Pass => f.write_str("pass"),
        }
    }
}

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// No legal move, nothing searched
    Pass,
    /// Corner taken without searching
    CornerShortcut,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a decision with search statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub decision: Decision,
    /// Score from the deciding player's point of view
    pub score: i32,
    pub search_type: SearchType,
    /// Deepest completed iteration (0 when nothing was searched in full)
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// The deadline cut the search short
    pub timed_out: bool,
}

impl MoveResult {
    #[inline]
    fn pass(score: i32, time_ms: u64) -> Self {
        Self {
            decision: Decision::Pass,
            score,
            search_type: SearchType::Pass,
            depth: 0,
            nodes: 0,
            time_ms,
            timed_out: false,
        }
    }

    #[inline]
    fn corner(pos: Pos, score: i32, time_ms: u64) -> Self {
        Self {
            decision: Decision::Move(pos),
            score,
            search_type: SearchType::CornerShortcut,
            depth: 0,
            nodes: 1,
            time_ms,
            timed_out: false,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, time_ms: u64) -> Self {
        Self {
            decision: result.best_move.map_or(Decision::Pass, Decision::Move),
            score: result.score,
            search_type: SearchType::AlphaBeta,
            depth: result.depth,
            nodes: result.nodes,
            time_ms,
            timed_out: result.timed_out,
        }
    }

    /// Chosen destination, `None` for a pass
    #[inline]
    pub fn best_move(&self) -> Option<Pos> {
        self.decision.as_move()
    }
}

/// Engine settings, loadable from the `[engine]` table of the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest iteration to run
    pub max_depth: u8,
    /// Budget per decision when no explicit deadline is given
    pub time_limit_ms: u64,
    /// Take an available corner without searching
    pub corner_shortcut: bool,
    pub eval: EvalParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            time_limit_ms: 1000,
            corner_shortcut: true,
            eval: EvalParams::default(),
        }
    }
}

/// Main AI Engine for Othello.
///
/// Holds configuration only. Every decision builds its own [`Searcher`], so
/// one engine can serve concurrent callers through `&self`.
#[derive(Debug, Clone, Default)]
pub struct AIEngine {
    config: EngineConfig,
}

impl AIEngine {
    /// Engine with default settings: depth 8, 1000ms, corner shortcut on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the given depth and time limit, other settings default.
    #[must_use]
    pub fn with_config(max_depth: u8, time_limit_ms: u64) -> Self {
        Self::from_config(EngineConfig {
            max_depth,
            time_limit_ms,
            ..EngineConfig::default()
        })
    }

    #[must_use]
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decision for the side to move, using the configured time limit.
    #[must_use]
    pub fn get_move(&self, state: &GameState) -> Decision {
        self.get_move_with_stats(state).decision
    }

    /// Like [`AIEngine::get_move`], with search statistics.
    #[must_use]
    pub fn get_move_with_stats(&self, state: &GameState) -> MoveResult {
        let deadline = Instant::now() + Duration::from_millis(self.config.time_limit_ms);
        self.choose(state, deadline)
    }

    /// Decide for `player` in `state` before `deadline`.
    ///
    /// Fails only when `player` is not the side to move. A deadline that has
    /// already passed still yields a legal move if one exists.
    pub fn decide(
        &self,
        state: &GameState,
        player: Player,
        deadline: Instant,
    ) -> Result<MoveResult, EngineError> {
        if player != state.next() {
            return Err(EngineError::NotPlayersTurn {
                requested: player,
                to_move: state.next(),
            });
        }
        Ok(self.choose(state, deadline))
    }

    fn choose(&self, state: &GameState, deadline: Instant) -> MoveResult {
        let start = Instant::now();
        let player = state.next();
        let params = &self.config.eval;

        let moves = state.valid_moves();

        let result = if moves.is_empty() {
            MoveResult::pass(evaluate(state, player, params), elapsed_ms(start))
        } else if let Some(result) = self.corner_result(state, &moves, start) {
            result
        } else {
            let mut searcher = Searcher::new(player, deadline, params);
            let search = searcher.search(state, self.config.max_depth);
            MoveResult::from_alphabeta(search, elapsed_ms(start))
        };

        info!(
            player = player.name(),
            decision = %result.decision,
            search = ?result.search_type,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            time_ms = result.time_ms,
            timed_out = result.timed_out,
            "move decided"
        );

        result
    }

    /// First legal corner move in generation order, if the shortcut is on
    fn corner_move(&self, moves: &[Move]) -> Option<Move> {
        if !self.config.corner_shortcut {
            return None;
        }
        moves.iter().copied().find(|m| m.at.is_corner())
    }

    /// Corner shortcut scored by the position it leads to. `None` sends the
    /// decision on to the search, including when the corner fails to apply.
    fn corner_result(&self, state: &GameState, moves: &[Move], start: Instant) -> Option<MoveResult> {
        let corner = self.corner_move(moves)?;
        match state.apply(corner) {
            Ok(child) => {
                let score = evaluate(&child, state.next(), &self.config.eval);
                Some(MoveResult::corner(corner.at, score, elapsed_ms(start)))
            }
            Err(err) => {
                error!(at = %corner.at, %err, "generated corner move did not apply");
                None
            }
        }
    }

    /// Set the maximum search depth.
    pub fn set_max_depth(&mut self, depth: u8) {
        self.config.max_depth = depth;
    }

    /// Set the per-decision time budget used by [`AIEngine::get_move`].
    pub fn set_time_limit(&mut self, time_ms: u64) {
        self.config.time_limit_ms = time_ms;
    }

    pub fn set_corner_shortcut(&mut self, enabled: bool) {
        self.config.corner_shortcut = enabled;
    }

    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.config.max_depth
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
