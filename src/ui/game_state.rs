//! Game session management for the Othello GUI

use crate::{AIEngine, EngineConfig, GameState, Move, MoveError, MoveResult, Outcome, Player, Pos};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE {
        human_color: Player,
    },
    /// Player vs Player (hotseat)
    PvP {
        show_suggestions: bool,
    },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human_color: Player::Black }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// A played turn, as shown in the move list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Placed(Move),
    Passed(Player),
}

/// One game in the GUI: the current position plus everything needed to
/// drive the AI, undo and display the match
pub struct GameSession {
    pub position: GameState,
    pub mode: GameMode,
    pub outcome: Option<Outcome>,
    pub last_move: Option<Pos>,
    pub move_log: Vec<Turn>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,

    /// Snapshots taken before each placement, restored by undo
    history: Vec<(GameState, Option<Pos>, usize)>,
    engine_config: EngineConfig,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        Self::with_position(mode, GameState::initial())
    }

    /// Session starting from an arbitrary position
    pub fn with_position(mode: GameMode, position: GameState) -> Self {
        let mut session = Self {
            position,
            mode,
            outcome: None,
            last_move: None,
            move_log: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            history: Vec::new(),
            engine_config: EngineConfig::default(),
        };
        session.settle();
        session
    }

    pub fn reset(&mut self) {
        let config = self.engine_config.clone();
        *self = Self::new(self.mode);
        self.engine_config = config;
    }

    pub fn set_engine_config(&mut self, config: EngineConfig) {
        self.engine_config = config;
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine_config
    }

    pub fn current_turn(&self) -> Player {
        self.position.next()
    }

    pub fn move_number(&self) -> usize {
        self.history.len()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn() == human_color,
            GameMode::PvP { .. } => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn() != human_color,
            GameMode::PvP { .. } => false,
        }
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a disc for the human side
    pub fn try_place_disc(&mut self, pos: Pos) -> Result<(), String> {
        if self.outcome.is_some() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.execute_move(pos).map_err(|e| e.to_string())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) -> Result<(), MoveError> {
        let mv = Move {
            at: pos,
            by: self.current_turn(),
        };
        let next = self.position.apply(mv)?;

        self.history
            .push((self.position, self.last_move, self.move_log.len()));
        self.move_log.push(Turn::Placed(mv));
        self.position = next;
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.message = None;

        self.move_timer.stop();
        self.settle();
        Ok(())
    }

    /// Pass for a side without moves and record the end of the game
    fn settle(&mut self) {
        if let Some(outcome) = self.position.outcome() {
            self.outcome = Some(outcome);
            return;
        }

        if !self.position.has_moves() {
            let passing = self.current_turn();
            self.move_log.push(Turn::Passed(passing));
            self.position = self.position.pass();
            self.message = Some(format!("{} has no legal move and passes", passing.name()));
        }

        self.move_timer.start();
    }

    /// Start AI thinking
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.outcome.is_some() {
            return;
        }

        let position = self.position;
        let config = self.engine_config.clone();

        let (tx, rx) = channel();

        thread::spawn(move || {
            let engine = AIEngine::from_config(config);
            let result = engine.get_move_with_stats(&position);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.last_ai_result = Some(move_result.clone());
            self.move_timer.set_ai_time(elapsed);

            match move_result.best_move() {
                Some(pos) => {
                    if let Err(e) = self.execute_move(pos) {
                        self.message = Some(format!("AI move rejected: {e}"));
                    }
                }
                // settle() passes for sides without moves, so this is unexpected
                None => self.message = Some("AI could not find a move".to_string()),
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Request a move suggestion for the side to move
    pub fn request_suggestion(&mut self) {
        if self.outcome.is_some() || self.is_ai_thinking() {
            return;
        }

        // Quick shallow search so the UI stays responsive
        let engine = AIEngine::from_config(EngineConfig {
            max_depth: self.engine_config.max_depth.min(4),
            time_limit_ms: 200,
            ..self.engine_config.clone()
        });
        let result = engine.get_move_with_stats(&self.position);

        self.suggested_move = result.best_move();
        self.last_ai_result = Some(result);
    }

    /// Keep a suggestion on the board while automatic hints are on in PvP
    pub fn refresh_suggestion(&mut self) {
        if let GameMode::PvP { show_suggestions: true } = self.mode {
            if self.suggested_move.is_none() {
                self.request_suggestion();
            }
        }
    }

    /// Turn automatic hints on or off; only hotseat games have them
    pub fn set_show_suggestions(&mut self, enabled: bool) {
        if let GameMode::PvP { show_suggestions } = &mut self.mode {
            *show_suggestions = enabled;
            if !enabled {
                self.suggested_move = None;
            }
        }
    }

    /// Undo the last move; in PvE also the AI replies back to the human's turn
    pub fn undo(&mut self) {
        if self.history.is_empty() || self.is_ai_thinking() {
            return;
        }

        while let Some((position, last_move, log_len)) = self.history.pop() {
            self.position = position;
            self.last_move = last_move;
            self.move_log.truncate(log_len);
            if self.is_human_turn() {
                break;
            }
        }

        self.outcome = None;
        self.suggested_move = None;
        self.message = None;
        self.move_timer.start();
    }
}
