//! Immutable game state snapshots and move application

use std::fmt;

use crate::board::{Board, Piece, Player, Pos};
use crate::error::MoveError;
use crate::rules::{captured_positions, has_capture, mobility, valid_moves};

/// A disc placement by one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub at: Pos,
    pub by: Player,
}

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// Board contents plus the side whose move is applied next.
///
/// `next` may have no legal move; passing is the caller's decision
/// (see [`GameState::pass`]). States are never mutated after construction:
/// [`GameState::apply`] returns a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    next: Player,
}

impl GameState {
    pub fn new(board: Board, next: Player) -> Self {
        Self { board, next }
    }

    /// Standard opening position, Black to move
    pub fn initial() -> Self {
        Self::new(Board::initial(), Player::Black)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn next(&self) -> Player {
        self.next
    }

    /// `at` is empty and `next` would capture at least one disc there
    #[inline]
    pub fn legal_move(&self, at: Pos) -> bool {
        self.board.get(at) == Piece::Empty && has_capture(&self.board, at, self.next)
    }

    /// Legal moves for `next` in row-major order
    pub fn valid_moves(&self) -> Vec<Move> {
        valid_moves(self)
    }

    pub fn has_moves(&self) -> bool {
        mobility(&self.board, self.next) > 0
    }

    /// Apply a move and return the successor state.
    ///
    /// Places the mover's disc, flips every capturing run and hands the turn
    /// to the other player. On error nothing observable has changed.
    pub fn apply(&self, mv: Move) -> Result<GameState, MoveError> {
        if mv.by != self.next {
            return Err(MoveError::WrongTurn {
                expected: self.next,
                got: mv.by,
            });
        }
        if !self.board.is_empty(mv.at) {
            return Err(MoveError::Occupied { at: mv.at });
        }

        let flips = captured_positions(&self.board, mv.at, mv.by);
        if flips.is_empty() {
            return Err(MoveError::NoCaptures { at: mv.at });
        }

        let mut board = self.board;
        let piece = mv.by.piece();
        board.place(mv.at, piece);
        for pos in flips.iter_ones() {
            board.place(pos, piece);
        }

        Ok(GameState {
            board,
            next: self.next.opponent(),
        })
    }

    /// Same board, other side to move
    #[must_use]
    pub fn pass(&self) -> GameState {
        GameState {
            board: self.board,
            next: self.next.opponent(),
        }
    }

    /// Neither side can move
    pub fn is_terminal(&self) -> bool {
        !self.has_moves() && mobility(&self.board, self.next.opponent()) == 0
    }

    /// Winner by disc count once the game is over
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }
        let black = self.board.count(Player::Black);
        let white = self.board.count(Player::White);
        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Winner(Player::Black),
            std::cmp::Ordering::Less => Outcome::Winner(Player::White),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move", self.next.name())
    }
}
