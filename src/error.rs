use std::path::PathBuf;

use crate::board::{Player, Pos};

/// Rejected move application. The source state is never modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move: {at} is occupied")]
    Occupied { at: Pos },

    #[error("illegal move: {at} captures no discs")]
    NoCaptures { at: Pos },

    #[error("illegal move: {got:?} moved but it is {expected:?}'s turn")]
    WrongTurn { expected: Player, got: Player },
}

/// Errors decoding an external position description.
#[derive(Debug, thiserror::Error)]
pub enum PositionError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },

    #[error("invalid cell value {value} at ({x}, {y})")]
    InvalidCell { x: usize, y: usize, value: i64 },

    #[error("invalid side to move {0} (expected 1 or 2)")]
    InvalidNext(i64),
}

/// Errors from the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("asked to choose for {requested:?} but {to_move:?} is to move")]
    NotPlayersTurn { requested: Player, to_move: Player },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors relaying a match-server game to a bot.
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    #[error("need a gamekey and at least one player key")]
    MissingKeys,

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse game json ({body:?}): {source}")]
    BadGame {
        body: String,
        source: serde_json::Error,
    },

    #[error("failed to encode board: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid side to move {0}")]
    InvalidTurn(i64),

    #[error("invalid winner {0}")]
    InvalidWinner(i64),

    #[error("opponent has not moved in {0:?}, giving up")]
    Stalled(std::time::Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::Occupied { at: Pos::new(4, 4) };
        assert_eq!(err.to_string(), "illegal move: D4 is occupied");

        let err = MoveError::WrongTurn {
            expected: Player::Black,
            got: Player::White,
        };
        assert_eq!(
            err.to_string(),
            "illegal move: White moved but it is Black's turn"
        );
    }

    #[test]
    fn test_position_error_display() {
        let err = PositionError::InvalidCell { x: 3, y: 2, value: 7 };
        assert_eq!(err.to_string(), "invalid cell value 7 at (3, 2)");
        assert_eq!(
            PositionError::InvalidNext(0).to_string(),
            "invalid side to move 0 (expected 1 or 2)"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("engine.max_depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: engine.max_depth must be >= 1"
        );
    }
}
