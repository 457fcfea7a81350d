//! JSON position format spoken by the match server
//!
//! A request looks like
//!
//! ```json
//! {"board": {"Pieces": [[0,0,0,0,0,0,0,0], ...], "Next": 1}}
//! ```
//!
//! `Pieces` holds eight rows indexed by `y`, each with eight cells indexed by
//! `x`: 0 empty, 1 Black, 2 White. `Next` is 1 or 2. Other keys, such as the
//! server's own `valid_moves` list, are ignored. The reply is `[x,y]` or `PASS`.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::board::{Board, Piece, BOARD_SIZE};
use crate::engine::Decision;
use crate::error::PositionError;
use crate::state::GameState;

/// Reply for a side with no legal move
pub const PASS_REPLY: &str = "PASS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    #[serde(alias = "Board")]
    pub board: WireBoard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireBoard {
    #[serde(rename = "Pieces")]
    pub pieces: Vec<Vec<i64>>,
    #[serde(rename = "Next")]
    pub next: i64,
}

impl TryFrom<WireBoard> for GameState {
    type Error = PositionError;

    fn try_from(wire: WireBoard) -> Result<Self, Self::Error> {
        if wire.pieces.len() != BOARD_SIZE {
            return Err(PositionError::RowCount(wire.pieces.len()));
        }

        let mut rows = [[Piece::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (y, row) in wire.pieces.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(PositionError::RowLength {
                    row: y + 1,
                    len: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                rows[y][x] = Piece::from_code(value).ok_or(PositionError::InvalidCell {
                    x: x + 1,
                    y: y + 1,
                    value,
                })?;
            }
        }

        let next = Piece::from_code(wire.next)
            .and_then(Piece::owner)
            .ok_or(PositionError::InvalidNext(wire.next))?;

        Ok(GameState::new(Board::from_rows(&rows), next))
    }
}

impl From<&GameState> for WireBoard {
    fn from(state: &GameState) -> Self {
        let pieces = state
            .board()
            .to_rows()
            .iter()
            .map(|row| row.iter().map(|p| i64::from(p.code())).collect())
            .collect();
        WireBoard {
            pieces,
            next: i64::from(state.next().piece().code()),
        }
    }
}

/// Parse and validate a request body into a position.
pub fn decode_position(body: &str) -> Result<GameState, PositionError> {
    let request: WireRequest = serde_json::from_str(body)?;
    GameState::try_from(request.board)
}

/// Parse a bare board object, `{"Pieces": ..., "Next": ...}`, as sent in the
/// `board` query parameter.
pub fn decode_board(text: &str) -> Result<GameState, PositionError> {
    let board: WireBoard = serde_json::from_str(text)?;
    GameState::try_from(board)
}

/// Request body for `state`, including the `valid_moves` list the match
/// server sends alongside the board.
pub fn encode_position(state: &GameState) -> String {
    let valid_moves: Vec<_> = state
        .valid_moves()
        .iter()
        .map(|m| json!({ "Where": [m.at.x(), m.at.y()], "As": m.by.piece().code() }))
        .collect();
    json!({
        "board": WireBoard::from(state),
        "valid_moves": valid_moves,
    })
    .to_string()
}

/// Reply text sent back to the match server
pub fn reply_text(decision: Decision) -> String {
    match decision {
        Decision::Move(pos) => format!("[{},{}]", pos.x(), pos.y()),
        Decision::Pass => PASS_REPLY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Player, Pos};
    use crate::state::Move;

    const INITIAL: &str = r#"{"board":{"Pieces":[
        [0,0,0,0,0,0,0,0],
        [0,0,0,0,0,0,0,0],
        [0,0,0,0,0,0,0,0],
        [0,0,0,2,1,0,0,0],
        [0,0,0,1,2,0,0,0],
        [0,0,0,0,0,0,0,0],
        [0,0,0,0,0,0,0,0],
        [0,0,0,0,0,0,0,0]],"Next":1}}"#;

    fn pieces_with(cell: (usize, usize), value: i64) -> String {
        let mut rows = vec![vec![0i64; 8]; 8];
        rows[cell.1][cell.0] = value;
        json!({ "board": { "Pieces": rows, "Next": 2 } }).to_string()
    }

    #[test]
    fn test_decode_initial_position() {
        let state = decode_position(INITIAL).unwrap();
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn test_decode_rows_are_indexed_by_y() {
        // Row 3 (y = 3), column 6 (x = 6)
        let state = decode_position(&pieces_with((5, 2), 1)).unwrap();
        assert_eq!(state.board().get(Pos::new(6, 3)), Piece::Black);
        assert_eq!(state.board().disc_count(), 1);
        assert_eq!(state.next(), Player::White);
    }

    #[test]
    fn test_decode_ignores_extra_keys() {
        let body = r#"{"board":{"Pieces":[[0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0],[0,0,0,2,1,0,0,0],[0,0,0,1,2,0,0,0],[0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0]],"Next":1},
            "valid_moves":[{"Where":[4,3],"As":1}],"gamekey":"abc"}"#;
        assert_eq!(decode_position(body).unwrap(), GameState::initial());
    }

    #[test]
    fn test_decode_accepts_capitalised_board_key() {
        let body = INITIAL.replacen("\"board\"", "\"Board\"", 1);
        assert_eq!(decode_position(&body).unwrap(), GameState::initial());
    }

    #[test]
    fn test_decode_bare_board() {
        let board = serde_json::to_string(&WireBoard::from(&GameState::initial().pass())).unwrap();
        assert_eq!(decode_board(&board).unwrap(), GameState::initial().pass());
        assert!(matches!(decode_board(INITIAL), Err(PositionError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(decode_position("{"), Err(PositionError::Json(_))));
        assert!(matches!(decode_position("{}"), Err(PositionError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_wrong_row_count() {
        let body = json!({ "board": { "Pieces": vec![vec![0; 8]; 7], "Next": 1 } }).to_string();
        assert!(matches!(decode_position(&body), Err(PositionError::RowCount(7))));
    }

    #[test]
    fn test_decode_rejects_short_row() {
        let mut rows = vec![vec![0i64; 8]; 8];
        rows[4].pop();
        let body = json!({ "board": { "Pieces": rows, "Next": 1 } }).to_string();
        assert!(matches!(
            decode_position(&body),
            Err(PositionError::RowLength { row: 5, len: 7 })
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_cell() {
        assert!(matches!(
            decode_position(&pieces_with((0, 7), 3)),
            Err(PositionError::InvalidCell { x: 1, y: 8, value: 3 })
        ));
        assert!(matches!(
            decode_position(&pieces_with((2, 0), -1)),
            Err(PositionError::InvalidCell { x: 3, y: 1, value: -1 })
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_next() {
        for next in [0i64, 3] {
            let body = json!({ "board": { "Pieces": vec![vec![0; 8]; 8], "Next": next } }).to_string();
            assert!(matches!(
                decode_position(&body),
                Err(PositionError::InvalidNext(n)) if n == next
            ));
        }
    }

    #[test]
    fn test_encode_decodes_back() {
        let state = GameState::initial()
            .apply(Move {
                at: Pos::new(3, 4),
                by: Player::Black,
            })
            .unwrap();
        let body = encode_position(&state);
        assert_eq!(decode_position(&body).unwrap(), state);
    }

    #[test]
    fn test_encode_lists_valid_moves() {
        let body = encode_position(&GameState::initial());
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let moves = value["valid_moves"].as_array().unwrap();
        assert_eq!(moves.len(), 4);
        assert_eq!(moves[0]["Where"], json!([4, 3]));
        assert_eq!(moves[0]["As"], json!(1));
        assert_eq!(value["board"]["Next"], json!(1));
    }

    #[test]
    fn test_reply_text() {
        assert_eq!(reply_text(Decision::Move(Pos::new(4, 3))), "[4,3]");
        assert_eq!(reply_text(Decision::Pass), "PASS");
    }
}
