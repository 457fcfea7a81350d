//! Legal move generation

use crate::board::{Board, Player, Pos};
use crate::state::{GameState, Move};

use super::capture::has_capture;

/// All legal moves for `state.next()`, scanned in row-major order.
///
/// The order is fixed so that the search breaks ties the same way every run.
pub fn valid_moves(state: &GameState) -> Vec<Move> {
    let by = state.next();
    legal_destinations(state.board(), by)
        .map(|at| Move { at, by })
        .collect()
}

/// Number of legal destinations `player` would have on `board`
pub fn mobility(board: &Board, player: Player) -> usize {
    legal_destinations(board, player).count()
}

fn legal_destinations(board: &Board, player: Player) -> impl Iterator<Item = Pos> + '_ {
    board
        .empties()
        .iter_ones()
        .filter(move |&at| has_capture(board, at, player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    #[test]
    fn test_opening_has_four_moves() {
        let state = GameState::initial();
        let moves = valid_moves(&state);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.by == Player::Black));
    }

    #[test]
    fn test_generation_order_is_row_major() {
        let moves = valid_moves(&GameState::initial());
        let at: Vec<Pos> = moves.iter().map(|m| m.at).collect();
        assert_eq!(
            at,
            vec![Pos::new(4, 3), Pos::new(3, 4), Pos::new(6, 5), Pos::new(5, 6)]
        );
    }

    #[test]
    fn test_generation_is_reproducible() {
        let state = GameState::initial();
        assert_eq!(valid_moves(&state), valid_moves(&state));
    }

    #[test]
    fn test_walled_off_side_has_no_moves() {
        // White fills the top row except a corner Black cannot reach by capture
        let mut board = Board::new();
        for x in 1..=7 {
            board.place(Pos::new(x, 1), Piece::White);
        }
        board.place(Pos::new(8, 1), Piece::Black);
        board.place(Pos::new(1, 2), Piece::White);
        let state = GameState::new(board, Player::Black);
        // Black at (8,1) could flank along row 1 only from (0,1), which is off board
        assert!(valid_moves(&state).is_empty());
        assert_eq!(mobility(&board, Player::Black), 0);
    }

    #[test]
    fn test_mobility_counts_other_player() {
        let board = Board::initial();
        assert_eq!(mobility(&board, Player::White), 4);
    }
}
