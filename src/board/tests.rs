use super::*;

#[test]
fn test_player_opponent() {
    assert_eq!(Player::Black.opponent(), Player::White);
    assert_eq!(Player::White.opponent(), Player::Black);
    assert_eq!(Player::Black.piece(), Piece::Black);
    assert_eq!(Piece::White.owner(), Some(Player::White));
    assert_eq!(Piece::Empty.owner(), None);
}

#[test]
fn test_piece_codes() {
    for piece in [Piece::Empty, Piece::Black, Piece::White] {
        assert_eq!(Piece::from_code(i64::from(piece.code())), Some(piece));
    }
    assert_eq!(Piece::from_code(3), None);
    assert_eq!(Piece::from_code(-1), None);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(3, 5);
    assert_eq!(pos.to_index(), 4 * 8 + 2);
    assert_eq!(Pos::from_index(34), pos);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(1, 1));
    assert!(Pos::is_valid(8, 8));
    assert!(!Pos::is_valid(0, 1));
    assert!(!Pos::is_valid(1, 0));
    assert!(!Pos::is_valid(9, 1));
    assert!(!Pos::is_valid(1, 9));
    assert_eq!(Pos::try_new(0, 4), None);
    assert_eq!(Pos::new(8, 8).offset(1, 0), None);
    assert_eq!(Pos::new(1, 1).offset(1, 1), Some(Pos::new(2, 2)));
}

#[test]
fn test_pos_accessors_and_checked_construction() {
    let pos = Pos::new(4, 7);
    assert_eq!((pos.x(), pos.y()), (4, 7));
    assert_eq!(Pos::try_new(12, 2), None);
    assert_eq!(Pos::try_new(3, -1), None);
    assert_eq!(Pos::from_index(63), Pos::new(8, 8));
}

#[test]
#[should_panic(expected = "off the board")]
fn test_pos_new_rejects_off_board() {
    let _ = Pos::new(0, 3);
}

#[test]
#[should_panic(expected = "off the board")]
fn test_pos_from_index_rejects_out_of_range() {
    let _ = Pos::from_index(TOTAL_CELLS);
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 8);
    assert_eq!(TOTAL_CELLS, 64);
}

#[test]
fn test_pos_ordering() {
    // Row-major: every cell of row 1 comes before row 2
    assert!(Pos::new(8, 1) < Pos::new(1, 2));
    assert!(Pos::new(1, 1) < Pos::new(2, 1));
}

#[test]
fn test_pos_corner_indices() {
    assert_eq!(Pos::new(1, 1).to_index(), 0);
    assert_eq!(Pos::new(8, 1).to_index(), 7);
    assert_eq!(Pos::new(1, 8).to_index(), 56);
    assert_eq!(Pos::new(8, 8).to_index(), 63);
    assert!(CORNERS.iter().all(|c| c.is_corner()));
    assert!(!Pos::new(2, 2).is_corner());
}

#[test]
fn test_pos_notation() {
    assert_eq!(Pos::new(3, 4).to_string(), "C4");
    assert_eq!("c4".parse::<Pos>(), Ok(Pos::new(3, 4)));
    assert_eq!("H8".parse::<Pos>(), Ok(Pos::new(8, 8)));
    assert!("I1".parse::<Pos>().is_err());
    assert!("A0".parse::<Pos>().is_err());
    assert!("".parse::<Pos>().is_err());
    assert!("4C".parse::<Pos>().is_err());
}

#[test]
fn test_position_at_off_board_is_not_empty() {
    let board = Board::new();
    assert_eq!(board.position_at(1, 1), Some(Piece::Empty));
    assert_eq!(board.position_at(0, 1), None);
    assert_eq!(board.position_at(1, 9), None);
}

#[test]
fn test_set_position_at() {
    let mut board = Board::new();
    assert!(board.set_position_at(2, 3, Piece::White));
    assert_eq!(board.position_at(2, 3), Some(Piece::White));

    // Overwriting a colour clears the other bit
    assert!(board.set_position_at(2, 3, Piece::Black));
    assert_eq!(board.get(Pos::new(2, 3)), Piece::Black);
    assert!(!board.white.get(Pos::new(2, 3)));

    let before = board;
    assert!(!board.set_position_at(9, 3, Piece::Black));
    assert!(!board.set_position_at(0, 0, Piece::White));
    assert_eq!(board, before);
}

#[test]
fn test_initial_board() {
    let board = Board::initial();
    assert_eq!(board.count(Player::Black), 2);
    assert_eq!(board.count(Player::White), 2);
    assert_eq!(board.empty_count(), 60);
    assert_eq!(board.get(Pos::new(4, 4)), Piece::White);
    assert_eq!(board.get(Pos::new(5, 4)), Piece::Black);
}

#[test]
fn test_rows_round_trip() {
    let board = Board::initial();
    assert_eq!(Board::from_rows(&board.to_rows()), board);
}

#[test]
fn test_bitboard_iter_row_major() {
    let bb: Bitboard = [Pos::new(8, 8), Pos::new(1, 2), Pos::new(3, 1)].into_iter().collect();
    let order: Vec<Pos> = bb.iter_ones().collect();
    assert_eq!(order, vec![Pos::new(3, 1), Pos::new(1, 2), Pos::new(8, 8)]);
    assert_eq!(bb.count(), 3);
}

#[test]
fn test_board_display() {
    let text = Board::initial().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], " |ABCDEFGH|");
    assert_eq!(lines[5], "4|   OX   |4");
    assert_eq!(lines[6], "5|   XO   |5");
    assert_eq!(lines.len(), 12);
}
