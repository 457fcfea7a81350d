//! Board representation for Othello

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Board size (8x8)
pub const BOARD_SIZE: usize = 8;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 64

/// Contents of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty,
    Black,
    White,
}

impl Piece {
    /// Wire value used by the JSON position format (0, 1, 2)
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Piece::Empty => 0,
            Piece::Black => 1,
            Piece::White => 2,
        }
    }

    #[inline]
    pub fn from_code(code: i64) -> Option<Piece> {
        match code {
            0 => Some(Piece::Empty),
            1 => Some(Piece::Black),
            2 => Some(Piece::White),
            _ => None,
        }
    }

    /// The player owning this piece, `None` for an empty cell
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Piece::Black => Some(Player::Black),
            Piece::White => Some(Player::White),
            Piece::Empty => None,
        }
    }
}

/// A side in the game. Black is player one and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Get opponent
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    #[inline]
    pub fn piece(self) -> Piece {
        match self {
            Player::Black => Piece::Black,
            Player::White => Piece::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Black => "Black",
            Player::White => "White",
        }
    }
}

/// Position on the board.
///
/// Coordinates are 1-based: `x` is the column and `y` the row, both in `1..=8`.
/// The fields are private, so every `Pos` in existence is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    x: u8,
    y: u8,
}

impl Pos {
    /// # Panics
    ///
    /// Panics if `(x, y)` is off the board. Use [`Pos::try_new`] for
    /// coordinates from outside the program.
    #[inline]
    pub fn new(x: u8, y: u8) -> Self {
        assert!(
            Self::is_valid(i32::from(x), i32::from(y)),
            "({x}, {y}) is off the board"
        );
        Self { x, y }
    }

    /// Column, `1..=8`
    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Row, `1..=8`
    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Checked constructor, `None` when the coordinate is off the board
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        if Self::is_valid(x, y) {
            Some(Self { x: x as u8, y: y as u8 })
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32) -> bool {
        (1..=BOARD_SIZE as i32).contains(&x) && (1..=BOARD_SIZE as i32).contains(&y)
    }

    /// Row-major index, 0 for (1,1) and 63 for (8,8)
    #[inline]
    pub fn to_index(self) -> usize {
        (self.y as usize - 1) * BOARD_SIZE + (self.x as usize - 1)
    }

    /// # Panics
    ///
    /// Panics if `idx` is not below 64.
    #[inline]
    pub fn from_index(idx: usize) -> Self {
        assert!(idx < TOTAL_CELLS, "cell index {idx} is off the board");
        Self {
            x: (idx % BOARD_SIZE) as u8 + 1,
            y: (idx / BOARD_SIZE) as u8 + 1,
        }
    }

    /// Step by `(dx, dy)`, `None` when that leaves the board
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Pos> {
        Pos::try_new(i32::from(self.x) + dx, i32::from(self.y) + dy)
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        CORNERS.contains(&self)
    }
}

/// The four corner cells
pub const CORNERS: [Pos; 4] = [
    Pos { x: 1, y: 1 },
    Pos { x: 8, y: 1 },
    Pos { x: 1, y: 8 },
    Pos { x: 8, y: 8 },
];

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

/// Letter-number notation: column letter then row number, e.g. `C4`
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.x - 1) as char, self.y)
    }
}

/// Error parsing letter-number notation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid board coordinate {0:?}")]
pub struct ParsePosError(pub String);

impl FromStr for Pos {
    type Err = ParsePosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePosError(s.to_string());
        let mut chars = s.trim().chars();
        let col = chars.next().ok_or_else(err)?.to_ascii_uppercase();
        let row: i32 = chars.as_str().parse().map_err(|_| err())?;
        if !col.is_ascii_uppercase() {
            return Err(err());
        }
        Pos::try_new(i32::from(col as u8 - b'A') + 1, row).ok_or_else(err)
    }
}
