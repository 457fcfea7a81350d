//! Board structure: one bitboard per colour

use std::fmt;

use super::bitboard::Bitboard;
use super::{Piece, Player, Pos, BOARD_SIZE};

/// Disc layout of an 8x8 board.
///
/// `Board` is `Copy`: every copy owns its own storage, so a board handed to a
/// new `GameState` can never be observed through another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// Black discs bitboard
    pub black: Bitboard,
    /// White discs bitboard
    pub white: Bitboard,
}

impl Board {
    /// Empty board
    pub const fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Standard starting position: d4/e5 White, e4/d5 Black
    pub fn initial() -> Self {
        let mut board = Self::new();
        board.place(Pos::new(4, 4), Piece::White);
        board.place(Pos::new(5, 5), Piece::White);
        board.place(Pos::new(5, 4), Piece::Black);
        board.place(Pos::new(4, 5), Piece::Black);
        board
    }

    /// Build a board from rows indexed by `y`, each row indexed by `x`
    pub fn from_rows(rows: &[[Piece; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &piece) in row.iter().enumerate() {
                board.place(Pos::new(x as u8 + 1, y as u8 + 1), piece);
            }
        }
        board
    }

    pub fn to_rows(&self) -> [[Piece; BOARD_SIZE]; BOARD_SIZE] {
        let mut rows = [[Piece::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.get(Pos::new(x as u8 + 1, y as u8 + 1));
            }
        }
        rows
    }

    /// Get disc at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Piece {
        if self.black.get(pos) {
            Piece::Black
        } else if self.white.get(pos) {
            Piece::White
        } else {
            Piece::Empty
        }
    }

    /// Cell at 1-based `(x, y)`. `None` means off the board, which is never
    /// the same thing as `Piece::Empty`.
    #[inline]
    pub fn position_at(&self, x: i32, y: i32) -> Option<Piece> {
        Pos::try_new(x, y).map(|pos| self.get(pos))
    }

    /// Overwrite the cell at 1-based `(x, y)`.
    ///
    /// Off-board coordinates leave the board untouched and return `false`.
    pub fn set_position_at(&mut self, x: i32, y: i32, piece: Piece) -> bool {
        match Pos::try_new(x, y) {
            Some(pos) => {
                self.place(pos, piece);
                true
            }
            None => {
                if cfg!(debug_assertions) {
                    tracing::warn!(x, y, ?piece, "set_position_at called with off-board coordinate");
                }
                false
            }
        }
    }

    /// Overwrite a cell (clears the other colour's bit)
    #[inline]
    pub fn place(&mut self, pos: Pos, piece: Piece) {
        match piece {
            Piece::Black => {
                self.white.clear(pos);
                self.black.set(pos);
            }
            Piece::White => {
                self.black.clear(pos);
                self.white.set(pos);
            }
            Piece::Empty => {
                self.black.clear(pos);
                self.white.clear(pos);
            }
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Discs of one colour
    #[inline]
    pub fn discs(&self, player: Player) -> Bitboard {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Empty cells
    #[inline]
    pub fn empties(&self) -> Bitboard {
        Bitboard::from_bits(!(self.black.bits() | self.white.bits()))
    }

    #[inline]
    pub fn count(&self, player: Player) -> u32 {
        self.discs(player).count()
    }

    /// Total discs on board
    #[inline]
    pub fn disc_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn empty_count(&self) -> u32 {
        64 - self.disc_count()
    }
}

/// ASCII diagram with column letters and row numbers, X for Black, O for White
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " |ABCDEFGH|")?;
        writeln!(f, "-+--------+")?;
        for y in 1..=BOARD_SIZE as u8 {
            write!(f, "{y}|")?;
            for x in 1..=BOARD_SIZE as u8 {
                let ch = match self.get(Pos::new(x, y)) {
                    Piece::Black => 'X',
                    Piece::White => 'O',
                    Piece::Empty => ' ',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f, "|{y}")?;
        }
        writeln!(f, "-+--------+")?;
        write!(f, " |ABCDEFGH|")
    }
}
