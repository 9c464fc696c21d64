use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

pub const PLAYER_NONE: u8 = 0;
pub const PLAYER_RED: u8 = 1;
pub const PLAYER_BLACK: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },
}

/// A board coordinate, always inside the 8x8 grid.
///
/// Only built through [`Coord::new`], [`Coord::from_index`] or
/// [`Coord::offset`], which keep it on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    pub fn new(row: u8, col: u8) -> Result<Self, CoordError> {
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return Err(CoordError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= NUM_SQUARES {
            return None;
        }
        Some(Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Playable squares are the ones where `row + col` is odd.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Returns the coordinate shifted by `(dr, dc)` if it stays on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Row delta of a forward step. Red advances toward row 0, black toward row 7.
    pub fn forward(self) -> i8 {
        match self {
            Self::Red => -1,
            Self::Black => 1,
        }
    }

    /// The opponent's back rank, where this color gets crowned.
    pub fn promotion_row(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Black => (BOARD_SIZE - 1) as u8,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::Red => PLAYER_RED,
            Self::Black => PLAYER_BLACK,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Black => "black",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub is_king: bool,
}

impl Piece {
    /// An uncrowned piece.
    pub fn man(color: Color) -> Self {
        Self {
            color,
            is_king: false,
        }
    }

    pub fn crowned(self) -> Self {
        Self {
            is_king: true,
            ..self
        }
    }

    /// Square encoding used in snapshots:
    /// 1=red, 2=black, 3=red king, 4=black king.
    pub fn to_u8(self) -> u8 {
        match (self.color, self.is_king) {
            (Color::Red, false) => 1,
            (Color::Black, false) => 2,
            (Color::Red, true) => 3,
            (Color::Black, true) => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Undecided,
    Won(Color),
}

impl GameOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Self::Undecided => None,
            Self::Won(color) => Some(color),
        }
    }
}

/// Result of a move attempt as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// Illegal, out of turn, or the game is over. Nothing changed.
    Rejected,
    Applied,
    AppliedAndWon(Color),
}

impl MoveResult {
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Rejected => 0,
            Self::Applied => 1,
            Self::AppliedAndWon(_) => 2,
        }
    }
}

/// Description of the last applied move, for animating captures and crowning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    pub captured: Option<Coord>,
    pub promoted: bool,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 cells in row-major order, see [`Piece::to_u8`]; 0 is empty.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub red_count: u8,
    pub black_count: u8,
    pub is_game_over: bool,
    /// 0 while the game is undecided.
    pub winner: u8,
    pub selected: Option<Coord>,
    pub last_move: Option<MoveRecord>,
}
