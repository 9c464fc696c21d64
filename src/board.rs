use once_cell::sync::Lazy;

use crate::types::{BOARD_SIZE, Color, Coord, NUM_SQUARES, Piece};

/// Number of rows each side fills at the start.
const HOME_ROWS: usize = 3;

static INITIAL: Lazy<Board> = Lazy::new(|| {
    let mut board = Board::empty();
    for idx in 0..NUM_SQUARES {
        let Some(coord) = Coord::from_index(idx) else {
            continue;
        };
        if !coord.is_dark() {
            continue;
        }
        let row = coord.row() as usize;
        if row < HOME_ROWS {
            board.place(coord, Piece::man(Color::Black));
        } else if row >= BOARD_SIZE - HOME_ROWS {
            board.place(coord, Piece::man(Color::Red));
        }
    }
    board
});

/// Checkers board: one optional piece per square, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; NUM_SQUARES],
        }
    }

    /// Creates the starting layout:
    /// black on the dark squares of rows 0-2, red on rows 5-7.
    pub fn initial() -> Self {
        *INITIAL
    }

    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.squares[coord.index()]
    }

    /// Puts `piece` on `coord`, replacing whatever was there.
    pub fn place(&mut self, coord: Coord, piece: Piece) {
        self.squares[coord.index()] = Some(piece);
    }

    /// Clears `coord` and returns the piece that stood there.
    pub fn remove(&mut self, coord: Coord) -> Option<Piece> {
        self.squares[coord.index()].take()
    }

    /// Iterates over occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(|(idx, square)| {
            let piece = (*square)?;
            Coord::from_index(idx).map(|coord| (coord, piece))
        })
    }

    pub fn count(&self, color: Color) -> u8 {
        self.pieces().filter(|(_, piece)| piece.color == color).count() as u8
    }

    /// Returns `(red_count, black_count)`.
    pub fn counts(&self) -> (u8, u8) {
        (self.count(Color::Red), self.count(Color::Black))
    }

    /// Returns the winning color once one side has no pieces left.
    ///
    /// A board without red pieces is checked first, so an empty board
    /// reports black.
    pub fn winner(&self) -> Option<Color> {
        let (red_count, black_count) = self.counts();
        if red_count == 0 {
            Some(Color::Black)
        } else if black_count == 0 {
            Some(Color::Red)
        } else {
            None
        }
    }

    /// Converts board to `[u8; 64]`, see [`Piece::to_u8`]; 0 is empty.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (cell, square) in board.iter_mut().zip(self.squares.iter()) {
            *cell = square.map_or(0, Piece::to_u8);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
