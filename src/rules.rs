use crate::board::Board;
use crate::types::Coord;

/// A validated move. `captured` is the jumped-over square of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub captured: Option<Coord>,
}

/// Checks whether the piece on `from` may move to `to`.
///
/// Pieces only ever move forward for their color, kings included: either one
/// diagonal step, or a two-square jump over an adjacent opposing piece. The
/// destination must be empty. Returns `None` for an illegal move or an empty
/// `from` square. Does not touch the board.
pub fn validate(board: &Board, from: Coord, to: Coord) -> Option<Move> {
    let piece = board.piece_at(from)?;
    if board.piece_at(to).is_some() {
        return None;
    }

    let row_delta = to.row() as i8 - from.row() as i8;
    let col_delta = (to.col() as i8 - from.col() as i8).abs();
    let direction = piece.color.forward();

    if row_delta == direction && col_delta == 1 {
        return Some(Move {
            from,
            to,
            captured: None,
        });
    }

    if row_delta == 2 * direction && col_delta == 2 {
        let mid = from.offset(direction, (to.col() as i8 - from.col() as i8) / 2)?;
        return match board.piece_at(mid) {
            Some(jumped) if jumped.color != piece.color => Some(Move {
                from,
                to,
                captured: Some(mid),
            }),
            _ => None,
        };
    }

    None
}

/// Applies a move returned by [`validate`] and crowns the piece on the
/// opponent's back rank. Returns `true` when this move crowned it.
pub fn execute(board: &mut Board, mv: Move) -> bool {
    let Some(mut piece) = board.remove(mv.from) else {
        return false;
    };

    if let Some(captured) = mv.captured {
        board.remove(captured);
    }

    let promoted = !piece.is_king && mv.to.row() == piece.color.promotion_row();
    if promoted {
        piece = piece.crowned();
    }
    board.place(mv.to, piece);

    promoted
}

/// All legal moves for the piece on `from`, simple steps first.
pub fn legal_moves_from(board: &Board, from: Coord) -> Vec<Move> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    let dr = piece.color.forward();

    [(dr, -1), (dr, 1), (2 * dr, -2), (2 * dr, 2)]
        .into_iter()
        .filter_map(|(r, c)| from.offset(r, c))
        .filter_map(|to| validate(board, from, to))
        .collect()
}
