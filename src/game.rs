use tracing::{debug, info};

use crate::board::Board;
use crate::rules::{self, Move};
use crate::types::{Color, Coord, GameOutcome, GameState, MoveRecord, MoveResult, PLAYER_NONE};

/// One game of checkers: board, side to move, outcome and the
/// presentation layer's current selection.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_player: Color,
    outcome: GameOutcome,
    selected: Option<Coord>,
    last_move: Option<MoveRecord>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Color::Red)
    }

    /// Starts a session from an arbitrary position.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Self {
            board,
            current_player: to_move,
            outcome: GameOutcome::Undecided,
            selected: None,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome != GameOutcome::Undecided
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn last_move(&self) -> Option<MoveRecord> {
        self.last_move
    }

    /// Moves the piece on `from` to `to` if it belongs to the side to move
    /// and the move is legal.
    pub fn attempt_move(&mut self, from: Coord, to: Coord) -> MoveResult {
        if self.is_game_over() {
            debug!(%from, %to, "rejected: game is over");
            return MoveResult::Rejected;
        }

        let Some(piece) = self.board.piece_at(from) else {
            debug!(%from, %to, "rejected: no piece selected");
            return MoveResult::Rejected;
        };
        if piece.color != self.current_player {
            debug!(%from, %to, player = %self.current_player, "rejected: not this player's turn");
            return MoveResult::Rejected;
        }

        let Some(mv) = rules::validate(&self.board, from, to) else {
            debug!(%from, %to, "rejected: illegal move");
            return MoveResult::Rejected;
        };

        self.apply_move(mv)
    }

    /// Marks the piece on `coord` as selected. Only pieces of the side to
    /// move can be selected; otherwise the previous selection is kept.
    pub fn select(&mut self, coord: Coord) -> bool {
        if self.is_game_over() {
            return false;
        }
        match self.board.piece_at(coord) {
            Some(piece) if piece.color == self.current_player => {
                self.selected = Some(coord);
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Tries to move the selected piece to `to`.
    pub fn click_square(&mut self, to: Coord) -> MoveResult {
        let Some(from) = self.selected else {
            return MoveResult::Rejected;
        };
        self.attempt_move(from, to)
    }

    /// Destinations the piece on `from` could move to right now.
    pub fn legal_targets(&self, from: Coord) -> Vec<Coord> {
        if self.is_game_over() {
            return Vec::new();
        }
        match self.board.piece_at(from) {
            Some(piece) if piece.color == self.current_player => {
                rules::legal_moves_from(&self.board, from)
                    .into_iter()
                    .map(|mv| mv.to)
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn to_game_state(&self) -> GameState {
        let (red_count, black_count) = self.board.counts();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.to_u8(),
            red_count,
            black_count,
            is_game_over: self.is_game_over(),
            winner: self.outcome.winner().map_or(PLAYER_NONE, Color::to_u8),
            selected: self.selected,
            last_move: self.last_move,
        }
    }

    fn apply_move(&mut self, mv: Move) -> MoveResult {
        let mover = self.current_player;
        let promoted = rules::execute(&mut self.board, mv);

        self.selected = None;
        self.last_move = Some(MoveRecord {
            from: mv.from,
            to: mv.to,
            captured: mv.captured,
            promoted,
        });
        info!(
            player = %mover,
            from = %mv.from,
            to = %mv.to,
            captured = ?mv.captured,
            promoted,
            "move applied"
        );

        if let Some(winner) = self.board.winner() {
            self.outcome = GameOutcome::Won(winner);
            info!(%winner, "game over");
            return MoveResult::AppliedAndWon(winner);
        }

        self.advance();
        MoveResult::Applied
    }

    fn advance(&mut self) {
        self.current_player = self.current_player.opponent();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn at(row: u8, col: u8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn session_with(pieces: &[(u8, u8, Piece)], to_move: Color) -> GameSession {
        let mut board = Board::empty();
        for &(row, col, piece) in pieces {
            board.place(at(row, col), piece);
        }
        GameSession::from_board(board, to_move)
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameSession::new();
        let state = game.to_game_state();

        assert_eq!(game.current_player(), Color::Red);
        assert_eq!(game.outcome(), GameOutcome::Undecided);
        assert_eq!(state.red_count, 12);
        assert_eq!(state.black_count, 12);
        assert!(!state.is_game_over);
        assert_eq!(state.winner, PLAYER_NONE);
        assert_eq!(state.selected, None);
        assert_eq!(state.last_move, None);
    }

    #[test]
    fn applied_move_flips_turn() {
        let mut game = GameSession::new();

        assert_eq!(game.attempt_move(at(5, 0), at(4, 1)), MoveResult::Applied);
        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.attempt_move(at(2, 1), at(3, 2)), MoveResult::Applied);
        assert_eq!(game.current_player(), Color::Red);
    }

    #[test]
    fn moving_opponent_piece_is_rejected() {
        let mut game = GameSession::new();
        let before = *game.board();

        assert_eq!(game.attempt_move(at(2, 1), at(3, 2)), MoveResult::Rejected);
        assert_eq!(*game.board(), before);
        assert_eq!(game.current_player(), Color::Red);
    }

    #[test]
    fn illegal_move_is_rejected_without_change() {
        let mut game = GameSession::new();
        let before = *game.board();

        assert_eq!(game.attempt_move(at(5, 0), at(3, 0)), MoveResult::Rejected);
        assert_eq!(game.attempt_move(at(6, 1), at(5, 0)), MoveResult::Rejected);
        assert_eq!(game.attempt_move(at(4, 1), at(3, 2)), MoveResult::Rejected);
        assert_eq!(*game.board(), before);
        assert_eq!(game.last_move(), None);
    }

    #[test]
    fn red_jump_captures_black_piece() {
        let mut game = session_with(
            &[
                (5, 0, Piece::man(Color::Red)),
                (4, 1, Piece::man(Color::Black)),
                (0, 1, Piece::man(Color::Black)),
            ],
            Color::Red,
        );

        assert_eq!(game.attempt_move(at(5, 0), at(3, 2)), MoveResult::Applied);
        assert_eq!(game.board().count(Color::Black), 1);
        assert_eq!(game.board().piece_at(at(3, 2)), Some(Piece::man(Color::Red)));
        assert_eq!(game.board().piece_at(at(4, 1)), None);
        assert_eq!(
            game.last_move(),
            Some(MoveRecord {
                from: at(5, 0),
                to: at(3, 2),
                captured: Some(at(4, 1)),
                promoted: false,
            })
        );
    }

    #[test]
    fn moving_with_no_opponent_left_wins_immediately() {
        let mut game = session_with(&[(6, 3, Piece::man(Color::Red))], Color::Red);

        assert_eq!(
            game.attempt_move(at(6, 3), at(5, 2)),
            MoveResult::AppliedAndWon(Color::Red)
        );
        assert_eq!(game.outcome(), GameOutcome::Won(Color::Red));
        assert_eq!(game.current_player(), Color::Red);
    }

    #[test]
    fn capturing_last_piece_wins_and_freezes_game() {
        let mut game = session_with(
            &[
                (3, 2, Piece::man(Color::Black)),
                (4, 3, Piece::man(Color::Red)),
            ],
            Color::Black,
        );

        assert_eq!(
            game.attempt_move(at(3, 2), at(5, 4)),
            MoveResult::AppliedAndWon(Color::Black)
        );
        assert_eq!(game.current_player(), Color::Black);
        assert!(game.is_game_over());

        let state = game.to_game_state();
        assert!(state.is_game_over);
        assert_eq!(state.winner, Color::Black.to_u8());
        assert_eq!(state.red_count, 0);

        assert_eq!(game.attempt_move(at(5, 4), at(6, 5)), MoveResult::Rejected);
        assert!(!game.select(at(5, 4)));
        assert!(game.legal_targets(at(5, 4)).is_empty());
    }

    #[test]
    fn reaching_back_rank_crowns_piece() {
        let mut game = session_with(
            &[
                (1, 2, Piece::man(Color::Red)),
                (6, 7, Piece::man(Color::Black)),
            ],
            Color::Red,
        );

        assert_eq!(game.attempt_move(at(1, 2), at(0, 1)), MoveResult::Applied);
        assert_eq!(
            game.board().piece_at(at(0, 1)),
            Some(Piece::man(Color::Red).crowned())
        );
        assert!(game.last_move().is_some_and(|mv| mv.promoted));

        assert_eq!(game.attempt_move(at(6, 7), at(7, 6)), MoveResult::Applied);
        assert!(game.board().piece_at(at(7, 6)).is_some_and(|p| p.is_king));
    }

    #[test]
    fn select_only_accepts_current_players_pieces() {
        let mut game = GameSession::new();

        assert!(!game.select(at(2, 1)));
        assert_eq!(game.selected(), None);
        assert!(!game.select(at(4, 1)));

        assert!(game.select(at(5, 0)));
        assert!(!game.select(at(2, 1)));
        assert_eq!(game.selected(), Some(at(5, 0)));

        assert!(game.select(at(5, 2)));
        assert_eq!(game.selected(), Some(at(5, 2)));
    }

    #[test]
    fn click_square_moves_selected_piece_and_clears_selection() {
        let mut game = GameSession::new();

        assert_eq!(game.click_square(at(4, 1)), MoveResult::Rejected);

        assert!(game.select(at(5, 0)));
        assert_eq!(game.click_square(at(4, 0)), MoveResult::Rejected);
        assert_eq!(game.selected(), Some(at(5, 0)));

        assert_eq!(game.click_square(at(4, 1)), MoveResult::Applied);
        assert_eq!(game.selected(), None);
        assert_eq!(game.click_square(at(3, 0)), MoveResult::Rejected);
    }

    #[test]
    fn legal_targets_follow_turn() {
        let game = GameSession::new();

        assert_eq!(game.legal_targets(at(5, 2)), vec![at(4, 1), at(4, 3)]);
        assert_eq!(game.legal_targets(at(5, 0)), vec![at(4, 1)]);
        assert!(game.legal_targets(at(6, 1)).is_empty());
        assert!(game.legal_targets(at(2, 1)).is_empty());
    }
}
