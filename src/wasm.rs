//! JavaScript-facing bindings for the game session.
//!
//! Colors cross the boundary as 1 (red) / 2 (black), 0 meaning none.
//! Move results as 0 (rejected) / 1 (applied) / 2 (applied, game won).

use wasm_bindgen::prelude::*;

use crate::game::GameSession;
use crate::types::{Coord, PLAYER_NONE};

#[wasm_bindgen]
pub struct WasmGame {
    inner: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            inner: GameSession::new(),
        }
    }

    /// Start over from the initial layout.
    pub fn reset(&mut self) {
        self.inner = GameSession::new();
    }

    /// Select the piece to move. Returns false for empty squares,
    /// opponent pieces or a finished game.
    #[wasm_bindgen(js_name = selectPiece)]
    pub fn select_piece(&mut self, row: u8, col: u8) -> bool {
        Coord::new(row, col).is_ok_and(|coord| self.inner.select(coord))
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
    }

    /// Move the selected piece to the clicked square.
    #[wasm_bindgen(js_name = clickSquare)]
    pub fn click_square(&mut self, row: u8, col: u8) -> u8 {
        match Coord::new(row, col) {
            Ok(to) => self.inner.click_square(to).to_u8(),
            Err(_) => 0,
        }
    }

    #[wasm_bindgen(js_name = attemptMove)]
    pub fn attempt_move(&mut self, from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> u8 {
        match (Coord::new(from_row, from_col), Coord::new(to_row, to_col)) {
            (Ok(from), Ok(to)) => self.inner.attempt_move(from, to).to_u8(),
            _ => 0,
        }
    }

    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player().to_u8()
    }

    /// Winner color, 0 while undecided.
    pub fn outcome(&self) -> u8 {
        self.inner
            .outcome()
            .winner()
            .map_or(PLAYER_NONE, |color| color.to_u8())
    }

    /// Square contents: 0=empty, 1=red, 2=black, 3=red king, 4=black king.
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, row: u8, col: u8) -> u8 {
        Coord::new(row, col)
            .ok()
            .and_then(|coord| self.inner.board().piece_at(coord))
            .map_or(0, |piece| piece.to_u8())
    }

    /// Legal destinations as a flat [row, col, row, col, ...] array.
    #[wasm_bindgen(js_name = legalTargets)]
    pub fn legal_targets(&self, row: u8, col: u8) -> Vec<u8> {
        let Ok(from) = Coord::new(row, col) else {
            return vec![];
        };
        self.inner
            .legal_targets(from)
            .iter()
            .flat_map(|to| [to.row(), to.col()])
            .collect()
    }

    /// Full snapshot for re-rendering.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.to_game_state()).map_err(JsValue::from)
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
