use wasm_bindgen::prelude::*;

pub mod board;
pub mod game;
pub mod rules;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use game::GameSession;
pub use types::{Color, Coord, CoordError, GameOutcome, GameState, MoveResult, Piece};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
