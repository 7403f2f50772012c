//! Board geometry endpoint

use axum::Json;
use serde::Serialize;
use tictac_core::{Cell, BOARD_SIDE, CELL_COUNT, LINES};

#[derive(Serialize)]
pub struct BoardInfo {
    pub size: usize,
    pub cells: Vec<usize>,
    pub lines: Vec<[usize; 3]>,
    pub player_symbol: char,
    pub computer_symbol: char,
}

/// Get board geometry
pub async fn get_board() -> Json<BoardInfo> {
    Json(BoardInfo {
        size: BOARD_SIDE,
        cells: (0..CELL_COUNT).collect(),
        lines: LINES.to_vec(),
        player_symbol: Cell::Player.symbol(),
        computer_symbol: Cell::Computer.symbol(),
    })
}
