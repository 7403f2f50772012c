//! tictac core - Game engine and AI
//!
//! This crate provides the core game logic for tictac:
//! - Board geometry (3x3 grid, row-major indices 0-8)
//! - Terminal-state evaluation (win / draw / in progress)
//! - Minimax move selection with alpha-beta pruning
//! - Game session used by the server and CLI front ends

pub mod board;
pub mod error;
pub mod eval;
pub mod ai;
pub mod game;

// Re-exports for convenient access
pub use board::{Board, Cell, Side, BOARD_SIDE, CELL_COUNT, LINES};
pub use error::Error;
pub use eval::{evaluate, winning_line, Outcome};
pub use ai::{
    minimax, move_scores, optimal_move, search, select_computer_move, terminal_score,
    AlphaBetaAI, SearchStats, DRAW_SCORE, WIN_SCORE,
};
pub use game::{Game, Move, Turn};
