//! Error types for board and game operations

use crate::board::Side;
use crate::eval::Outcome;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("game is already over: {0:?}")]
    GameOver(Outcome),

    #[error("cell index {0} is off the board (expected 0-8)")]
    OutOfRange(usize),

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("move out of turn: it is the {0}'s turn")]
    OutOfTurn(Side),

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}
