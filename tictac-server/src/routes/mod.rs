//! HTTP route handlers

pub mod analyze;
pub mod board;
pub mod game;
pub mod status;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use tictac_core::Error;

/// Error body returned by handlers
pub type ApiError = (StatusCode, Json<Value>);

/// Map a core error to a status code and `{"error": ...}` body
pub fn core_error(err: Error) -> ApiError {
    let status = match err {
        Error::GameOver(_) | Error::CellOccupied(_) | Error::OutOfTurn(_) => StatusCode::CONFLICT,
        Error::OutOfRange(_) | Error::InvalidBoard(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": err.to_string() })))
}
