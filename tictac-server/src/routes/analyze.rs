//! Board analysis endpoint
//!
//! Classifies an arbitrary board and, if play continues, reports the
//! search score of every candidate cell for the computer.

use super::{core_error, ApiError};
use axum::Json;
use serde::{Deserialize, Serialize};
use tictac_core::{evaluate, move_scores, optimal_move, winning_line, Board, Outcome, Side};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub board: String,
}

#[derive(Serialize)]
pub struct MoveScore {
    pub index: usize,
    pub score: i32,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub board: Board,
    pub outcome: Outcome,
    pub winning_line: Option<[usize; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_move: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_best_move: Option<usize>,
    pub scores: Vec<MoveScore>,
}

/// Analyze a board given in string form (`X`, `O`, `_`)
pub async fn analyze_board(Json(req): Json<AnalyzeRequest>) -> Result<Json<AnalyzeResponse>, ApiError> {
    let board: Board = req.board.parse().map_err(core_error)?;
    let outcome = evaluate(&board);

    let mut response = AnalyzeResponse {
        board,
        outcome,
        winning_line: winning_line(&board),
        best_move: None,
        player_best_move: None,
        scores: Vec::new(),
    };

    if outcome == Outcome::InProgress {
        response.best_move = Some(optimal_move(&board, Side::Computer).map_err(core_error)?);
        response.player_best_move = Some(optimal_move(&board, Side::Player).map_err(core_error)?);
        response.scores = move_scores(&board)
            .map_err(core_error)?
            .into_iter()
            .map(|(index, score)| MoveScore { index, score })
            .collect();
    }

    tracing::debug!("Analyzed {}: {:?}", board, outcome);

    Ok(Json(response))
}
