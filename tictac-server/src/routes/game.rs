//! Game API routes
//!
//! The browser page drives a single shared game: the human posts a cell,
//! the server applies it and, after the configured pause, the computer's
//! reply.

use super::{core_error, ApiError};
use crate::state::ServerState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tictac_core::{Board, Cell, Error, Game, Move, Outcome, Side};

#[derive(Serialize)]
pub struct GameStateResponse {
    pub board: Board,
    pub cells: Vec<Cell>,
    pub outcome: Outcome,
    pub message: Option<&'static str>,
    pub game_over: bool,
    /// Side to move, absent once the game is over
    pub next: Option<Side>,
    pub winning_line: Option<[usize; 3]>,
    pub history: Vec<Move>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_move: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer_move: Option<usize>,
}

impl GameStateResponse {
    fn from_game(game: &Game) -> Self {
        let outcome = game.outcome();
        Self {
            board: *game.board(),
            cells: game.board().cells().to_vec(),
            outcome,
            message: outcome.message(),
            game_over: game.is_over(),
            next: if game.is_over() {
                None
            } else {
                Some(game.to_move())
            },
            winning_line: game.winning_line(),
            history: game.history().to_vec(),
            player_move: None,
            computer_move: None,
        }
    }
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub index: usize,
}

#[derive(Deserialize, Default)]
pub struct ResetRequest {
    pub computer_starts: Option<bool>,
}

/// Get current game state
pub async fn get_game_state(State(state): State<Arc<ServerState>>) -> Json<GameStateResponse> {
    let game = state.game();
    Json(GameStateResponse::from_game(&game))
}

/// Apply the human's move, then the computer's reply
pub async fn make_player_move(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let (outcome, generation) = apply_player_move(&state, req.index).map_err(core_error)?;

    let computer_move = if outcome.is_terminal() {
        None
    } else {
        pause(&state).await;
        apply_computer_reply(&state, generation)
    };

    let game = state.game();
    let mut response = GameStateResponse::from_game(&game);
    response.player_move = Some(req.index);
    response.computer_move = computer_move;
    Ok(Json(response))
}

/// Let the computer move when it is its turn (e.g. it opens the game)
pub async fn get_ai_move(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let generation = {
        let game = state.game();
        check_computer_turn(&game).map_err(core_error)?;
        game.generation()
    };

    pause(&state).await;
    let index = apply_computer_reply(&state, generation).ok_or_else(|| {
        (
            StatusCode::CONFLICT,
            Json(json!({ "error": "game changed before the computer could move" })),
        )
    })?;

    let game = state.game();
    let mut response = GameStateResponse::from_game(&game);
    response.computer_move = Some(index);
    Ok(Json(response))
}

/// Start a fresh game
pub async fn reset_game(
    State(state): State<Arc<ServerState>>,
    req: Option<Json<ResetRequest>>,
) -> Json<GameStateResponse> {
    let req = req.map(|Json(r)| r).unwrap_or_default();

    let mut game = state.game_mut();
    match req.computer_starts {
        Some(true) => game.restart(Side::Computer),
        Some(false) => game.restart(Side::Player),
        None => game.reset(),
    }
    tracing::info!("Game reset, {} moves first", game.to_move());

    Json(GameStateResponse::from_game(&game))
}

// ============================================================================
// HELPERS
// ============================================================================

/// Apply the human's move, returning the outcome and the game's generation
fn apply_player_move(state: &ServerState, index: usize) -> Result<(Outcome, u64), Error> {
    let mut game = state.game_mut();
    let outcome = game.player_move(index)?;
    tracing::info!("Player played cell {} ({:?})", index, outcome);
    Ok((outcome, game.generation()))
}

/// Apply the computer's move unless the game changed during the pause
///
/// A reset bumps the generation, so a request paused across a reset never
/// moves in the new game.
fn apply_computer_reply(state: &ServerState, generation: u64) -> Option<usize> {
    let mut game = state.game_mut();
    if game.generation() != generation {
        tracing::debug!("Game was reset before computer reply, skipping");
        return None;
    }
    if game.is_over() || game.to_move() != Side::Computer {
        tracing::debug!("Game changed before computer reply, skipping");
        return None;
    }

    match game.computer_move() {
        Ok(index) => {
            tracing::info!("Computer played cell {} ({:?})", index, game.outcome());
            Some(index)
        }
        Err(e) => {
            tracing::warn!("Computer move failed: {}", e);
            None
        }
    }
}

fn check_computer_turn(game: &Game) -> Result<(), Error> {
    if game.is_over() {
        return Err(Error::GameOver(game.outcome()));
    }
    if game.to_move() != Side::Computer {
        return Err(Error::OutOfTurn(game.to_move()));
    }
    Ok(())
}

async fn pause(state: &ServerState) {
    if !state.ai_delay.is_zero() {
        tokio::time::sleep(state.ai_delay).await;
    }
}
