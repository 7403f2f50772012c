//! Server state management
//!
//! Shared state for the single game session behind the browser page.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tictac_core::Game;

/// Server-wide shared state
pub struct ServerState {
    pub current_game: RwLock<Game>,
    pub ai_delay: Duration,
}

impl ServerState {
    pub fn new(ai_delay_ms: u64) -> Self {
        Self {
            current_game: RwLock::new(Game::default()),
            ai_delay: Duration::from_millis(ai_delay_ms),
        }
    }

    /// Read access; a poisoned lock still holds a consistent game
    pub fn game(&self) -> RwLockReadGuard<'_, Game> {
        self.current_game
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn game_mut(&self) -> RwLockWriteGuard<'_, Game> {
        self.current_game
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(0)
    }
}
