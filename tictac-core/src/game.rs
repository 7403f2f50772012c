//! Game session: applies real moves, tracks turn and result

use crate::ai::select_computer_move;
use crate::board::{Board, Side};
use crate::error::Error;
use crate::eval::{evaluate, winning_line, Outcome};
use serde::{Deserialize, Serialize};

/// One committed move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub side: Side,
    pub index: usize,
}

/// Result of a player turn (the human move plus any computer reply)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub player_move: usize,
    pub computer_move: Option<usize>,
    pub outcome: Outcome,
}

/// Game state (owns the only real board)
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    starter: Side,
    to_move: Side,
    outcome: Outcome,
    history: Vec<Move>,
    /// Bumped on every reset so callers can detect a fresh game
    generation: u64,
}

impl Game {
    /// Create new game with `starter` to move first
    pub fn new(starter: Side) -> Self {
        Self {
            board: Board::new(),
            starter,
            to_move: starter,
            outcome: Outcome::InProgress,
            history: Vec::new(),
            generation: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Side to move next (meaningless once the game is over)
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn starter(&self) -> Side {
        self.starter
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        winning_line(&self.board)
    }

    /// Number of resets since this session was created
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    fn commit(&mut self, side: Side, index: usize) -> Result<Outcome, Error> {
        if self.is_over() {
            return Err(Error::GameOver(self.outcome));
        }
        if self.to_move != side {
            return Err(Error::OutOfTurn(self.to_move));
        }

        self.board.place(index, side)?;
        self.history.push(Move { side, index });
        self.outcome = evaluate(&self.board);
        self.to_move = side.opponent();

        Ok(self.outcome)
    }

    /// Apply the human's move only
    pub fn player_move(&mut self, index: usize) -> Result<Outcome, Error> {
        self.commit(Side::Player, index)
    }

    /// Ask the search for the computer's move and apply it
    pub fn computer_move(&mut self) -> Result<usize, Error> {
        if self.is_over() {
            return Err(Error::GameOver(self.outcome));
        }
        if self.to_move != Side::Computer {
            return Err(Error::OutOfTurn(self.to_move));
        }

        let index = select_computer_move(&self.board)?;
        self.commit(Side::Computer, index)?;
        Ok(index)
    }

    /// Apply the human's move and, if play continues, the computer's reply
    pub fn play(&mut self, index: usize) -> Result<Turn, Error> {
        let outcome = self.player_move(index)?;

        let computer_move = if outcome.is_terminal() {
            None
        } else {
            Some(self.computer_move()?)
        };

        Ok(Turn {
            player_move: index,
            computer_move,
            outcome: self.outcome,
        })
    }

    /// Clear the board and start again with the same starter
    pub fn reset(&mut self) {
        self.restart(self.starter);
    }

    /// Clear the board and start again with a new starter
    pub fn restart(&mut self, starter: Side) {
        let generation = self.generation + 1;
        *self = Self::new(starter);
        self.generation = generation;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Side::Player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_applies_reply() {
        let mut game = Game::default();
        let turn = game.play(4).unwrap();
        assert_eq!(turn.player_move, 4);
        // Center taken, first corner is the best reply
        assert_eq!(turn.computer_move, Some(0));
        assert_eq!(turn.outcome, Outcome::InProgress);
        assert_eq!(game.board().occupied_count(), 2);
        assert_eq!(game.to_move(), Side::Player);
    }

    #[test]
    fn test_rejects_occupied_and_out_of_range() {
        let mut game = Game::default();
        game.play(4).unwrap();
        assert_eq!(game.play(4), Err(Error::CellOccupied(4)));
        assert_eq!(game.play(0), Err(Error::CellOccupied(0)));
        assert_eq!(game.play(12), Err(Error::OutOfRange(12)));
        assert_eq!(game.board().occupied_count(), 2);
    }

    #[test]
    fn test_out_of_turn() {
        let mut game = Game::new(Side::Computer);
        assert_eq!(game.play(4), Err(Error::OutOfTurn(Side::Computer)));
        let opening = game.computer_move().unwrap();
        assert_eq!(opening, 0);
        assert_eq!(game.computer_move(), Err(Error::OutOfTurn(Side::Player)));
    }

    #[test]
    fn test_computer_never_loses_and_game_ends() {
        let mut game = Game::default();
        // Player always takes the lowest empty cell
        while !game.is_over() {
            let index = game.board().empty_cells().next().unwrap();
            game.play(index).unwrap();
        }
        assert_ne!(game.outcome(), Outcome::PlayerWins);
        assert_eq!(game.play(0).unwrap_err(), Error::GameOver(game.outcome()));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut game = Game::default();
        game.play(0).unwrap();
        game.reset();
        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert!(game.history().is_empty());
        assert_eq!(game.to_move(), Side::Player);

        game.restart(Side::Computer);
        assert_eq!(game.to_move(), Side::Computer);
    }

    #[test]
    fn test_reset_bumps_generation() {
        let mut game = Game::default();
        assert_eq!(game.generation(), 0);
        game.play(4).unwrap();
        assert_eq!(game.generation(), 0);

        game.reset();
        assert_eq!(game.generation(), 1);
        game.restart(Side::Computer);
        assert_eq!(game.generation(), 2);
        assert_eq!(game.starter(), Side::Computer);
    }
}
