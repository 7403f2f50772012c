//! Minimax move selection with alpha-beta pruning

use crate::board::{Board, Cell, Side, CELL_COUNT};
use crate::error::Error;
use crate::eval::{evaluate, Outcome};
use serde::Serialize;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score of an immediate computer win; deeper wins score `WIN_SCORE - depth`
pub const WIN_SCORE: i32 = 10;

/// Score of a drawn position
pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// SCORING
// ============================================================================

/// Score a terminal outcome reached `depth` plies below the real position
///
/// Faster wins and slower losses score better for the computer.
pub fn terminal_score(outcome: Outcome, depth: i32) -> Option<i32> {
    match outcome {
        Outcome::ComputerWins => Some(WIN_SCORE - depth),
        Outcome::PlayerWins => Some(depth - WIN_SCORE),
        Outcome::Draw => Some(DRAW_SCORE),
        Outcome::InProgress => None,
    }
}

/// Node counters for a search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Positions visited, terminal ones included
    pub nodes: u64,
}

// ============================================================================
// SEARCH
// ============================================================================

/// Alpha-beta search of `board`, scored from the computer's perspective
///
/// `maximizing` is true when the computer is to move. The caller's board is
/// never modified; trial moves are applied to a local copy.
pub fn search(board: &Board, depth: i32, maximizing: bool, alpha: i32, beta: i32) -> i32 {
    let mut scratch = *board;
    let mut stats = SearchStats::default();
    alpha_beta(&mut scratch, depth, maximizing, alpha, beta, &mut stats)
}

/// Full minimax without pruning; returns the same score as [`search`]
pub fn minimax(board: &Board, depth: i32, maximizing: bool) -> i32 {
    let mut scratch = *board;
    let mut stats = SearchStats::default();
    full_minimax(&mut scratch, depth, maximizing, &mut stats)
}

fn alpha_beta(
    board: &mut Board,
    depth: i32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if let Some(score) = terminal_score(evaluate(board), depth) {
        return score;
    }

    if maximizing {
        let mut best = i32::MIN;
        for index in 0..CELL_COUNT {
            if !board.is_empty_at(index) {
                continue;
            }
            board.set(index, Cell::Computer);
            let score = alpha_beta(board, depth + 1, false, alpha, beta, stats);
            board.set(index, Cell::Empty);

            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for index in 0..CELL_COUNT {
            if !board.is_empty_at(index) {
                continue;
            }
            board.set(index, Cell::Player);
            let score = alpha_beta(board, depth + 1, true, alpha, beta, stats);
            board.set(index, Cell::Empty);

            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

fn full_minimax(board: &mut Board, depth: i32, maximizing: bool, stats: &mut SearchStats) -> i32 {
    stats.nodes += 1;

    if let Some(score) = terminal_score(evaluate(board), depth) {
        return score;
    }

    let (mark, mut best) = if maximizing {
        (Cell::Computer, i32::MIN)
    } else {
        (Cell::Player, i32::MAX)
    };

    for index in 0..CELL_COUNT {
        if !board.is_empty_at(index) {
            continue;
        }
        board.set(index, mark);
        let score = full_minimax(board, depth + 1, !maximizing, stats);
        board.set(index, Cell::Empty);

        best = if maximizing { best.max(score) } else { best.min(score) };
    }

    best
}

// ============================================================================
// ROOT MOVE CHOICE
// ============================================================================

fn ensure_in_progress(board: &Board) -> Result<(), Error> {
    match evaluate(board) {
        Outcome::InProgress => Ok(()),
        outcome => Err(Error::GameOver(outcome)),
    }
}

/// Root scores for every empty cell, ascending by index
fn score_moves(board: &Board, pruned: bool, stats: &mut SearchStats) -> Vec<(usize, i32)> {
    let mut scratch = *board;
    let mut scores = Vec::with_capacity(CELL_COUNT);

    for index in 0..CELL_COUNT {
        if !scratch.is_empty_at(index) {
            continue;
        }
        scratch.set(index, Cell::Computer);
        let score = if pruned {
            alpha_beta(&mut scratch, 0, false, i32::MIN, i32::MAX, stats)
        } else {
            full_minimax(&mut scratch, 0, false, stats)
        };
        scratch.set(index, Cell::Empty);
        scores.push((index, score));
    }

    scores
}

/// First cell with the strictly greatest score
fn pick_best(scores: &[(usize, i32)]) -> Option<usize> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for &(index, score) in scores {
        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

fn best_move_counted(board: &Board, pruned: bool, stats: &mut SearchStats) -> Result<usize, Error> {
    ensure_in_progress(board)?;
    let scores = score_moves(board, pruned, stats);
    pick_best(&scores).ok_or(Error::GameOver(Outcome::Draw))
}

/// Optimal cell for the computer (`O`) to play next
///
/// Ties go to the lowest index. Fails with [`Error::GameOver`] when the board
/// is already decided.
pub fn select_computer_move(board: &Board) -> Result<usize, Error> {
    best_move_counted(board, true, &mut SearchStats::default())
}

/// Optimal cell for `side` to play next
///
/// The player's move is found by searching the mark-swapped board.
pub fn optimal_move(board: &Board, side: Side) -> Result<usize, Error> {
    match side {
        Side::Computer => select_computer_move(board),
        Side::Player => select_computer_move(&board.swapped()),
    }
}

/// Root score of every empty cell for the computer to move
pub fn move_scores(board: &Board) -> Result<Vec<(usize, i32)>, Error> {
    ensure_in_progress(board)?;
    Ok(score_moves(board, true, &mut SearchStats::default()))
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Computer player that accumulates search statistics across calls
#[derive(Clone, Debug)]
pub struct AlphaBetaAI {
    /// Disable pruning (reference minimax)
    pub pruning: bool,
    stats: SearchStats,
}

impl AlphaBetaAI {
    pub fn new() -> Self {
        Self {
            pruning: true,
            stats: SearchStats::default(),
        }
    }

    /// Unpruned player, for comparison runs
    pub fn unpruned() -> Self {
        Self {
            pruning: false,
            stats: SearchStats::default(),
        }
    }

    /// Get best move for the computer
    pub fn best_move(&mut self, board: &Board) -> Result<usize, Error> {
        best_move_counted(board, self.pruning, &mut self.stats)
    }

    /// Get best move for either side
    pub fn best_move_for(&mut self, board: &Board, side: Side) -> Result<usize, Error> {
        match side {
            Side::Computer => self.best_move(board),
            Side::Player => self.best_move(&board.swapped()),
        }
    }

    /// Play a complete game with both sides searching optimally
    pub fn play_game(&mut self, initial: Board, first: Side) -> Result<(Board, Vec<usize>), Error> {
        let mut board = initial;
        let mut history = Vec::new();
        let mut to_move = first;

        while evaluate(&board) == Outcome::InProgress {
            let index = self.best_move_for(&board, to_move)?;
            board.place(index, to_move)?;
            history.push(index);
            to_move = to_move.opponent();
        }

        Ok((board, history))
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }
}

impl Default for AlphaBetaAI {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
