//! Integration tests for tictac
//!
//! Tests the full stack: board, evaluation, search and game session

use std::collections::HashSet;

use tictac_core::{
    evaluate, minimax, move_scores, optimal_move, search, select_computer_move, AlphaBetaAI,
    Board, Cell, Error, Game, Outcome, Side, CELL_COUNT, LINES,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

/// Every position reachable by legal play from the empty board, player first
fn reachable_positions() -> Vec<Board> {
    fn visit(board: Board, to_move: Side, seen: &mut HashSet<Board>, out: &mut Vec<Board>) {
        if !seen.insert(board) {
            return;
        }
        out.push(board);
        if evaluate(&board).is_terminal() {
            return;
        }
        for index in board.empty_cells().collect::<Vec<_>>() {
            let next = board.with_move(index, to_move).unwrap();
            visit(next, to_move.opponent(), seen, out);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    visit(Board::new(), Side::Player, &mut seen, &mut out);
    out
}

// ============================================================================
// EVALUATOR PROPERTIES
// ============================================================================

#[test]
fn test_reachable_position_count() {
    // Known count of legal tic-tac-toe positions with X moving first
    assert_eq!(reachable_positions().len(), 5478);
}

#[test]
fn test_evaluate_properties_on_all_positions() {
    for b in reachable_positions() {
        let has_line = LINES.iter().any(|&[a, c, d]| {
            let cells = b.cells();
            !cells[a].is_empty() && cells[a] == cells[c] && cells[a] == cells[d]
        });
        let outcome = evaluate(&b);

        match (has_line, b.is_full()) {
            (true, _) => assert!(outcome.winner().is_some(), "{} should be a win", b),
            (false, true) => assert_eq!(outcome, Outcome::Draw, "{}", b),
            (false, false) => assert_eq!(outcome, Outcome::InProgress, "{}", b),
        }
    }
}

#[test]
fn test_completed_line_beats_filler() {
    for line in LINES {
        // Line for the computer, every other cell for the player
        let mut cells = [Cell::Player; CELL_COUNT];
        for &i in &line {
            cells[i] = Cell::Computer;
        }
        assert_eq!(evaluate(&Board::from_cells(cells)), Outcome::ComputerWins);
    }
}

#[test]
fn test_diagonal_scenario_is_player_win() {
    assert_eq!(evaluate(&board("XOXOXOO_X")), Outcome::PlayerWins);
}

// ============================================================================
// SELECTOR PROPERTIES
// ============================================================================

#[test]
fn test_selector_never_picks_occupied_cell() {
    for b in reachable_positions() {
        match select_computer_move(&b) {
            Ok(index) => assert!(b.is_empty_at(index), "{} -> {}", b, index),
            Err(e) => {
                assert!(evaluate(&b).is_terminal());
                assert_eq!(e, Error::GameOver(evaluate(&b)));
            }
        }
    }
}

#[test]
fn test_win_takes_priority_over_block() {
    assert_eq!(select_computer_move(&board("XX_OO____")), Ok(5));
}

#[test]
fn test_empty_board_first_index() {
    assert_eq!(select_computer_move(&Board::new()), Ok(0));
}

#[test]
fn test_pruning_equivalence_on_sampled_positions() {
    // Every reachable position with at least three marks
    for b in reachable_positions().into_iter().filter(|b| b.occupied_count() >= 3) {
        for maximizing in [true, false] {
            assert_eq!(
                search(&b, 0, maximizing, i32::MIN, i32::MAX),
                minimax(&b, 0, maximizing),
                "board {}",
                b
            );
        }
    }
}

#[test]
fn test_root_scores_match_unpruned() {
    for s in ["X________", "_X_______", "X___O____", "XO__X____"] {
        let b = board(s);
        let mut pruned = AlphaBetaAI::new();
        let mut full = AlphaBetaAI::unpruned();
        assert_eq!(pruned.best_move(&b), full.best_move(&b), "{}", s);

        for (index, score) in move_scores(&b).unwrap() {
            let child = b.with_move(index, Side::Computer).unwrap();
            assert_eq!(score, minimax(&child, 0, false), "{} cell {}", s, index);
        }
    }
}

// ============================================================================
// END-TO-END
// ============================================================================

#[test]
fn test_optimal_self_play_draws() {
    let mut ai = AlphaBetaAI::new();
    for first in [Side::Player, Side::Computer] {
        let (final_board, history) = ai.play_game(Board::new(), first).unwrap();
        assert_eq!(evaluate(&final_board), Outcome::Draw);
        assert_eq!(history.len(), CELL_COUNT);
    }
}

#[test]
fn test_computer_never_loses_to_any_line_of_play() {
    fn explore(game: Game, finished: &mut usize) {
        if game.is_over() {
            assert_ne!(game.outcome(), Outcome::PlayerWins, "{}", game.board());
            *finished += 1;
            return;
        }
        if game.to_move() == Side::Computer {
            let mut next = game.clone();
            next.computer_move().unwrap();
            explore(next, finished);
            return;
        }
        for index in game.board().empty_cells().collect::<Vec<_>>() {
            let mut next = game.clone();
            next.player_move(index).unwrap();
            explore(next, finished);
        }
    }

    for starter in [Side::Player, Side::Computer] {
        let mut finished = 0;
        explore(Game::new(starter), &mut finished);
        assert!(finished > 0);
    }
}

#[test]
fn test_player_hint_matches_mirrored_search() {
    let b = board("OO_XX____");
    // Player (X) should complete the middle row
    assert_eq!(optimal_move(&b, Side::Player), Ok(5));
}
