//! Selfplay command - optimal search on both sides
//!
//! Perfect play from the empty board must end in a draw; this command shows
//! the game and the search effort behind it.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use tictac_core::{evaluate, AlphaBetaAI, Board, Outcome, Side};

#[derive(Args)]
pub struct SelfplayArgs {
    /// Let the computer side open the game
    #[arg(long)]
    pub computer_first: bool,

    /// Starting board (defaults to empty)
    #[arg(long)]
    pub board: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SelfplayReport {
    initial: Board,
    first: Side,
    moves: Vec<usize>,
    final_board: Board,
    outcome: Outcome,
    nodes: u64,
}

pub fn run(args: SelfplayArgs) -> Result<()> {
    let initial: Board = match &args.board {
        Some(s) => s.parse()?,
        None => Board::new(),
    };
    let first = if args.computer_first {
        Side::Computer
    } else {
        Side::Player
    };

    let report = play(initial, first)?;

    tracing::info!(
        "Selfplay finished: {:?} after {} moves ({} nodes)",
        report.outcome,
        report.moves.len(),
        report.nodes
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&report);
    }

    Ok(())
}

fn play(initial: Board, first: Side) -> Result<SelfplayReport> {
    let mut ai = AlphaBetaAI::new();
    let (final_board, moves) = ai.play_game(initial, first)?;

    Ok(SelfplayReport {
        initial,
        first,
        moves,
        final_board,
        outcome: evaluate(&final_board),
        nodes: ai.stats().nodes,
    })
}

fn print_text_report(report: &SelfplayReport) {
    let mut board = report.initial;
    let mut side = report.first;

    for (ply, &index) in report.moves.iter().enumerate() {
        // Replaying recorded moves cannot fail
        if board.place(index, side).is_err() {
            break;
        }
        println!("{}. {} ({}) plays {}", ply + 1, side, side.mark().symbol(), index);
        side = side.opponent();
    }

    println!("\n{}", board.pretty());
    println!("Result: {}", report.outcome.message().unwrap_or("In progress"));
    println!("Nodes searched: {}", report.nodes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selfplay_draws_from_empty() {
        for first in [Side::Player, Side::Computer] {
            let report = play(Board::new(), first).unwrap();
            assert_eq!(report.outcome, Outcome::Draw);
            assert_eq!(report.moves.len(), 9);
            assert!(report.nodes > 0);
        }
    }

    #[test]
    fn test_selfplay_from_position() {
        // Computer to move can win at 5
        let initial: Board = "XX_OO___X".parse().unwrap();
        let report = play(initial, Side::Computer).unwrap();
        assert_eq!(report.moves, vec![5]);
        assert_eq!(report.outcome, Outcome::ComputerWins);
    }

    #[test]
    fn test_selfplay_finished_board_has_no_moves() {
        let initial: Board = "XXXOO____".parse().unwrap();
        let report = play(initial, Side::Computer).unwrap();
        assert!(report.moves.is_empty());
        assert_eq!(report.outcome, Outcome::PlayerWins);
    }
}
