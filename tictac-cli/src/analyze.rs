//! Analyze command - classify a board and score every candidate cell

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tictac_core::{evaluate, move_scores, optimal_move, winning_line, Board, Outcome, Side};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Board as nine cells, row-major: X (player), O (computer), _ or . (empty)
    pub board: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Analysis {
    board: Board,
    outcome: Outcome,
    winning_line: Option<[usize; 3]>,
    computer_best: Option<usize>,
    player_best: Option<usize>,
    scores: Vec<(usize, i32)>,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let board: Board = args
        .board
        .parse()
        .with_context(|| format!("Failed to parse board: {}", args.board))?;

    let analysis = analyze(board)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_text(&analysis);
    }

    Ok(())
}

fn analyze(board: Board) -> Result<Analysis> {
    let outcome = evaluate(&board);
    let mut analysis = Analysis {
        board,
        outcome,
        winning_line: winning_line(&board),
        computer_best: None,
        player_best: None,
        scores: Vec::new(),
    };

    if outcome == Outcome::InProgress {
        analysis.computer_best = Some(optimal_move(&board, Side::Computer)?);
        analysis.player_best = Some(optimal_move(&board, Side::Player)?);
        analysis.scores = move_scores(&board)?;
    }

    Ok(analysis)
}

fn print_text(analysis: &Analysis) {
    println!("{}", analysis.board.pretty());
    println!("Outcome: {:?}", analysis.outcome);

    if let Some(line) = analysis.winning_line {
        println!("Winning line: {:?}", line);
    }

    if analysis.scores.is_empty() {
        return;
    }

    println!("\nComputer (O) move scores:");
    for (index, score) in &analysis.scores {
        let marker = if Some(*index) == analysis.computer_best { " <- best" } else { "" };
        println!("  cell {}: {:>3}{}", index, score, marker);
    }
    if let Some(index) = analysis.player_best {
        println!("Best reply for the player (X): {}", index);
    }
}
