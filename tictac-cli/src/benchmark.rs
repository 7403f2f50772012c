//! Benchmark command - compare pruned and unpruned search
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: benchmark_position(), report_results()
//! - Level 3: time_search()
//! - Level 4: formatting

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;

use tictac_core::{AlphaBetaAI, Board};

/// Positions searched by default: empty board and the three opening shapes
const DEFAULT_POSITIONS: [&str; 4] = ["_________", "X________", "_X_______", "____X____"];

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Boards to search (defaults to the empty board and each opening)
    #[arg(long = "board", value_name = "BOARD")]
    pub boards: Vec<String>,

    /// Repetitions per position, for timing
    #[arg(long, default_value = "3")]
    pub repeat: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Search cost of one position
#[derive(Clone, Debug, serde::Serialize)]
struct BenchmarkResult {
    board: Board,
    best_move: usize,
    pruned_nodes: u64,
    unpruned_nodes: u64,
    pruned_time: Duration,
    unpruned_time: Duration,
}

impl BenchmarkResult {
    fn node_ratio(&self) -> f64 {
        if self.pruned_nodes == 0 {
            0.0
        } else {
            self.unpruned_nodes as f64 / self.pruned_nodes as f64
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
pub fn run(args: BenchmarkArgs) -> Result<()> {
    let boards = parse_boards(&args)?;
    tracing::info!("Benchmarking {} positions, {} repetitions", boards.len(), args.repeat);

    let mut results = Vec::with_capacity(boards.len());
    for board in boards {
        results.push(benchmark_position(board, args.repeat.max(1))?);
    }

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn parse_boards(args: &BenchmarkArgs) -> Result<Vec<Board>> {
    let sources: Vec<&str> = if args.boards.is_empty() {
        DEFAULT_POSITIONS.to_vec()
    } else {
        args.boards.iter().map(String::as_str).collect()
    };

    sources
        .into_iter()
        .map(|s| s.parse().with_context(|| format!("Failed to parse board: {}", s)))
        .collect()
}

/// Search one position with and without pruning
fn benchmark_position(board: Board, repeat: u32) -> Result<BenchmarkResult> {
    let (pruned_move, pruned_nodes, pruned_time) = time_search(AlphaBetaAI::new(), &board, repeat)?;
    let (unpruned_move, unpruned_nodes, unpruned_time) =
        time_search(AlphaBetaAI::unpruned(), &board, repeat)?;

    if pruned_move != unpruned_move {
        anyhow::bail!(
            "Pruned and unpruned search disagree on {}: {} vs {}",
            board,
            pruned_move,
            unpruned_move
        );
    }

    tracing::debug!(
        "{}: {} vs {} nodes",
        board,
        pruned_nodes,
        unpruned_nodes
    );

    Ok(BenchmarkResult {
        board,
        best_move: pruned_move,
        pruned_nodes,
        unpruned_nodes,
        pruned_time,
        unpruned_time,
    })
}

fn report_results(results: &[BenchmarkResult], args: &BenchmarkArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!("\n=== Search Benchmark ===");
    println!(
        "{:<11} {:>4} {:>10} {:>10} {:>7} {:>12} {:>12}",
        "board", "move", "pruned", "full", "ratio", "pruned time", "full time"
    );
    for r in results {
        println!(
            "{:<11} {:>4} {:>10} {:>10} {:>6.1}x {:>12} {:>12}",
            r.board.to_string(),
            r.best_move,
            r.pruned_nodes,
            r.unpruned_nodes,
            r.node_ratio(),
            format_duration(r.pruned_time),
            format_duration(r.unpruned_time)
        );
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Average time per search and node count of a single search
fn time_search(mut ai: AlphaBetaAI, board: &Board, repeat: u32) -> Result<(usize, u64, Duration)> {
    let start = Instant::now();
    let mut best = 0;
    for _ in 0..repeat {
        ai.reset_stats();
        best = ai.best_move(board)?;
    }
    let elapsed = start.elapsed() / repeat;

    Ok((best, ai.stats().nodes, elapsed))
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn format_duration(d: Duration) -> String {
    if d.as_millis() > 0 {
        format!("{:.1} ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{} us", d.as_micros())
    }
}

// ============================================================================
// TESTS
// ============================================================================
