//! tictac CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the computer in the terminal
//! - serve: Start the browser game server
//! - analyze: Classify a board and score candidate moves
//! - selfplay: Optimal vs optimal game
//! - match: Computer vs seeded random opponent
//! - bench: Pruned vs unpruned search cost

mod analyze;
mod benchmark;
mod match_cmd;
mod play;
mod selfplay;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe against an optimal minimax opponent")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal
    Play(play::PlayArgs),
    /// Start the browser game server
    Serve(server::ServerArgs),
    /// Classify a board and score candidate moves
    Analyze(analyze::AnalyzeArgs),
    /// Play the computer against itself
    Selfplay(selfplay::SelfplayArgs),
    /// Play the computer against a random opponent
    Match(match_cmd::MatchArgs),
    /// Compare pruned and unpruned search
    Bench(benchmark::BenchmarkArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Serve(args) => server::run(args),
        Commands::Analyze(args) => analyze::run(args),
        Commands::Selfplay(args) => selfplay::run(args),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Bench(args) => benchmark::run(args),
    }
}
