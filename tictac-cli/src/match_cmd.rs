//! Match command - the computer against a seeded random opponent
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: RNG and formatting utilities

use anyhow::Result;
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tictac_core::{Game, Outcome, Side};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play (starters alternate)
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    starter: Side,
    outcome: Outcome,
    moves: Vec<usize>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    computer_wins: usize,
    player_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the match (random opponent, alternating starters)
/// 2. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!("Starting match: {} games against a random opponent", args.games);

    let results = play_match(args.games, seed)?;

    if results.player_wins > 0 {
        tracing::warn!("Random opponent won {} games", results.player_wins);
    }

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(games: usize, seed: Option<u64>) -> Result<MatchResults> {
    let mut rng = create_rng(seed);
    let mut records = Vec::with_capacity(games);

    for game_num in 0..games {
        let starter = if game_num % 2 == 0 {
            Side::Player
        } else {
            Side::Computer
        };

        let record = play_single_game(game_num + 1, starter, &mut rng)?;

        tracing::debug!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.outcome,
            record.moves.len()
        );

        records.push(record);
    }

    Ok(compute_match_statistics(records))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game; the random side picks uniformly among empty cells
fn play_single_game(game_number: usize, starter: Side, rng: &mut ChaCha8Rng) -> Result<GameRecord> {
    let mut game = Game::new(starter);

    while !game.is_over() {
        match game.to_move() {
            Side::Computer => {
                game.computer_move()?;
            }
            Side::Player => {
                let empties: Vec<usize> = game.board().empty_cells().collect();
                if let Some(&index) = empties.choose(rng) {
                    game.player_move(index)?;
                }
            }
        }
    }

    Ok(GameRecord {
        game_number,
        starter,
        outcome: game.outcome(),
        moves: game.history().iter().map(|m| m.index).collect(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |outcome: Outcome| games.iter().filter(|g| g.outcome == outcome).count();
    let computer_wins = count(Outcome::ComputerWins);
    let player_wins = count(Outcome::PlayerWins);
    let draws = count(Outcome::Draw);

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        computer_wins,
        player_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        starter: Side,
        outcome: Outcome,
        moves: Vec<usize>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        computer_wins: usize,
        player_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        computer_wins: results.computer_wins,
        player_wins: results.player_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                starter: g.starter,
                outcome: g.outcome,
                moves: g.moves.clone(),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games:   {}", total);
    println!(
        "Computer wins: {} ({:.1}%)",
        results.computer_wins,
        percent(results.computer_wins, total)
    );
    println!(
        "Random wins:   {} ({:.1}%)",
        results.player_wins,
        percent(results.player_wins, total)
    );
    println!("Draws:         {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg moves:     {:.1}", results.avg_moves);
}

// ============================================================================
// TESTS
// ============================================================================
