//! Play command - interactive game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_session() - input loop
//! - Level 3: handle_move(), computer_turn()
//! - Level 4: input parsing, rendering

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use tictac_core::{Game, Side};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Let the computer open the game
    #[arg(long)]
    pub computer_first: bool,

    /// Pause before the computer replies, in milliseconds
    #[arg(long, default_value = "500")]
    pub delay_ms: u64,
}

/// A parsed line of user input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Cell(usize),
    Reset,
    Quit,
    Help,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    play_session(&mut stdin.lock(), &mut stdout.lock(), &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Read commands until quit or end of input
fn play_session<R: BufRead, W: Write>(input: &mut R, out: &mut W, args: &PlayArgs) -> Result<()> {
    let starter = if args.computer_first {
        Side::Computer
    } else {
        Side::Player
    };
    let delay = Duration::from_millis(args.delay_ms);
    let mut game = Game::new(starter);

    writeln!(out, "You are X, the computer is O. Enter a cell 0-8, 'r' to reset, 'q' to quit.")?;
    start_game(&mut game, out, delay)?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => writeln!(out, "Cells are numbered 0-8, left to right, top to bottom.")?,
            Some(Command::Reset) => {
                game.reset();
                writeln!(out, "New game.")?;
                start_game(&mut game, out, delay)?;
            }
            Some(Command::Cell(index)) => handle_move(&mut game, index, out, delay)?,
            None => writeln!(out, "Enter a cell 0-8, 'r' or 'q'.")?,
        }
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Show the board and let the computer open if it starts
fn start_game<W: Write>(game: &mut Game, out: &mut W, delay: Duration) -> Result<()> {
    if game.to_move() == Side::Computer {
        computer_turn(game, out, delay)?;
    } else {
        write!(out, "{}", game.board().pretty())?;
    }
    Ok(())
}

/// Apply the human move, then the computer's reply
fn handle_move<W: Write>(game: &mut Game, index: usize, out: &mut W, delay: Duration) -> Result<()> {
    match game.player_move(index) {
        Ok(outcome) => {
            tracing::debug!("Player played {} -> {:?}", index, outcome);
            write!(out, "{}", game.board().pretty())?;
            if !announce(game, out)? {
                computer_turn(game, out, delay)?;
            }
        }
        Err(e) => writeln!(out, "{}", e)?,
    }
    Ok(())
}

fn computer_turn<W: Write>(game: &mut Game, out: &mut W, delay: Duration) -> Result<()> {
    if !delay.is_zero() {
        thread::sleep(delay);
    }

    let index = game.computer_move()?;
    writeln!(out, "Computer plays {}", index)?;
    write!(out, "{}", game.board().pretty())?;
    announce(game, out)?;
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print the result if the game ended; returns whether it did
fn announce<W: Write>(game: &Game, out: &mut W) -> Result<bool> {
    match game.outcome().message() {
        Some(message) => {
            writeln!(out, "{} Type 'r' to play again or 'q' to quit.", message)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(Command::Quit),
        "r" | "reset" => Some(Command::Reset),
        "h" | "help" | "?" => Some(Command::Help),
        other => other.parse().ok().map(Command::Cell),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str, computer_first: bool) -> String {
        let args = PlayArgs {
            computer_first,
            delay_ms: 0,
        };
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        play_session(&mut input, &mut output, &args).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("4\n"), Some(Command::Cell(4)));
        assert_eq!(parse_command(" Q "), Some(Command::Quit));
        assert_eq!(parse_command("reset"), Some(Command::Reset));
        assert_eq!(parse_command("x"), None);
        // Range is checked by the game, not the parser
        assert_eq!(parse_command("12"), Some(Command::Cell(12)));
    }

    #[test]
    fn test_occupied_cell_reported() {
        let output = run_script("4\n4\nq\n", false);
        assert!(output.contains("Computer plays 0"));
        assert!(output.contains("already occupied"));
    }

    #[test]
    fn test_computer_opens() {
        let output = run_script("q\n", true);
        assert!(output.contains("Computer plays 0"));
    }

    #[test]
    fn test_game_reaches_result() {
        // Sweep every cell several times; occupied cells are rejected
        let sweep: String = (0..9).map(|i| format!("{}\n", i)).collect();
        let script = format!("{}q\n", sweep.repeat(5));
        let output = run_script(&script, false);

        assert!(output.contains("AI wins!") || output.contains("Draw!"));
        assert!(!output.contains("You win!"));
        assert!(output.contains("game is already over"));
    }
}
