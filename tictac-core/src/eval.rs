//! Terminal-state evaluation

use crate::board::{Board, Cell, Side, LINES};
use serde::{Deserialize, Serialize};

/// Classification of a board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWins,
    ComputerWins,
    Draw,
    InProgress,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::PlayerWins => Some(Side::Player),
            Outcome::ComputerWins => Some(Side::Computer),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }

    /// Text announced to the user once the game ends
    pub fn message(self) -> Option<&'static str> {
        match self {
            Outcome::PlayerWins => Some("You win!"),
            Outcome::ComputerWins => Some("AI wins!"),
            Outcome::Draw => Some("Draw!"),
            Outcome::InProgress => None,
        }
    }
}

/// First completed line, with the mark that completed it
fn find_winner(board: &Board) -> Option<([usize; 3], Cell)> {
    let cells = board.cells();
    LINES.iter().find_map(|&[a, b, c]| {
        let mark = cells[a];
        if !mark.is_empty() && mark == cells[b] && mark == cells[c] {
            Some(([a, b, c], mark))
        } else {
            None
        }
    })
}

/// Classify a board
///
/// Lines are checked before fullness, so a full board with a completed line
/// is a win rather than a draw. Total over any cell mix.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((_, mark)) = find_winner(board) {
        return match mark {
            Cell::Player => Outcome::PlayerWins,
            Cell::Computer => Outcome::ComputerWins,
            Cell::Empty => Outcome::InProgress,
        };
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Cells of the first completed line, if any
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    find_winner(board).map(|(line, _)| line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_every_line_wins_for_either_side() {
        for line in LINES {
            for (side, expected) in [
                (Side::Player, Outcome::PlayerWins),
                (Side::Computer, Outcome::ComputerWins),
            ] {
                let mut b = Board::new();
                for &i in &line {
                    b.place(i, side).unwrap();
                }
                assert_eq!(evaluate(&b), expected, "line {:?}", line);
                assert_eq!(winning_line(&b), Some(line));
            }
        }
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        // X completes the top row on the last move
        assert_eq!(evaluate(&board("XXXOOXXOO")), Outcome::PlayerWins);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        assert_eq!(evaluate(&board("XOXXOOOXX")), Outcome::Draw);
        assert_eq!(winning_line(&board("XOXXOOOXX")), None);
    }

    #[test]
    fn test_diagonal_with_empty_cell() {
        // Diagonal 0-4-8 is complete even though cell 7 is empty
        assert_eq!(evaluate(&board("XOXOXOO_X")), Outcome::PlayerWins);
    }

    #[test]
    fn test_multiple_lines_does_not_panic() {
        let b = board("XXXOOOXXX");
        assert!(evaluate(&b).is_terminal());
    }

    #[test]
    fn test_messages() {
        assert_eq!(Outcome::PlayerWins.message(), Some("You win!"));
        assert_eq!(Outcome::ComputerWins.message(), Some("AI wins!"));
        assert_eq!(Outcome::Draw.message(), Some("Draw!"));
        assert_eq!(Outcome::InProgress.message(), None);
    }
}
