//! 3x3 board geometry and cell storage
//!
//! Cells are indexed row-major: `index = row * 3 + col`.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board side length
pub const BOARD_SIDE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// All winning lines: rows, then columns, then diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // rows
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6], // columns
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8], // diagonals
    [2, 4, 6],
];

/// Who is acting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    /// Mark this side places on the board
    pub fn mark(self) -> Cell {
        match self {
            Side::Player => Cell::Player,
            Side::Computer => Cell::Computer,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Computer => write!(f, "computer"),
        }
    }
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Computer,
}

impl Cell {
    /// Single-character rendering (`X` for the player, `O` for the computer)
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::Player => 'X',
            Cell::Computer => 'O',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Cell::Player),
            'O' | 'o' => Some(Cell::Computer),
            '_' | '.' | '-' => Some(Cell::Empty),
            _ => None,
        }
    }

    /// Side owning this mark, if any
    pub fn owner(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Player => Some(Side::Player),
            Cell::Computer => Some(Side::Computer),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A 3x3 board (copy to mutate)
///
/// Serialized as its 9-character string form, e.g. `"XX_OO____"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Board with all nine cells empty
    pub const fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    pub const fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Cell at `index`, or `None` when off the board
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Cell::Empty)
    }

    /// Indices of empty cells in ascending order
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Place `side`'s mark, rejecting off-board and occupied cells
    pub fn place(&mut self, index: usize, side: Side) -> Result<(), Error> {
        match self.get(index) {
            None => Err(Error::OutOfRange(index)),
            Some(Cell::Empty) => {
                self.cells[index] = side.mark();
                Ok(())
            }
            Some(_) => Err(Error::CellOccupied(index)),
        }
    }

    /// Copy of this board with `side`'s mark at `index`
    pub fn with_move(&self, index: usize, side: Side) -> Result<Self, Error> {
        let mut next = *self;
        next.place(index, side)?;
        Ok(next)
    }

    /// Unchecked write used by search for apply/undo on a scratch copy
    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Board with player and computer marks exchanged
    ///
    /// Searching the swapped board yields the player's optimal reply.
    pub fn swapped(&self) -> Self {
        let mut cells = self.cells;
        for cell in cells.iter_mut() {
            *cell = match *cell {
                Cell::Empty => Cell::Empty,
                Cell::Player => Cell::Computer,
                Cell::Computer => Cell::Player,
            };
        }
        Self { cells }
    }

    /// Multi-line grid rendering with row separators
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        for row in 0..BOARD_SIDE {
            if row > 0 {
                out.push_str("---+---+---\n");
            }
            let cells: Vec<String> = (0..BOARD_SIDE)
                .map(|col| {
                    let index = row * BOARD_SIDE + col;
                    match self.cells[index] {
                        Cell::Empty => index.to_string(),
                        cell => cell.symbol().to_string(),
                    }
                })
                .collect();
            out.push_str(&format!(" {} | {} | {}\n", cells[0], cells[1], cells[2]));
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse nine cell symbols; whitespace, `,` and `|` are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Cell::Empty; CELL_COUNT];
        let mut count = 0;

        for c in s.chars().filter(|c| !c.is_whitespace() && *c != ',' && *c != '|') {
            let cell = Cell::from_symbol(c)
                .ok_or_else(|| Error::InvalidBoard(format!("unknown cell symbol '{}'", c)))?;
            if count == CELL_COUNT {
                return Err(Error::InvalidBoard(format!(
                    "expected {} cells, found more",
                    CELL_COUNT
                )));
            }
            cells[count] = cell;
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(Error::InvalidBoard(format!(
                "expected {} cells, found {}",
                CELL_COUNT, count
            )));
        }

        Ok(Self { cells })
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_string()
    }
}

impl TryFrom<String> for Board {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
