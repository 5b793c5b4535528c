use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::Player;

pub const HEIGHT: usize = 6;
pub const WIDTH: usize = 7;

/// Number of aligned pieces needed to win.
pub const RUN_LENGTH: usize = 4;

/// Step (row, col) for each run orientation: horizontal, vertical,
/// diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A single grid cell. Persisted as `null`, `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Option<u8>", into = "Option<u8>")]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::One => '1',
            Cell::Two => '2',
        }
    }
}

impl From<Cell> for Option<u8> {
    fn from(cell: Cell) -> Self {
        cell.owner().map(Player::number)
    }
}

impl TryFrom<Option<u8>> for Cell {
    type Error = GridError;

    fn try_from(marker: Option<u8>) -> Result<Self, Self::Error> {
        match marker {
            None => Ok(Cell::Empty),
            Some(1) => Ok(Cell::One),
            Some(2) => Ok(Cell::Two),
            Some(other) => Err(GridError::CellMarker(other)),
        }
    }
}

/// Grid coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Shape or content errors when building a board from raw rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("expected {expected} rows, found {0}", expected = HEIGHT)]
    RowCount(usize),

    #[error("row {row} has {found} cells, expected {expected}", expected = WIDTH)]
    RowWidth { row: usize, found: usize },

    #[error("invalid cell marker {0} (expected null, 1 or 2)")]
    CellMarker(u8),

    #[error("invalid cell symbol {0:?} (expected '.', '1' or '2')")]
    CellSymbol(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Build a board from text rows, top row first, using `.`, `1` and `2`.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let cells = rows
            .iter()
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        '.' => Ok(Cell::Empty),
                        '1' => Ok(Cell::One),
                        '2' => Ok(Cell::Two),
                        other => Err(GridError::CellSymbol(other)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::try_from(cells)
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= WIDTH {
            return true;
        }
        !self.cells[0][col].is_empty()
    }

    /// Lowest empty row in `col`, or `None` if the column cannot take a piece.
    pub fn find_spot(&self, col: usize) -> Option<usize> {
        if col >= WIDTH {
            return None;
        }
        (0..HEIGHT).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Drop a piece in a column, returns the row where it landed.
    /// A full column is left untouched and yields `None`.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Option<usize> {
        let row = self.find_spot(col)?;
        self.cells[row][col] = player.to_cell();
        Some(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.is_empty())
    }

    /// Number of pieces owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == target)
            .count()
    }

    /// Scan every anchor cell for a run of four owned by `player` and return
    /// the first one found.
    pub fn winning_run(&self, player: Player) -> Option<[Position; RUN_LENGTH]> {
        let target = player.to_cell();
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                for &(d_row, d_col) in &DIRECTIONS {
                    if let Some(run) = self.run_from(row, col, d_row, d_col, target) {
                        return Some(run);
                    }
                }
            }
        }
        None
    }

    pub fn has_win(&self, player: Player) -> bool {
        self.winning_run(player).is_some()
    }

    fn run_from(
        &self,
        row: usize,
        col: usize,
        d_row: isize,
        d_col: isize,
        target: Cell,
    ) -> Option<[Position; RUN_LENGTH]> {
        let mut run = [Position::new(row, col); RUN_LENGTH];
        for (step, slot) in run.iter_mut().enumerate() {
            let r = row as isize + d_row * step as isize;
            let c = col as isize + d_col * step as isize;
            if r < 0 || c < 0 || r >= HEIGHT as isize || c >= WIDTH as isize {
                return None;
            }
            let (r, c) = (r as usize, c as usize);
            if self.cells[r][c] != target {
                return None;
            }
            *slot = Position::new(r, c);
        }
        Some(run)
    }

    /// Occupied cells ordered bottom row first, left to right.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Player)> + '_ {
        (0..HEIGHT).rev().flat_map(move |row| {
            (0..WIDTH).filter_map(move |col| {
                self.cells[row][col]
                    .owner()
                    .map(|player| (Position::new(row, col), player))
            })
        })
    }

    /// First piece resting above an empty cell, which gravity makes unreachable.
    pub fn floating_piece(&self) -> Option<Position> {
        for col in 0..WIDTH {
            let mut seen_gap = false;
            for row in (0..HEIGHT).rev() {
                match (self.cells[row][col].is_empty(), seen_gap) {
                    (true, _) => seen_gap = true,
                    (false, true) => return Some(Position::new(row, col)),
                    (false, false) => {}
                }
            }
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Board> for Vec<Vec<Cell>> {
    fn from(board: Board) -> Self {
        board.cells.iter().map(|row| row.to_vec()).collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = GridError;

    /// An empty list of rows is read as an empty board.
    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        if rows.is_empty() {
            return Ok(Board::new());
        }
        if rows.len() != HEIGHT {
            return Err(GridError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != WIDTH {
                return Err(GridError::RowWidth {
                    row: index,
                    found: row.len(),
                });
            }
            board.cells[index].copy_from_slice(&row);
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
