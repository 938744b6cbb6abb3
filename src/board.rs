//! Game board representation and collision detection

use crate::piece::ActivePiece;
use crate::tetromino::Shape;
use ratatui::style::Color;

/// Standard board dimensions
pub const COLS: usize = 10;
pub const ROWS: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top (spawn edge)
    cells: [[Cell; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= ROWS || col >= COLS {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= ROWS || col >= COLS {
            return false;
        }
        self.cells[row][col] = cell;
        true
    }

    /// Whether a single board coordinate blocks a piece cell.
    ///
    /// Anything above the board is open so pieces can spawn partially hidden.
    fn blocks(&self, row: i32, col: i32) -> bool {
        if col < 0 || col >= COLS as i32 || row >= ROWS as i32 {
            return true;
        }
        if row < 0 {
            return false;
        }
        self.cells[row as usize][col as usize].is_filled()
    }

    /// Check whether `shape` placed with its top-left corner at
    /// (`row`, `col`) hits a wall, the floor, or a locked cell
    pub fn collides(&self, shape: &Shape, row: i32, col: i32) -> bool {
        shape
            .cells()
            .any(|(dr, dc)| self.blocks(row + dr, col + dc))
    }

    /// Lock a piece onto the board
    ///
    /// Cells above the top edge are discarded.
    pub fn merge(&mut self, piece: &ActivePiece) {
        let cell = Cell::Filled(piece.kind.color());
        for (row, col) in piece.cells() {
            self.set(row, col, cell);
        }
    }

    /// Clear completed lines and return the number cleared
    ///
    /// Walks bottom to top, compacting surviving rows downward.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut write_row = ROWS;

        for read_row in (0..ROWS).rev() {
            if self.is_line_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                self.cells[write_row] = self.cells[read_row];
            }
        }

        // Fill the top with empty rows
        for row in &mut self.cells[..write_row] {
            *row = [Cell::Empty; COLS];
        }

        cleared
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Rows from top to bottom, for rendering
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLS]> {
        self.cells.iter()
    }
}
