//! Board module - the locked cells of the playfield
//!
//! The board is a 10x20 grid of cell values (`0` empty, `1..=7` locked color).
//! Uses a flat array for better cache locality and cheap copies: readers get
//! copied snapshots, only the lock engine holds a board it mutates.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::rotation::CellGrid;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Rows of a board, top to bottom.
pub type BoardRows = [[Cell; WIDTH]; HEIGHT];

/// Indices of rows removed by one clear, bottom to top.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Build a board from explicit rows.
    pub fn from_rows(rows: &BoardRows) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            board.cells[y * WIDTH..(y + 1) * WIDTH].copy_from_slice(row);
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= WIDTH as i16 || y < 0 || y >= HEIGHT as i16 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// Row `y` as a slice. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Whether any cell of the top row is locked.
    pub fn is_top_row_occupied(&self) -> bool {
        self.row(0).iter().any(|&cell| cell != EMPTY)
    }

    /// Copy `grid`'s filled cells onto the board with its top-left at (x, y).
    ///
    /// Cells falling outside the board are skipped. Returns how many cells were
    /// written.
    pub fn merge(&mut self, grid: &CellGrid, x: i16, y: i16) -> usize {
        let mut written = 0;
        for (cx, cy, value) in grid.filled() {
            if self.set(x + cx as i16, y + cy as i16, value) {
                written += 1;
            }
        }
        written
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Survivors keep their relative order and slide down; as many empty rows
    /// as were removed are inserted at the top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * WIDTH].fill(EMPTY);

        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows of the board as a fixed 2D array.
    pub fn to_rows(&self) -> BoardRows {
        let mut rows = [[EMPTY; WIDTH]; HEIGHT];
        for (y, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
        rows
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
