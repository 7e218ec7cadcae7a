//! Rotation engine - resolves a shape and rotation count into a cell grid
//!
//! Rotation is a pure geometric transform: a 90° clockwise turn maps cell
//! `(x, y)` of a `W×H` grid to `(H-1-y, x)` of an `H×W` grid. Non-square
//! shapes swap width and height on odd counts, so bounds checks must always
//! use the resolved grid, never the spawn grid.

use arrayvec::ArrayVec;

use crate::shapes::spawn_grid;
use crate::types::{Cell, Rotation, ShapeId};

/// Largest side of any shape.
pub const MAX_SIDE: usize = 4;

/// Small rectangular grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellGrid {
    width: u8,
    height: u8,
    cells: ArrayVec<Cell, { MAX_SIDE * MAX_SIDE }>,
}

impl CellGrid {
    /// Build from a list of equally long rows.
    pub fn from_rows(rows: &[&[Cell]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        debug_assert!(width <= MAX_SIDE && height <= MAX_SIDE);
        debug_assert!(rows.iter().all(|r| r.len() == width));

        let mut cells = ArrayVec::new();
        for row in rows {
            cells.extend(row.iter().copied());
        }
        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell at column `x`, row `y`, or `None` outside the grid.
    pub fn get(&self, x: u8, y: u8) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Iterate `(x, y, value)` for every non-empty cell.
    pub fn filled(&self) -> impl Iterator<Item = (u8, u8, Cell)> + '_ {
        let w = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(move |(i, &c)| ((i % w) as u8, (i / w) as u8, c))
    }

    /// One 90° clockwise turn.
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        // Result is h wide and w tall: row r, column c comes from source
        // row h-1-c, column r.
        let mut cells = ArrayVec::new();
        for r in 0..w {
            for c in 0..h {
                cells.push(self.cells[(h - 1 - c) * w + r]);
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Resolve `shape` turned `rotation.count()` times clockwise.
pub fn rotate(shape: ShapeId, rotation: Rotation) -> CellGrid {
    let mut grid = spawn_grid(shape);
    for _ in 0..rotation.count() {
        grid = grid.rotated_cw();
    }
    grid
}
