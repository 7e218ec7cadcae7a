//! Shape table - the seven piece templates in spawn orientation
//!
//! Rows are listed top to bottom. Every filled cell carries the shape's own
//! color value (`index + 1`).

use crate::rotation::CellGrid;
use crate::types::{Cell, ShapeId, SHAPE_COUNT};

const SHAPES: [&[&[Cell]]; SHAPE_COUNT as usize] = [
    &[&[1, 1, 1, 1]],
    &[&[2, 0, 0], &[2, 2, 2]],
    &[&[0, 0, 3], &[3, 3, 3]],
    &[&[0, 4, 4], &[4, 4, 0]],
    &[&[5, 5, 0], &[0, 5, 5]],
    &[&[0, 6, 0], &[6, 6, 6]],
    &[&[7, 7], &[7, 7]],
];

/// Spawn-orientation grid for `shape`.
pub fn spawn_grid(shape: ShapeId) -> CellGrid {
    CellGrid::from_rows(SHAPES[shape.index()])
}
