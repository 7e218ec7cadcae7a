//! Collision detector - pure predicates over a piece placement and a board
//!
//! Neither predicate touches state, so both can be used to check candidate
//! placements before anything commits.

use crate::board::Board;
use crate::rotation::{rotate, CellGrid};
use crate::types::{Rotation, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};

/// True if the piece cannot fall one more row.
///
/// Holds when the rotated box already touches the floor
/// (`y + height >= BOARD_HEIGHT`) or when any filled cell sits directly above a
/// locked cell.
pub fn collides_vertically(x: i8, y: i8, shape: ShapeId, rotation: Rotation, board: &Board) -> bool {
    grid_collides_vertically(&rotate(shape, rotation), x, y, board)
}

/// True if the piece at (x, y) leaves the board horizontally or overlaps a
/// locked cell in its current rows.
pub fn collides_horizontally(
    x: i8,
    y: i8,
    shape: ShapeId,
    rotation: Rotation,
    board: &Board,
) -> bool {
    grid_collides_horizontally(&rotate(shape, rotation), x, y, board)
}

/// [`collides_vertically`] for an already resolved grid.
pub fn grid_collides_vertically(grid: &CellGrid, x: i8, y: i8, board: &Board) -> bool {
    if i16::from(y) + i16::from(grid.height()) >= i16::from(BOARD_HEIGHT) {
        return true;
    }

    grid.filled().any(|(cx, cy, _)| {
        let bx = i16::from(x) + i16::from(cx);
        let by = i16::from(y) + i16::from(cy) + 1;
        // Probes outside the board count as collisions.
        board.get(bx, by).map_or(true, |cell| cell > 0)
    })
}

/// [`collides_horizontally`] for an already resolved grid.
pub fn grid_collides_horizontally(grid: &CellGrid, x: i8, y: i8, board: &Board) -> bool {
    if x < 0 || i16::from(x) + i16::from(grid.width()) > i16::from(BOARD_WIDTH) {
        return true;
    }

    grid.filled().any(|(cx, cy, _)| {
        let bx = i16::from(x) + i16::from(cx);
        let by = i16::from(y) + i16::from(cy);
        board.get(bx, by).map_or(true, |cell| cell > 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR: ShapeId = ShapeId::ALL[0];

    #[test]
    fn floor_stops_a_flat_bar_on_the_last_row() {
        let board = Board::new();
        assert!(!collides_vertically(3, 18, BAR, Rotation::North, &board));
        assert!(collides_vertically(3, 19, BAR, Rotation::North, &board));
    }

    #[test]
    fn standing_bar_uses_rotated_height() {
        let board = Board::new();
        assert!(!collides_vertically(0, 15, BAR, Rotation::East, &board));
        assert!(collides_vertically(0, 16, BAR, Rotation::East, &board));
    }

    #[test]
    fn locked_cell_below_stops_fall() {
        let mut board = Board::new();
        board.set(5, 10, 3);
        assert!(collides_vertically(3, 9, BAR, Rotation::North, &board));
        assert!(!collides_vertically(3, 8, BAR, Rotation::North, &board));
        // Not under any filled cell.
        assert!(!collides_vertically(6, 9, BAR, Rotation::North, &board));
    }

    #[test]
    fn walls_block_horizontal_placement() {
        let board = Board::new();
        assert!(collides_horizontally(-1, 0, BAR, Rotation::North, &board));
        assert!(collides_horizontally(7, 0, BAR, Rotation::North, &board));
        assert!(!collides_horizontally(6, 0, BAR, Rotation::North, &board));
        assert!(!collides_horizontally(9, 0, BAR, Rotation::East, &board));
    }

    #[test]
    fn horizontal_checks_current_row_only() {
        let mut board = Board::new();
        board.set(2, 5, 1);
        assert!(collides_horizontally(2, 5, BAR, Rotation::North, &board));
        // The locked cell is one row below: not a horizontal overlap.
        assert!(!collides_horizontally(2, 4, BAR, Rotation::North, &board));
    }
}
