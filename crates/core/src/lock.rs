//! Lock & clear engine
//!
//! The only writer of the board. A lock merges the resting piece, drops every
//! full row, refills from the top, and hands back a snapshot for the graph to
//! publish. Observers never see the merged-but-uncleared board.

use log::debug;

use crate::board::{Board, ClearedRows};
use crate::rotation::rotate;
use crate::types::{Rotation, ShapeId};

/// A piece that can fall no further, as sampled by the lock watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collision {
    pub x: i8,
    pub y: i8,
    pub shape: ShapeId,
    pub rotation: Rotation,
    /// Serial of the piece the collision was raised for.
    pub serial: u32,
}

/// Result of one lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOutcome {
    /// Board after merge and compaction.
    pub board: Board,
    /// Removed row indices (pre-compaction), bottom to top.
    pub cleared: ClearedRows,
}

#[derive(Debug, Clone, Default)]
pub struct LockEngine {
    board: Board,
}

impl LockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing board (replays and tests).
    pub fn with_board(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Merge the piece described by `collision`, clear full rows and return
    /// the published snapshot.
    pub fn lock(&mut self, collision: &Collision) -> LockOutcome {
        let grid = rotate(collision.shape, collision.rotation);
        let written = self
            .board
            .merge(&grid, i16::from(collision.x), i16::from(collision.y));
        debug_assert_eq!(written, grid.filled().count());

        let cleared = self.board.clear_full_rows();
        debug!(
            "locked shape {} ({}) at ({}, {}), cleared rows {:?}",
            collision.shape.index(),
            collision.rotation.as_str(),
            collision.x,
            collision.y,
            cleared.as_slice()
        );

        LockOutcome {
            board: self.board,
            cleared,
        }
    }
}
