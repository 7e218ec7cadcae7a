use std::convert::Infallible;

use crate::board::BoardRows;
use crate::rotation::CellGrid;
use crate::types::{Rotation, ShapeId};

/// The falling piece as the render target sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceView {
    pub shape: ShapeId,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Resolved cells for `rotation`, top-left at (x, y).
    pub cells: CellGrid,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    pub frame_no: u64,
    pub board: BoardRows,
    /// `None` once the game is over.
    pub piece: Option<PieceView>,
    pub game_over: bool,
}

impl Frame {
    /// Board with the falling piece painted in.
    pub fn composed(&self) -> BoardRows {
        let mut rows = self.board;
        if let Some(piece) = &self.piece {
            for (cx, cy, value) in piece.cells.filled() {
                let x = i16::from(piece.x) + i16::from(cx);
                let y = i16::from(piece.y) + i16::from(cy);
                if let Some(cell) = usize::try_from(y)
                    .ok()
                    .zip(usize::try_from(x).ok())
                    .and_then(|(y, x)| rows.get_mut(y).and_then(|r| r.get_mut(x)))
                {
                    *cell = value;
                }
            }
        }
        rows
    }
}

/// Consumer of per-frame snapshots.
///
/// Presenting the same frame twice must produce the same output.
pub trait RenderTarget {
    type Error;

    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// Collects frames; handy for tests and replays.
impl RenderTarget for Vec<Frame> {
    type Error = Infallible;

    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.push(frame.clone());
        Ok(())
    }
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    type Error = T::Error;

    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        (**self).present(frame)
    }
}
