//! Headless render target: one JSON object per frame.
//!
//! ```json
//! {"frame":3,"gameOver":false,"board":[[0,0,...],...],"piece":{"shape":5,"rotation":"north","x":3,"y":0,"cells":[[0,6,0],[6,6,6]]}}
//! ```
//!
//! `board` is the locked board only; the falling piece is reported separately
//! and is `null` once the game is over.

use std::io::Write;

use serde::Serialize;

use crate::core::{Frame, PieceView, RenderTarget};
use crate::types::{Cell, BOARD_WIDTH};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord<'a> {
    pub frame: u64,
    pub game_over: bool,
    pub board: &'a [[Cell; BOARD_WIDTH as usize]],
    pub piece: Option<PieceRecord>,
}

#[derive(Debug, Serialize)]
pub struct PieceRecord {
    pub shape: u8,
    pub rotation: &'static str,
    pub x: i8,
    pub y: i8,
    pub cells: Vec<Vec<Cell>>,
}

impl From<&PieceView> for PieceRecord {
    fn from(piece: &PieceView) -> Self {
        Self {
            shape: piece.shape.index() as u8,
            rotation: piece.rotation.as_str(),
            x: piece.x,
            y: piece.y,
            cells: piece.cells.rows().map(<[Cell]>::to_vec).collect(),
        }
    }
}

impl<'a> From<&'a Frame> for FrameRecord<'a> {
    fn from(frame: &'a Frame) -> Self {
        Self {
            frame: frame.frame_no,
            game_over: frame.game_over,
            board: &frame.board,
            piece: frame.piece.as_ref().map(PieceRecord::from),
        }
    }
}

/// Writes each presented frame as a JSON line.
#[derive(Debug)]
pub struct JsonLinesTarget<W> {
    out: W,
}

impl<W: Write> JsonLinesTarget<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderTarget for JsonLinesTarget<W> {
    type Error = anyhow::Error;

    fn present(&mut self, frame: &Frame) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, &FrameRecord::from(frame))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}
