//! Terminal rendering for the signal-graph game.
//!
//! Frames are painted into a small framebuffer (no widget toolkit) and
//! flushed to the terminal as diffs of the painted region. The headless
//! [`JsonLinesTarget`] writes the same frames as JSON lines instead.
//!
//! - board cells are 2 columns wide to compensate for glyph aspect ratio
//! - [`GameView`] is pure and unit-testable; only [`TerminalRenderer`] does I/O

pub mod fb;
pub mod game_view;
pub mod json;
pub mod renderer;
pub mod target;

pub use rx_tetris_core as core;
pub use rx_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{cell_color, GameView, Viewport, PALETTE};
pub use json::{FrameRecord, JsonLinesTarget, PieceRecord};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use target::TerminalTarget;
