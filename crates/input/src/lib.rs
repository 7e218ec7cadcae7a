//! Terminal input mapping.
//!
//! Maps `crossterm` key events onto [`crate::types::InputEvent`]. Presses and
//! auto-repeats both count, so holding a key repeats the action at the
//! terminal's repeat rate; releases are ignored.

pub mod map;

pub use rx_tetris_types as types;

pub use map::{map_key, should_quit};
