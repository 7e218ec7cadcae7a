//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (signal graph, terminal rendering, JSON output).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn column**: 3 (top-left anchor of the piece's bounding box)
//!
//! # Cell Encoding
//!
//! Board and shape cells share one encoding: `0` is empty, `n > 0` is filled
//! and painted with palette entry `n - 1`. Only `1..=7` ever appear.
//!
//! # Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_MS` | 500 | Gravity tick period |
//! | `FRAME_MS` | 17 | Render/sample tick period |
//!
//! # Examples
//!
//! ```
//! use rx_tetris_types::{Rotation, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let bar = ShapeId::new(0).unwrap();
//! assert_eq!(bar.color(), 1);
//! assert!(ShapeId::new(7).is_none());
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Rotation::from_count(6), Rotation::South);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column a freshly spawned piece is anchored at.
pub const SPAWN_X: i8 = 3;

/// Number of distinct shapes (and palette colors).
pub const SHAPE_COUNT: u8 = 7;

/// Default gravity period in milliseconds.
pub const GRAVITY_MS: u32 = 500;

/// Default frame (render and lock-sampling) period in milliseconds.
pub const FRAME_MS: u32 = 17;

/// A cell on the board or in a shape grid.
///
/// `0` is empty, `1..=7` is filled with palette color `value - 1`.
pub type Cell = u8;

/// Empty cell value.
pub const EMPTY: Cell = 0;

/// Identifier of one of the seven shapes.
///
/// Can only hold `0..7`, so every lookup keyed by it is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u8);

impl ShapeId {
    /// All seven shapes in table order.
    pub const ALL: [ShapeId; SHAPE_COUNT as usize] = [
        ShapeId(0),
        ShapeId(1),
        ShapeId(2),
        ShapeId(3),
        ShapeId(4),
        ShapeId(5),
        ShapeId(6),
    ];

    /// Returns `None` when `index >= 7`.
    pub fn new(index: u8) -> Option<Self> {
        (index < SHAPE_COUNT).then_some(Self(index))
    }

    /// Map an arbitrary integer onto a shape (`value mod 7`).
    pub fn wrapping(value: u32) -> Self {
        Self((value % SHAPE_COUNT as u32) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Cell value this shape paints with (`index + 1`).
    pub fn color(self) -> Cell {
        self.0 + 1
    }
}

/// Rotation count, always kept modulo 4.
///
/// - **North**: spawn orientation (0 rotations)
/// - **East**: one 90° clockwise rotation
/// - **South**: two rotations
/// - **West**: three rotations
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use rx_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns from spawn (`0..4`).
    pub fn count(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any count; reduced modulo 4.
    pub fn from_count(count: u32) -> Self {
        match count % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Discrete input events understood by the game.
///
/// Anything else an input source produces is dropped before it reaches the
/// signal graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Rotate the falling piece 90° clockwise
    Rotate,
    /// Move the falling piece one row down
    SoftDrop,
    /// Move the falling piece one column left
    MoveLeft,
    /// Move the falling piece one column right
    MoveRight,
}

impl InputEvent {
    /// Parse an event name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use rx_tetris_types::InputEvent;
    ///
    /// assert_eq!(InputEvent::from_str("moveLeft"), Some(InputEvent::MoveLeft));
    /// assert_eq!(InputEvent::from_str("ROTATE"), Some(InputEvent::Rotate));
    /// assert_eq!(InputEvent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate" => Some(InputEvent::Rotate),
            "softdrop" => Some(InputEvent::SoftDrop),
            "moveleft" => Some(InputEvent::MoveLeft),
            "moveright" => Some(InputEvent::MoveRight),
            _ => None,
        }
    }

    /// camelCase name, used in logs and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            InputEvent::Rotate => "rotate",
            InputEvent::SoftDrop => "softDrop",
            InputEvent::MoveLeft => "moveLeft",
            InputEvent::MoveRight => "moveRight",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(GRAVITY_MS, 500);
        assert_eq!(FRAME_MS, 17);
        assert_eq!(SPAWN_X, 3);
    }

    #[test]
    fn shape_ids_cover_palette() {
        let colors: Vec<Cell> = ShapeId::ALL.iter().map(|s| s.color()).collect();
        assert_eq!(colors, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(ShapeId::wrapping(15), ShapeId::ALL[1]);
    }

    #[test]
    fn rotation_count_is_modular() {
        for n in 0..16u32 {
            assert_eq!(Rotation::from_count(n).count() as u32, n % 4);
        }
        let mut r = Rotation::North;
        for _ in 0..4 {
            r = r.rotate_cw();
        }
        assert_eq!(r, Rotation::North);
    }

    #[test]
    fn input_event_names_roundtrip() {
        for ev in [
            InputEvent::Rotate,
            InputEvent::SoftDrop,
            InputEvent::MoveLeft,
            InputEvent::MoveRight,
        ] {
            assert_eq!(InputEvent::from_str(ev.as_str()), Some(ev));
        }
    }
}
