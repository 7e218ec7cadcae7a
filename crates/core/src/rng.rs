//! RNG module - injected randomness for piece spawns
//!
//! Spawning draws from a [`PieceSource`] handed to the game at construction,
//! so a fixed seed (or a fixed script) replays the same game.
//!
//! [`SimpleRng`] is the production source: an LCG drawing each shape
//! uniformly. [`Sequence`] replays a fixed list and is used by tests and
//! scripted runs.

use crate::types::{ShapeId, SHAPE_COUNT};

/// Supplier of the next shape to spawn.
pub trait PieceSource {
    fn next_shape(&mut self) -> ShapeId;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Current internal state.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl PieceSource for SimpleRng {
    fn next_shape(&mut self) -> ShapeId {
        ShapeId::wrapping(self.next_range(SHAPE_COUNT as u32))
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of shapes, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct Sequence {
    shapes: Vec<ShapeId>,
    next: usize,
}

impl Sequence {
    /// Panics if `shapes` is empty.
    pub fn new(shapes: impl IntoIterator<Item = ShapeId>) -> Self {
        let shapes: Vec<ShapeId> = shapes.into_iter().collect();
        assert!(!shapes.is_empty(), "Sequence needs at least one shape");
        Self { shapes, next: 0 }
    }

    /// Convenience constructor from raw indices (each taken modulo 7).
    pub fn from_indices(indices: &[u32]) -> Self {
        Self::new(indices.iter().map(|&i| ShapeId::wrapping(i)))
    }
}

impl PieceSource for Sequence {
    fn next_shape(&mut self) -> ShapeId {
        let shape = self.shapes[self.next];
        self.next = (self.next + 1) % self.shapes.len();
        shape
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_shape(&mut self) -> ShapeId {
        (**self).next_shape()
    }
}
