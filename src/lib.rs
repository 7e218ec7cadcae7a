//! rx-tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name; the implementation lives
//! in dedicated crates under `crates/`.

pub use rx_tetris_core as core;
pub use rx_tetris_input as input;
pub use rx_tetris_term as term;
pub use rx_tetris_types as types;
