//! Core game logic - pure, deterministic, and testable
//!
//! Everything here runs on a virtual clock and a caller-supplied piece
//! source, with no terminal or file I/O beyond reading a config file:
//!
//! - **Deterministic**: the same piece sequence and event order produce the
//!   same boards
//! - **Testable**: every rule is a plain function or a single-threaded state
//!   machine
//! - **Portable**: frames go to any [`RenderTarget`] (terminal, JSON lines,
//!   a `Vec` in tests)
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven tetromino cell grids
//! - [`rotation`]: clockwise quarter turns of a cell grid
//! - [`board`]: 10x20 grid of locked cells, merging and line clearing
//! - [`collision`]: vertical and horizontal collision predicates
//! - [`signal`]: stamped signal cells
//! - [`graph`]: the reactive state graph driving the falling piece
//! - [`lock`]: merging a landed piece into the board
//! - [`timer`]: gravity and frame timers on a virtual clock
//! - [`game`]: timers, frame sampling and game-over handling
//! - [`snapshot`]: frames handed to render targets
//! - [`rng`]: piece sources
//! - [`config`]: TOML configuration
//!
//! # Example
//!
//! ```
//! use rx_tetris_core::{Frame, Game, GameConfig};
//! use rx_tetris_core::types::InputEvent;
//!
//! let mut game = Game::new(&GameConfig::default());
//! let mut frames: Vec<Frame> = Vec::new();
//!
//! game.input(InputEvent::MoveRight);
//! game.advance(1_000, &mut frames).unwrap();
//!
//! // Two gravity ticks have pulled the piece down.
//! assert_eq!(game.graph().y(), 2);
//! assert!(!frames.is_empty());
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod game;
pub mod graph;
pub mod lock;
pub mod rng;
pub mod rotation;
pub mod shapes;
pub mod signal;
pub mod snapshot;
pub mod timer;

pub use rx_tetris_types as types;

pub use board::{Board, BoardRows};
pub use collision::{collides_horizontally, collides_vertically};
pub use config::{ConfigError, GameConfig, RotationAnchor};
pub use game::Game;
pub use graph::{ActivePiece, Event, Node, SignalGraph};
pub use lock::{Collision, LockEngine, LockOutcome};
pub use rng::{PieceSource, Sequence, SimpleRng};
pub use rotation::{rotate, CellGrid};
pub use shapes::spawn_grid;
pub use signal::{Signal, SignalId};
pub use snapshot::{Frame, PieceView, RenderTarget};
pub use timer::{Clock, Tick};
