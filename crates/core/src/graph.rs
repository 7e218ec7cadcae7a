//! Reactive state graph
//!
//! The falling piece is described by a handful of [`Signal`]s wired into a
//! fixed DAG. Every external event (input, gravity tick, frame tick) and every
//! internal lock event is processed as one *wave*:
//!
//! 1. the wave stamp is bumped,
//! 2. source signals touched by the event are published (a lock publishes the
//!    new board and the next piece),
//! 3. derived nodes run once each in [`Node::ORDER`]; a node recomputes when
//!    the event targets it or when one of its triggers was published in this
//!    wave, and publishes before the next node runs.
//!
//! Nodes read other signals as their latest settled value. Events raised while
//! a wave runs (lock events) are queued and handled as their own wave before
//! [`SignalGraph::dispatch`] returns.
//!
//! | node | triggers | samples |
//! |------|----------|---------|
//! | `Rotation` | active piece (+ rotate input) | horizontal, vertical, board |
//! | `VerticalOffset` | active piece, rotation (+ gravity, soft drop) | - |
//! | `HorizontalOffset` | active piece, rotation (+ left/right input) | vertical, board |
//! | `GameOverWatch` | board | - |
//! | `LockWatch` | active piece, rotation, vertical, horizontal, board (+ frame) | game over |
//!
//! Vertical movement never looks at the horizontal offset; horizontal moves are
//! tested against the vertical offset produced earlier in the same wave.

use std::collections::VecDeque;

use log::{debug, info, trace};

use crate::board::Board;
use crate::collision::{grid_collides_horizontally, grid_collides_vertically};
use crate::config::RotationAnchor;
use crate::lock::{Collision, LockEngine};
use crate::rng::PieceSource;
use crate::rotation::{rotate, CellGrid};
use crate::signal::{Signal, SignalId, Stamp};
use crate::types::{InputEvent, Rotation, ShapeId, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X};

/// Identity of the falling piece.
///
/// `serial` increments on every spawn, so a respawn of the same shape is
/// still a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub serial: u32,
    pub shape: ShapeId,
}

/// Something the graph reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    /// Gravity timer tick.
    Gravity,
    /// Frame timer tick.
    Frame,
    /// Raised by the lock watcher.
    Lock(Collision),
}

/// Derived nodes of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Rotation,
    VerticalOffset,
    HorizontalOffset,
    GameOverWatch,
    LockWatch,
}

impl Node {
    /// Evaluation order. Every trigger of a node is a source signal or the
    /// output of a node listed before it.
    pub const ORDER: [Node; 5] = [
        Node::Rotation,
        Node::VerticalOffset,
        Node::HorizontalOffset,
        Node::GameOverWatch,
        Node::LockWatch,
    ];

    /// Signal this node writes, if any.
    pub fn output(self) -> Option<SignalId> {
        match self {
            Node::Rotation => Some(SignalId::Rotation),
            Node::VerticalOffset => Some(SignalId::VerticalOffset),
            Node::HorizontalOffset => Some(SignalId::HorizontalOffset),
            Node::GameOverWatch => Some(SignalId::GameOver),
            Node::LockWatch => None,
        }
    }

    /// Signals whose change wakes this node.
    pub fn triggers(self) -> &'static [SignalId] {
        match self {
            Node::Rotation => &[SignalId::ActivePiece],
            Node::VerticalOffset => &[SignalId::ActivePiece, SignalId::Rotation],
            Node::HorizontalOffset => &[SignalId::ActivePiece, SignalId::Rotation],
            Node::GameOverWatch => &[SignalId::Board],
            Node::LockWatch => &[
                SignalId::ActivePiece,
                SignalId::Rotation,
                SignalId::VerticalOffset,
                SignalId::HorizontalOffset,
                SignalId::Board,
            ],
        }
    }

    /// Signals read as latest values without waking this node.
    pub fn samples(self) -> &'static [SignalId] {
        match self {
            Node::Rotation => &[
                SignalId::HorizontalOffset,
                SignalId::VerticalOffset,
                SignalId::Board,
            ],
            Node::VerticalOffset => &[],
            Node::HorizontalOffset => &[SignalId::VerticalOffset, SignalId::Board],
            Node::GameOverWatch => &[],
            Node::LockWatch => &[SignalId::GameOver],
        }
    }

    /// Whether `event` targets this node directly.
    fn reacts_to(self, event: &Event) -> bool {
        match self {
            Node::Rotation => matches!(event, Event::Input(InputEvent::Rotate)),
            Node::VerticalOffset => {
                matches!(event, Event::Gravity | Event::Input(InputEvent::SoftDrop))
            }
            Node::HorizontalOffset => matches!(
                event,
                Event::Input(InputEvent::MoveLeft | InputEvent::MoveRight)
            ),
            Node::GameOverWatch => false,
            Node::LockWatch => matches!(event, Event::Frame),
        }
    }
}

/// The live game state as a signal network.
#[derive(Debug)]
pub struct SignalGraph<S> {
    source: S,
    lock_engine: LockEngine,
    anchor: RotationAnchor,

    active: Signal<ActivePiece>,
    rotation: Signal<Rotation>,
    vertical: Signal<i8>,
    horizontal: Signal<i8>,
    board: Signal<Board>,
    game_over: Signal<bool>,

    queue: VecDeque<Event>,
    stamp: Stamp,
    locks: u32,
}

impl<S: PieceSource> SignalGraph<S> {
    /// Empty board, first piece drawn from `source`.
    pub fn new(source: S, anchor: RotationAnchor) -> Self {
        Self::with_board(source, anchor, Board::new())
    }

    /// Start from a pre-filled board.
    pub fn with_board(mut source: S, anchor: RotationAnchor, board: Board) -> Self {
        let first = ActivePiece {
            serial: 1,
            shape: source.next_shape(),
        };
        let grid = rotate(first.shape, Rotation::North);
        let spawn_x = SPAWN_X.min(BOARD_WIDTH as i8 - grid.width() as i8);
        debug!("spawned piece 1: shape {}", first.shape.index());

        let mut graph = Self {
            source,
            lock_engine: LockEngine::with_board(board),
            anchor,
            active: Signal::new(first),
            rotation: Signal::new(Rotation::North),
            vertical: Signal::new(0),
            horizontal: Signal::new(spawn_x),
            game_over: Signal::new(board.is_top_row_occupied()),
            board: Signal::new(board),
            queue: VecDeque::new(),
            stamp: 0,
            locks: 0,
        };
        // On a prefilled board the first piece may already rest on (or
        // overlap) locked cells; the first dispatch handles that lock.
        graph.recompute_lock_watch();
        graph
    }

    pub fn active(&self) -> ActivePiece {
        self.active.value()
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation.value()
    }

    /// Horizontal offset of the piece's bounding box.
    pub fn x(&self) -> i8 {
        self.horizontal.value()
    }

    /// Vertical offset of the piece's bounding box.
    pub fn y(&self) -> i8 {
        self.vertical.value()
    }

    /// Latest published board snapshot.
    pub fn board(&self) -> &Board {
        self.board.get()
    }

    pub fn is_over(&self) -> bool {
        self.game_over.value()
    }

    pub fn anchor(&self) -> RotationAnchor {
        self.anchor
    }

    /// Number of locks processed so far.
    pub fn locks(&self) -> u32 {
        self.locks
    }

    /// Stamp of the last processed wave.
    pub fn stamp(&self) -> Stamp {
        self.stamp
    }

    /// Stamp of the wave that last changed `id` (`0` if never).
    pub fn changed_at(&self, id: SignalId) -> Stamp {
        match id {
            SignalId::ActivePiece => self.active.changed_at(),
            SignalId::Rotation => self.rotation.changed_at(),
            SignalId::VerticalOffset => self.vertical.changed_at(),
            SignalId::HorizontalOffset => self.horizontal.changed_at(),
            SignalId::Board => self.board.changed_at(),
            SignalId::GameOver => self.game_over.changed_at(),
        }
    }

    /// Resolved cells of the falling piece.
    pub fn piece_grid(&self) -> CellGrid {
        rotate(self.active.get().shape, self.rotation.value())
    }

    pub fn input(&mut self, event: InputEvent) {
        self.dispatch(Event::Input(event));
    }

    pub fn gravity(&mut self) {
        self.dispatch(Event::Gravity);
    }

    pub fn frame(&mut self) {
        self.dispatch(Event::Frame);
    }

    /// Process `event` and everything it raises until the graph is settled.
    ///
    /// Once the game is over every event is dropped.
    pub fn dispatch(&mut self, event: Event) {
        self.queue.push_back(event);
        while let Some(event) = self.queue.pop_front() {
            if self.game_over.value() {
                self.queue.clear();
                break;
            }
            self.run_wave(event);
        }
    }

    fn run_wave(&mut self, event: Event) {
        self.stamp += 1;
        trace!("wave {}: {:?}", self.stamp, event);

        if let Event::Lock(collision) = event {
            self.apply_lock(&collision);
        }

        for node in Node::ORDER {
            let woken =
                node.reacts_to(&event) || node.triggers().iter().any(|&id| self.changed(id));
            if woken {
                self.recompute(node, &event);
            }
        }
    }

    fn changed(&self, id: SignalId) -> bool {
        let stamp = self.stamp;
        match id {
            SignalId::ActivePiece => self.active.changed_in(stamp),
            SignalId::Rotation => self.rotation.changed_in(stamp),
            SignalId::VerticalOffset => self.vertical.changed_in(stamp),
            SignalId::HorizontalOffset => self.horizontal.changed_in(stamp),
            SignalId::Board => self.board.changed_in(stamp),
            SignalId::GameOver => self.game_over.changed_in(stamp),
        }
    }

    fn apply_lock(&mut self, collision: &Collision) {
        if collision.serial != self.active.get().serial {
            trace!("dropping stale lock for piece {}", collision.serial);
            return;
        }

        let outcome = self.lock_engine.lock(collision);
        self.locks += 1;
        self.board.publish(outcome.board, self.stamp);

        let next = ActivePiece {
            serial: collision.serial.wrapping_add(1),
            shape: self.source.next_shape(),
        };
        debug!("spawned piece {}: shape {}", next.serial, next.shape.index());
        self.active.publish(next, self.stamp);
    }

    fn recompute(&mut self, node: Node, event: &Event) {
        match node {
            Node::Rotation => self.recompute_rotation(),
            Node::VerticalOffset => self.recompute_vertical(event),
            Node::HorizontalOffset => self.recompute_horizontal(event),
            Node::GameOverWatch => self.recompute_game_over(),
            Node::LockWatch => self.recompute_lock_watch(),
        }
    }

    fn recompute_rotation(&mut self) {
        let next = if self.changed(SignalId::ActivePiece) {
            Rotation::North
        } else {
            self.try_rotate()
        };
        self.rotation.publish(next, self.stamp);
    }

    /// Rotation a rotate input would settle on.
    ///
    /// The candidate is resolved to the placement the offset nodes will give
    /// it (anchor column, floor clamp); if that collides the rotation holds.
    fn try_rotate(&self) -> Rotation {
        let current = self.rotation.value();
        let candidate = current.rotate_cw();
        let grid = rotate(self.active.get().shape, candidate);
        let x = self.anchor_x(&grid);
        let y = self.vertical.value().min(floor_y(&grid));

        if grid_collides_horizontally(&grid, x, y, self.board.get()) {
            trace!("rotation to {} rejected at ({}, {})", candidate.as_str(), x, y);
            return current;
        }
        candidate
    }

    fn recompute_vertical(&mut self, event: &Event) {
        let floor = floor_y(&self.piece_grid());
        let y = self.vertical.value();

        let next = if self.changed(SignalId::ActivePiece) {
            0
        } else if matches!(event, Event::Gravity | Event::Input(InputEvent::SoftDrop)) {
            // Clamp so the box never passes the floor on the tick it lands.
            (y + 1).min(floor)
        } else {
            y.min(floor)
        };
        self.vertical.publish(next, self.stamp);
    }

    fn recompute_horizontal(&mut self, event: &Event) {
        let grid = self.piece_grid();

        let next = if self.changed(SignalId::ActivePiece) {
            SPAWN_X.min(max_x(&grid))
        } else if self.changed(SignalId::Rotation) {
            self.anchor_x(&grid)
        } else {
            match event {
                Event::Input(InputEvent::MoveLeft) => self.try_shift(&grid, -1),
                Event::Input(InputEvent::MoveRight) => self.try_shift(&grid, 1),
                _ => return,
            }
        };
        self.horizontal.publish(next, self.stamp);
    }

    fn try_shift(&self, grid: &CellGrid, dx: i8) -> i8 {
        let x = self.horizontal.value();
        let candidate = x + dx;
        if grid_collides_horizontally(grid, candidate, self.vertical.value(), self.board.get()) {
            trace!("move to x={} rejected", candidate);
            return x;
        }
        candidate
    }

    /// Column a rotated piece is placed at, clamped into the board.
    fn anchor_x(&self, grid: &CellGrid) -> i8 {
        let x = match self.anchor {
            RotationAnchor::Spawn => SPAWN_X,
            RotationAnchor::Keep => self.horizontal.value(),
        };
        x.min(max_x(grid)).max(0)
    }

    fn recompute_game_over(&mut self) {
        if self.board.get().is_top_row_occupied() && self.game_over.publish(true, self.stamp) {
            info!("game over after {} locks", self.locks);
        }
    }

    fn recompute_lock_watch(&mut self) {
        if self.game_over.value() {
            return;
        }

        let piece = self.active.value();
        let grid = self.piece_grid();
        let (x, y) = (self.horizontal.value(), self.vertical.value());
        // A piece spawned onto locked cells locks where it is.
        let board = self.board.get();
        if !grid_collides_vertically(&grid, x, y, board)
            && !grid_collides_horizontally(&grid, x, y, board)
        {
            return;
        }

        let pending = self
            .queue
            .iter()
            .any(|e| matches!(e, Event::Lock(c) if c.serial == piece.serial));
        if !pending {
            self.queue.push_back(Event::Lock(Collision {
                x,
                y,
                shape: piece.shape,
                rotation: self.rotation.value(),
                serial: piece.serial,
            }));
        }
    }
}

/// Lowest legal vertical offset for `grid`.
fn floor_y(grid: &CellGrid) -> i8 {
    BOARD_HEIGHT as i8 - grid.height() as i8
}

/// Rightmost legal horizontal offset for `grid`.
fn max_x(grid: &CellGrid) -> i8 {
    BOARD_WIDTH as i8 - grid.width() as i8
}
