//! Game driver - timers, frame sampling and game-over handling
//!
//! [`Game`] owns the signal graph and the clock. Advancing it by some elapsed
//! time fires the due gravity and frame ticks into the graph; every frame tick
//! hands a [`Frame`] to the render target. When the board's top row fills the
//! clock is cancelled, one last frame is presented, and further advances and
//! inputs do nothing.

use log::info;

use crate::board::Board;
use crate::config::GameConfig;
use crate::graph::SignalGraph;
use crate::rng::{PieceSource, SimpleRng};
use crate::snapshot::{Frame, PieceView, RenderTarget};
use crate::timer::{Clock, Tick};
use crate::types::InputEvent;

#[derive(Debug)]
pub struct Game<S = SimpleRng> {
    graph: SignalGraph<S>,
    clock: Clock,
    frames: u64,
    /// Game ended outside a tick; the final frame goes out on the next advance.
    final_pending: bool,
}

impl Game<SimpleRng> {
    /// Game with the LCG piece source seeded from `config.seed` (or 1).
    pub fn new(config: &GameConfig) -> Self {
        Self::with_source(config, SimpleRng::new(config.seed.unwrap_or(1)))
    }
}

impl<S: PieceSource> Game<S> {
    pub fn with_source(config: &GameConfig, source: S) -> Self {
        Self::with_board(config, source, Board::new())
    }

    /// Start from a pre-filled board.
    pub fn with_board(config: &GameConfig, source: S, board: Board) -> Self {
        info!(
            "new game: gravity {} ms, frame {} ms, rotation anchor {}",
            config.gravity_ms,
            config.frame_ms,
            config.rotation_anchor.as_str()
        );
        Self {
            graph: SignalGraph::with_board(source, config.rotation_anchor, board),
            clock: Clock::new(config.gravity_ms, config.frame_ms),
            frames: 0,
            final_pending: false,
        }
    }

    pub fn graph(&self) -> &SignalGraph<S> {
        &self.graph
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn is_over(&self) -> bool {
        self.graph.is_over()
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Feed one input event. Ignored after game over.
    pub fn input(&mut self, event: InputEvent) {
        if self.clock.is_cancelled() {
            return;
        }
        self.graph.input(event);
        if self.check_over() {
            self.final_pending = true;
        }
    }

    /// Let `elapsed_ms` of time pass, firing every due tick.
    pub fn advance<R: RenderTarget>(
        &mut self,
        elapsed_ms: u32,
        target: &mut R,
    ) -> Result<(), R::Error> {
        if std::mem::take(&mut self.final_pending) {
            self.present(target)?;
        }

        let mut budget = elapsed_ms;
        while let Some(tick) = self.clock.next_fire(&mut budget) {
            self.fire(tick, target)?;
        }
        Ok(())
    }

    /// Fire a single tick immediately, outside the clock's schedule.
    pub fn fire<R: RenderTarget>(&mut self, tick: Tick, target: &mut R) -> Result<(), R::Error> {
        if self.clock.is_cancelled() {
            return Ok(());
        }

        match tick {
            Tick::Gravity => self.graph.gravity(),
            Tick::Frame => self.graph.frame(),
        }

        // The tick that ends the game presents the final board, without a
        // falling piece, even if it was a gravity tick.
        if self.check_over() || tick == Tick::Frame {
            self.present(target)?;
        }
        Ok(())
    }

    /// Snapshot of the current state.
    pub fn frame(&self) -> Frame {
        let piece = (!self.graph.is_over()).then(|| {
            let active = self.graph.active();
            PieceView {
                shape: active.shape,
                rotation: self.graph.rotation(),
                x: self.graph.x(),
                y: self.graph.y(),
                cells: self.graph.piece_grid(),
            }
        });
        Frame {
            frame_no: self.frames,
            board: self.graph.board().to_rows(),
            piece,
            game_over: self.graph.is_over(),
        }
    }

    fn present<R: RenderTarget>(&mut self, target: &mut R) -> Result<(), R::Error> {
        self.frames += 1;
        target.present(&self.frame())
    }

    /// Cancel the clock the first time game over is observed.
    fn check_over(&mut self) -> bool {
        if self.graph.is_over() && self.clock.cancel() {
            info!(
                "timers stopped at {} ms after {} frames",
                self.clock.now_ms(),
                self.frames
            );
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Sequence;

    fn game(shapes: &[u32]) -> Game<Sequence> {
        Game::with_source(&GameConfig::default(), Sequence::from_indices(shapes))
    }

    #[test]
    fn frames_follow_frame_period() {
        let mut g = game(&[5]);
        let mut frames: Vec<Frame> = Vec::new();
        g.advance(17 * 3, &mut frames).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].frame_no, 3);
        assert_eq!(g.graph().y(), 0);
    }

    #[test]
    fn gravity_follows_gravity_period() {
        let mut g = game(&[5]);
        let mut frames: Vec<Frame> = Vec::new();
        // Gravity at 500 and 1000, then a frame at 1003.
        g.advance(1003, &mut frames).unwrap();
        assert_eq!(g.graph().y(), 2);
        let piece = frames.last().unwrap().piece.as_ref().unwrap();
        assert_eq!(piece.y, 2);
    }

    #[test]
    fn input_after_game_over_is_ignored() {
        let mut board = Board::new();
        board.set(0, 0, 1);
        let mut g = Game::with_board(&GameConfig::default(), Sequence::from_indices(&[0]), board);
        assert!(g.is_over());

        let mut frames: Vec<Frame> = Vec::new();
        // The clock is only cancelled once game over has been observed.
        g.fire(Tick::Gravity, &mut frames).unwrap();
        assert!(g.clock().is_cancelled());
        assert_eq!(frames.len(), 1);
        assert!(frames[0].game_over);
        assert!(frames[0].piece.is_none());

        let x = g.graph().x();
        g.input(InputEvent::MoveLeft);
        assert_eq!(g.graph().x(), x);
    }

    #[test]
    fn game_over_from_input_presents_final_frame_on_next_advance() {
        // Sliding the 2x2 block left puts it on top of the cell at (2, 2); it
        // locks into rows 0-1.
        let mut board = Board::new();
        board.set(2, 2, 1);
        let mut g = Game::with_board(&GameConfig::default(), Sequence::from_indices(&[6]), board);

        g.input(InputEvent::MoveLeft);
        assert!(g.is_over());

        let mut frames: Vec<Frame> = Vec::new();
        g.advance(10_000, &mut frames).unwrap();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].game_over);
        assert_eq!(frames[0].board[0][2], 7);
        assert!(frames[0].piece.is_none());
    }
}
