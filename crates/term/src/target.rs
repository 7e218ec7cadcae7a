//! Render target that paints frames onto the terminal.

use anyhow::Result;
use crossterm::terminal;

use crate::core::{Frame, RenderTarget};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

pub struct TerminalTarget {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    /// Last frame presented, for repaints on resize.
    last: Option<Frame>,
}

impl TerminalTarget {
    pub fn new(view: GameView) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view,
            fb: FrameBuffer::new(0, 0),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    /// Full repaint of the last frame, e.g. after a resize.
    pub fn repaint(&mut self) -> Result<()> {
        self.renderer.invalidate();
        if let Some(frame) = self.last.take() {
            self.draw(&frame)?;
            self.last = Some(frame);
        }
        Ok(())
    }

    fn draw(&mut self, frame: &Frame) -> Result<()> {
        let (w, h) = terminal::size()?;
        let viewport = Viewport::new(w, h);
        self.view.render_into(frame, viewport, &mut self.fb);
        self.renderer
            .draw_swap(&mut self.fb, self.view.painted_rect(viewport))
    }
}

impl RenderTarget for TerminalTarget {
    type Error = anyhow::Error;

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.draw(frame)?;
        self.last = Some(frame.clone());
        Ok(())
    }
}
