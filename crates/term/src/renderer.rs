//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first draw, and any draw after a resize or
//! [`TerminalRenderer::invalidate`], repaints the whole screen. Later draws only
//! compare the region the view paints and emit the runs of cells that changed
//! inside it; everything outside that region is blank in every frame.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Framebuffer currently on screen; `None` forces a full repaint.
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        StyleWriter::new(&mut self.buf).finish()?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full repaint.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Put `fb` on screen, diffing inside `region` against the previous draw.
    ///
    /// `fb` is swapped with the previously shown buffer, so the caller gets a
    /// buffer of the right size back to paint the next frame into.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer, region: Rect) -> Result<()> {
        self.buf.clear();
        let mut shown = match self.shown.take() {
            Some(shown) if shown.width() == fb.width() && shown.height() == fb.height() => {
                encode_diff_into(&shown, fb, region, &mut self.buf)?;
                shown
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Queues cells, switching colors and attributes only when they change.
struct StyleWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> StyleWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn put(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let style = cell.style;
            self.out
                .queue(SetColors(Colors::new(style.fg.into(), style.bg.into())))?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    /// Leave the terminal with default colors and attributes.
    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Encode a clear-and-repaint of every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut w = StyleWriter::new(out);
    let bounds = fb.bounds();
    for y in bounds.rows() {
        w.move_to(0, y)?;
        for x in bounds.cols() {
            w.put(fb.get(x, y).unwrap_or_default())?;
        }
    }
    w.finish()
}

/// Encode the cells of `next` that differ from `prev` inside `region`.
///
/// Both buffers must have the same size; `region` is clipped to them.
pub fn encode_diff_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    region: Rect,
    out: &mut Vec<u8>,
) -> Result<()> {
    debug_assert_eq!(prev.bounds(), next.bounds());
    let region = region.clip(next.width(), next.height());

    let mut w = StyleWriter::new(out);
    for y in region.rows() {
        for (x, len) in changed_runs(prev, next, y, region) {
            w.move_to(x, y)?;
            for cx in x..x + len {
                w.put(next.get(cx, y).unwrap_or_default())?;
            }
        }
    }
    w.finish()
}

/// `(start, len)` of each run of differing cells in row `y` of `region`.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    y: u16,
    region: Rect,
) -> impl Iterator<Item = (u16, u16)> + 'a {
    let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
    let mut cols = region.cols();
    std::iter::from_fn(move || {
        let start = cols.by_ref().find(|&x| differs(x))?;
        let end = cols.by_ref().find(|&x| !differs(x)).unwrap_or(cols.end);
        Some((start, end - start))
    })
}
