//! GameView: paints a [`Frame`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::Frame;
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, SHAPE_COUNT};

/// Shape colors, indexed by `cell - 1`.
pub const PALETTE: [Rgb; SHAPE_COUNT as usize] = [
    Rgb::new(255, 0, 0),     // red
    Rgb::new(0, 255, 0),     // lime
    Rgb::new(0, 191, 255),   // deepskyblue
    Rgb::new(255, 255, 0),   // yellow
    Rgb::new(255, 165, 0),   // orange
    Rgb::new(255, 0, 255),   // magenta
    Rgb::new(0, 255, 255),   // cyan
];

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

const PLAY_HINT: &str = "←→ move  ↑ rotate  ↓ drop  q quit";
const OVER_HINT: &str = "q: quit";

/// Palette color for a board or shape cell, `None` for empty.
pub fn cell_color(cell: Cell) -> Option<Rgb> {
    usize::from(cell)
        .checked_sub(1)
        .and_then(|i| PALETTE.get(i))
        .copied()
}

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Size of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            u16::from(BOARD_WIDTH)
                .saturating_mul(self.cell_w)
                .saturating_add(2),
            u16::from(BOARD_HEIGHT)
                .saturating_mul(self.cell_h)
                .saturating_add(2),
        )
    }

    /// Everything [`GameView::render_into`] can paint: the bordered board and
    /// the hint line below it. Cells outside stay blank.
    pub fn painted_rect(&self, viewport: Viewport) -> Rect {
        let (frame_w, frame_h) = self.frame_size();
        let (x, y) = self.origin(viewport);
        let hint_w = PLAY_HINT.chars().count() as u16;
        Rect::new(x, y, frame_w.max(hint_w), frame_h.saturating_add(1))
            .clip(viewport.width, viewport.height)
    }

    /// Top-left corner of the bordered board, centered in `viewport`.
    pub fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, frame: &Frame, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.origin(viewport);

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for (y, row) in frame.composed().iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell_color(cell) {
                    Some(fg) => {
                        let style = CellStyle::new(fg, PLAY_BG).bold();
                        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
                    }
                    None => self.fill_cell_rect(fb, start_x, start_y, x, y, '·', empty),
                }
            }
        }

        if frame.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        let status = CellStyle::default().dim();
        let status_y = start_y.saturating_add(frame_h);
        let hint = if frame.game_over { OVER_HINT } else { PLAY_HINT };
        fb.put_str(start_x, status_y, hint, status);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &Frame, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x.saturating_add(dx), y, '─', style);
            fb.put_char(x.saturating_add(dx), bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y.saturating_add(dy), '│', style);
            fb.put_char(right, y.saturating_add(dy), '│', style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x
            .saturating_add(1)
            .saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = start_y
            .saturating_add(1)
            .saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_follows_cell_values() {
        assert_eq!(cell_color(0), None);
        assert_eq!(cell_color(1), Some(Rgb::new(255, 0, 0)));
        assert_eq!(cell_color(7), Some(Rgb::new(0, 255, 255)));
        assert_eq!(cell_color(8), None);
    }

    #[test]
    fn oversized_cells_do_not_overflow() {
        let view = GameView::new(u16::MAX, u16::MAX);
        assert_eq!(view.frame_size(), (u16::MAX, u16::MAX));

        let frame = crate::core::Game::with_source(
            &crate::core::GameConfig::default(),
            crate::core::Sequence::from_indices(&[0]),
        )
        .frame();
        let fb = view.render(&frame, Viewport::new(8, 4));
        assert_eq!((fb.width(), fb.height()), (8, 4));
    }

    #[test]
    fn painted_rect_covers_board_and_hint() {
        let view = GameView::default();
        assert_eq!(
            view.painted_rect(Viewport::new(40, 30)),
            Rect::new(9, 4, 31, 23)
        );
        // Clipped to small viewports.
        assert_eq!(
            view.painted_rect(Viewport::new(20, 10)),
            Rect::new(0, 0, 20, 10)
        );
    }

    #[test]
    fn frame_size_includes_border() {
        assert_eq!(GameView::default().frame_size(), (22, 22));
        assert_eq!(GameView::new(1, 1).frame_size(), (12, 22));
    }
}
