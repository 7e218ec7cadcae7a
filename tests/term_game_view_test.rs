use rx_tetris::core::{Frame, Game, GameConfig, RenderTarget, Sequence};
use rx_tetris::term::{GameView, Rgb, Viewport, PALETTE};
use rx_tetris::types::InputEvent;

fn first_frame(shapes: &[u32]) -> Frame {
    let mut game = Game::with_source(&GameConfig::default(), Sequence::from_indices(shapes));
    let mut frames: Vec<Frame> = Vec::new();
    game.advance(17, &mut frames).unwrap();
    frames.remove(0)
}

#[test]
fn term_view_renders_border_corners() {
    let frame = first_frame(&[0]);
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&frame, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_falling_piece_two_chars_wide() {
    // Flat bar at x=3, y=0 covers board columns 3..=6.
    let frame = first_frame(&[0]);
    let fb = GameView::default().render(&frame, Viewport::new(22, 22));

    let y0 = 1;
    for col in 3..7u16 {
        let x0 = 1 + col * 2;
        let cell = fb.get(x0, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, PALETTE[0]);
        assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    }
    assert_eq!(fb.get(1 + 2 * 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_colors_locked_cells_by_value() {
    let mut frame = first_frame(&[0]);
    frame.board[19][0] = 4;
    frame.piece = None;

    let fb = GameView::default().render(&frame, Viewport::new(22, 22));
    let cell = fb.get(1, 20).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!(cell.style.fg, Rgb::new(255, 255, 0));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut frame = first_frame(&[0]);
    frame.game_over = true;
    frame.piece = None;

    let fb = GameView::default().render(&frame, Viewport::new(40, 30));
    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.iter().any(|row| row.contains("GAME OVER")));
}

#[test]
fn term_view_render_is_idempotent() {
    let mut game = Game::with_source(&GameConfig::default(), Sequence::from_indices(&[3]));
    game.input(InputEvent::MoveLeft);
    let frame = game.frame();

    let view = GameView::default();
    let a = view.render(&frame, Viewport::new(30, 24));
    let b = view.render(&frame, Viewport::new(30, 24));
    assert_eq!(a, b);
}

#[test]
fn collected_frames_are_numbered() {
    let mut game = Game::with_source(&GameConfig::default(), Sequence::from_indices(&[3]));
    let mut frames: Vec<Frame> = Vec::new();
    game.advance(17 * 4, &mut frames).unwrap();
    RenderTarget::present(&mut frames, &game.frame()).unwrap();

    let numbers: Vec<u64> = frames.iter().map(|f| f.frame_no).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 4]);
}
