//! End-to-end scenarios on the signal graph

use rx_tetris::core::{Board, RotationAnchor, Sequence, SignalGraph};
use rx_tetris::types::{InputEvent, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn graph(shapes: &[u32]) -> SignalGraph<Sequence> {
    SignalGraph::new(Sequence::from_indices(shapes), RotationAnchor::Spawn)
}

/// Shift the current piece by `dx` columns, then let gravity run until it locks.
fn drop_piece(g: &mut SignalGraph<Sequence>, dx: i8) {
    let input = if dx < 0 {
        InputEvent::MoveLeft
    } else {
        InputEvent::MoveRight
    };
    for _ in 0..dx.unsigned_abs() {
        g.input(input);
    }

    let locks = g.locks();
    for _ in 0..=BOARD_HEIGHT {
        g.gravity();
        if g.locks() != locks {
            return;
        }
    }
    panic!("piece never locked");
}

#[test]
fn flat_bar_lands_on_the_floor() {
    let mut g = graph(&[0, 5]);
    assert_eq!((g.x(), g.y(), g.rotation()), (3, 0, Rotation::North));

    // The one-row box rests on the floor at y = 19.
    for _ in 0..18 {
        g.gravity();
    }
    assert_eq!(g.y(), 18);
    assert_eq!(g.locks(), 0);

    g.gravity();
    assert_eq!(g.locks(), 1);

    let row = g.board().row(19);
    assert_eq!(row, &[0, 0, 0, 1, 1, 1, 1, 0, 0, 0]);
    assert_eq!(g.active().serial, 2);
    assert_eq!(g.active().shape.index(), 5);
    assert_eq!((g.x(), g.y()), (3, 0));
}

#[test]
fn completed_row_is_removed_and_rows_above_shift_down() {
    let mut g = graph(&[0, 0, 6, 5]);

    drop_piece(&mut g, -3); // bar over columns 0..=3
    drop_piece(&mut g, 1); // bar over columns 4..=7
    assert_eq!(g.board().row(19), &[1, 1, 1, 1, 1, 1, 1, 1, 0, 0]);

    // The 2x2 block fills columns 8..=9 of rows 18 and 19.
    drop_piece(&mut g, 5);

    let rows = g.board().to_rows();
    assert_eq!(rows.len(), usize::from(BOARD_HEIGHT));
    assert_eq!(rows[19], [0, 0, 0, 0, 0, 0, 0, 0, 7, 7]);
    for row in &rows[..19] {
        assert_eq!(row, &[0; BOARD_WIDTH as usize]);
    }
    assert_eq!(g.locks(), 3);
    assert!(!g.is_over());
}

#[test]
fn rotating_against_the_walls_stays_on_the_board() {
    for anchor in [RotationAnchor::Spawn, RotationAnchor::Keep] {
        for shape in 0..7 {
            let mut g = SignalGraph::new(Sequence::from_indices(&[shape]), anchor);

            for wall in [InputEvent::MoveLeft, InputEvent::MoveRight] {
                for _ in 0..BOARD_WIDTH {
                    g.input(wall);
                }
                for _ in 0..4 {
                    g.input(InputEvent::Rotate);
                    let width = g.piece_grid().width() as i8;
                    assert!(g.x() >= 0, "{:?} shape {} x={}", anchor, shape, g.x());
                    assert!(
                        g.x() + width <= BOARD_WIDTH as i8,
                        "{:?} shape {} x={} width={}",
                        anchor,
                        shape,
                        g.x(),
                        width
                    );
                }
            }
            assert_eq!(g.locks(), 0);
        }
    }
}

#[test]
fn left_wall_rotation_keeps_column_zero() {
    let mut g = SignalGraph::new(Sequence::from_indices(&[1]), RotationAnchor::Keep);
    for _ in 0..5 {
        g.input(InputEvent::MoveLeft);
    }
    assert_eq!(g.x(), 0);
    g.input(InputEvent::Rotate);
    assert_eq!(g.rotation(), Rotation::East);
    assert_eq!(g.x(), 0);
}

#[test]
fn game_over_freezes_the_board() {
    // 2x2 blocks stacked in columns 3..=4 reach the top after ten locks.
    let mut g = graph(&[6]);
    for _ in 0..400 {
        if g.is_over() {
            break;
        }
        g.gravity();
    }
    assert!(g.is_over());
    assert_eq!(g.locks(), 10);
    assert!(g.board().is_top_row_occupied());

    let frozen: Board = *g.board();
    let stamp = g.stamp();
    for _ in 0..10 {
        g.gravity();
        g.frame();
        g.input(InputEvent::MoveLeft);
    }
    assert_eq!(g.board(), &frozen);
    assert_eq!(g.locks(), 10);
    assert_eq!(g.stamp(), stamp);
}
