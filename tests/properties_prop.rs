//! Property tests over generated boards, shapes and event streams.

use proptest::prelude::*;
use rx_tetris::core::{
    collides_horizontally, collides_vertically, rotate, spawn_grid, Board, BoardRows, Event,
    RotationAnchor, SignalGraph, SimpleRng,
};
use rx_tetris::types::{InputEvent, Rotation, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

fn shape() -> impl Strategy<Value = ShapeId> {
    (0u8..7).prop_map(|i| ShapeId::ALL[usize::from(i)])
}

fn rotation() -> impl Strategy<Value = Rotation> {
    (0u32..4).prop_map(Rotation::from_count)
}

/// Rows that are each either full or random with at least one hole.
fn board_rows() -> impl Strategy<Value = BoardRows> {
    proptest::array::uniform20(prop_oneof![
        1 => Just([3u8; W]),
        3 => proptest::array::uniform10(0u8..=7).prop_map(|mut row| {
            if row.iter().all(|&c| c > 0) {
                row[0] = 0;
            }
            row
        }),
    ])
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Input(InputEvent::Rotate)),
        Just(Event::Input(InputEvent::SoftDrop)),
        Just(Event::Input(InputEvent::MoveLeft)),
        Just(Event::Input(InputEvent::MoveRight)),
        Just(Event::Gravity),
        Just(Event::Frame),
    ]
}

proptest! {
    #[test]
    fn four_turns_restore_the_spawn_grid(shape in shape()) {
        let mut grid = spawn_grid(shape);
        for _ in 0..4 {
            grid = grid.rotated_cw();
        }
        prop_assert_eq!(grid, spawn_grid(shape));
    }

    #[test]
    fn clearing_keeps_height_and_order(rows in board_rows()) {
        let mut board = Board::from_rows(&rows);
        let survivors: Vec<[u8; W]> = rows
            .iter()
            .copied()
            .filter(|row| row.iter().any(|&c| c == 0))
            .collect();

        let cleared = board.clear_full_rows();
        let after = board.to_rows();

        prop_assert_eq!(after.len(), H);
        prop_assert_eq!(cleared.len(), H - survivors.len());
        for row in &after[..cleared.len()] {
            prop_assert_eq!(row, &[0u8; W]);
        }
        prop_assert_eq!(&after[cleared.len()..], survivors.as_slice());
    }

    #[test]
    fn out_of_bounds_columns_always_collide(
        shape in shape(),
        rotation in rotation(),
        y in 0i8..16,
        x in -6i8..16,
    ) {
        let width = rotate(shape, rotation).width() as i8;
        let board = Board::new();
        if x < 0 || x + width > BOARD_WIDTH as i8 {
            prop_assert!(collides_horizontally(x, y, shape, rotation, &board));
        }
    }

    #[test]
    fn floor_always_collides(
        shape in shape(),
        rotation in rotation(),
        x in 0i8..7,
        y in 0i8..20,
    ) {
        let height = rotate(shape, rotation).height() as i8;
        if y + height >= BOARD_HEIGHT as i8 {
            prop_assert!(collides_vertically(x, y, shape, rotation, &Board::new()));
        }
    }

    #[test]
    fn random_play_never_overlaps_locked_cells(
        seed in any::<u32>(),
        keep in any::<bool>(),
        events in proptest::collection::vec(event(), 1..600),
    ) {
        let anchor = if keep { RotationAnchor::Keep } else { RotationAnchor::Spawn };
        let mut g = SignalGraph::new(SimpleRng::new(seed), anchor);

        for event in events {
            let locks = g.locks();
            let serial = g.active().serial;
            g.dispatch(event);

            prop_assert!(g.board().cells().iter().all(|&c| c <= 7));
            if g.locks() != locks {
                prop_assert_ne!(g.active().serial, serial);
            }
            if g.is_over() {
                prop_assert!(g.board().is_top_row_occupied());
                break;
            }

            let grid = g.piece_grid();
            let (x, y) = (g.x(), g.y());
            prop_assert!(x >= 0 && i16::from(x) + i16::from(grid.width()) <= i16::from(BOARD_WIDTH));
            prop_assert!(y >= 0 && i16::from(y) + i16::from(grid.height()) <= i16::from(BOARD_HEIGHT));
            for (cx, cy, _) in grid.filled() {
                let (bx, by) = (i16::from(x) + i16::from(cx), i16::from(y) + i16::from(cy));
                prop_assert!(!g.board().is_occupied(bx, by), "overlap at ({}, {})", bx, by);
            }
        }
    }
}
