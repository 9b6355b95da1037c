//! Pieces tests - layouts, spawn placement and SRS kick tables

use std::collections::HashSet;

use srs_tetris::core::pieces::{kick_table, kicks, layout, layouts, rotation_delta, spawn_cells};
use srs_tetris::types::{Orientation, PieceKind, RotateDirection, BOARD_HEIGHT, BOARD_WIDTH};

const ORIENTATIONS: [Orientation; 4] = [
    Orientation::Spawn,
    Orientation::Right,
    Orientation::Reverse,
    Orientation::Left,
];

#[test]
fn test_every_layout_has_four_distinct_cells() {
    for kind in PieceKind::ALL {
        for o in ORIENTATIONS {
            let cells: HashSet<_> = layout(kind, o).into_iter().collect();
            assert_eq!(cells.len(), 4, "{:?} {:?}", kind, o);
        }
    }
}

#[test]
fn test_o_piece_layout_never_changes() {
    let table = layouts(PieceKind::O);
    for o in ORIENTATIONS {
        assert_eq!(table[o.index()], table[0]);
    }
}

#[test]
fn test_i_piece_layouts() {
    assert_eq!(
        layout(PieceKind::I, Orientation::Spawn),
        [(0, 2), (1, 2), (2, 2), (3, 2)]
    );
    assert_eq!(
        layout(PieceKind::I, Orientation::Right),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
}

#[test]
fn test_spawn_cells_are_centered_at_the_top() {
    for kind in PieceKind::ALL {
        let cells = spawn_cells(kind);
        let min_y = cells.iter().map(|c| c.1).min().unwrap();
        assert_eq!(min_y, BOARD_HEIGHT as i8 - 1, "{:?}", kind);
        for (x, _) in cells {
            assert!((3..=6).contains(&x), "{:?} spawns at column {}", kind, x);
            assert!(x < BOARD_WIDTH as i8);
        }
    }
}

#[test]
fn test_jlstz_kicks_zero_to_right() {
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
        assert_eq!(
            kicks(kind, Orientation::Spawn, RotateDirection::Clockwise),
            Some([(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)])
        );
    }
}

#[test]
fn test_jlstz_kicks_left_to_zero() {
    assert_eq!(
        kicks(PieceKind::T, Orientation::Left, RotateDirection::Clockwise),
        Some([(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)])
    );
}

#[test]
fn test_i_kicks_zero_to_right() {
    assert_eq!(
        kicks(PieceKind::I, Orientation::Spawn, RotateDirection::Clockwise),
        Some([(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)])
    );
}

#[test]
fn test_ccw_kicks_mirror_cw_for_every_transition() {
    for kind in [PieceKind::I, PieceKind::T] {
        for from in ORIENTATIONS {
            let cw = kicks(kind, from, RotateDirection::Clockwise).unwrap();
            let back = kicks(kind, from.rotate_cw(), RotateDirection::CounterClockwise).unwrap();
            for (a, b) in cw.iter().zip(back.iter()) {
                assert_eq!((a.0, a.1), (-b.0, -b.1));
            }
        }
    }
}

#[test]
fn test_every_kick_table_has_identity_first() {
    for kind in PieceKind::ALL {
        if let Some(table) = kick_table(kind) {
            assert!(table.iter().all(|row| row[0] == (0, 0)));
        }
    }
}

#[test]
fn test_cw_and_ccw_deltas_cancel() {
    for kind in PieceKind::ALL {
        for from in ORIENTATIONS {
            let there = rotation_delta(kind, from, from.rotate_cw());
            let back = rotation_delta(kind, from.rotate_cw(), from);
            for (a, b) in there.iter().zip(back.iter()) {
                assert_eq!((a.0 + b.0, a.1 + b.1), (0, 0));
            }
        }
    }
}
