//! Pieces module - Tetromino layouts, spawn placement and SRS kick tables
//!
//! All tables use a y-up frame: positive `dy` moves a cell towards the top of the grid.
//! Layouts list the four cells of a piece in a fixed order per kind, so the per-cell
//! difference between two orientation layouts is the displacement that rotation applies
//! to each cell.
//! Reference: https://tetris.wiki/SRS

use crate::types::{Coord, Orientation, PieceKind, RotateDirection, BOARD_HEIGHT, BOARD_WIDTH};

/// Four cell offsets of a piece in one orientation
pub type Layout = [Coord; 4];

/// One layout per orientation, indexed by [`Orientation::index`]
pub type LayoutTable = [Layout; 4];

/// Ordered kick candidates for each clockwise transition `r -> r+1`, indexed by `r`
pub type KickTable = [[Coord; 5]; 4];

/// Number of kick candidates tried per rotation
pub const KICK_CANDIDATES: usize = 5;

const I_LAYOUTS: LayoutTable = [
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(3, 1), (2, 1), (1, 1), (0, 1)],
    [(1, 3), (1, 2), (1, 1), (1, 0)],
];

const J_LAYOUTS: LayoutTable = [
    [(-1, 1), (-1, 0), (0, 0), (1, 0)],
    [(1, 1), (0, 1), (0, 0), (0, -1)],
    [(1, -1), (1, 0), (0, 0), (-1, 0)],
    [(-1, -1), (0, -1), (0, 0), (0, 1)],
];

const L_LAYOUTS: LayoutTable = [
    [(-1, 0), (0, 0), (1, 0), (1, 1)],
    [(0, 1), (0, 0), (0, -1), (1, -1)],
    [(1, 0), (0, 0), (-1, 0), (-1, -1)],
    [(0, -1), (0, 0), (0, 1), (-1, 1)],
];

// A 2x2 square has one effective orientation.
const O_LAYOUTS: LayoutTable = [[(0, 0), (-1, 0), (0, 1), (-1, 1)]; 4];

const S_LAYOUTS: LayoutTable = [
    [(-1, 0), (0, 0), (0, 1), (1, 1)],
    [(0, 1), (0, 0), (1, 0), (1, -1)],
    [(1, 0), (0, 0), (0, -1), (-1, -1)],
    [(0, -1), (0, 0), (-1, 0), (-1, 1)],
];

const T_LAYOUTS: LayoutTable = [
    [(-1, 0), (0, 0), (0, 1), (1, 0)],
    [(0, 1), (0, 0), (1, 0), (0, -1)],
    [(1, 0), (0, 0), (0, -1), (-1, 0)],
    [(0, -1), (0, 0), (-1, 0), (0, 1)],
];

const Z_LAYOUTS: LayoutTable = [
    [(-1, 1), (0, 1), (0, 0), (1, 0)],
    [(1, 1), (1, 0), (0, 0), (0, -1)],
    [(1, -1), (0, -1), (0, 0), (-1, 0)],
    [(-1, -1), (-1, 0), (0, 0), (0, 1)],
];

/// Get the layout table for a piece kind
pub fn layouts(kind: PieceKind) -> &'static LayoutTable {
    match kind {
        PieceKind::I => &I_LAYOUTS,
        PieceKind::J => &J_LAYOUTS,
        PieceKind::L => &L_LAYOUTS,
        PieceKind::O => &O_LAYOUTS,
        PieceKind::S => &S_LAYOUTS,
        PieceKind::T => &T_LAYOUTS,
        PieceKind::Z => &Z_LAYOUTS,
    }
}

/// Get the layout (cell offsets) for a piece kind and orientation
pub fn layout(kind: PieceKind, orientation: Orientation) -> Layout {
    layouts(kind)[orientation.index()]
}

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0 -> 1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1 -> 2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2 -> 3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3 -> 0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // 0 -> 1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1 -> 2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2 -> 3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3 -> 0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Get the clockwise kick table for a piece kind
///
/// Returns `None` for the O piece, which never kicks.
pub fn kick_table(kind: PieceKind) -> Option<&'static KickTable> {
    match kind {
        PieceKind::O => None,
        PieceKind::I => Some(&I_KICKS),
        _ => Some(&JLSTZ_KICKS),
    }
}

/// Kick candidates for rotating out of `from` in `direction`, in the order they are tried
///
/// Counter-clockwise `r -> r-1` reuses the clockwise entry for `r-1 -> r` with both
/// components negated.
pub fn kicks(kind: PieceKind, from: Orientation, direction: RotateDirection) -> Option<[Coord; 5]> {
    let table = kick_table(kind)?;
    let kicks = match direction {
        RotateDirection::Clockwise => table[from.index()],
        RotateDirection::CounterClockwise => {
            table[from.rotate_ccw().index()].map(|(dx, dy)| (-dx, -dy))
        }
    };
    Some(kicks)
}

/// Per-cell displacement applied by a rotation from `from` to `to`
pub fn rotation_delta(kind: PieceKind, from: Orientation, to: Orientation) -> Layout {
    let old = layout(kind, from);
    let new = layout(kind, to);
    let mut delta = [(0, 0); 4];
    for i in 0..4 {
        delta[i] = (new[i].0 - old[i].0, new[i].1 - old[i].1);
    }
    delta
}

/// Translation from the orientation-0 layout to the spawn cells
///
/// Spawn is centered horizontally, with the piece's lowest row on the topmost grid row.
fn spawn_origin(kind: PieceKind) -> Coord {
    let mid = (BOARD_WIDTH / 2) as i8;
    let top = BOARD_HEIGHT as i8 - 1;
    match kind {
        PieceKind::I => (mid - 2, top - 2),
        PieceKind::O => (mid, top),
        _ => (mid - 1, top),
    }
}

/// Absolute spawn cells for a piece kind in the spawn orientation
pub fn spawn_cells(kind: PieceKind) -> [Coord; 4] {
    let (ox, oy) = spawn_origin(kind);
    layout(kind, Orientation::Spawn).map(|(x, y)| (x + ox, y + oy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_cells_match_reference_placement() {
        assert_eq!(spawn_cells(PieceKind::I), [(3, 21), (4, 21), (5, 21), (6, 21)]);
        assert_eq!(spawn_cells(PieceKind::O), [(5, 21), (4, 21), (5, 22), (4, 22)]);
        assert_eq!(spawn_cells(PieceKind::J), [(3, 22), (3, 21), (4, 21), (5, 21)]);
        assert_eq!(spawn_cells(PieceKind::L), [(3, 21), (4, 21), (5, 21), (5, 22)]);
        assert_eq!(spawn_cells(PieceKind::S), [(3, 21), (4, 21), (4, 22), (5, 22)]);
        assert_eq!(spawn_cells(PieceKind::T), [(3, 21), (4, 21), (4, 22), (5, 21)]);
        assert_eq!(spawn_cells(PieceKind::Z), [(3, 22), (4, 22), (4, 21), (5, 21)]);
    }

    #[test]
    fn test_first_kick_is_always_identity() {
        for kind in PieceKind::ALL {
            let Some(table) = kick_table(kind) else {
                continue;
            };
            for row in table {
                assert_eq!(row[0], (0, 0));
            }
        }
    }

    #[test]
    fn test_ccw_kicks_negate_reverse_transition() {
        // 1 -> 0 is the reverse of 0 -> 1
        let ccw = kicks(PieceKind::T, Orientation::Right, RotateDirection::CounterClockwise);
        assert_eq!(ccw, Some([(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]));

        // 0 -> 3 is the reverse of 3 -> 0
        let ccw = kicks(PieceKind::I, Orientation::Spawn, RotateDirection::CounterClockwise);
        assert_eq!(ccw, Some([(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]));
    }

    #[test]
    fn test_o_piece_has_no_kicks() {
        assert!(kick_table(PieceKind::O).is_none());
        assert!(kicks(PieceKind::O, Orientation::Spawn, RotateDirection::Clockwise).is_none());
    }

    #[test]
    fn test_full_turn_deltas_cancel_out() {
        for kind in PieceKind::ALL {
            let mut sum = [(0i8, 0i8); 4];
            let mut from = Orientation::Spawn;
            for _ in 0..4 {
                let to = from.rotate_cw();
                let delta = rotation_delta(kind, from, to);
                for i in 0..4 {
                    sum[i].0 += delta[i].0;
                    sum[i].1 += delta[i].1;
                }
                from = to;
            }
            assert_eq!(sum, [(0, 0); 4], "{:?}", kind);
        }
    }
}
