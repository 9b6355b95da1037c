use crate::board::Grid;
use crate::tetromino::Tetromino;
use crate::types::{Colour, Coord, Orientation, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub colour: Colour,
    pub orientation: Orientation,
    pub cells: [Coord; 4],
}

impl From<&Tetromino> for ActiveSnapshot {
    fn from(value: &Tetromino) -> Self {
        Self {
            kind: value.kind(),
            colour: value.colour(),
            orientation: value.orientation(),
            cells: value.cells(),
        }
    }
}

/// Everything a renderer needs for one frame
///
/// The active piece is not merged into `grid`; draw it (and the ghost) on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub active: ActiveSnapshot,
    pub ghost: [Coord; 4],
    pub hold: Option<PieceKind>,
    pub preview: [PieceKind; PREVIEW_LEN],
    pub can_hold: bool,
    pub game_over: bool,
    pub score: u32,
    pub combo: u32,
    pub lines: u32,
    pub level: u32,
}

impl GameSnapshot {
    /// Colour of the held piece, if any
    pub fn hold_colour(&self) -> Option<Colour> {
        self.hold.map(|kind| kind.colour())
    }

    /// Grid with the active piece painted in, clipped to the board
    pub fn composed_grid(&self) -> Grid {
        let mut grid = self.grid;
        for &(x, y) in &self.active.cells {
            if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                grid[y as usize][x as usize] = Some(self.active.colour);
            }
        }
        grid
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}
