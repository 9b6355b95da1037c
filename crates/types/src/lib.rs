//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, headless hosts, renderers).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, bottom to top), the top 2 of which are hidden
//!
//! Pieces spawn straddling the top edge, so a falling piece may have cells with
//! `y >= BOARD_HEIGHT`. Those cells are legal while falling and fatal when locked.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_GRAVITY_MS` | 300 | Gravity interval at level 0 |
//! | `ROTATE_DEBOUNCE_MS` | 95 | Minimum gap between accepted rotations |
//! | `MOVE_DEBOUNCE_MS` | 95 | Minimum gap between accepted horizontal moves |
//! | `SOFT_DROP_DEBOUNCE_MS` | 50 | Minimum gap between accepted soft drops |
//! | `HARD_DROP_DEBOUNCE_MS` | 300 | Minimum gap between accepted hard drops |
//!
//! # Examples
//!
//! ```
//! use srs_tetris_types::{Colour, GameAction, Orientation, PieceKind, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.colour(), Colour::Pink);
//!
//! assert_eq!(Orientation::Spawn.rotate_cw(), Orientation::Right);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells, hidden rows included (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Rows shown to the player; the remaining rows above are the spawn buffer
pub const VISIBLE_HEIGHT: u8 = 20;

/// Number of upcoming pieces kept in the preview queue
pub const PREVIEW_LEN: usize = 4;

/// Gravity interval at level 0 (one row every 300ms)
pub const BASE_GRAVITY_MS: u32 = 300;

/// Rotations closer together than this are treated as one key press
pub const ROTATE_DEBOUNCE_MS: u32 = 95;

/// Horizontal moves closer together than this are treated as one key press
pub const MOVE_DEBOUNCE_MS: u32 = 95;

/// Minimum gap between accepted soft drops
pub const SOFT_DROP_DEBOUNCE_MS: u32 = 50;

/// Minimum gap between accepted hard drops
pub const HARD_DROP_DEBOUNCE_MS: u32 = 300;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity curve in per-mille of the base interval, indexed by level (8+ uses the last entry)
pub const GRAVITY_CURVE_PERMILLE: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Base points for clearing N lines in one lock (index 0 unused)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Bonus per step of the combo counter
pub const COMBO_BONUS: u32 = 50;

/// Grid coordinate `(x, y)`, y-up
pub type Coord = (i8, i8);

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in the order a fresh (unshuffled) bag holds them
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Standard colour of this kind
    pub fn colour(&self) -> Colour {
        match self {
            PieceKind::I => Colour::Cyan,
            PieceKind::J => Colour::Blue,
            PieceKind::L => Colour::Orange,
            PieceKind::O => Colour::Yellow,
            PieceKind::S => Colour::Green,
            PieceKind::T => Colour::Pink,
            PieceKind::Z => Colour::Red,
        }
    }
}

/// Colour of a locked cell
///
/// Each colour belongs to exactly one [`PieceKind`]; the grid stores colours only,
/// never piece identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Pink,
    Red,
}

impl Colour {
    /// The piece kind this colour is reserved for
    pub fn kind(&self) -> PieceKind {
        match self {
            Colour::Cyan => PieceKind::I,
            Colour::Blue => PieceKind::J,
            Colour::Orange => PieceKind::L,
            Colour::Yellow => PieceKind::O,
            Colour::Green => PieceKind::S,
            Colour::Pink => PieceKind::T,
            Colour::Red => PieceKind::Z,
        }
    }

    /// Compact non-zero code (1..=7); 0 is reserved for an empty cell
    pub fn code(&self) -> u8 {
        match self {
            Colour::Cyan => 1,
            Colour::Blue => 2,
            Colour::Orange => 3,
            Colour::Yellow => 4,
            Colour::Green => 5,
            Colour::Pink => 6,
            Colour::Red => 7,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Colour)`: Locked cell of the given colour
pub type Cell = Option<Colour>;

/// Encode a cell as 0 (empty) or its colour code
pub fn cell_code(cell: Cell) -> u8 {
    cell.map_or(0, |c| c.code())
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **Spawn** (0): Spawn orientation
/// - **Right** (1): Rotated 90° clockwise
/// - **Reverse** (2): Rotated 180°
/// - **Left** (3): Rotated 90° counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Spawn,
    Right,
    Reverse,
    Left,
}

impl Orientation {
    /// Table index 0..=3
    pub fn index(&self) -> usize {
        match self {
            Orientation::Spawn => 0,
            Orientation::Right => 1,
            Orientation::Reverse => 2,
            Orientation::Left => 3,
        }
    }

    /// Orientation for an index, taken modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Orientation::Spawn,
            1 => Orientation::Right,
            2 => Orientation::Reverse,
            _ => Orientation::Left,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use srs_tetris_types::Orientation;
    ///
    /// assert_eq!(Orientation::Spawn.rotate_cw(), Orientation::Right);
    /// assert_eq!(Orientation::Left.rotate_cw(), Orientation::Spawn);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use srs_tetris_types::Orientation;
    ///
    /// assert_eq!(Orientation::Spawn.rotate_ccw(), Orientation::Left);
    /// assert_eq!(Orientation::Right.rotate_ccw(), Orientation::Spawn);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotate_ccw(),
        }
    }
}

/// Direction of a rotation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Discrete commands a caller can apply to a session
///
/// Gravity is not an action: it is driven by elapsed time passed to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// One down-or-lock step
    SoftDrop,
    /// Drop and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (if available)
    Hold,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECCW"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
        }
    }
}

/// Event emitted after a piece locks
///
/// Retained by the session until the caller takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_awarded: u32,
    /// Combo counter after this lock
    pub combo: u32,
    /// The lock ended the game
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_and_kind_are_bijective() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.colour().kind(), kind);
        }
        let mut codes: Vec<u8> = PieceKind::ALL.iter().map(|k| k.colour().code()).collect();
        codes.sort_unstable();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn orientation_wraps_modulo_four() {
        assert_eq!(Orientation::from_index(4), Orientation::Spawn);
        assert_eq!(Orientation::from_index(7), Orientation::Left);

        let mut o = Orientation::Spawn;
        for _ in 0..4 {
            o = o.rotate(RotateDirection::CounterClockwise);
        }
        assert_eq!(o, Orientation::Spawn);
    }

    #[test]
    fn action_names_round_trip() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::Hold,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn empty_cell_encodes_as_zero() {
        assert_eq!(cell_code(None), 0);
        assert_eq!(cell_code(Some(Colour::Red)), 7);
    }
}
