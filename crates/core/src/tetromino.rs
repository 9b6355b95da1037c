//! Tetromino module - the falling piece and its rotation/movement state machine
//!
//! A piece is a [`PieceKind`] tag plus four absolute cells. Every operation that needs
//! collision answers borrows the [`Playfield`] for the duration of the call; the piece
//! never keeps a reference to it.
//!
//! # Lock rule
//!
//! A piece locks on a down step only when it had support on the previous step as well.
//! Any accepted move or rotation clears the grounded flag, so a piece that keeps moving
//! never locks by gravity alone.
//!
//! # Debounce
//!
//! Rotations and horizontal moves closer together than their debounce window are
//! dropped. Time only passes through [`Tetromino::advance`], so behaviour is fully
//! determined by the elapsed values the caller feeds in.

use tracing::debug;

use crate::board::{GameOver, Playfield};
use crate::pieces::{kicks, rotation_delta, spawn_cells};
use crate::types::{
    Colour, Coord, Orientation, PieceKind, RotateDirection, BOARD_HEIGHT, MOVE_DEBOUNCE_MS,
    ROTATE_DEBOUNCE_MS,
};

/// Input filter: one accepted action per window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    window_ms: u32,
    /// Time since the last accepted action; `None` until the first one
    since_ms: Option<u32>,
}

impl Debounce {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            since_ms: None,
        }
    }

    pub fn ready(&self) -> bool {
        self.since_ms.map_or(true, |since| since >= self.window_ms)
    }

    pub fn accept(&mut self) {
        self.since_ms = Some(0);
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        if let Some(since) = self.since_ms.as_mut() {
            *since = since.saturating_add(elapsed_ms);
        }
    }

    pub fn reset(&mut self) {
        self.since_ms = None;
    }
}

/// What a down-or-lock step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved down one row
    Fell,
    /// Could not fall; grounded, lock armed for the next step
    Grounded,
    /// Committed to the playfield
    Locked,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetromino {
    kind: PieceKind,
    orientation: Orientation,
    cells: [Coord; 4],
    /// Had support after the last down step
    grounded: bool,
    /// Committed to the playfield
    locked: bool,
    /// Accepts rotate/move input (false after a hard drop)
    moveable: bool,
    rotate_debounce: Debounce,
    move_debounce: Debounce,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position with default debounce windows
    pub fn new(kind: PieceKind) -> Self {
        Self::with_debounce(kind, ROTATE_DEBOUNCE_MS, MOVE_DEBOUNCE_MS)
    }

    pub fn with_debounce(kind: PieceKind, rotate_ms: u32, move_ms: u32) -> Self {
        Self {
            kind,
            orientation: Orientation::Spawn,
            cells: spawn_cells(kind),
            grounded: false,
            locked: false,
            moveable: true,
            rotate_debounce: Debounce::new(rotate_ms),
            move_debounce: Debounce::new(move_ms),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn colour(&self) -> Colour {
        self.kind.colour()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Absolute cells on the grid
    pub fn cells(&self) -> [Coord; 4] {
        self.cells
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_moveable(&self) -> bool {
        self.moveable
    }

    /// Let simulated time pass for the debounce filters
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.rotate_debounce.advance(elapsed_ms);
        self.move_debounce.advance(elapsed_ms);
    }

    /// Restore spawn cells, spawn orientation and a fresh input state
    pub fn reset_position(&mut self) {
        self.orientation = Orientation::Spawn;
        self.cells = spawn_cells(self.kind);
        self.grounded = false;
        self.locked = false;
        self.moveable = true;
        self.rotate_debounce.reset();
        self.move_debounce.reset();
    }

    /// Whether any cell rests on the floor or on a locked cell
    pub fn has_support(&self, field: &Playfield) -> bool {
        self.cells.iter().any(|&(x, y)| field.is_occupied(x, y - 1))
    }

    /// Whether the current cells overlap anything
    pub fn collides(&self, field: &Playfield) -> bool {
        !field.fits(&self.cells)
    }

    /// Try to rotate with SRS wall kicks
    ///
    /// Returns the index of the accepted kick candidate (0 means no kick was needed), or
    /// `None` when the rotation was rejected and the piece is unchanged.
    pub fn rotate(&mut self, direction: RotateDirection, field: &Playfield) -> Option<usize> {
        if !self.moveable || !self.rotate_debounce.ready() {
            return None;
        }
        self.rotate_debounce.accept();

        // O piece: nothing moves, but the rotation still re-arms the lock delay.
        if self.kind == PieceKind::O {
            self.grounded = false;
            return Some(0);
        }

        let target = self.orientation.rotate(direction);
        let delta = rotation_delta(self.kind, self.orientation, target);
        let mut rotated = self.cells;
        for (cell, (dx, dy)) in rotated.iter_mut().zip(delta) {
            cell.0 += dx;
            cell.1 += dy;
        }

        let Some(candidates) = kicks(self.kind, self.orientation, direction) else {
            unreachable!("{:?} has no kick table", self.kind);
        };

        for (index, (kx, ky)) in candidates.into_iter().enumerate() {
            let kicked = rotated.map(|(x, y)| (x + kx, y + ky));
            if field.fits(&kicked) {
                self.cells = kicked;
                self.orientation = target;
                self.grounded = false;
                return Some(index);
            }
        }

        None
    }

    /// Try to shift one column; the sign of `dir` picks the side
    ///
    /// Any `dir <= 0`, zero included, shifts left.
    pub fn move_horizontal(&mut self, dir: i8, field: &Playfield) -> bool {
        if !self.moveable || !self.move_debounce.ready() {
            return false;
        }
        self.move_debounce.accept();

        let dx = if dir > 0 { 1 } else { -1 };
        let shifted = self.cells.map(|(x, y)| (x + dx, y));
        if !field.fits(&shifted) {
            return false;
        }

        self.cells = shifted;
        self.grounded = false;
        true
    }

    /// One gravity step: fall a row, arm the lock, or lock
    ///
    /// Locking happens only when the piece is supported now and was already grounded
    /// after the previous step. The grounded flag is recomputed after any fall.
    pub fn tick_down_or_lock(&mut self, field: &mut Playfield) -> Result<Step, GameOver> {
        if self.locked {
            return Ok(Step::Locked);
        }

        let supported = self.has_support(field);
        if supported && self.grounded {
            self.locked = true;
            debug!(kind = ?self.kind, cells = ?self.cells, "piece locked");
            field.commit(&self.cells, self.colour())?;
            return Ok(Step::Locked);
        }

        let step = if supported {
            Step::Grounded
        } else {
            for cell in &mut self.cells {
                cell.1 -= 1;
            }
            Step::Fell
        };

        self.grounded = self.has_support(field);
        Ok(step)
    }

    /// Drop and lock in one call, then refuse further input
    ///
    /// Returns the number of rows fallen. Terminates within `BOARD_HEIGHT + 3` steps: each
    /// step either lowers the piece or arms/triggers the lock.
    pub fn hard_drop(&mut self, field: &mut Playfield) -> Result<u32, GameOver> {
        let mut fallen = 0u32;
        let mut steps = 0u32;

        let result = loop {
            steps += 1;
            debug_assert!(steps <= BOARD_HEIGHT as u32 + 3, "hard drop failed to settle");
            match self.tick_down_or_lock(field) {
                Ok(Step::Locked) => break Ok(fallen),
                Ok(Step::Fell) => fallen += 1,
                Ok(Step::Grounded) => {}
                Err(e) => break Err(e),
            }
        };

        self.moveable = false;
        result
    }

    /// Cells the piece would occupy after falling straight down as far as it can
    pub fn landing_cells(&self, field: &Playfield) -> [Coord; 4] {
        let mut cells = self.cells;
        loop {
            let lower = cells.map(|(x, y)| (x, y - 1));
            if !field.fits(&lower) {
                return cells;
            }
            cells = lower;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tetromino_new() {
        let piece = Tetromino::new(PieceKind::T);

        assert_eq!(piece.kind(), PieceKind::T);
        assert_eq!(piece.orientation(), Orientation::Spawn);
        assert_eq!(piece.cells(), spawn_cells(PieceKind::T));
        assert!(!piece.is_grounded());
        assert!(!piece.is_locked());
        assert!(piece.is_moveable());
    }

    #[test]
    fn test_debounce_window() {
        let mut debounce = Debounce::new(95);
        assert!(debounce.ready());

        debounce.accept();
        assert!(!debounce.ready());
        debounce.advance(94);
        assert!(!debounce.ready());
        debounce.advance(1);
        assert!(debounce.ready());
    }

    #[test]
    fn test_rapid_rotation_is_debounced() {
        let field = Playfield::new();
        let mut piece = Tetromino::new(PieceKind::T);

        assert_eq!(piece.rotate(RotateDirection::Clockwise, &field), Some(0));
        assert_eq!(piece.rotate(RotateDirection::Clockwise, &field), None);
        assert_eq!(piece.orientation(), Orientation::Right);

        piece.advance(ROTATE_DEBOUNCE_MS);
        assert_eq!(piece.rotate(RotateDirection::Clockwise, &field), Some(0));
        assert_eq!(piece.orientation(), Orientation::Reverse);
    }

    #[test]
    fn test_lock_needs_two_supported_steps() {
        let mut field = Playfield::new();
        let mut piece = Tetromino::new(PieceKind::O);

        // Fall until resting on the floor
        while !piece.is_grounded() {
            assert_eq!(piece.tick_down_or_lock(&mut field), Ok(Step::Fell));
        }
        assert_eq!(piece.cells().iter().map(|c| c.1).min(), Some(0));

        assert_eq!(piece.tick_down_or_lock(&mut field), Ok(Step::Locked));
        assert!(piece.is_locked());
        assert_eq!(field.get(4, 0), Some(Some(Colour::Yellow)));
    }

    #[test]
    fn test_move_rearms_lock() {
        let mut field = Playfield::new();
        let mut piece = Tetromino::new(PieceKind::O);
        while !piece.is_grounded() {
            piece.tick_down_or_lock(&mut field).unwrap();
        }

        assert!(piece.move_horizontal(-1, &field));
        assert!(!piece.is_grounded());

        // First step after the move only re-arms
        assert_eq!(piece.tick_down_or_lock(&mut field), Ok(Step::Grounded));
        assert!(piece.is_grounded());
        assert_eq!(piece.tick_down_or_lock(&mut field), Ok(Step::Locked));
    }

    #[test]
    fn test_landing_cells_do_not_move_piece() {
        let field = Playfield::new();
        let piece = Tetromino::new(PieceKind::I);
        let landing = piece.landing_cells(&field);
        assert_eq!(landing, [(3, 0), (4, 0), (5, 0), (6, 0)]);
        assert_eq!(piece.cells(), spawn_cells(PieceKind::I));
    }
}
