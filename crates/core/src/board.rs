//! Board module - the playfield grid of locked cells
//!
//! The playfield is a 10x22 grid where each cell is empty or holds the colour of the piece
//! that locked there. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (bottom to top).
//!
//! Every collision question the engine asks goes through [`Playfield::is_occupied`], and
//! [`Playfield::commit`] is the only way a cell is ever written outside of line clears.

use arrayvec::ArrayVec;
use thiserror::Error;
use tracing::{info, warn};

use crate::scoring::{calculate_score, ScoreResult};
use crate::types::{Cell, Colour, Coord, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Immutable copy of the grid, indexed `[y][x]` with row 0 at the bottom
pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// A piece locked with at least one cell above the top row
///
/// Terminal for the session: there is nothing to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("piece locked above the playfield at {cell:?}")]
pub struct GameOver {
    /// First offending cell
    pub cell: Coord,
}

/// Outcome of one line-clear pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Cleared row indices, bottom to top, as they were before the shift
    pub rows: ArrayVec<usize, 4>,
    /// Combo counter after this pass
    pub combo: u32,
    pub score: ScoreResult,
}

impl LineClear {
    pub fn lines(&self) -> usize {
        self.rows.len()
    }
}

/// The playfield - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Playfield {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    /// Consecutive clearing locks
    combo: u32,
}

impl Playfield {
    /// Create a new empty playfield
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            combo: 0,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Current combo counter
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether a piece cell may not occupy (x, y)
    ///
    /// Outside the side walls and below the floor counts as occupied. Above the top row
    /// is open: falling pieces are allowed to poke out of the grid.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 {
            return true;
        }
        match Self::index(x, y) {
            Some(idx) => self.cells[idx].is_some(),
            None => false,
        }
    }

    /// Whether every cell of a placement is free
    pub fn fits(&self, cells: &[Coord]) -> bool {
        cells.iter().all(|&(x, y)| !self.is_occupied(x, y))
    }

    /// Write a locked piece into the grid
    ///
    /// Cells above the top row are not written; if there are any, the lock is fatal and
    /// [`GameOver`] is returned after the in-grid cells have been committed.
    ///
    /// # Panics
    ///
    /// Panics if a cell lies outside the side walls or below the floor, or lands on an
    /// occupied cell. Collision checks upstream make both impossible.
    pub fn commit(&mut self, cells: &[Coord; 4], colour: Colour) -> Result<(), GameOver> {
        let mut above = None;
        for &(x, y) in cells {
            if y >= BOARD_HEIGHT as i8 {
                above.get_or_insert((x, y));
                continue;
            }
            let idx = Self::index(x, y)
                .unwrap_or_else(|| panic!("commit outside the playfield at ({x}, {y})"));
            assert!(
                self.cells[idx].is_none(),
                "commit onto occupied cell at ({x}, {y})"
            );
            self.cells[idx] = Some(colour);
        }

        match above {
            Some(cell) => {
                warn!(?cell, ?colour, "piece locked above the playfield");
                Err(GameOver { cell })
            }
            None => Ok(()),
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows, update the combo counter and score the pass
    ///
    /// Rows above each cleared row drop by one per cleared row beneath them; vacated
    /// rows at the top are emptied. Uses a two-pointer compaction with zero allocation.
    pub fn clear_full_rows(&mut self) -> LineClear {
        let mut rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = 0usize;

        // Scan from bottom to top
        for read_y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(read_y) {
                // A single lock spans at most 4 rows.
                rows.push(read_y);
            } else {
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
                write_y += 1;
            }
        }

        // Empty the rows vacated at the top
        for cell in &mut self.cells[write_y * width..] {
            *cell = None;
        }

        if rows.is_empty() {
            self.combo = 0;
        } else {
            self.combo += 1;
        }

        let score = calculate_score(rows.len(), self.combo);
        if !rows.is_empty() {
            info!(
                lines = rows.len(),
                combo = self.combo,
                points = score.total,
                "cleared lines"
            );
        }

        LineClear {
            rows,
            combo: self.combo,
            score,
        }
    }

    /// Copy of the current cell state
    pub fn snapshot(&self) -> Grid {
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, row) in grid.iter_mut().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            row.copy_from_slice(&self.cells[start..start + BOARD_WIDTH as usize]);
        }
        grid
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill cells directly, bypassing piece commits
    ///
    /// For building fixtures in tests and benchmarks; out-of-bounds cells are ignored.
    #[doc(hidden)]
    pub fn fill(&mut self, cells: &[Coord], colour: Colour) {
        for &(x, y) in cells {
            if let Some(idx) = Self::index(x, y) {
                self.cells[idx] = Some(colour);
            }
        }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(field: &mut Playfield, y: i8) {
        let row: Vec<Coord> = (0..BOARD_WIDTH as i8).map(|x| (x, y)).collect();
        field.fill(&row, Colour::Cyan);
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Playfield::index(0, 0), Some(0));
        assert_eq!(Playfield::index(9, 0), Some(9));
        assert_eq!(Playfield::index(0, 1), Some(10));
        assert_eq!(Playfield::index(9, 21), Some(219));
        assert_eq!(Playfield::index(-1, 0), None);
        assert_eq!(Playfield::index(10, 0), None);
        assert_eq!(Playfield::index(0, 22), None);
    }

    #[test]
    fn test_occupancy_bounds() {
        let field = Playfield::new();
        assert!(field.is_occupied(-1, 5));
        assert!(field.is_occupied(10, 5));
        assert!(field.is_occupied(4, -1));
        assert!(!field.is_occupied(4, 22));
        assert!(!field.is_occupied(4, 40));
        assert!(!field.is_occupied(0, 0));
    }

    #[test]
    fn test_commit_writes_colour() {
        let mut field = Playfield::new();
        let cells = [(0, 0), (1, 0), (2, 0), (3, 0)];
        assert!(field.commit(&cells, Colour::Cyan).is_ok());
        for (x, y) in cells {
            assert_eq!(field.get(x, y), Some(Some(Colour::Cyan)));
            assert!(field.is_occupied(x, y));
        }
    }

    #[test]
    fn test_commit_above_top_is_game_over() {
        let mut field = Playfield::new();
        let cells = [(4, 21), (5, 21), (4, 22), (5, 22)];
        let err = field.commit(&cells, Colour::Yellow).unwrap_err();
        assert_eq!(err.cell, (4, 22));
        // In-grid cells are still written
        assert_eq!(field.get(4, 21), Some(Some(Colour::Yellow)));
    }

    #[test]
    #[should_panic(expected = "commit outside the playfield")]
    fn test_commit_past_side_wall_panics() {
        let mut field = Playfield::new();
        let _ = field.commit(&[(9, 0), (10, 0), (11, 0), (12, 0)], Colour::Cyan);
    }

    #[test]
    fn test_clear_cascades_for_adjacent_rows() {
        let mut field = Playfield::new();
        fill_row(&mut field, 0);
        fill_row(&mut field, 1);
        field.fill(&[(3, 2)], Colour::Red);

        let clear = field.clear_full_rows();
        assert_eq!(clear.lines(), 2);
        assert_eq!(clear.rows.as_slice(), &[0, 1]);
        assert_eq!(field.get(3, 0), Some(Some(Colour::Red)));
        assert_eq!(field.get(3, 2), Some(None));
        assert_eq!(clear.score.total, 300 + 50);
    }

    #[test]
    fn test_combo_resets_on_empty_pass() {
        let mut field = Playfield::new();
        fill_row(&mut field, 0);
        assert_eq!(field.clear_full_rows().combo, 1);
        fill_row(&mut field, 0);
        assert_eq!(field.clear_full_rows().combo, 2);

        let empty = field.clear_full_rows();
        assert_eq!(empty.combo, 0);
        assert_eq!(empty.score.total, 0);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut field = Playfield::new();
        field.fill(&[(2, 3)], Colour::Blue);
        let grid = field.snapshot();
        assert_eq!(grid[3][2], Some(Colour::Blue));

        field.fill(&[(2, 4)], Colour::Blue);
        assert_eq!(grid[4][2], None);
    }
}
