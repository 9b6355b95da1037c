//! Game session module - ties the playfield, active piece, hold and preview together
//!
//! The session owns every piece of mutable state. Callers drive it with discrete commands
//! and elapsed-time ticks; nothing happens between calls.

use std::array;

use tracing::{debug, warn};

use crate::board::{GameOver, Grid, Playfield};
use crate::config::EngineConfig;
use crate::rng::BagRandomizer;
use crate::scoring::{calculate_level, gravity_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::tetromino::{Debounce, Step, Tetromino};
use crate::types::{GameAction, LockEvent, PieceKind, RotateDirection, PREVIEW_LEN};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    playfield: Playfield,
    active: Tetromino,
    /// Held piece; restored to its spawn placement when it comes back
    hold: Option<Tetromino>,
    preview: [PieceKind; PREVIEW_LEN],
    bag: BagRandomizer,
    /// Reset once per newly spawned piece, cleared by a hold
    can_hold: bool,
    /// Drop filters outlive individual pieces, so a held key cannot chain drops
    soft_drop_debounce: Debounce,
    hard_drop_debounce: Debounce,
    /// Time since gravity was last applied
    gravity_elapsed_ms: u32,
    score: u32,
    lines: u32,
    level: u32,
    pieces_locked: u32,
    last_event: Option<LockEvent>,
    game_over: bool,
}

impl GameSession {
    /// Create a new session on an empty playfield
    pub fn new(config: EngineConfig) -> Self {
        Self::with_playfield(config, Playfield::new())
    }

    /// Create a deterministic session with default timings
    pub fn seeded(seed: u64) -> Self {
        Self::new(EngineConfig::seeded(seed))
    }

    /// Create a session that starts from an existing playfield
    pub fn with_playfield(config: EngineConfig, playfield: Playfield) -> Self {
        let mut bag = match config.seed {
            Some(seed) => BagRandomizer::seeded(seed),
            None => BagRandomizer::from_entropy(),
        };
        let first = bag.next_piece();
        let preview = array::from_fn(|_| bag.next_piece());
        let active = Tetromino::with_debounce(
            first,
            config.rotate_debounce_ms,
            config.move_debounce_ms,
        );
        let soft_drop_debounce = Debounce::new(config.soft_drop_debounce_ms);
        let hard_drop_debounce = Debounce::new(config.hard_drop_debounce_ms);

        let mut session = Self {
            config,
            playfield,
            active,
            hold: None,
            preview,
            bag,
            can_hold: true,
            soft_drop_debounce,
            hard_drop_debounce,
            gravity_elapsed_ms: 0,
            score: 0,
            lines: 0,
            level: 0,
            pieces_locked: 0,
            last_event: None,
            game_over: false,
        };
        session.check_block_out();
        session
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.playfield.combo()
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold.map(|piece| piece.kind())
    }

    pub fn preview(&self) -> &[PieceKind; PREVIEW_LEN] {
        &self.preview
    }

    pub fn active(&self) -> &Tetromino {
        &self.active
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Copy of the locked cells
    pub fn grid(&self) -> Grid {
        self.playfield.snapshot()
    }

    /// Current gravity interval for the level
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.config.gravity_interval_ms, self.level)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.playfield.snapshot(),
            active: ActiveSnapshot::from(&self.active),
            ghost: self.active.landing_cells(&self.playfield),
            hold: self.hold_piece(),
            preview: self.preview,
            can_hold: self.can_hold,
            game_over: self.game_over,
            score: self.score,
            combo: self.playfield.combo(),
            lines: self.lines,
            level: self.level,
        }
    }

    /// Rotate the active piece; false when rejected or debounced
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        if self.game_over {
            return false;
        }
        self.active.rotate(direction, &self.playfield).is_some()
    }

    /// Shift the active piece one column; the sign of `dir` picks the side
    pub fn move_horizontal(&mut self, dir: i8) -> bool {
        if self.game_over {
            return false;
        }
        self.active.move_horizontal(dir, &self.playfield)
    }

    /// One down-or-lock step on demand; false when over or debounced
    pub fn soft_drop_tick(&mut self) -> bool {
        if self.game_over || !self.soft_drop_debounce.ready() {
            return false;
        }
        self.soft_drop_debounce.accept();
        let step = self.active.tick_down_or_lock(&mut self.playfield);
        self.finish_step(step);
        true
    }

    /// Drop and lock the active piece immediately; false when over or debounced
    pub fn hard_drop(&mut self) -> bool {
        if self.game_over || !self.hard_drop_debounce.ready() {
            return false;
        }
        self.hard_drop_debounce.accept();
        let result = self
            .active
            .hard_drop(&mut self.playfield)
            .map(|_| Step::Locked);
        self.finish_step(result);
        true
    }

    /// Swap the active piece with the hold slot (once per piece)
    pub fn hold(&mut self) -> bool {
        if self.game_over || !self.can_hold {
            return false;
        }

        let current = self.active;
        let next = match self.hold.replace(current) {
            Some(mut held) => {
                held.reset_position();
                held
            }
            None => {
                let kind = self.pop_preview();
                self.new_piece(kind)
            }
        };
        debug!(held = ?current.kind(), active = ?next.kind(), "hold");

        self.spawn(next);
        self.can_hold = false;
        true
    }

    /// Let time pass, then apply gravity if its interval has elapsed
    ///
    /// Returns true when a gravity step was applied.
    pub fn gravity_tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }
        self.active.advance(elapsed_ms);
        self.soft_drop_debounce.advance(elapsed_ms);
        self.hard_drop_debounce.advance(elapsed_ms);
        self.gravity_elapsed_ms = self.gravity_elapsed_ms.saturating_add(elapsed_ms);
        self.advance_gravity()
    }

    /// Apply one gravity step if the level's interval has elapsed since the last one
    pub fn advance_gravity(&mut self) -> bool {
        if self.game_over || self.gravity_elapsed_ms < self.gravity_interval_ms() {
            return false;
        }
        self.gravity_elapsed_ms = 0;
        let step = self.active.tick_down_or_lock(&mut self.playfield);
        self.finish_step(step);
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::SoftDrop => self.soft_drop_tick(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            GameAction::Hold => self.hold(),
        }
    }

    fn finish_step(&mut self, step: Result<Step, GameOver>) {
        match step {
            Ok(Step::Locked) => self.on_locked(false),
            Ok(Step::Fell | Step::Grounded) => {}
            Err(GameOver { cell }) => {
                warn!(?cell, "lock out");
                self.on_locked(true);
            }
        }
    }

    /// Clear lines, score, then bring in the next piece
    fn on_locked(&mut self, locked_out: bool) {
        let kind = self.active.kind();
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let clear = self.playfield.clear_full_rows();
        let lines_cleared = clear.lines() as u32;
        self.score = self.score.saturating_add(clear.score.total);
        self.lines += lines_cleared;
        self.level = calculate_level(self.lines);

        self.last_event = Some(LockEvent {
            kind,
            lines_cleared,
            score_awarded: clear.score.total,
            combo: clear.combo,
            game_over: locked_out,
        });

        if locked_out {
            self.game_over = true;
            return;
        }

        let kind = self.pop_preview();
        let next = self.new_piece(kind);
        self.spawn(next);
        self.can_hold = true;
    }

    /// Take the head of the preview queue and top the queue up from the bag
    fn pop_preview(&mut self) -> PieceKind {
        let next = self.preview[0];
        self.preview.rotate_left(1);
        self.preview[PREVIEW_LEN - 1] = self.bag.next_piece();
        next
    }

    fn new_piece(&self, kind: PieceKind) -> Tetromino {
        Tetromino::with_debounce(
            kind,
            self.config.rotate_debounce_ms,
            self.config.move_debounce_ms,
        )
    }

    fn spawn(&mut self, piece: Tetromino) {
        self.active = piece;
        debug!(kind = ?piece.kind(), "spawned piece");
        self.check_block_out();
    }

    /// A piece spawning into locked cells ends the game
    fn check_block_out(&mut self) {
        if self.active.collides(&self.playfield) {
            warn!(kind = ?self.active.kind(), "block out");
            self.game_over = true;
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
