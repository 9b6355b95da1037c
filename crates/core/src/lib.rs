//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every game rule and all session state. It performs no I/O and
//! reads no clock: time only moves when the caller passes elapsed milliseconds in.
//!
//! - **Deterministic**: same seed and same command sequence produce identical games
//! - **Testable**: each rule can be driven one step at a time
//! - **Portable**: any host (terminal, GUI, headless script runner) can drive it
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 playfield with occupancy queries, commits and line clearing
//! - [`pieces`]: piece layouts, spawn positions and SRS kick tables
//! - [`tetromino`]: the active piece and its rotate/move/lock state machine
//! - [`rng`]: 7-bag random piece generation
//! - [`scoring`]: line scores, combo bonus and level gravity
//! - [`session`]: the game session tying everything together
//! - [`snapshot`]: read-only frame data for renderers
//! - [`config`]: tuning knobs and environment overrides
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every run of 7 pieces holds each kind exactly once
//! - **SRS Rotation**: five kick candidates per rotation, tried in order; O never moves
//! - **Lock**: a piece locks on the second consecutive supported down step; any accepted
//!   move or rotation re-arms it
//! - **Debounce**: rotations and moves within 95 ms of the last accepted one are dropped
//! - **Hold**: store one piece for later use (once per piece)
//! - **Scoring**: `[0, 100, 300, 500, 800]` by lines cleared, plus 50 per combo step
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::GameSession;
//! use srs_tetris_types::GameAction;
//!
//! let mut game = GameSession::seeded(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::gravity_tick`](session::GameSession::gravity_tick) with elapsed
//! time. Gravity starts at 300 ms per row at level 0 and speeds up every 10 lines.

pub mod board;
pub mod config;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod tetromino;

pub use srs_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{GameOver, Grid, LineClear, Playfield};
pub use config::EngineConfig;
pub use pieces::{kicks, layout, spawn_cells};
pub use rng::BagRandomizer;
pub use scoring::{calculate_score, ScoreResult};
pub use session::GameSession;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use tetromino::{Debounce, Step, Tetromino};
