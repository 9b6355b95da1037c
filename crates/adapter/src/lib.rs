//! Adapter - drive a game session from a line-oriented script
//!
//! External tools (bots, replay checkers, test harnesses) talk to the engine through
//! plain text. Each input line is one instruction:
//!
//! - a command name: `moveLeft`, `moveRight`, `rotateCw`, `rotateCcw`, `softDrop`,
//!   `hardDrop`, `hold` (case-insensitive)
//! - `tick <ms>`: let simulated time pass
//! - blank lines and lines starting with `#` are ignored
//!
//! Every applied line produces one JSON observation of the whole game state.
//!
//! # Example
//!
//! ```text
//! rotateCw
//! tick 300
//! hardDrop
//! ```
//!
//! ```text
//! {"type":"observation","seq":1,"accepted":true,"playable":true,"game_over":false,"board":{...},...}
//! ```
//!
//! - See [`protocol`] for message structure definitions
//! - See [`runtime`] for the runner that applies lines to a session

pub mod protocol;
pub mod runtime;

pub use srs_tetris_core as core;
pub use srs_tetris_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use runtime::ScriptRunner;
