//! SRS Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as `srs_tetris::{core,adapter,types}`.

pub use srs_tetris_adapter as adapter;
pub use srs_tetris_core as core;
pub use srs_tetris_types as types;
