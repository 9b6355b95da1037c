//! Headless script runner (default binary).
//!
//! Reads script lines from stdin and writes one JSON observation per applied line to
//! stdout. Malformed lines produce a JSON error line and are otherwise skipped.
//!
//! Environment:
//! - `TETRIS_LOG`: log level for stderr output (default `info`)
//! - `TETRIS_SEED`, `TETRIS_GRAVITY_MS`, `TETRIS_ROTATE_DEBOUNCE_MS`,
//!   `TETRIS_MOVE_DEBOUNCE_MS`, `TETRIS_SOFT_DROP_DEBOUNCE_MS`,
//!   `TETRIS_HARD_DROP_DEBOUNCE_MS`: engine configuration

use std::io::{self, BufRead, BufWriter, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use srs_tetris::adapter::{create_error, ScriptRunner};
use srs_tetris::core::{EngineConfig, GameSession};

fn main() -> Result<()> {
    init_logging();

    let config = EngineConfig::from_env();
    info!(?config, "starting session");
    let mut runner = ScriptRunner::new(GameSession::new(config));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("failed to read script line")?;
        match runner.apply_line(&line) {
            Ok(Some(obs)) => serde_json::to_writer(&mut out, &obs)?,
            Ok(None) => continue,
            Err(e) => serde_json::to_writer(&mut out, &create_error(index as u64 + 1, &e))?,
        }
        out.write_all(b"\n")?;
    }
    out.flush()?;

    let session = runner.session();
    info!(
        score = session.score(),
        lines = session.lines(),
        pieces = session.pieces_locked(),
        game_over = session.game_over(),
        "script finished"
    );
    Ok(())
}

fn init_logging() {
    let level = std::env::var("TETRIS_LOG")
        .ok()
        .and_then(|raw| Level::from_str(raw.trim()).ok())
        .unwrap_or(Level::INFO);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}
