//! Engine configuration
//!
//! Everything here is a tuning knob; the grid size and preview length are fixed
//! constants in the types crate.

use std::str::FromStr;

use tracing::warn;

use crate::types::{
    BASE_GRAVITY_MS, HARD_DROP_DEBOUNCE_MS, MOVE_DEBOUNCE_MS, ROTATE_DEBOUNCE_MS,
    SOFT_DROP_DEBOUNCE_MS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the bag randomizer; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Gravity interval at level 0
    pub gravity_interval_ms: u32,
    pub rotate_debounce_ms: u32,
    pub move_debounce_ms: u32,
    pub soft_drop_debounce_ms: u32,
    pub hard_drop_debounce_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            gravity_interval_ms: BASE_GRAVITY_MS,
            rotate_debounce_ms: ROTATE_DEBOUNCE_MS,
            move_debounce_ms: MOVE_DEBOUNCE_MS,
            soft_drop_debounce_ms: SOFT_DROP_DEBOUNCE_MS,
            hard_drop_debounce_ms: HARD_DROP_DEBOUNCE_MS,
        }
    }
}

impl EngineConfig {
    /// Deterministic config with default timings
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Create from environment variables
    ///
    /// - `TETRIS_SEED`
    /// - `TETRIS_GRAVITY_MS`
    /// - `TETRIS_ROTATE_DEBOUNCE_MS`
    /// - `TETRIS_MOVE_DEBOUNCE_MS`
    /// - `TETRIS_SOFT_DROP_DEBOUNCE_MS`
    /// - `TETRIS_HARD_DROP_DEBOUNCE_MS`
    ///
    /// Unset variables keep their defaults; unparsable ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = parse_var(&lookup, "TETRIS_SEED").or(defaults.seed);
        let gravity_interval_ms = parse_var(&lookup, "TETRIS_GRAVITY_MS")
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.gravity_interval_ms);
        let rotate_debounce_ms =
            parse_var(&lookup, "TETRIS_ROTATE_DEBOUNCE_MS").unwrap_or(defaults.rotate_debounce_ms);
        let move_debounce_ms =
            parse_var(&lookup, "TETRIS_MOVE_DEBOUNCE_MS").unwrap_or(defaults.move_debounce_ms);
        let soft_drop_debounce_ms = parse_var(&lookup, "TETRIS_SOFT_DROP_DEBOUNCE_MS")
            .unwrap_or(defaults.soft_drop_debounce_ms);
        let hard_drop_debounce_ms = parse_var(&lookup, "TETRIS_HARD_DROP_DEBOUNCE_MS")
            .unwrap_or(defaults.hard_drop_debounce_ms);

        Self {
            seed,
            gravity_interval_ms,
            rotate_debounce_ms,
            move_debounce_ms,
            soft_drop_debounce_ms,
            hard_drop_debounce_ms,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = raw, "ignoring unparsable config value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EngineConfig::from_lookup(|_| None);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.gravity_interval_ms, 300);
        assert_eq!(config.rotate_debounce_ms, 95);
        assert_eq!(config.move_debounce_ms, 95);
        assert_eq!(config.soft_drop_debounce_ms, 50);
        assert_eq!(config.hard_drop_debounce_ms, 300);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("TETRIS_SEED", "42"),
            ("TETRIS_GRAVITY_MS", " 500 "),
            ("TETRIS_MOVE_DEBOUNCE_MS", "0"),
            ("TETRIS_HARD_DROP_DEBOUNCE_MS", "120"),
        ]));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.gravity_interval_ms, 500);
        assert_eq!(config.move_debounce_ms, 0);
        assert_eq!(config.rotate_debounce_ms, 95);
        assert_eq!(config.hard_drop_debounce_ms, 120);
        assert_eq!(config.soft_drop_debounce_ms, 50);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("TETRIS_SEED", "not-a-number"),
            ("TETRIS_GRAVITY_MS", "0"),
        ]));
        assert_eq!(config.seed, None);
        assert_eq!(config.gravity_interval_ms, 300);
    }
}
