//! Scoring module - line-clear points, combo bonus and level gravity
//!
//! A clearing lock scores its base line points plus `COMBO_BONUS * combo`, where `combo`
//! already counts the current lock. The first clear of a chain therefore earns one bonus
//! step.

use crate::types::{COMBO_BONUS, GRAVITY_CURVE_PERMILLE, LINES_PER_LEVEL, LINE_SCORES};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the number of lines cleared.
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
}

/// Base points for clearing `lines` lines (0 for anything outside 1..=4)
pub fn calculate_line_score(lines: usize) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines]
}

/// Combo bonus for a combo counter value
pub fn calculate_combo_bonus(combo: u32) -> u32 {
    COMBO_BONUS.saturating_mul(combo)
}

/// Calculate the score of one lock
///
/// `combo` is the counter value after it was updated for this lock. A lock that
/// clears nothing scores nothing, whatever the counter says.
pub fn calculate_score(lines: usize, combo: u32) -> ScoreResult {
    if lines == 0 {
        return ScoreResult::default();
    }

    let line_clear_score = calculate_line_score(lines);
    let combo_bonus = calculate_combo_bonus(combo);

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
    }
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, scaled from the level-0 interval
pub fn gravity_interval_ms(base_ms: u32, level: u32) -> u32 {
    let idx = (level as usize).min(GRAVITY_CURVE_PERMILLE.len() - 1);
    let scaled = u64::from(base_ms) * u64::from(GRAVITY_CURVE_PERMILLE[idx]) / 1000;
    (scaled as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0), 0);
        assert_eq!(calculate_line_score(1), 100);
        assert_eq!(calculate_line_score(2), 300);
        assert_eq!(calculate_line_score(3), 500);
        assert_eq!(calculate_line_score(4), 800);
        assert_eq!(calculate_line_score(5), 0);
    }

    #[test]
    fn test_first_clear_of_chain_gets_one_bonus_step() {
        let result = calculate_score(1, 1);
        assert_eq!(result.line_clear_score, 100);
        assert_eq!(result.combo_bonus, 50);
        assert_eq!(result.total, 150);
    }

    #[test]
    fn test_combo_bonus_grows_linearly() {
        assert_eq!(calculate_score(4, 3).total, 800 + 150);
        assert_eq!(calculate_score(2, 2).total, 300 + 100);
    }

    #[test]
    fn test_no_lines_scores_zero() {
        assert_eq!(calculate_score(0, 0), ScoreResult::default());
        assert_eq!(calculate_score(0, 7).total, 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(9), 0);
        assert_eq!(calculate_level(10), 1);
        assert_eq!(calculate_level(29), 2);
    }

    #[test]
    fn test_gravity_intervals() {
        assert_eq!(gravity_interval_ms(300, 0), 300);
        assert_eq!(gravity_interval_ms(300, 1), 240);
        assert_eq!(gravity_interval_ms(1000, 8), 160);
        assert_eq!(gravity_interval_ms(1000, 40), 160); // Floor at the last curve entry
        assert_eq!(gravity_interval_ms(1, 8), 1); // Never below 1ms
    }
}
