//! Scoring module - line-clear points and score-based level progression
//!
//! Points for a clear come from a table keyed on how many rows cleared at once,
//! multiplied by the current level. Levels are earned by score: the first
//! threshold is a base constant, and every level-up grows the increment to the
//! next threshold by a fixed factor while dividing the fall interval by the
//! speed factor, never dropping below the minimum interval.

use crate::config::RulesConfig;

/// Points for clearing `rows` rows at once at `level`.
///
/// Zero rows score nothing; more than four (only reachable on hand-built
/// boards) score as four.
pub fn line_clear_score(table: &[u32; 4], rows: usize, level: u32) -> u32 {
    if rows == 0 {
        return 0;
    }
    table[rows.min(4) - 1].saturating_mul(level)
}

/// Fall interval after one level-up.
pub fn next_fall_interval_ms(current_ms: u32, rules: &RulesConfig) -> u32 {
    let next = (current_ms as f64 / rules.speed_factor) as u32;
    next.max(rules.min_fall_ms)
}

/// Level, next threshold and fall interval, advanced together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    level: u32,
    next_level_score: u32,
    fall_interval_ms: u32,
}

impl LevelProgress {
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            level: 1,
            next_level_score: rules.level_score_base,
            fall_interval_ms: rules.initial_fall_ms,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Score at which the next level-up happens.
    pub fn next_level_score(&self) -> u32 {
        self.next_level_score
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Apply every level-up `score` has earned. Returns the number of levels gained.
    pub fn advance(&mut self, score: u32, rules: &RulesConfig) -> u32 {
        let mut gained = 0;
        while score >= self.next_level_score && self.next_level_score < u32::MAX {
            self.level += 1;
            gained += 1;

            let exponent = (self.level - 1).min(i32::MAX as u32) as i32;
            let increment = rules.level_score_base as f64 * rules.level_score_growth.powi(exponent);
            self.next_level_score = self.next_level_score.saturating_add(increment as u32);

            self.fall_interval_ms = next_fall_interval_ms(self.fall_interval_ms, rules);
        }
        gained
    }
}
