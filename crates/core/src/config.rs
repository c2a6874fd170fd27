//! Rule configuration.
//!
//! Every tunable rule constant lives in [`RulesConfig`]. Defaults reproduce the
//! standard ruleset; a partial JSON document overrides individual fields.

use std::fmt;

use serde::Deserialize;

use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, INITIAL_FALL_MS, LEVEL_SCORE_BASE, LEVEL_SCORE_GROWTH,
    LINE_CLEAR_MS, LINE_SCORES, LOCK_DELAY_MS, MAX_BOARD_DIM, MIN_FALL_MS, SPAWN_X, SPAWN_Y,
    SPEED_FACTOR,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub board_width: u8,
    pub board_height: u8,
    pub spawn_x: i8,
    pub spawn_y: i8,
    /// Points for 1, 2, 3 and 4 simultaneous rows, multiplied by the level.
    pub line_scores: [u32; 4],
    /// Score needed to reach level 2.
    pub level_score_base: u32,
    /// Threshold increment growth per level.
    pub level_score_growth: f64,
    /// Fall interval divisor per level.
    pub speed_factor: f64,
    pub initial_fall_ms: u32,
    pub min_fall_ms: u32,
    pub lock_delay_ms: u32,
    pub line_clear_ms: u32,
    /// Cap on lock-delay resets per piece; `None` lets maneuvers reset forever.
    pub max_lock_resets: Option<u32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            line_scores: LINE_SCORES,
            level_score_base: LEVEL_SCORE_BASE,
            level_score_growth: LEVEL_SCORE_GROWTH,
            speed_factor: SPEED_FACTOR,
            initial_fall_ms: INITIAL_FALL_MS,
            min_fall_ms: MIN_FALL_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            line_clear_ms: LINE_CLEAR_MS,
            max_lock_resets: None,
        }
    }
}

impl RulesConfig {
    /// Check the rules are internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
        ] {
            if value < 4 || value > MAX_BOARD_DIM {
                return Err(ConfigError::BoardSize { name, value });
            }
        }
        if self.spawn_x < 0 || self.spawn_x as i16 + 4 > self.board_width as i16 {
            return Err(ConfigError::SpawnColumn(self.spawn_x));
        }
        if self.spawn_y < -4 || self.spawn_y as i16 + 4 > self.board_height as i16 {
            return Err(ConfigError::SpawnRow(self.spawn_y));
        }
        if self.line_scores.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::LineScores(self.line_scores));
        }
        if self.level_score_base == 0 {
            return Err(ConfigError::LevelScoreBase);
        }
        // NaN fails both comparisons.
        if !(self.level_score_growth >= 1.0) || !self.level_score_growth.is_finite() {
            return Err(ConfigError::Factor {
                name: "level_score_growth",
                value: self.level_score_growth,
            });
        }
        if !(self.speed_factor >= 1.0) || !self.speed_factor.is_finite() {
            return Err(ConfigError::Factor {
                name: "speed_factor",
                value: self.speed_factor,
            });
        }
        if self.min_fall_ms == 0 || self.min_fall_ms > self.initial_fall_ms {
            return Err(ConfigError::FallInterval {
                initial: self.initial_fall_ms,
                min: self.min_fall_ms,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    BoardSize { name: &'static str, value: u8 },
    SpawnColumn(i8),
    SpawnRow(i8),
    LineScores([u32; 4]),
    LevelScoreBase,
    Factor { name: &'static str, value: f64 },
    FallInterval { initial: u32, min: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardSize { name, value } => write!(
                f,
                "{} must be between 4 and {}, got {}",
                name, MAX_BOARD_DIM, value
            ),
            ConfigError::SpawnColumn(x) => {
                write!(f, "spawn_x {} does not leave room for a 4-wide piece box", x)
            }
            ConfigError::SpawnRow(y) => write!(f, "spawn_y {} is outside the board", y),
            ConfigError::LineScores(table) => {
                write!(f, "line_scores must not decrease, got {:?}", table)
            }
            ConfigError::LevelScoreBase => write!(f, "level_score_base must be positive"),
            ConfigError::Factor { name, value } => {
                write!(f, "{} must be a finite number >= 1, got {}", name, value)
            }
            ConfigError::FallInterval { initial, min } => write!(
                f,
                "min_fall_ms ({}) must be positive and not above initial_fall_ms ({})",
                min, initial
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let rules = RulesConfig::default();
        assert_eq!(rules.validate(), Ok(()));
        assert_eq!(rules.line_scores, [10, 30, 60, 100]);
        assert_eq!(rules.max_lock_resets, None);
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let rules: RulesConfig =
            serde_json::from_str(r#"{ "line_scores": [10, 30, 50, 100], "max_lock_resets": 15 }"#)
                .unwrap();
        assert_eq!(rules.line_scores, [10, 30, 50, 100]);
        assert_eq!(rules.max_lock_resets, Some(15));
        assert_eq!(rules.board_width, 10);
        assert_eq!(rules.validate(), Ok(()));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let parsed: Result<RulesConfig, _> = serde_json::from_str(r#"{ "hold_enabled": true }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validation_errors() {
        let bad = RulesConfig {
            board_width: 3,
            ..RulesConfig::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::BoardSize { name: "board_width", .. })));

        let bad = RulesConfig {
            spawn_x: 7,
            ..RulesConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::SpawnColumn(7)));

        let bad = RulesConfig {
            line_scores: [10, 5, 60, 100],
            ..RulesConfig::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::LineScores(_))));

        let bad = RulesConfig {
            speed_factor: 0.9,
            ..RulesConfig::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::Factor { name: "speed_factor", .. })));

        let bad = RulesConfig {
            level_score_growth: f64::NAN,
            ..RulesConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = RulesConfig {
            min_fall_ms: 2000,
            ..RulesConfig::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::FallInterval { .. })));
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = RulesConfig {
            level_score_base: 0,
            ..RulesConfig::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("level_score_base"));
    }
}
