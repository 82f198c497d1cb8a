//! Engine tunables.
//!
//! [`EngineConfig`] deserializes from JSON with every field optional, so a
//! config file only needs the values it changes:
//!
//! ```
//! use blockfall_engine::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{ "cols": 12 }"#).unwrap();
//! assert_eq!(config.cols, 12);
//! assert_eq!(config.rows, 20);
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::InvalidConfigError;

/// Shortest board the tallest piece (the upright long bar) fits on.
pub const MIN_BOARD_ROWS: usize = 4;
/// Narrowest board every shape can spawn on at `cols / 2`.
pub const MIN_BOARD_COLS: usize = 5;
pub const MAX_BOARD_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    /// Fall interval at level 0, in milliseconds.
    pub base_interval_ms: u64,
    /// How much faster each level falls, in milliseconds.
    pub level_step_ms: u64,
    /// Fall interval while soft drop is held, in milliseconds.
    pub soft_drop_interval_ms: u64,
    /// Whether [`GameSession::render_board`](crate::GameSession::render_board)
    /// draws the landing preview.
    pub show_ghost: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 10,
            base_interval_ms: 1000,
            level_step_ms: 100,
            soft_drop_interval_ms: 100,
            show_ghost: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        let Self { rows, cols, .. } = *self;
        if rows < MIN_BOARD_ROWS || cols < MIN_BOARD_COLS {
            return Err(InvalidConfigError::BoardTooSmall {
                rows,
                cols,
                min_rows: MIN_BOARD_ROWS,
                min_cols: MIN_BOARD_COLS,
            });
        }
        if rows > MAX_BOARD_SIZE || cols > MAX_BOARD_SIZE {
            return Err(InvalidConfigError::BoardTooLarge {
                rows,
                cols,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.base_interval_ms == 0 {
            return Err(InvalidConfigError::ZeroInterval {
                name: "base_interval_ms",
            });
        }
        if self.soft_drop_interval_ms == 0 {
            return Err(InvalidConfigError::ZeroInterval {
                name: "soft_drop_interval_ms",
            });
        }
        Ok(())
    }

    /// Returns `max(0, base_interval - level * level_step)`.
    ///
    /// The result reaches zero at high levels; timers should clamp it to
    /// something they can schedule.
    #[must_use]
    pub fn fall_interval(&self, level: usize) -> Duration {
        let level = u64::try_from(level).unwrap_or(u64::MAX);
        let step = level.saturating_mul(self.level_step_ms);
        Duration::from_millis(self.base_interval_ms.saturating_sub(step))
    }

    #[must_use]
    pub fn soft_drop_interval(&self) -> Duration {
        Duration::from_millis(self.soft_drop_interval_ms)
    }
}

/// Argument of [`GameSession::set_interval`](crate::GameSession::set_interval).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickConfig {
    pub interval_ms: u64,
}
