//! Game configuration
//!
//! Every tunable constant of a run. Fixed once a `GameState` is built;
//! changing difficulty means starting a new state.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Construction-time game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Grid ===
    /// Number of columns (lanes) across the play area
    pub columns: usize,
    /// Edge length of one cell, also the body/outline size
    pub cell_size: f32,
    /// Canvas height in pixels
    pub canvas_height: f32,
    /// Gap between the outline row and the canvas bottom
    pub outline_margin: f32,

    // === Input ===
    /// Pixels moved per discrete left/right step
    pub player_step: f32,

    // === Scoring ===
    /// Points for a hit (and the penalty for a miss)
    pub hit_reward: u32,
    /// Max horizontal offset that still counts as a hit
    pub alignment_tolerance: f32,

    // === Speed ===
    pub initial_fall_speed: f32,
    /// Random ± offset applied to each new body's fall speed
    pub fall_speed_jitter: f32,
    pub fall_speed_increment: f32,

    // === Progression ===
    pub level_up_base: f32,
    pub level_up_decay: f32,

    // === Timing ===
    /// Delay between landing and the next round (ms)
    pub reset_delay_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            cell_size: CELL_SIZE,
            canvas_height: CANVAS_HEIGHT,
            outline_margin: OUTLINE_MARGIN,

            player_step: PLAYER_STEP,

            hit_reward: HIT_REWARD,
            alignment_tolerance: ALIGNMENT_TOLERANCE,

            initial_fall_speed: INITIAL_FALL_SPEED,
            fall_speed_jitter: FALL_SPEED_JITTER,
            fall_speed_increment: FALL_SPEED_INCREMENT,

            level_up_base: LEVEL_UP_BASE,
            level_up_decay: LEVEL_UP_DECAY,

            reset_delay_ms: RESET_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Same as default but with no fall-speed randomness
    pub fn deterministic() -> Self {
        Self {
            fall_speed_jitter: 0.0,
            ..Self::default()
        }
    }

    /// Play-area width (columns × cell size)
    #[inline]
    pub fn canvas_width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Top edge of the outline row
    #[inline]
    pub fn outline_y(&self) -> f32 {
        self.canvas_height - self.cell_size - self.outline_margin
    }

    /// Rightmost legal x for a body
    #[inline]
    pub fn max_x(&self) -> f32 {
        (self.canvas_width() - self.cell_size).max(0.0)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("cell_size", self.cell_size),
            ("canvas_height", self.canvas_height),
            ("outline_margin", self.outline_margin),
            ("player_step", self.player_step),
            ("alignment_tolerance", self.alignment_tolerance),
            ("initial_fall_speed", self.initial_fall_speed),
            ("fall_speed_jitter", self.fall_speed_jitter),
            ("fall_speed_increment", self.fall_speed_increment),
            ("level_up_base", self.level_up_base),
            ("level_up_decay", self.level_up_decay),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::invalid(*field, "must be finite"));
        }
        if !self.reset_delay_ms.is_finite() {
            return Err(ConfigError::invalid("reset_delay_ms", "must be finite"));
        }
        if self.columns == 0 {
            return Err(ConfigError::invalid("columns", "must be at least 1"));
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::invalid("cell_size", "must be positive"));
        }
        if self.outline_margin < 0.0 {
            return Err(ConfigError::invalid("outline_margin", "must not be negative"));
        }
        if !self.canvas_width().is_finite() {
            return Err(ConfigError::invalid(
                "columns",
                "columns × cell_size overflows the play area",
            ));
        }
        if self.outline_y() <= 0.0 {
            return Err(ConfigError::invalid(
                "canvas_height",
                "too short to fit the outline row",
            ));
        }
        if !(self.player_step > 0.0) {
            return Err(ConfigError::invalid("player_step", "must be positive"));
        }
        if !(self.alignment_tolerance > 0.0) {
            return Err(ConfigError::invalid(
                "alignment_tolerance",
                "must be positive",
            ));
        }
        if !(self.initial_fall_speed > 0.0) {
            return Err(ConfigError::invalid("initial_fall_speed", "must be positive"));
        }
        if self.fall_speed_jitter < 0.0 {
            return Err(ConfigError::invalid("fall_speed_jitter", "must not be negative"));
        }
        // Spawn draws from `-jitter..jitter`, whose width must stay finite
        if self.fall_speed_jitter > f32::MAX / 2.0 {
            return Err(ConfigError::invalid("fall_speed_jitter", "too large"));
        }
        if !(self.initial_fall_speed + self.fall_speed_jitter).is_finite() {
            return Err(ConfigError::invalid(
                "initial_fall_speed",
                "too large with the jitter added",
            ));
        }
        if self.fall_speed_increment < 0.0 {
            return Err(ConfigError::invalid(
                "fall_speed_increment",
                "must not be negative",
            ));
        }
        if !(self.level_up_base > 0.0) {
            return Err(ConfigError::invalid("level_up_base", "must be positive"));
        }
        if !(self.level_up_decay > 0.0 && self.level_up_decay <= 1.0) {
            return Err(ConfigError::invalid("level_up_decay", "must be in (0, 1]"));
        }
        if self.reset_delay_ms < 0.0 {
            return Err(ConfigError::invalid("reset_delay_ms", "must not be negative"));
        }
        Ok(())
    }
}
