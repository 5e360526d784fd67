//! Score, level and fall-speed progression
//!
//! The experience needed to pass level `n` is `base × n`, where `base`
//! shrinks by the decay factor on every level-up. Level-ups are
//! edge-triggered: the latch is armed when the score drops back below the
//! current requirement.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub score: u32,
    pub level: u32,
    /// Base fall speed for new bodies (pixels per tick)
    pub fall_speed: f32,
    /// Experience per level, already decayed for every level gained
    pub level_up_base: f32,
    /// Set when a level-up fired; cleared once score is below the requirement
    pub has_leveled_up: bool,
}

/// Progress-bar numbers derived from a `ProgressionState`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Cumulative score needed to leave the current level
    pub total_needed: f32,
    /// Score earned since entering the current level (may be negative after a miss)
    pub points_into_level: f32,
    /// `points_into_level / level_up_base`, unclamped
    pub fraction: f32,
}

impl LevelProgress {
    /// Whole-number percentage for the label (floored)
    pub fn percent(&self) -> i32 {
        (self.fraction * 100.0).floor() as i32
    }

    /// Fraction clamped for drawing the filled bar
    pub fn fill(&self) -> f32 {
        self.fraction.clamp(0.0, 1.0)
    }
}

impl ProgressionState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            level: 1,
            fall_speed: config.initial_fall_speed,
            level_up_base: config.level_up_base,
            has_leveled_up: false,
        }
    }

    /// Back to the starting configuration (restart)
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Subtract points, never below zero
    pub fn penalize(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Cumulative score that triggers the next level-up
    pub fn needed(&self) -> f32 {
        self.level_up_base * self.level as f32
    }

    /// Run the edge-triggered level-up check. Returns the new level if one fired.
    pub fn check_level_up(&mut self, config: &GameConfig) -> Option<u32> {
        let reached = self.score as f32 >= self.needed();
        if reached && !self.has_leveled_up {
            self.level += 1;
            self.fall_speed += config.fall_speed_increment;
            self.level_up_base *= config.level_up_decay;
            self.has_leveled_up = true;
            Some(self.level)
        } else {
            if !reached && self.has_leveled_up {
                self.has_leveled_up = false;
            }
            None
        }
    }

    /// Progress toward the next level
    pub fn progress(&self) -> LevelProgress {
        let total_needed = self.needed();
        let points_into_level = self.score as f32 - (total_needed - self.level_up_base);
        LevelProgress {
            total_needed,
            points_into_level,
            fraction: points_into_level / self.level_up_base,
        }
    }
}
