//! The falling block
//!
//! A square that drops at a constant per-tick speed. The player only ever
//! changes its x; gravity only ever changes its y.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::MIN_FALL_SPEED;

/// A falling body entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingBody {
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length (one grid cell)
    pub size: f32,
    /// Pixels per tick
    pub fall_speed: f32,
    /// Level at spawn time (label and colour only)
    pub level: u32,
    /// Rightmost legal x
    max_x: f32,
}

impl FallingBody {
    /// Create a body above the canvas at the given x
    pub fn new(x: f32, size: f32, fall_speed: f32, level: u32, canvas_width: f32) -> Self {
        let max_x = (canvas_width - size).max(0.0);
        Self {
            pos: Vec2::new(x.clamp(0.0, max_x), -size),
            size,
            fall_speed: fall_speed.max(MIN_FALL_SPEED),
            level,
            max_x,
        }
    }

    /// Spawn a body at a random x with a jittered fall speed
    pub fn spawn<R: Rng + ?Sized>(
        config: &GameConfig,
        base_fall_speed: f32,
        level: u32,
        rng: &mut R,
    ) -> Self {
        let max_x = config.max_x();
        let x = if max_x > 0.0 {
            rng.random_range(0.0..max_x)
        } else {
            0.0
        };
        let jitter = config.fall_speed_jitter;
        let offset = if jitter > 0.0 {
            rng.random_range(-jitter..jitter)
        } else {
            0.0
        };
        Self::new(
            x,
            config.cell_size,
            base_fall_speed + offset,
            level,
            config.canvas_width(),
        )
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Lower edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    /// Fall one tick. No bounds check; landing is the caller's call.
    pub fn advance(&mut self) {
        self.pos.y += self.fall_speed;
    }

    /// Place the left edge at `target_x`, clamped to the play area
    pub fn move_to(&mut self, target_x: f32) {
        // NaN from a broken input source leaves the body where it is
        if target_x.is_nan() {
            return;
        }
        self.pos.x = target_x.clamp(0.0, self.max_x);
    }

    /// Shift horizontally, clamped to the play area
    pub fn move_by(&mut self, delta: f32) {
        self.move_to(self.pos.x + delta);
    }

    /// Centre the body on an absolute pointer/touch x
    pub fn center_on(&mut self, pointer_x: f32) {
        self.move_to(pointer_x - self.size / 2.0);
    }
}
