//! Harmony Blocks - A falling-block alignment arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body motion, landing, scoring, levels)
//! - `controller`: Intent queue + per-frame entry point wrapping the sim
//! - `render`: Draw commands for a 2D canvas, built from sim state
//! - `config`: Construction-time game constants

pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod sim;

pub use config::GameConfig;
pub use controller::{Intent, RoundController};
pub use error::ConfigError;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions
    pub const GRID_COLUMNS: usize = 8;
    pub const CELL_SIZE: f32 = 50.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Gap between the outline row and the canvas bottom
    pub const OUTLINE_MARGIN: f32 = 10.0;

    /// Horizontal distance per discrete left/right step
    pub const PLAYER_STEP: f32 = 5.0;

    /// Points gained on a hit, lost on a miss
    pub const HIT_REWARD: u32 = 10;

    /// Fall speed (pixels per tick) at level 1
    pub const INITIAL_FALL_SPEED: f32 = 2.0;
    /// Per-body random offset applied to the fall speed (±)
    pub const FALL_SPEED_JITTER: f32 = 0.5;
    /// Fall speed gained per level-up
    pub const FALL_SPEED_INCREMENT: f32 = 0.5;
    /// A body never falls slower than this, whatever the jitter
    pub const MIN_FALL_SPEED: f32 = 0.1;

    /// Experience per level before any decay
    pub const LEVEL_UP_BASE: f32 = 50.0;
    /// Per-level shrink of the experience requirement
    pub const LEVEL_UP_DECAY: f32 = 0.975;

    /// Wall-clock delay between landing and the next round (ms)
    pub const RESET_DELAY_MS: f64 = 1000.0;

    /// Max horizontal offset (pixels) that still counts as aligned
    pub const ALIGNMENT_TOLERANCE: f32 = 1.0;
}
