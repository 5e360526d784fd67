//! Target outline placement
//!
//! The outline sits on the bottom row in a random live column. As columns
//! die the choice narrows, which is what makes later rounds harder.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::occupancy::ColumnOccupancy;
use crate::config::GameConfig;

/// A stationary target square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetOutline {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
}

impl TargetOutline {
    /// Outline at a given column
    pub fn at_column(column: usize, config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(column as f32 * config.cell_size, config.outline_y()),
            size: config.cell_size,
        }
    }

    /// Outline in a uniformly random live column
    pub fn place<R: Rng + ?Sized>(
        occupancy: &ColumnOccupancy,
        config: &GameConfig,
        rng: &mut R,
    ) -> Self {
        Self::at_column(choose_column(occupancy, rng), config)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Column index under the outline
    pub fn column(&self) -> usize {
        (self.pos.x / self.size).floor().max(0.0) as usize
    }
}

/// Pick a live column uniformly at random
///
/// With every column dead this falls back to column 0. The controller
/// declares game over before asking for another outline, so reaching the
/// fallback is a logic error; it is logged rather than surfaced.
pub fn choose_column<R: Rng + ?Sized>(occupancy: &ColumnOccupancy, rng: &mut R) -> usize {
    let available = occupancy.available();
    if available.is_empty() {
        log::warn!(
            "No live column among {} for a new outline; falling back to column 0",
            occupancy.columns()
        );
        return 0;
    }
    available[rng.random_range(0..available.len())]
}
