//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded (or injected) RNG only
//! - Wall-clock time only through the `now_ms` passed to `tick`
//! - No rendering or platform dependencies

pub mod body;
pub mod occupancy;
pub mod outline;
pub mod progression;
pub mod schedule;
pub mod state;
pub mod tick;

pub use body::FallingBody;
pub use occupancy::ColumnOccupancy;
pub use outline::{TargetOutline, choose_column};
pub use progression::{LevelProgress, ProgressionState};
pub use schedule::{Schedule, ScheduledEvent};
pub use state::{GameEvent, GamePhase, GameState, LandingOutcome, Message};
pub use tick::{Direction, Move, TickInput, TickReport, tick};
