//! Game state and core simulation types
//!
//! Everything a run mutates lives in one `GameState`, so a tick, a fired
//! reset and an input intent all go through the same owner.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::FallingBody;
use super::occupancy::ColumnOccupancy;
use super::outline::TargetOutline;
use super::progression::ProgressionState;
use super::schedule::Schedule;
use crate::config::GameConfig;

/// How a landing was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingOutcome {
    /// Body lined up with the outline
    Hit,
    /// Body landed off target; the outline's column died
    Miss,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing advances; scheduled resets still fire
    Paused,
    /// Body is falling and accepts input
    Running,
    /// Body has landed; waiting for the scheduled reset
    Landed(LandingOutcome),
    /// Every column is dead
    GameOver,
}

/// Transient centre-screen message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    GreatJob,
    TryAgain,
    GameOver,
    LevelUp(u32),
}

impl Message {
    pub fn text(&self) -> String {
        match self {
            Message::GreatJob => "Great Job!".to_string(),
            Message::TryAgain => "Try Again!".to_string(),
            Message::GameOver => "Game Over!".to_string(),
            Message::LevelUp(level) => format!("Level {}!", level),
        }
    }
}

/// Things that happened during a tick, for the host (sound, HUD pops, logs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Hit { points: u32 },
    Miss { column: usize, penalty: u32 },
    LevelUp { level: u32 },
    GameOver { score: u32 },
    RoundReset,
    Paused,
    Resumed,
    Restarted,
}

/// Complete game state
///
/// Generic over the random source so tests can inject their own; the
/// default is a seeded PCG for reproducible runs.
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    /// Constants this run was built with
    pub config: GameConfig,
    /// Random source for spawn position, fall jitter and outline column
    pub rng: R,
    /// Current phase
    pub phase: GamePhase,
    /// Landing latch for the current round; survives pause/resume
    pub landing: Option<LandingOutcome>,
    /// The falling block
    pub body: FallingBody,
    /// Where the block should land
    pub outline: TargetOutline,
    /// Dead columns
    pub occupancy: ColumnOccupancy,
    /// Score, level, speed
    pub progression: ProgressionState,
    /// Centre-screen message, cleared by the next round reset
    pub message: Option<Message>,
    /// Instructions overlay shown before the first run
    pub show_instructions: bool,
    /// Pending delayed resets
    pub schedule: Schedule,
    /// Simulation ticks advanced (paused frames excluded)
    pub time_ticks: u64,
    /// Rounds started, including the first
    pub rounds: u32,
}

impl GameState<Pcg32> {
    /// Create a new game state with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new game state drawing randomness from `rng`
    ///
    /// `config` is assumed valid; `RoundController::new` validates it.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let occupancy = ColumnOccupancy::new(config.columns);
        let progression = ProgressionState::new(&config);
        let body = FallingBody::spawn(&config, progression.fall_speed, progression.level, &mut rng);
        let outline = TargetOutline::place(&occupancy, &config, &mut rng);

        Self {
            config,
            rng,
            phase: GamePhase::Paused,
            landing: None,
            body,
            outline,
            occupancy,
            progression,
            message: None,
            show_instructions: true,
            schedule: Schedule::new(),
            time_ticks: 0,
            rounds: 1,
        }
    }

    /// Install a fresh body/outline pair and clear the landing latch
    pub fn new_round(&mut self) {
        self.body = FallingBody::spawn(
            &self.config,
            self.progression.fall_speed,
            self.progression.level,
            &mut self.rng,
        );
        self.outline = TargetOutline::place(&self.occupancy, &self.config, &mut self.rng);
        self.landing = None;
        self.rounds += 1;
    }

    /// Back to the starting configuration, running
    pub fn restart(&mut self) {
        self.progression.reset(&self.config);
        self.occupancy.clear();
        self.schedule.clear();
        self.message = None;
        self.show_instructions = false;
        self.rounds = 0;
        self.new_round();
        self.phase = GamePhase::Running;
    }
}

impl<R> GameState<R> {
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Phase to return to when unpausing
    pub fn resume_phase(&self) -> GamePhase {
        match self.landing {
            Some(outcome) => GamePhase::Landed(outcome),
            None => GamePhase::Running,
        }
    }

    pub fn score(&self) -> u32 {
        self.progression.score
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }
}
