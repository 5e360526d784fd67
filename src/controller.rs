//! Round controller
//!
//! Owns the `GameState`. Input handlers and the frame loop talk to it only
//! through `post` and `tick`, so input, delayed resets and simulation are
//! serialized through one owner.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::render::{DrawCommand, frame_commands};
use crate::sim::{Direction, GameState, Move, TickInput, TickReport, tick};

/// Player or host intent, queued until the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Step(Direction),
    PointerAt(f32),
    TouchAt(f32),
    TogglePause,
    ShowInstructions,
    DismissInstructions,
    Restart,
}

#[derive(Debug, Clone)]
pub struct RoundController<R = Pcg32> {
    state: GameState<R>,
    pending: TickInput,
}

impl RoundController<Pcg32> {
    /// Validate `config` and build a seeded run
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("New run: {} columns, seed {}", config.columns, seed);
        Ok(Self::from_state(GameState::new(config, seed)))
    }
}

impl<R: Rng> RoundController<R> {
    /// Validate `config` and build a run drawing from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_state(GameState::with_rng(config, rng)))
    }

    /// Run one frame: apply queued intents, fire due resets, advance
    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        let input = std::mem::take(&mut self.pending);
        tick(&mut self.state, &input, now_ms)
    }
}

impl<R> RoundController<R> {
    pub fn from_state(state: GameState<R>) -> Self {
        Self {
            state,
            pending: TickInput::default(),
        }
    }

    /// Queue an intent for the next tick
    pub fn post(&mut self, intent: Intent) {
        match intent {
            Intent::Step(dir) => self.pending.moves.push(Move::Step(dir)),
            Intent::PointerAt(x) => self.pending.moves.push(Move::PointerAt(x)),
            Intent::TouchAt(x) => self.pending.moves.push(Move::TouchAt(x)),
            // Two toggles before one tick cancel out
            Intent::TogglePause => self.pending.toggle_pause = !self.pending.toggle_pause,
            Intent::ShowInstructions => self.pending.show_instructions = true,
            Intent::DismissInstructions => self.pending.dismiss_instructions = true,
            Intent::Restart => self.pending.restart = true,
        }
    }

    /// Draw commands for the current state
    pub fn frame(&self) -> Vec<DrawCommand> {
        frame_commands(&self.state)
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    /// Direct access for hosts that need to stage a scenario
    pub fn state_mut(&mut self) -> &mut GameState<R> {
        &mut self.state
    }

    pub fn pending(&self) -> &TickInput {
        &self.pending
    }
}
