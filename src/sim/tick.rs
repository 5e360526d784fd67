//! Per-frame simulation tick
//!
//! One call per display refresh. Fall distance is per tick, so it scales
//! with the refresh rate; there is no fixed-timestep decoupling.

use rand::Rng;

use super::schedule::ScheduledEvent;
use super::state::{GameEvent, GamePhase, GameState, LandingOutcome, Message};

/// Discrete left/right step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A horizontal input, applied in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Move {
    /// Keyboard step of `player_step` pixels
    Step(Direction),
    /// Absolute pointer x in canvas space (centres the body)
    PointerAt(f32),
    /// Absolute touch x in canvas space (centres the body)
    TouchAt(f32),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal moves since the last tick
    pub moves: Vec<Move>,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Pause and bring the instructions overlay back
    pub show_instructions: bool,
    /// Close the instructions overlay and start
    pub dismiss_instructions: bool,
    /// Start over (only honoured after game over)
    pub restart: bool,
}

/// What a tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// Run has ended (terminal until restart)
    pub game_over: bool,
}

/// Advance the game state by one frame
///
/// `now_ms` is the host's wall clock; it only drives the delayed round
/// reset, never the fall distance.
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput, now_ms: f64) -> TickReport {
    let mut events = Vec::new();

    // Delayed resets fire on wall-clock time, paused or not
    for event in state.schedule.drain_due(now_ms) {
        match event {
            ScheduledEvent::ResetRound => {
                state.message = None;
                state.new_round();
                if matches!(state.phase, GamePhase::Landed(_)) {
                    state.phase = GamePhase::Running;
                }
                log::debug!("Round {} started", state.rounds);
                events.push(GameEvent::RoundReset);
            }
        }
    }

    if input.restart {
        if state.is_game_over() {
            state.restart();
            log::info!("Run restarted");
            events.push(GameEvent::Restarted);
        } else {
            log::debug!("Restart ignored outside game over");
        }
    }

    if input.show_instructions && !state.is_game_over() {
        state.show_instructions = true;
        if !state.is_paused() {
            state.phase = GamePhase::Paused;
            events.push(GameEvent::Paused);
        }
    }

    if input.dismiss_instructions && state.show_instructions {
        state.show_instructions = false;
        if state.is_paused() {
            state.phase = state.resume_phase();
            log::info!("Run started");
            events.push(GameEvent::Resumed);
        }
    }

    if input.toggle_pause {
        match state.phase {
            GamePhase::Running | GamePhase::Landed(_) => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.show_instructions = false;
                state.phase = state.resume_phase();
                events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if matches!(state.phase, GamePhase::Paused | GamePhase::GameOver) {
        return TickReport {
            game_over: state.is_game_over(),
            events,
        };
    }

    state.time_ticks += 1;

    if state.is_running() {
        apply_moves(state, &input.moves);

        state.body.advance();
        if state.landing.is_none() && state.body.bottom() >= state.outline.y() {
            land(state, now_ms, &mut events);
        }
    }

    // Level-up runs alongside the landing check, and can fire in the same tick
    if !state.is_game_over() {
        if let Some(level) = state.progression.check_level_up(&state.config) {
            state.message = Some(Message::LevelUp(level));
            log::info!(
                "Level {} reached (score {}, fall speed {:.1})",
                level,
                state.progression.score,
                state.progression.fall_speed
            );
            events.push(GameEvent::LevelUp { level });
        }
    }

    TickReport {
        game_over: state.is_game_over(),
        events,
    }
}

/// Funnel every input source through the body's clamp
fn apply_moves<R>(state: &mut GameState<R>, moves: &[Move]) {
    let step = state.config.player_step;
    for mv in moves {
        match *mv {
            Move::Step(dir) => state.body.move_by(dir.sign() * step),
            Move::PointerAt(x) | Move::TouchAt(x) => state.body.center_on(x),
        }
    }
}

/// Classify a landing and update score, occupancy and phase
fn land<R: Rng>(state: &mut GameState<R>, now_ms: f64, events: &mut Vec<GameEvent>) {
    let offset = (state.body.x() - state.outline.x()).abs();
    let reward = state.config.hit_reward;

    if offset < state.config.alignment_tolerance {
        state.progression.award(reward);
        state.message = Some(Message::GreatJob);
        state.landing = Some(LandingOutcome::Hit);
        state.phase = GamePhase::Landed(LandingOutcome::Hit);
        events.push(GameEvent::Hit { points: reward });
    } else {
        state.progression.penalize(reward);
        state.message = Some(Message::TryAgain);
        state.landing = Some(LandingOutcome::Miss);

        let column = state.outline.column();
        state.occupancy.mark_dead(column);
        events.push(GameEvent::Miss {
            column,
            penalty: reward,
        });

        if state.occupancy.all_dead() {
            state.phase = GamePhase::GameOver;
            state.message = Some(Message::GameOver);
            log::info!(
                "Game over after {} rounds with score {}",
                state.rounds,
                state.progression.score
            );
            events.push(GameEvent::GameOver {
                score: state.progression.score,
            });
            return;
        }
        state.phase = GamePhase::Landed(LandingOutcome::Miss);
    }

    state
        .schedule
        .schedule(now_ms, state.config.reset_delay_ms, ScheduledEvent::ResetRound);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::outline::TargetOutline;

    /// Running state, no jitter, outline in `column`, body one tick from landing
    fn about_to_land(column: usize, body_x: f32) -> GameState {
        let mut state = GameState::new(GameConfig::deterministic(), 1234);
        state.show_instructions = false;
        state.phase = GamePhase::Running;
        state.outline = TargetOutline::at_column(column, &state.config);
        state.body.move_to(body_x);
        state.body.pos.y = state.outline.y() - state.body.size - 1.0;
        state
    }

    fn input() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_starts_paused_until_dismissed() {
        let mut state = GameState::new(GameConfig::deterministic(), 1);
        let y0 = state.body.y();
        tick(&mut state, &input(), 0.0);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.body.y(), y0);

        let start = TickInput {
            dismiss_instructions: true,
            ..Default::default()
        };
        let report = tick(&mut state, &start, 16.0);
        assert!(report.events.contains(&GameEvent::Resumed));
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.show_instructions);
        assert_eq!(state.body.y(), y0 + state.body.fall_speed);
    }

    #[test]
    fn test_fall_is_exactly_fall_speed() {
        let mut state = about_to_land(0, 200.0);
        state.body.pos.y = -50.0;
        let speed = state.body.fall_speed;
        for i in 1..=20 {
            let before = state.body.y();
            tick(&mut state, &input(), i as f64 * 16.0);
            assert_eq!(state.body.y(), before + speed);
        }
    }

    #[test]
    fn test_hit_scores_and_keeps_columns() {
        let mut state = about_to_land(2, 100.5);
        let report = tick(&mut state, &input(), 0.0);
        assert_eq!(report.events, vec![GameEvent::Hit { points: 10 }]);
        assert_eq!(state.score(), 10);
        assert_eq!(state.occupancy.dead_count(), 0);
        assert_eq!(state.phase, GamePhase::Landed(LandingOutcome::Hit));
        assert_eq!(state.message, Some(Message::GreatJob));
        assert_eq!(state.schedule.next_deadline(), Some(1000.0));
    }

    #[test]
    fn test_offset_of_one_is_a_miss() {
        let mut state = about_to_land(2, 101.0);
        tick(&mut state, &input(), 0.0);
        assert_eq!(state.landing, Some(LandingOutcome::Miss));
        assert!(state.occupancy.is_dead(2));
    }

    #[test]
    fn test_miss_clamps_score_and_kills_outline_column() {
        let mut state = about_to_land(5, 0.0);
        state.progression.score = 5;
        let report = tick(&mut state, &input(), 0.0);
        assert_eq!(
            report.events,
            vec![GameEvent::Miss {
                column: 5,
                penalty: 10
            }]
        );
        assert_eq!(state.score(), 0);
        assert!(state.occupancy.is_dead(5));
        assert_eq!(state.message, Some(Message::TryAgain));
        assert_eq!(state.phase, GamePhase::Landed(LandingOutcome::Miss));
    }

    #[test]
    fn test_landing_latch_fires_once() {
        let mut state = about_to_land(2, 100.0);
        tick(&mut state, &input(), 0.0);
        let y = state.body.y();
        for t in 1..10 {
            let report = tick(&mut state, &input(), t as f64 * 16.0);
            assert!(report.events.is_empty());
        }
        assert_eq!(state.score(), 10);
        assert_eq!(state.body.y(), y);
    }

    #[test]
    fn test_input_ignored_while_landed() {
        let mut state = about_to_land(2, 100.0);
        tick(&mut state, &input(), 0.0);
        let moves = TickInput {
            moves: vec![Move::Step(Direction::Left), Move::PointerAt(10.0)],
            ..Default::default()
        };
        tick(&mut state, &moves, 16.0);
        assert_eq!(state.body.x(), 100.0);
    }

    #[test]
    fn test_reset_after_delay() {
        let mut state = about_to_land(3, 150.0);
        tick(&mut state, &input(), 500.0);
        tick(&mut state, &input(), 1499.0);
        assert!(matches!(state.phase, GamePhase::Landed(_)));

        let report = tick(&mut state, &input(), 1500.0);
        assert_eq!(report.events[0], GameEvent::RoundReset);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.message, None);
        assert_eq!(state.landing, None);
        assert_eq!(state.score(), 10);
        // Fresh body has already taken its first step this tick
        assert_eq!(state.body.y(), -state.config.cell_size + state.body.fall_speed);
    }

    #[test]
    fn test_last_column_miss_is_game_over() {
        let mut state = about_to_land(4, 0.0);
        for c in (0..8).filter(|&c| c != 4) {
            state.occupancy.mark_dead(c);
        }
        state.progression.score = 30;
        let report = tick(&mut state, &input(), 0.0);
        assert!(report.game_over);
        assert!(report.events.contains(&GameEvent::GameOver { score: 20 }));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.message, Some(Message::GameOver));
        assert!(state.schedule.is_empty());

        // Nothing moves after game over
        let y = state.body.y();
        for t in 1..50 {
            let report = tick(&mut state, &input(), t as f64 * 100.0);
            assert!(report.game_over);
        }
        assert_eq!(state.body.y(), y);
        assert_eq!(state.score(), 20);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut state = about_to_land(4, 0.0);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, 0.0);
        assert_eq!(state.occupancy.dead_count(), 1);

        for c in 0..8 {
            state.occupancy.mark_dead(c);
        }
        state.phase = GamePhase::GameOver;
        state.progression.level = 3;
        state.progression.fall_speed = 3.0;
        let report = tick(&mut state, &restart, 5000.0);
        assert!(report.events.contains(&GameEvent::Restarted));
        assert!(!report.game_over);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.progression.fall_speed, 2.0);
        assert_eq!(state.occupancy.dead_count(), 0);
        assert_eq!(state.message, None);

        // Fresh pair, already one step into the new round
        assert_eq!(state.rounds, 1);
        assert_eq!(state.landing, None);
        assert_eq!(state.body.level, 1);
        assert_eq!(state.body.y(), -state.config.cell_size + state.body.fall_speed);
        assert!(state.outline.column() < state.config.columns);
        assert!(!state.occupancy.is_dead(state.outline.column()));
    }

    #[test]
    fn test_show_instructions_pauses_and_dismiss_resumes() {
        let mut state = about_to_land(0, 200.0);
        state.body.pos.y = 0.0;
        let show = TickInput {
            show_instructions: true,
            ..Default::default()
        };
        let report = tick(&mut state, &show, 0.0);
        assert_eq!(report.events, vec![GameEvent::Paused]);
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.show_instructions);
        assert_eq!(state.body.y(), 0.0);

        let dismiss = TickInput {
            dismiss_instructions: true,
            ..Default::default()
        };
        let report = tick(&mut state, &dismiss, 16.0);
        assert_eq!(report.events, vec![GameEvent::Resumed]);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.show_instructions);
        assert_eq!(state.body.y(), state.body.fall_speed);
    }

    #[test]
    fn test_show_instructions_ignored_after_game_over() {
        let mut state = about_to_land(0, 200.0);
        state.phase = GamePhase::GameOver;
        let show = TickInput {
            show_instructions: true,
            ..Default::default()
        };
        let report = tick(&mut state, &show, 0.0);
        assert!(report.game_over);
        assert!(!state.show_instructions);
    }

    #[test]
    fn test_hit_and_level_up_same_tick() {
        let mut state = about_to_land(1, 50.0);
        state.progression.score = 45;
        let report = tick(&mut state, &input(), 0.0);
        assert_eq!(
            report.events,
            vec![GameEvent::Hit { points: 10 }, GameEvent::LevelUp { level: 2 }]
        );
        assert_eq!(state.level(), 2);
        assert_eq!(state.progression.fall_speed, 2.5);
        assert_eq!(state.message, Some(Message::LevelUp(2)));

        // Score stays at 55 while landed: no second level-up
        let report = tick(&mut state, &input(), 16.0);
        assert!(report.events.is_empty());
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_new_body_carries_level_and_speed() {
        let mut state = about_to_land(1, 50.0);
        state.progression.score = 45;
        tick(&mut state, &input(), 0.0);
        tick(&mut state, &input(), 1000.0);
        assert_eq!(state.body.level, 2);
        assert_eq!(state.body.fall_speed, 2.5);
    }

    #[test]
    fn test_pause_freezes_body() {
        let mut state = about_to_land(0, 200.0);
        state.body.pos.y = 0.0;
        let pause = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        let report = tick(&mut state, &pause, 0.0);
        assert_eq!(report.events, vec![GameEvent::Paused]);
        for t in 1..10 {
            tick(&mut state, &input(), t as f64 * 16.0);
        }
        assert_eq!(state.body.y(), 0.0);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &pause, 200.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.body.y(), state.body.fall_speed);
    }

    #[test]
    fn test_reset_fires_during_pause_at_original_deadline() {
        let mut state = about_to_land(3, 150.0);
        tick(&mut state, &input(), 0.0);
        let pause = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 100.0);
        assert_eq!(state.phase, GamePhase::Paused);

        let report = tick(&mut state, &input(), 1000.0);
        assert_eq!(report.events, vec![GameEvent::RoundReset]);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.landing, None);
        assert_eq!(state.message, None);

        // Resuming continues the new round, not the old landing
        tick(&mut state, &pause, 5000.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_pause_while_landed_resumes_landed() {
        let mut state = about_to_land(3, 150.0);
        tick(&mut state, &input(), 0.0);
        let pause = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 100.0);
        tick(&mut state, &pause, 200.0);
        assert_eq!(state.phase, GamePhase::Landed(LandingOutcome::Hit));
    }

    #[test]
    fn test_moves_apply_in_order_and_clamp() {
        let mut state = about_to_land(0, 100.0);
        state.body.pos.y = 0.0;
        let moves = TickInput {
            moves: vec![
                Move::PointerAt(300.0),
                Move::Step(Direction::Right),
                Move::Step(Direction::Right),
            ],
            ..Default::default()
        };
        tick(&mut state, &moves, 0.0);
        assert_eq!(state.body.x(), 285.0);

        let moves = TickInput {
            moves: vec![Move::Step(Direction::Left), Move::TouchAt(-500.0)],
            ..Default::default()
        };
        tick(&mut state, &moves, 16.0);
        assert_eq!(state.body.x(), 0.0);

        let moves = TickInput {
            moves: vec![Move::TouchAt(10_000.0)],
            ..Default::default()
        };
        tick(&mut state, &moves, 32.0);
        assert_eq!(state.body.x(), state.body.max_x());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(GameConfig::default(), 99999);
        let mut state2 = GameState::new(GameConfig::default(), 99999);

        let inputs = [
            TickInput {
                dismiss_instructions: true,
                ..Default::default()
            },
            TickInput {
                moves: vec![Move::PointerAt(120.0)],
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut now = 0.0;
        for _ in 0..400 {
            for input in &inputs {
                tick(&mut state1, input, now);
                tick(&mut state2, input, now);
                now += 16.0;
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.occupancy, state2.occupancy);
        assert_eq!(state1.body, state2.body);
        assert_eq!(state1.outline, state2.outline);
    }
}
