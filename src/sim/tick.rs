//! Per-frame simulation step
//!
//! The driver clamps dt, syncs the survival clock, then calls `tick` once
//! per animation frame. Everything here is synchronous and owns no platform
//! state; input arrives as a plain snapshot produced by `InputIntents`.

use super::collision::first_hit;
use super::physics::update_balls;
use super::player::update_player;
use super::spawn::maintain_population;
use super::state::{GamePhase, GameState};

/// Input snapshot for a single tick
///
/// `left`/`right` are level-triggered (held keys); `jump` and `dash` are
/// one-shots that the intent buffer clears on read.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub dash: bool,
}

/// Intent buffer between asynchronous input handlers and the frame loop.
///
/// Handlers mutate this from keyboard/pointer events whenever they fire;
/// the loop calls `take` exactly once per frame, which snapshots the held
/// state and consumes the one-shot requests. Edge-triggering lives here so
/// holding a key can never repeat a jump or dash.
#[derive(Debug, Default)]
pub struct InputIntents {
    pub left: bool,
    pub right: bool,
    jump_queued: bool,
    dash_queued: bool,
    restart_queued: bool,
}

impl InputIntents {
    /// Queue a one-shot jump (ignored by callers on key auto-repeat)
    pub fn queue_jump(&mut self) {
        self.jump_queued = true;
    }

    /// Queue a one-shot dash request
    pub fn queue_dash(&mut self) {
        self.dash_queued = true;
    }

    /// Queue a session restart
    pub fn queue_restart(&mut self) {
        self.restart_queued = true;
    }

    /// Read-and-clear: snapshot for this frame, consuming the one-shots
    pub fn take(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: std::mem::take(&mut self.jump_queued),
            dash: std::mem::take(&mut self.dash_queued),
        }
    }

    /// Consume a pending restart request
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_queued)
    }

    /// Drop everything (used when a session ends)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Advance the session by one frame.
///
/// `dt` must already be clamped by the driver. Frame order: survival clock,
/// population top-up, player control and integration, ball integration,
/// collision. A hit flips the phase to `GameOver`; the caller observes the
/// transition and handles scores and presentation.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.survival_secs += dt;
    let survival = state.survival_secs;

    maintain_population(state, survival);

    update_player(state, input, dt);
    update_balls(state, survival, dt);

    if !state.player.dash.is_invulnerable() && first_hit(&state.player, &state.balls).is_some() {
        log::info!(
            "game over at {}s with {} balls (seed {})",
            state.score(),
            state.balls.len(),
            state.seed
        );
        state.phase = GamePhase::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DASH_INVULN_SECS, MIN_BALLS};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_intents_take_consumes_one_shots() {
        let mut intents = InputIntents::default();
        intents.left = true;
        intents.queue_jump();
        intents.queue_dash();

        let first = intents.take();
        assert!(first.left && first.jump && first.dash);

        // Held keys persist, one-shots do not
        let second = intents.take();
        assert!(second.left);
        assert!(!second.jump);
        assert!(!second.dash);
    }

    #[test]
    fn test_intents_restart_is_one_shot() {
        let mut intents = InputIntents::default();
        assert!(!intents.take_restart());
        intents.queue_restart();
        assert!(intents.take_restart());
        assert!(!intents.take_restart());
    }

    #[test]
    fn test_population_floor_holds_across_frames() {
        let mut state = GameState::new(51);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), DT);
            if state.phase != GamePhase::Running {
                break;
            }
            assert!(state.balls.len() >= MIN_BALLS);
        }
    }

    #[test]
    fn test_survival_clock_advances() {
        let mut state = GameState::new(52);
        // Park the balls inside the cull margin but far from the player so
        // nothing can end the session or trigger a top-up mid-test
        for ball in &mut state.balls {
            ball.pos = Vec2::new(-200.0, -200.0);
            ball.gravity = 0.0;
            ball.vel = Vec2::ZERO;
        }
        for _ in 0..66 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!((state.survival_secs - 1.1).abs() < 1e-2);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_overlap_ends_the_session() {
        let mut state = GameState::new(53);
        let target = state.player.pos - Vec2::new(0.0, state.player.height / 2.0);
        state.balls[0].pos = target;
        state.balls[0].vel = Vec2::ZERO;
        state.balls[0].gravity = 0.0;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Terminal: further ticks are no-ops
        let frozen = state.survival_secs;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.survival_secs, frozen);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_invulnerability_skips_collision() {
        let mut state = GameState::new(54);
        let target = state.player.pos - Vec2::new(0.0, state.player.height / 2.0);
        state.balls[0].pos = target;
        state.balls[0].vel = Vec2::ZERO;
        state.balls[0].gravity = 0.0;

        let dash = TickInput {
            dash: true,
            ..TickInput::default()
        };
        tick(&mut state, &dash, DT);
        assert_eq!(
            state.phase,
            GamePhase::Running,
            "dash invulnerability must bypass the collision check"
        );

        // Hold the overlap until the window runs out
        let frames = (DASH_INVULN_SECS / DT).ceil() as usize + 2;
        for _ in 0..frames {
            state.balls[0].pos = state.player.pos - Vec2::new(0.0, state.player.height / 2.0);
            state.balls[0].vel = Vec2::ZERO;
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_produces_fresh_running_session() {
        let mut state = GameState::new(55);
        state.balls[0].pos = state.player.pos;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        state = GameState::new(56);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.balls.len(), MIN_BALLS);
    }
}
