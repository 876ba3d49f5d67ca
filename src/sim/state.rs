//! Game state and core simulation types
//!
//! The whole session lives in one owned aggregate. Step functions borrow it
//! mutably; nothing hides in statics.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::templates::BallKind;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// A ball got the player; terminal until an explicit restart
    GameOver,
}

/// Logical stage geometry at the current display scale
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// y of the ground line the player stands on
    pub ground_y: f32,
    /// Dimensionless ratio against the 900px base stage
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: BASE_WIDTH,
            height: BASE_HEIGHT,
            ground_y: BASE_GROUND_Y,
            scale: 1.0,
        }
    }
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Fades by a fixed factor each frame
    pub alpha: f32,
}

/// A ball entity
///
/// `pos`, `radius`, `vel` and `gravity` are in current-scale units; the
/// resize transform multiplies them by the scale ratio. `restitution`,
/// `friction` and `drag` are dimensionless and survive resizes untouched.
#[derive(Debug, Clone)]
pub struct Ball {
    pub kind: BallKind,
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    pub restitution: f32,
    pub friction: f32,
    pub drag: f32,
    pub gravity: f32,
    /// Ambient current, -1.0 or 1.0 for the entity's lifetime
    pub flow_dir: f32,
    /// Trail history, newest first, capacity `trail_len`
    pub trail: Vec<TrailPoint>,
    pub trail_len: usize,
    // Visual tokens, opaque to the sim
    pub color: &'static str,
    pub glow: &'static str,
    pub trail_color: &'static str,
}

impl Ball {
    /// Fade the trail and record the current position (call each tick)
    pub fn record_trail(&mut self) {
        for p in &mut self.trail {
            p.alpha *= TRAIL_DECAY;
        }
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                alpha: 1.0,
            },
        );
        if self.trail.len() > self.trail_len {
            self.trail.pop();
        }
    }
}

/// Dash sub-state: one timer per concern, all floored at zero each tick
#[derive(Debug, Clone, Copy)]
pub struct DashState {
    /// Remaining time the dash pins horizontal velocity
    pub active_secs: f32,
    /// Remaining time before another dash is accepted
    pub cooldown_secs: f32,
    /// Remaining collision-immunity window
    pub invuln_secs: f32,
    /// Last dash direction, -1.0 or 1.0
    pub dir: f32,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            active_secs: 0.0,
            cooldown_secs: 0.0,
            invuln_secs: 0.0,
            dir: 1.0,
        }
    }
}

impl DashState {
    pub fn is_active(&self) -> bool {
        self.active_secs > 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_secs > 0.0
    }
}

/// The player's body
///
/// `pos.x` is the horizontal center, `pos.y` the foot line (where it rests
/// on the ground). Invariant: `on_ground` implies `vel.y == 0` and
/// `jumps_used == 0`.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub vel: Vec2,
    pub on_ground: bool,
    /// Jumps spent since last touching ground (0..=MAX_JUMPS)
    pub jumps_used: u8,
    pub dash: DashState,
}

impl Player {
    /// Spawn standing on the ground at stage center
    pub fn new(view: &Viewport) -> Self {
        Self {
            pos: Vec2::new(view.width / 2.0, view.ground_y),
            width: PLAYER_WIDTH * view.scale,
            height: PLAYER_HEIGHT * view.scale,
            vel: Vec2::ZERO,
            on_ground: true,
            jumps_used: 0,
            dash: DashState::default(),
        }
    }

    /// Bounding rectangle as (min, max) corners
    pub fn aabb(&self) -> (Vec2, Vec2) {
        let min = Vec2::new(self.pos.x - self.width / 2.0, self.pos.y - self.height);
        let max = Vec2::new(self.pos.x + self.width / 2.0, self.pos.y);
        (min, max)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, logged so a session can be reproduced
    pub seed: u64,
    pub rng: Pcg32,
    pub view: Viewport,
    /// Survival clock in seconds; the score is its floor
    pub survival_secs: f32,
    pub phase: GamePhase,
    pub player: Player,
    pub balls: Vec<Ball>,
}

impl GameState {
    /// Create a fresh session at base scale with the initial population.
    ///
    /// The driver applies the real viewport via `scale::resize` right after.
    pub fn new(seed: u64) -> Self {
        let view = Viewport::default();
        let player = Player::new(&view);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            view,
            survival_secs: 0.0,
            phase: GamePhase::Running,
            player,
            balls: Vec::new(),
        };

        for _ in 0..MIN_BALLS {
            super::spawn::spawn_ball(&mut state, 0.0);
        }

        state
    }

    /// Whole seconds survived (the displayed score)
    pub fn score(&self) -> u32 {
        self.survival_secs.max(0.0).floor() as u32
    }

    /// Re-sync the survival clock from the host's monotonic wall clock.
    ///
    /// The tick accumulates clamped dt, which lags wall time on slow frames;
    /// the driver corrects that here. Never runs the clock backwards.
    pub fn sync_clock(&mut self, wall_secs: f32) {
        if wall_secs.is_finite() && wall_secs > self.survival_secs {
            self.survival_secs = wall_secs;
        }
    }
}
