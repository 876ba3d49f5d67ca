//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and portable:
//! - dt comes in pre-clamped from the driver
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod player;
pub mod scale;
pub mod spawn;
pub mod state;
pub mod templates;
pub mod tick;

pub use collision::{circle_hits_rect, first_hit};
pub use difficulty::{Difficulty, difficulty_at};
pub use scale::resize;
pub use spawn::{maintain_population, spawn_ball};
pub use state::{Ball, DashState, GamePhase, GameState, Player, TrailPoint, Viewport};
pub use templates::{BALL_TEMPLATES, BallKind, BallTemplate, pick_template};
pub use tick::{InputIntents, TickInput, tick};
