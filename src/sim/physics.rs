//! Ball physics integration
//!
//! Stylized, tuned for feel rather than accuracy: ambient wind along each
//! ball's flow direction, per-ball gravity, exponential drag normalized
//! against the 60 Hz tuning baseline, a restitution bounce off the ground
//! line and an anti-stall kick that keeps grounded balls rolling.

use super::difficulty::difficulty_at;
use super::state::{Ball, GameState};
use crate::consts::{CULL_MARGIN, FLOOR_MIN_SPEED};

/// Advance one ball by `dt` seconds.
///
/// `wind_accel` and `min_floor_speed` arrive pre-scaled for the display.
pub fn step_ball(ball: &mut Ball, dt: f32, wind_accel: f32, ground_y: f32, min_floor_speed: f32) {
    // Ambient current pushes along the ball's travel direction
    ball.vel.x += ball.flow_dir * wind_accel * dt;
    ball.vel.y += ball.gravity * dt;

    // Drag coefficients were tuned against 60 Hz frames; the exponent keeps
    // the damping identical at any actual dt
    let damp = (-ball.drag * 60.0 * dt).exp();
    ball.vel *= damp;

    ball.pos += ball.vel * dt;

    let floor = ground_y - ball.radius;
    if ball.pos.y > floor {
        ball.pos.y = floor;
        if ball.vel.y > 0.0 {
            ball.vel.y = -ball.vel.y * ball.restitution;
        }
        ball.vel.x *= 1.0 - ball.friction;

        // Anti-stall: a ball grinding along the floor gets kicked back up
        // to a scaled minimum speed. This can momentarily add energy; that
        // is deliberate (stalled balls are no threat and look broken).
        if ball.vel.x.abs() < min_floor_speed {
            let dir = if ball.vel.x == 0.0 {
                ball.flow_dir
            } else {
                ball.vel.x.signum()
            };
            ball.vel.x = dir * min_floor_speed;
        }
    }
}

/// Integrate every ball, record trails, and cull far-offscreen entities
pub fn update_balls(state: &mut GameState, survival_secs: f32, dt: f32) {
    let view = state.view;
    let wind_accel = difficulty_at(survival_secs, view.scale).wind_accel;
    let min_floor_speed = FLOOR_MIN_SPEED * view.scale;

    for ball in &mut state.balls {
        step_ball(ball, dt, wind_accel, view.ground_y, min_floor_speed);
        ball.record_trail();
    }

    let margin = CULL_MARGIN * view.scale;
    state.balls.retain(|b| {
        b.pos.x >= -margin
            && b.pos.x <= view.width + margin
            && b.pos.y <= view.height + margin
            && b.pos.y >= -margin
    });
}
