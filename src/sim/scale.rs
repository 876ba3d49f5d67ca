//! Display scale model
//!
//! The stage is tuned against a 900px-wide base. The host hands us whatever
//! width it has; we clamp it, derive a dimensionless scale, and multiply
//! every live quantity with length units (positions, sizes, velocities,
//! gravities - player, balls and trail points alike) by the ratio between
//! the new and old scale, so relative kinematics feel identical at any
//! size. Dimensionless coefficients (restitution, friction, drag) are never
//! touched. One transform over the whole aggregate, not scattered
//! multiplications.

use crate::consts::*;

use super::state::GameState;

/// Re-fit the session to a new host width.
///
/// Zero, negative or non-finite widths are the host saying "not laid out
/// yet"; keep the last known good scale rather than divide by zero.
pub fn resize(state: &mut GameState, avail_width: f32) {
    if !avail_width.is_finite() || avail_width <= 0.0 {
        log::warn!("resize: ignoring invalid width {avail_width}");
        return;
    }

    let display_w = avail_width.floor().clamp(MIN_VIEW_WIDTH, MAX_VIEW_WIDTH);
    let new_scale = display_w / BASE_WIDTH;
    let ratio = new_scale / state.view.scale;

    state.view.width = display_w;
    state.view.height = (display_w * (BASE_HEIGHT / BASE_WIDTH)).floor();
    state.view.ground_y = (BASE_GROUND_Y * new_scale).floor();
    state.view.scale = new_scale;

    // Player size is re-derived from base constants; motion state transforms
    let player = &mut state.player;
    player.width = PLAYER_WIDTH * new_scale;
    player.height = PLAYER_HEIGHT * new_scale;
    player.pos *= ratio;
    player.vel *= ratio;

    for ball in &mut state.balls {
        ball.pos *= ratio;
        ball.radius *= ratio;
        ball.vel *= ratio;
        ball.gravity *= ratio;
        for p in &mut ball.trail {
            p.pos *= ratio;
        }
    }

    // The rounded ground line can land above a previously-grounded player
    let half_w = state.player.width / 2.0;
    state.player.pos.x = state
        .player
        .pos
        .x
        .clamp(half_w, state.view.width - half_w);
    if state.player.pos.y > state.view.ground_y {
        state.player.pos.y = state.view.ground_y;
    }
}
