//! Player control state machine
//!
//! Resolves one frame of player motion: dash timers and trigger, horizontal
//! acceleration/friction, the double jump, gravity and the ground snap.
//! While a dash is active, horizontal velocity is pinned to the dash speed
//! and normal acceleration is bypassed entirely.

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Advance dash timers and honor a dash request.
///
/// A request is accepted only when the cooldown has expired and no dash is
/// already in flight; the invulnerability window arms together with the
/// dash. Direction follows the last-held horizontal key and otherwise keeps
/// its previous value.
pub fn update_dash(state: &mut GameState, input: &TickInput, dt: f32) {
    let dash = &mut state.player.dash;

    dash.cooldown_secs = (dash.cooldown_secs - dt).max(0.0);
    dash.active_secs = (dash.active_secs - dt).max(0.0);
    dash.invuln_secs = (dash.invuln_secs - dt).max(0.0);

    if input.left {
        dash.dir = -1.0;
    }
    if input.right {
        dash.dir = 1.0;
    }

    if input.dash && dash.cooldown_secs <= 0.0 && dash.active_secs <= 0.0 {
        dash.active_secs = DASH_ACTIVE_SECS;
        dash.invuln_secs = DASH_INVULN_SECS;
        dash.cooldown_secs = DASH_COOLDOWN_SECS;
    }
}

/// Resolve horizontal motion, jumping and vertical integration for one frame
pub fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    update_dash(state, input, dt);

    let scale = state.view.scale;
    let view = state.view;
    let player = &mut state.player;

    if player.dash.is_active() {
        player.vel.x = player.dash.dir * DASH_SPEED * scale;
    } else {
        let accel = PLAYER_ACCEL * scale;
        let friction = PLAYER_FRICTION * scale;
        let max_speed = PLAYER_MAX_SPEED * scale;

        if input.left {
            player.vel.x -= accel * dt;
        }
        if input.right {
            player.vel.x += accel * dt;
        }
        if !input.left && !input.right {
            if player.vel.x > 0.0 {
                player.vel.x = (player.vel.x - friction * dt).max(0.0);
            } else if player.vel.x < 0.0 {
                player.vel.x = (player.vel.x + friction * dt).min(0.0);
            }
        }
        player.vel.x = player.vel.x.clamp(-max_speed, max_speed);
    }

    // Double jump: the second impulse is weaker than the first
    if input.jump && (player.on_ground || player.jumps_used < MAX_JUMPS) {
        let impulse = if player.jumps_used == 0 {
            JUMP_IMPULSE
        } else {
            DOUBLE_JUMP_IMPULSE
        };
        player.vel.y = impulse * scale;
        player.jumps_used += 1;
        player.on_ground = false;
    }

    // Gravity accumulates every frame, grounded or not; the snap below
    // zeroes it out again while standing
    player.vel.y += PLAYER_GRAVITY * scale * dt;

    player.pos += player.vel * dt;

    let half_w = player.width / 2.0;
    player.pos.x = player.pos.x.clamp(half_w, view.width - half_w);

    if player.pos.y >= view.ground_y {
        player.pos.y = view.ground_y;
        player.vel.y = 0.0;
        player.on_ground = true;
        player.jumps_used = 0;
    }
}
