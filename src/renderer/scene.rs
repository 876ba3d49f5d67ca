//! Scene drawing
//!
//! Turns one `GameState` into primitive calls: background grid, ground
//! line, ball trails, ball bodies, then the player on top. Draw order
//! matters; later calls paint over earlier ones.

use glam::Vec2;

use super::{DrawTarget, Glow};
use crate::Settings;
use crate::sim::state::{Ball, GameState, Player};

const GRID_SPACING: f32 = 60.0;
const GRID_COLOR: &str = "rgba(255,255,255,0.10)";
const GROUND_COLOR: &str = "rgba(255,255,255,0.25)";

const PLAYER_COLOR: &str = "rgba(124,92,255,0.95)";
const PLAYER_DASH_COLOR: &str = "rgba(255,255,255,0.92)";
const PLAYER_GLOW: &str = "rgba(124,92,255,0.55)";
const PLAYER_INVULN_GLOW: &str = "rgba(34,211,238,0.70)";
const PIP_COLOR: &str = "rgba(255,255,255,0.6)";

/// Draw a complete frame
pub fn render(state: &GameState, settings: &Settings, target: &mut impl DrawTarget) {
    draw_background(state, settings, target);
    for ball in &state.balls {
        draw_ball(ball, settings, target);
    }
    draw_player(state, settings, target);
}

fn draw_background(state: &GameState, settings: &Settings, target: &mut impl DrawTarget) {
    let view = &state.view;
    target.clear(view.width, view.height);

    if settings.grid {
        let spacing = GRID_SPACING * view.scale;
        let mut x = 0.0;
        while x <= view.width {
            target.stroke_line(
                Vec2::new(x, 0.0),
                Vec2::new(x, view.height),
                GRID_COLOR,
                1.0,
                0.22,
            );
            x += spacing;
        }
        let mut y = 0.0;
        while y <= view.height {
            target.stroke_line(
                Vec2::new(0.0, y),
                Vec2::new(view.width, y),
                GRID_COLOR,
                1.0,
                0.22,
            );
            y += spacing;
        }
    }

    target.stroke_line(
        Vec2::new(0.0, view.ground_y + 1.0),
        Vec2::new(view.width, view.ground_y + 1.0),
        GROUND_COLOR,
        2.0,
        1.0,
    );
}

fn draw_ball(ball: &Ball, settings: &Settings, target: &mut impl DrawTarget) {
    if settings.effective_trails() {
        let len = ball.trail.len().max(2) as f32 - 1.0;
        for (i, p) in ball.trail.iter().enumerate() {
            if p.alpha <= 0.01 {
                continue;
            }
            let t = i as f32 / len;
            let radius = ball.radius * (0.55 + t * 0.35);
            let alpha = p.alpha * (0.25 + t * 0.55);
            target.fill_circle(p.pos, radius, ball.trail_color, alpha, None);
        }
    }

    let glow = settings.effective_glow().then_some(Glow {
        color: ball.glow,
        blur: 18.0,
    });
    target.fill_circle(ball.pos, ball.radius, ball.color, 1.0, glow);
}

fn draw_player(state: &GameState, settings: &Settings, target: &mut impl DrawTarget) {
    let player = &state.player;
    let (min, _) = player.aabb();
    let size = Vec2::new(player.width, player.height);

    let color = if player.dash.is_active() {
        PLAYER_DASH_COLOR
    } else {
        PLAYER_COLOR
    };
    let glow = settings.effective_glow().then(|| {
        if player.dash.is_invulnerable() {
            Glow {
                color: PLAYER_INVULN_GLOW,
                blur: 28.0,
            }
        } else {
            Glow {
                color: PLAYER_GLOW,
                blur: 18.0,
            }
        }
    });
    target.fill_rect(min, size, color, 1.0, glow);

    // Remaining jump charges while airborne
    if !player.on_ground {
        draw_jump_pips(player, state.view.scale, target);
    }
}

fn draw_jump_pips(player: &Player, scale: f32, target: &mut impl DrawTarget) {
    let remaining = crate::consts::MAX_JUMPS.saturating_sub(player.jumps_used);
    let top = player.pos.y - player.height;
    for i in 0..remaining {
        let center = Vec2::new(
            player.pos.x - 10.0 * scale + i as f32 * 10.0 * scale,
            top - 8.0 * scale,
        );
        target.fill_circle(center, 3.0 * scale, PIP_COLOR, 0.8, None);
    }
}
