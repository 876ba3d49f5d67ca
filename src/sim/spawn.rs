//! Ball spawning and population maintenance
//!
//! Two entry modes. Drop: above the visible top, inset from the edges,
//! falling mostly downward. Sweep: just outside the left or right edge,
//! moving horizontally inward, placed low so early balls track jump height.
//! Droppers bias hard toward the drop mode as difficulty rises.

use glam::Vec2;
use rand::Rng;

use super::difficulty::difficulty_at;
use super::state::{Ball, GameState, TrailPoint};
use super::templates::{BallKind, pick_template};
use crate::consts::MIN_BALLS;
use crate::lerp;

/// Create one ball consistent with the current difficulty and scale
pub fn spawn_ball(state: &mut GameState, survival_secs: f32) {
    let view = state.view;
    let sc = view.scale;
    let diff = difficulty_at(survival_secs, sc);
    let t = diff.ramp;

    let rng = &mut state.rng;
    let template = pick_template(rng);

    let radius = template.radius.sample(rng) * sc;
    let restitution = template.restitution.sample(rng);
    let friction = template.friction.sample(rng);
    let drag = template.drag.sample(rng);

    let prefer_drop = if template.kind == BallKind::Dropper {
        lerp(0.2, 0.62, t)
    } else {
        lerp(0.18, 0.38, t)
    };

    let (pos, vel, flow_dir) = if rng.random::<f32>() < prefer_drop {
        // Drop: enter from above, inset from both edges
        let x = 70.0 * sc + rng.random::<f32>() * (view.width - 140.0 * sc);
        let y = -radius - 50.0 * sc;
        let flow = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let vx = flow * lerp(120.0, 240.0, t) * template.vx_scale * sc;
        let vy = lerp(80.0, 190.0, t) * template.vy_scale * sc;
        (Vec2::new(x, y), Vec2::new(vx, vy), flow)
    } else {
        // Sweep: enter from a side edge, biased toward low altitude; the
        // bias relaxes as difficulty rises
        let from_left = rng.random_bool(0.5);
        let flow = if from_left { 1.0 } else { -1.0 };
        let x = if from_left {
            -radius - 50.0 * sc
        } else {
            view.width + radius + 50.0 * sc
        };
        let altitude = if rng.random::<f32>() < lerp(0.88, 0.75, t) {
            rng.random::<f32>() * 90.0 * sc
        } else {
            90.0 * sc + rng.random::<f32>() * 80.0 * sc
        };
        let y = view.ground_y - radius - altitude;
        let vx = flow
            * (diff.spawn_speed + rng.random::<f32>() * lerp(140.0, 260.0, t) * sc)
            * template.vx_scale;
        let vy = (-60.0 + rng.random::<f32>() * 120.0) * template.vy_scale * 0.55 * sc;
        (Vec2::new(x, y), Vec2::new(vx, vy), flow)
    };

    let gravity = template.gravity.sample(rng) * sc + diff.gravity_bonus;

    state.balls.push(Ball {
        kind: template.kind,
        pos,
        radius,
        vel,
        restitution,
        friction,
        drag,
        gravity,
        flow_dir,
        // Pre-fill the ring with invisible points so the trail fades in
        trail: vec![TrailPoint { pos, alpha: 0.0 }; template.trail_len],
        trail_len: template.trail_len,
        color: template.color,
        glow: template.glow,
        trail_color: template.trail_color,
    });
}

/// Probabilistic top-up toward the difficulty target.
///
/// Each pass below target rolls `fill_prob` and stops on the first miss,
/// which spreads spawns over frames instead of bursting. The floor of
/// `MIN_BALLS` is topped up unconditionally.
pub fn maintain_population(state: &mut GameState, survival_secs: f32) {
    let diff = difficulty_at(survival_secs, state.view.scale);

    while state.balls.len() < diff.target_balls {
        if state.balls.len() < MIN_BALLS || state.rng.random::<f32>() < diff.fill_prob {
            spawn_ball(state, survival_secs);
        } else {
            break;
        }
    }
    while state.balls.len() < MIN_BALLS {
        spawn_ball(state, survival_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::difficulty_at;
    use crate::sim::templates::BALL_TEMPLATES;

    fn template_for(ball: &Ball) -> &'static crate::sim::templates::BallTemplate {
        BALL_TEMPLATES.iter().find(|t| t.kind == ball.kind).unwrap()
    }

    #[test]
    fn test_spawn_samples_within_template_ranges() {
        let mut state = GameState::new(21);
        state.balls.clear();
        for _ in 0..200 {
            spawn_ball(&mut state, 0.0);
        }
        for ball in &state.balls {
            let t = template_for(ball);
            assert!(ball.radius >= t.radius.min && ball.radius <= t.radius.max);
            assert!(ball.restitution >= t.restitution.min && ball.restitution <= t.restitution.max);
            assert!(ball.friction >= t.friction.min && ball.friction <= t.friction.max);
            assert!(ball.drag >= t.drag.min && ball.drag <= t.drag.max);
            assert!(ball.flow_dir == -1.0 || ball.flow_dir == 1.0);
            assert_eq!(ball.trail.len(), t.trail_len);
            assert!(ball.trail.iter().all(|p| p.alpha == 0.0));
        }
    }

    #[test]
    fn test_spawn_gravity_includes_difficulty_bonus() {
        let mut state = GameState::new(22);
        state.balls.clear();
        let survival = 60.0;
        let bonus = difficulty_at(survival, state.view.scale).gravity_bonus;
        for _ in 0..100 {
            spawn_ball(&mut state, survival);
        }
        for ball in &state.balls {
            let t = template_for(ball);
            assert!(ball.gravity >= t.gravity.min + bonus);
            assert!(ball.gravity <= t.gravity.max + bonus);
        }
    }

    #[test]
    fn test_spawn_enters_from_outside_the_stage() {
        let mut state = GameState::new(23);
        state.balls.clear();
        for _ in 0..200 {
            spawn_ball(&mut state, 10.0);
        }
        for ball in &state.balls {
            let above = ball.pos.y < 0.0;
            let beside = ball.pos.x < 0.0 || ball.pos.x > state.view.width;
            assert!(above || beside, "spawned inside the stage: {:?}", ball.pos);
            if beside {
                // Sweep balls always move inward
                if ball.pos.x < 0.0 {
                    assert!(ball.vel.x > 0.0);
                } else {
                    assert!(ball.vel.x < 0.0);
                }
            } else {
                // Drop balls always move downward
                assert!(ball.vel.y > 0.0);
            }
        }
    }

    #[test]
    fn test_population_floor_is_unconditional() {
        let mut state = GameState::new(24);
        state.balls.clear();
        maintain_population(&mut state, 0.0);
        assert!(state.balls.len() >= MIN_BALLS);
    }

    #[test]
    fn test_population_never_exceeds_target() {
        let mut state = GameState::new(25);
        for s in [0.0f32, 10.0, 30.0, 120.0, 600.0] {
            for _ in 0..200 {
                maintain_population(&mut state, s);
            }
            let target = difficulty_at(s, state.view.scale).target_balls;
            assert!(state.balls.len() <= target.max(MIN_BALLS));
        }
    }
}
