//! Difficulty ramp
//!
//! A pure function of survival time. Flat for the first 5 seconds, smooth
//! ramp over the next 20, then a plateau plus a capped step bonus every 18
//! seconds past the 25 second mark. Evaluated fresh each frame because it
//! also gates the spawner.

use crate::consts::{MAX_BALLS, MIN_BALLS};
use crate::{lerp, smoothstep01};

/// Difficulty outputs for one instant of survival time
///
/// Quantities with length units (`wind_accel`, `spawn_speed`,
/// `gravity_bonus`) are pre-multiplied by the display scale;
/// `fill_prob` and `ramp` are dimensionless.
#[derive(Debug, Clone, Copy)]
pub struct Difficulty {
    /// Smoothstep ramp in [0, 1]
    pub ramp: f32,
    /// Step bonus accrued past 25s, capped at 6
    pub extra: u32,
    /// Live ball population the spawner maintains
    pub target_balls: usize,
    /// Continuous acceleration pushing balls along their flow direction
    pub wind_accel: f32,
    /// Base horizontal speed for sweep spawns
    pub spawn_speed: f32,
    /// Per-check chance of topping the population up by one
    pub fill_prob: f32,
    /// Added to every newly spawned ball's gravity
    pub gravity_bonus: f32,
}

/// Evaluate the ramp at `survival_secs`, scaled for the current display
pub fn difficulty_at(survival_secs: f32, scale: f32) -> Difficulty {
    let t = smoothstep01((survival_secs - 5.0) / 20.0);
    let extra = (((survival_secs - 25.0).max(0.0) / 18.0).floor() as u32).min(6);
    let extra_f = extra as f32;

    let base_count = lerp(3.0, 8.0, t).round() as i32 + extra as i32;
    let target_balls = base_count.clamp(MIN_BALLS as i32, MAX_BALLS as i32) as usize;

    Difficulty {
        ramp: t,
        extra,
        target_balls,
        wind_accel: (lerp(18.0, 130.0, t) + (extra_f * 10.0).min(60.0)) * scale,
        spawn_speed: (lerp(240.0, 420.0, t) + (extra_f * 18.0).min(140.0)) * scale,
        fill_prob: lerp(0.02, 0.09, t) + (extra_f * 0.004).min(0.04),
        gravity_bonus: (lerp(0.0, 700.0, t) + (extra_f * 80.0).min(500.0)) * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_flat_opening() {
        // Nothing ramps before the 5 second mark
        let a = difficulty_at(0.0, 1.0);
        let b = difficulty_at(4.9, 1.0);
        assert_eq!(a.ramp, 0.0);
        assert_eq!(b.ramp, 0.0);
        assert_eq!(a.target_balls, 3);
        assert_eq!(a.wind_accel, b.wind_accel);
        assert_eq!(a.spawn_speed, b.spawn_speed);
    }

    #[test]
    fn test_plateau_values() {
        let d = difficulty_at(25.0, 1.0);
        assert_eq!(d.ramp, 1.0);
        assert_eq!(d.extra, 0);
        assert_eq!(d.target_balls, 8);
        assert!((d.wind_accel - 130.0).abs() < 1e-3);
        assert!((d.spawn_speed - 420.0).abs() < 1e-3);
        assert!((d.fill_prob - 0.09).abs() < 1e-6);
        assert!((d.gravity_bonus - 700.0).abs() < 1e-3);
    }

    #[test]
    fn test_extra_steps_every_18s_capped() {
        assert_eq!(difficulty_at(42.9, 1.0).extra, 0);
        assert_eq!(difficulty_at(43.1, 1.0).extra, 1);
        assert_eq!(difficulty_at(25.0 + 18.0 * 3.0 + 0.1, 1.0).extra, 3);
        assert_eq!(difficulty_at(10_000.0, 1.0).extra, 6);
        assert_eq!(difficulty_at(10_000.0, 1.0).target_balls, MAX_BALLS);
    }

    #[test]
    fn test_target_stays_in_population_bounds() {
        for s in 0..600 {
            let d = difficulty_at(s as f32, 1.0);
            assert!((MIN_BALLS..=MAX_BALLS).contains(&d.target_balls));
        }
    }

    #[test]
    fn test_length_outputs_follow_scale() {
        let base = difficulty_at(30.0, 1.0);
        let half = difficulty_at(30.0, 0.5);
        assert!((half.wind_accel - base.wind_accel * 0.5).abs() < 1e-3);
        assert!((half.spawn_speed - base.spawn_speed * 0.5).abs() < 1e-3);
        assert!((half.gravity_bonus - base.gravity_bonus * 0.5).abs() < 1e-3);
        // fill probability is dimensionless
        assert_eq!(half.fill_prob, base.fill_prob);
    }

    proptest! {
        /// Every output is monotone non-decreasing in survival time
        #[test]
        fn prop_outputs_monotone(s1 in 0.0f32..600.0, delta in 0.0f32..600.0) {
            let a = difficulty_at(s1, 1.0);
            let b = difficulty_at(s1 + delta, 1.0);
            prop_assert!(b.target_balls >= a.target_balls);
            prop_assert!(b.wind_accel >= a.wind_accel);
            prop_assert!(b.spawn_speed >= a.spawn_speed);
            prop_assert!(b.fill_prob >= a.fill_prob);
            prop_assert!(b.gravity_bonus >= a.gravity_bonus);
            prop_assert!(b.extra >= a.extra);
        }

        /// Pure function: same inputs, same outputs
        #[test]
        fn prop_pure(s in 0.0f32..600.0, scale in 0.35f32..1.0) {
            let a = difficulty_at(s, scale);
            let b = difficulty_at(s, scale);
            prop_assert_eq!(a.target_balls, b.target_balls);
            prop_assert_eq!(a.wind_accel, b.wind_accel);
            prop_assert_eq!(a.spawn_speed, b.spawn_speed);
            prop_assert_eq!(a.fill_prob, b.fill_prob);
            prop_assert_eq!(a.gravity_bonus, b.gravity_bonus);
        }
    }
}
