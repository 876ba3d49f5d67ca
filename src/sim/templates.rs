//! Ball archetype catalog
//!
//! Five archetypes with characteristic parameter ranges. Every numeric range
//! is sampled per instance at spawn time, so two balls of the same archetype
//! still differ. Visual tokens (CSS color strings) are opaque to the sim and
//! only carried through to the renderer.

use rand::Rng;

/// Ball archetype identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    /// Small, quick, favors horizontal speed
    TinyFast,
    /// Large and sluggish
    BigSlow,
    /// High restitution, keeps its bounce
    Bouncer,
    /// Heavy gravity, arrives from above
    Dropper,
    /// Fast horizontal tracker hugging the ground
    Sniper,
}

/// Closed sampling range
#[derive(Debug, Clone, Copy)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample from the range
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }
}

/// Immutable per-archetype tuning
#[derive(Debug, Clone, Copy)]
pub struct BallTemplate {
    pub kind: BallKind,
    pub radius: Span,
    pub restitution: Span,
    pub friction: Span,
    pub drag: Span,
    pub gravity: Span,
    /// Multipliers applied to spawn velocity
    pub vx_scale: f32,
    pub vy_scale: f32,
    /// Trail ring capacity
    pub trail_len: usize,
    /// Roulette selection weight
    pub weight: f32,
    pub color: &'static str,
    pub glow: &'static str,
    pub trail_color: &'static str,
}

/// The full catalog. Order matters: roulette ties resolve to the earlier
/// entry, and the first entry is the overflow fallback.
pub static BALL_TEMPLATES: [BallTemplate; 5] = [
    BallTemplate {
        kind: BallKind::TinyFast,
        radius: Span::new(8.0, 13.0),
        restitution: Span::new(0.82, 0.92),
        friction: Span::new(0.01, 0.05),
        drag: Span::new(0.0012, 0.0035),
        gravity: Span::new(1600.0, 2200.0),
        vx_scale: 1.35,
        vy_scale: 1.0,
        trail_len: 18,
        weight: 30.0,
        color: "rgba(34,211,238,0.95)",
        glow: "rgba(34,211,238,0.60)",
        trail_color: "rgba(34,211,238,0.26)",
    },
    BallTemplate {
        kind: BallKind::BigSlow,
        radius: Span::new(18.0, 28.0),
        restitution: Span::new(0.78, 0.88),
        friction: Span::new(0.02, 0.07),
        drag: Span::new(0.0015, 0.0045),
        gravity: Span::new(1500.0, 2100.0),
        vx_scale: 0.9,
        vy_scale: 0.9,
        trail_len: 12,
        weight: 18.0,
        color: "rgba(124,92,255,0.92)",
        glow: "rgba(124,92,255,0.55)",
        trail_color: "rgba(124,92,255,0.20)",
    },
    BallTemplate {
        kind: BallKind::Bouncer,
        radius: Span::new(12.0, 18.0),
        restitution: Span::new(0.9, 0.97),
        friction: Span::new(0.01, 0.05),
        drag: Span::new(0.001, 0.003),
        gravity: Span::new(1400.0, 2000.0),
        vx_scale: 1.05,
        vy_scale: 1.25,
        trail_len: 20,
        weight: 16.0,
        color: "rgba(250,204,21,0.95)",
        glow: "rgba(250,204,21,0.55)",
        trail_color: "rgba(250,204,21,0.22)",
    },
    BallTemplate {
        kind: BallKind::Dropper,
        radius: Span::new(10.0, 16.0),
        restitution: Span::new(0.84, 0.93),
        friction: Span::new(0.01, 0.06),
        drag: Span::new(0.0012, 0.0038),
        gravity: Span::new(1900.0, 2600.0),
        vx_scale: 0.85,
        vy_scale: 1.35,
        trail_len: 16,
        weight: 22.0,
        color: "rgba(248,113,113,0.92)",
        glow: "rgba(248,113,113,0.55)",
        trail_color: "rgba(248,113,113,0.22)",
    },
    BallTemplate {
        kind: BallKind::Sniper,
        radius: Span::new(9.0, 14.0),
        restitution: Span::new(0.8, 0.9),
        friction: Span::new(0.01, 0.05),
        drag: Span::new(0.0009, 0.0026),
        gravity: Span::new(1500.0, 2200.0),
        vx_scale: 1.6,
        vy_scale: 0.85,
        trail_len: 14,
        weight: 14.0,
        color: "rgba(167,139,250,0.92)",
        glow: "rgba(167,139,250,0.55)",
        trail_color: "rgba(167,139,250,0.22)",
    },
];

/// Roulette pick proportional to template weight
pub fn pick_template(rng: &mut impl Rng) -> &'static BallTemplate {
    let total: f32 = BALL_TEMPLATES.iter().map(|t| t.weight).sum();
    let mut roll = rng.random::<f32>() * total;
    for template in &BALL_TEMPLATES {
        roll -= template.weight;
        if roll <= 0.0 {
            return template;
        }
    }
    // Floating point can leave a sliver of roll unaccounted for
    &BALL_TEMPLATES[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_span_sample_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let span = Span::new(8.0, 13.0);
        for _ in 0..1000 {
            let v = span.sample(&mut rng);
            assert!((8.0..=13.0).contains(&v));
        }
    }

    #[test]
    fn test_catalog_ranges_are_ordered() {
        for t in &BALL_TEMPLATES {
            assert!(t.radius.min <= t.radius.max);
            assert!(t.restitution.min <= t.restitution.max);
            assert!(t.friction.min <= t.friction.max);
            assert!(t.drag.min <= t.drag.max);
            assert!(t.gravity.min <= t.gravity.max);
            assert!(t.weight > 0.0);
            assert!(t.trail_len > 0);
        }
    }

    #[test]
    fn test_pick_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; 5];
        for _ in 0..2000 {
            let t = pick_template(&mut rng);
            seen[t.kind as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every archetype should appear");
    }

    #[test]
    fn test_pick_respects_weights_roughly() {
        let mut rng = Pcg32::seed_from_u64(1234);
        let mut counts = [0usize; 5];
        let n = 20_000;
        for _ in 0..n {
            counts[pick_template(&mut rng).kind as usize] += 1;
        }
        // TinyFast (weight 30) must dominate Sniper (weight 14)
        assert!(counts[BallKind::TinyFast as usize] > counts[BallKind::Sniper as usize]);
        // Every share should be within a few points of its expected value
        let total: f32 = BALL_TEMPLATES.iter().map(|t| t.weight).sum();
        for (i, t) in BALL_TEMPLATES.iter().enumerate() {
            let expected = t.weight / total;
            let actual = counts[i] as f32 / n as f32;
            assert!(
                (expected - actual).abs() < 0.02,
                "{:?}: expected {expected:.3}, got {actual:.3}",
                t.kind
            );
        }
    }
}
