//! Player-vs-ball collision detection
//!
//! Closest-point test between a circle and an axis-aligned rectangle: clamp
//! the ball center into the player's bounding box and compare the squared
//! distance to the squared radius. The first hit ends the session, so the
//! scan stops at the first overlap.

use glam::Vec2;

use super::state::{Ball, Player};

/// Circle-vs-AABB overlap via the closest point on the rectangle
#[inline]
pub fn circle_hits_rect(center: Vec2, radius: f32, rect_min: Vec2, rect_max: Vec2) -> bool {
    let closest = center.clamp(rect_min, rect_max);
    center.distance_squared(closest) <= radius * radius
}

/// First ball overlapping the player, if any
pub fn first_hit<'a>(player: &Player, balls: &'a [Ball]) -> Option<&'a Ball> {
    let (min, max) = player.aabb();
    balls
        .iter()
        .find(|b| circle_hits_rect(b.pos, b.radius, min, max))
}
