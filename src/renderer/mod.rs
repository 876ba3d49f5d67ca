//! Rendering behind an opaque primitive trait
//!
//! The sim knows nothing about drawing; the scene module turns a
//! `GameState` into calls against `DrawTarget`, and the canvas module
//! implements that trait over a browser 2D context. Tests drive the scene
//! with a recording target instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasTarget;
pub use scene::render;

use glam::Vec2;

/// Optional glow halo around a filled shape
#[derive(Debug, Clone, Copy)]
pub struct Glow<'a> {
    pub color: &'a str,
    pub blur: f32,
}

/// Drawing primitives the game consumes; color strings are opaque tokens
pub trait DrawTarget {
    /// Wipe the full stage
    fn clear(&mut self, width: f32, height: f32);

    /// Filled circle, optionally glowing
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32, glow: Option<Glow>);

    /// Filled axis-aligned rectangle, optionally glowing
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: &str, alpha: f32, glow: Option<Glow>);

    /// Stroked line segment
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32, alpha: f32);
}
