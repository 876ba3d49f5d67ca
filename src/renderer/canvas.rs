//! Canvas 2D implementation of the drawing primitives
//!
//! Wraps a `CanvasRenderingContext2d`. Glow maps to the context's shadow;
//! both shadow and global alpha are reset after every call so primitives
//! never leak state into each other.

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawTarget, Glow};

pub struct CanvasTarget {
    context: CanvasRenderingContext2d,
}

impl CanvasTarget {
    /// Grab the 2D context of a canvas element. `None` when the context is
    /// unavailable (the driver skips the frame and retries).
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { context })
    }

    /// Scale the backing store for the device pixel ratio
    pub fn set_transform_for_dpr(&self, dpr: f64) {
        let _ = self.context.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn apply_glow(&self, glow: Option<Glow>) {
        if let Some(g) = glow {
            self.context.set_shadow_color(g.color);
            self.context.set_shadow_blur(g.blur as f64);
        }
    }

    fn reset(&self) {
        self.context.set_shadow_blur(0.0);
        self.context.set_global_alpha(1.0);
    }
}

impl DrawTarget for CanvasTarget {
    fn clear(&mut self, width: f32, height: f32) {
        self.context
            .clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32, glow: Option<Glow>) {
        self.context.begin_path();
        self.context.set_fill_style_str(color);
        self.context.set_global_alpha(alpha as f64);
        self.apply_glow(glow);
        let _ = self.context.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.context.fill();
        self.reset();
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: &str, alpha: f32, glow: Option<Glow>) {
        self.context.set_fill_style_str(color);
        self.context.set_global_alpha(alpha as f64);
        self.apply_glow(glow);
        self.context
            .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
        self.reset();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32, alpha: f32) {
        self.context.begin_path();
        self.context.set_stroke_style_str(color);
        self.context.set_line_width(width as f64);
        self.context.set_global_alpha(alpha as f64);
        self.context.move_to(from.x as f64, from.y as f64);
        self.context.line_to(to.x as f64, to.y as f64);
        self.context.stroke();
        self.reset();
    }
}
