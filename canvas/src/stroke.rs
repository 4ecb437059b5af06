//! Freehand strokes stored as resolution-independent world polylines.
//!
//! A stroke never keeps a reference to the camera. It reads the camera passed
//! into each call: once at creation to pin its width relative to the current
//! zoom, and on every sample to decide whether the new point is far enough
//! from the previous one on screen.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use uuid::Uuid;

use crate::camera::{Camera, Vec2};
use crate::color::Rgb;
use crate::config::StrokeLimits;

/// Unique identifier for a stroke.
pub type StrokeId = Uuid;

/// One continuous freehand gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    /// log2 of the world-space brush width. Fixed at creation.
    width_exp: f64,
    points: Vec<Vec2>,
    color: Rgb,
    limits: StrokeLimits,
}

impl Stroke {
    /// Start an empty stroke with default [`StrokeLimits`].
    #[must_use]
    pub fn begin(brush_px: f64, color: Rgb, camera: &Camera) -> Self {
        Self::begin_with_limits(brush_px, color, camera, StrokeLimits::default())
    }

    /// Start an empty stroke whose width is `brush_px` at the camera's current zoom.
    ///
    /// The brush is floored at `limits.min_brush_px` before `log2`, so zero,
    /// negative, and NaN widths all become the thinnest representable brush.
    #[must_use]
    pub fn begin_with_limits(brush_px: f64, color: Rgb, camera: &Camera, limits: StrokeLimits) -> Self {
        let safe_px = brush_px.max(limits.min_brush_px);
        let width_exp = (safe_px.log2() - camera.zoom_exp()).clamp(limits.min_width_exp, limits.max_width_exp);
        Self { id: Uuid::new_v4(), width_exp, points: Vec::new(), color, limits }
    }

    /// Sample a screen-space input point.
    ///
    /// The first point always lands. Later points land only when they are at
    /// least `min_step_px` away from the previous point as seen through
    /// `camera` right now, so sample density follows the screen, not the zoom.
    pub fn add_screen_point(&mut self, sx: f64, sy: f64, camera: &Camera, min_step_px: f64) {
        if !sx.is_finite() || !sy.is_finite() {
            return;
        }
        let world = camera.world_from_screen(sx, sy);

        let Some(last) = self.points.last() else {
            self.points.push(world);
            return;
        };

        let last_screen = camera.screen_from_world(last.x, last.y);
        if (Vec2::new(sx, sy) - last_screen).length() >= min_step_px {
            self.points.push(world);
        }
    }

    /// Close the stroke; a stroke with fewer than two points is cleared.
    pub fn finish(&mut self) {
        if self.points.len() < 2 {
            self.points.clear();
        }
    }

    /// Subtract `delta` from every point. Used when the whole frame is recentered.
    pub fn translate(&mut self, delta: Vec2) {
        if delta.is_zero() || !delta.is_finite() {
            return;
        }
        for point in &mut self.points {
            *point -= delta;
        }
    }

    /// On-screen width in pixels at `current_zoom_exp`.
    ///
    /// Returns 0 when the width is negligibly small (or the exponent is not
    /// finite); otherwise the exponent is clamped into the renderable range, so
    /// the result is always finite.
    #[must_use]
    pub fn width_screen(&self, current_zoom_exp: f64) -> f64 {
        let exp_sum = self.width_exp + current_zoom_exp;
        if !exp_sum.is_finite() || exp_sum < self.limits.negligible_exp {
            return 0.0;
        }
        exp_sum.clamp(self.limits.min_screen_exp, self.limits.max_screen_exp).exp2()
    }

    // --- Read-only views ---

    #[must_use]
    pub fn id(&self) -> StrokeId {
        self.id
    }

    #[must_use]
    pub fn points_world(&self) -> &[Vec2] {
        &self.points
    }

    #[must_use]
    pub fn color_rgb(&self) -> Rgb {
        self.color
    }

    #[must_use]
    pub fn width_exp(&self) -> f64 {
        self.width_exp
    }

    /// Number of stored points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// True when fewer than two points are stored.
    #[must_use]
    pub fn empty(&self) -> bool {
        self.points.len() < 2
    }
}
