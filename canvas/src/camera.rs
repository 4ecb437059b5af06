#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::config::CameraLimits;

/// A point or displacement in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

/// View transform for the infinite canvas.
///
/// Scale is kept as a base-2 exponent (`zoom_exp`) so the usable zoom range
/// never overflows; the linear factor is derived on demand. The mapping is
///
/// ```text
/// screen = (world - world_center) * 2^zoom_exp + offset_px
/// ```
///
/// `world_center` is the rebase anchor. Rebasing moves it to the world point
/// under the screen origin and zeroes `offset_px`, which keeps the operands of
/// both conversions small without changing what is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    zoom_exp: f64,
    offset_px: Vec2,
    world_center: Vec2,
    limits: CameraLimits,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraLimits::default())
    }
}

impl Camera {
    /// A camera at unit scale with world origin under the screen origin.
    #[must_use]
    pub fn new(limits: CameraLimits) -> Self {
        Self { zoom_exp: 0.0, offset_px: Vec2::ZERO, world_center: Vec2::ZERO, limits }
    }

    // --- State ---

    /// Linear scale factor, screen pixels per world unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.zoom_exp.exp2()
    }

    #[must_use]
    pub fn zoom_exp(&self) -> f64 {
        self.zoom_exp
    }

    #[must_use]
    pub fn offset_px(&self) -> Vec2 {
        self.offset_px
    }

    #[must_use]
    pub fn world_center(&self) -> Vec2 {
        self.world_center
    }

    #[must_use]
    pub fn limits(&self) -> &CameraLimits {
        &self.limits
    }

    // --- Conversions ---

    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn world_from_screen(&self, sx: f64, sy: f64) -> Vec2 {
        let scale = self.scale();
        Vec2 {
            x: (sx - self.offset_px.x) / scale + self.world_center.x,
            y: (sy - self.offset_px.y) / scale + self.world_center.y,
        }
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn screen_from_world(&self, wx: f64, wy: f64) -> Vec2 {
        let scale = self.scale();
        Vec2 {
            x: (wx - self.world_center.x) * scale + self.offset_px.x,
            y: (wy - self.world_center.y) * scale + self.offset_px.y,
        }
    }

    // --- Navigation ---

    /// Zoom by `delta_exp` octaves while keeping the world point under
    /// `(screen_x, screen_y)` fixed on screen.
    ///
    /// The exponent saturates at the configured bounds. When the resulting
    /// `|zoom_exp|` is past the rebase threshold the camera rebases before
    /// returning. A NaN delta is ignored, and so is any zoom whose offset or
    /// anchor would leave the finite range; the camera is then left untouched.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, delta_exp: f64) {
        if delta_exp.is_nan() || !screen_x.is_finite() || !screen_y.is_finite() {
            return;
        }

        let mut next = *self;
        let before = next.world_from_screen(screen_x, screen_y);
        next.zoom_exp = (next.zoom_exp + delta_exp).clamp(self.limits.min_zoom_exp, self.limits.max_zoom_exp);
        let after = next.world_from_screen(screen_x, screen_y);
        next.offset_px += (after - before) * next.scale();
        if !next.offset_px.is_finite() {
            tracing::debug!(screen_x, screen_y, delta_exp, "zoom would overflow offset; ignored");
            return;
        }
        if next.zoom_exp.abs() > next.limits.rebase_threshold_exp && !next.try_rebase() {
            tracing::debug!(screen_x, screen_y, delta_exp, "zoom would overflow anchor; ignored");
            return;
        }

        *self = next;
        tracing::trace!(zoom_exp = self.zoom_exp, screen_x, screen_y, "camera zoomed");
    }

    /// Translate the view by a screen-space delta.
    pub fn pan_px(&mut self, dx: f64, dy: f64) {
        let next = self.offset_px + Vec2::new(dx, dy);
        if next.is_finite() {
            self.offset_px = next;
        }
    }

    /// Set the screen-space offset outright, e.g. to the new viewport center after a resize.
    pub fn set_offset_px(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.offset_px = Vec2::new(x, y);
        }
    }

    // --- Precision management ---

    /// Move the anchor to the world point under the screen origin and zero the offset.
    ///
    /// Both conversions return the same values afterwards, up to rounding.
    /// Does nothing when the new anchor would not be finite.
    pub fn rebase(&mut self) {
        self.try_rebase();
    }

    fn try_rebase(&mut self) -> bool {
        let anchor = self.world_from_screen(0.0, 0.0);
        if !anchor.is_finite() {
            return false;
        }
        self.world_center = anchor;
        self.offset_px = Vec2::ZERO;
        tracing::debug!(
            world_center_x = self.world_center.x,
            world_center_y = self.world_center.y,
            zoom_exp = self.zoom_exp,
            "camera rebased"
        );
        true
    }

    /// Whether the anchor has drifted far enough that stored geometry should be shifted.
    #[must_use]
    pub fn needs_recenter(&self) -> bool {
        let limit = self.limits.recenter_threshold;
        self.world_center.x.abs() > limit || self.world_center.y.abs() > limit
    }

    /// Subtract `delta` from the anchor after the host shifted all geometry by `delta`.
    pub fn shift_world_center(&mut self, delta: Vec2) {
        let next = self.world_center - delta;
        if next.is_finite() {
            self.world_center = next;
        }
    }
}
