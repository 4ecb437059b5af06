//! The ordered stroke collection and its single open drawing session.
//!
//! Strokes are kept in insertion order, which is also draw order. At most one
//! stroke is open for appends at a time: the last one, while the scene is in
//! [`DrawState::Drawing`]. Calls that do not fit the current state are silent
//! no-ops so the host can forward raw pointer events without bookkeeping.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::camera::{Camera, Vec2};
use crate::color::Rgb;
use crate::config::{CanvasConfig, StrokeLimits};
use crate::consts::MIN_STEP_PX;
use crate::stroke::Stroke;

/// Whether the last stroke is still accepting points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing,
}

/// Owns every stroke for the life of the session.
#[derive(Debug, Clone)]
pub struct Scene {
    strokes: Vec<Stroke>,
    state: DrawState,
    min_step_px: f64,
    stroke_limits: StrokeLimits,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            strokes: Vec::new(),
            state: DrawState::Idle,
            min_step_px: MIN_STEP_PX,
            stroke_limits: StrokeLimits::default(),
        }
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty scene using the sampling step and stroke limits from `config`.
    #[must_use]
    pub fn with_config(config: &CanvasConfig) -> Self {
        Self {
            min_step_px: config.sampling.min_step_px,
            stroke_limits: config.stroke,
            ..Self::default()
        }
    }

    // --- Drawing session ---

    /// Open a new stroke. Ignored while a stroke is already open.
    pub fn begin_stroke(&mut self, brush_px: f64, color: Rgb, camera: &Camera) {
        if self.state == DrawState::Drawing {
            return;
        }
        self.strokes
            .push(Stroke::begin_with_limits(brush_px, color, camera, self.stroke_limits));
        self.state = DrawState::Drawing;
    }

    /// Sample a screen point into the open stroke. Ignored while idle.
    pub fn add_screen_point(&mut self, sx: f64, sy: f64, camera: &Camera) {
        if self.state != DrawState::Drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.add_screen_point(sx, sy, camera, self.min_step_px);
        }
    }

    /// Close the open stroke, dropping it if it has fewer than two points.
    /// Ignored while idle.
    pub fn end_stroke(&mut self) {
        if self.state != DrawState::Drawing {
            return;
        }
        self.state = DrawState::Idle;

        let Some(stroke) = self.strokes.last_mut() else {
            return;
        };
        stroke.finish();
        if stroke.empty() {
            let id = stroke.id();
            self.strokes.pop();
            tracing::debug!(%id, "discarded degenerate stroke");
        } else {
            tracing::debug!(id = %stroke.id(), points = stroke.point_count(), "stroke committed");
        }
    }

    // --- Frame maintenance ---

    /// Subtract `delta` from every point of every stroke.
    ///
    /// Must be paired with [`Camera::shift_world_center`] using the same
    /// `delta`; [`recenter_frame`] does both.
    pub fn translate(&mut self, delta: Vec2) {
        for stroke in &mut self.strokes {
            stroke.translate(delta);
        }
    }

    // --- Queries ---

    /// All strokes in draw order, including the open one.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    #[must_use]
    pub fn state(&self) -> DrawState {
        self.state
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.state == DrawState::Drawing
    }

    /// The stroke currently accepting points, if any.
    #[must_use]
    pub fn active_stroke(&self) -> Option<&Stroke> {
        if self.is_drawing() { self.strokes.last() } else { None }
    }

    #[must_use]
    pub fn min_step_px(&self) -> f64 {
        self.min_step_px
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// Shift the scene and the camera anchor together once the anchor has drifted
/// past the camera's recenter threshold.
///
/// Every stroke moves by `-world_center` and the camera anchor returns to the
/// origin, so nothing changes on screen. Returns the applied delta, or `None`
/// when no recenter was needed.
pub fn recenter_frame(scene: &mut Scene, camera: &mut Camera) -> Option<Vec2> {
    if !camera.needs_recenter() {
        return None;
    }
    let delta = camera.world_center();
    if delta.is_zero() {
        return None;
    }
    scene.translate(delta);
    camera.shift_world_center(delta);
    tracing::debug!(dx = delta.x, dy = delta.y, strokes = scene.len(), "recentered frame");
    Some(delta)
}
