//! Frame projection: turns scene and camera state into a screen-space draw list.
//!
//! Nothing here touches pixels. A host rasterizer walks [`Frame`] in order:
//! grid lines first, then strokes bottom to top, then the HUD label. All values
//! in a `Frame` are finite; anything that would not be (extreme zoom, culled
//! widths) is dropped here instead of reaching the rasterizer.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Camera, Vec2};
use crate::color::Rgb;
use crate::config::RenderConfig;
use crate::scene::Scene;
use crate::stroke::{Stroke, StrokeId};

/// Steps tried, in order, for each power of ten when choosing a grid spacing.
const GRID_STEP_MULTIPLIERS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// One stroke projected to screen space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokePath {
    pub id: StrokeId,
    pub color: Rgb,
    /// Pen width in pixels, already culled and capped.
    pub width_px: f64,
    /// Polyline vertices in screen pixels.
    pub points: Vec<Vec2>,
}

/// One axis-aligned grid line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    /// Screen x for vertical lines, screen y for horizontal ones.
    pub screen: f64,
    pub major: bool,
}

/// Background grid for the visible region.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GridLines {
    /// World distance between adjacent lines, or 0 when no grid is drawn.
    pub world_step: f64,
    pub vertical: Vec<GridLine>,
    pub horizontal: Vec<GridLine>,
}

/// Everything a rasterizer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub grid: GridLines,
    pub strokes: Vec<StrokePath>,
    pub hud: String,
}

/// Project the whole scene.
///
/// `viewport_w` and `viewport_h` are in screen pixels.
#[must_use]
pub fn build_frame(scene: &Scene, camera: &Camera, config: &RenderConfig, viewport_w: f64, viewport_h: f64) -> Frame {
    let strokes = scene
        .strokes()
        .iter()
        .filter_map(|stroke| project_stroke(stroke, camera, config))
        .collect();

    Frame {
        grid: grid_lines(camera, config, viewport_w, viewport_h),
        strokes,
        hud: hud_label(camera),
    }
}

/// Project one stroke, or `None` when it is degenerate, too thin to see, or off the float range.
#[must_use]
pub fn project_stroke(stroke: &Stroke, camera: &Camera, config: &RenderConfig) -> Option<StrokePath> {
    if stroke.empty() {
        return None;
    }

    let width_px = stroke.width_screen(camera.zoom_exp());
    if width_px < config.min_visible_width_px {
        return None;
    }

    let points = stroke
        .points_world()
        .iter()
        .map(|p| camera.screen_from_world(p.x, p.y))
        .collect::<Vec<_>>();
    if !points.iter().all(|p| p.is_finite()) {
        return None;
    }

    Some(StrokePath {
        id: stroke.id(),
        color: stroke.color_rgb(),
        width_px: width_px.min(config.max_width_px),
        points,
    })
}

/// Pick the grid spacing: the target pixel spacing in world units, rounded up
/// to 1, 2, or 5 times a power of ten.
#[must_use]
pub fn grid_world_step(scale: f64, target_px: f64) -> Option<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }
    let raw = target_px / scale;
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }

    let base = 10f64.powf(raw.max(f64::MIN_POSITIVE).log10().floor());
    GRID_STEP_MULTIPLIERS
        .iter()
        .map(|m| m * base)
        .find(|step| *step >= raw)
        .or(Some(raw))
}

/// Grid lines covering the viewport, capped at `grid_max_lines + 2` per axis.
#[must_use]
pub fn grid_lines(camera: &Camera, config: &RenderConfig, viewport_w: f64, viewport_h: f64) -> GridLines {
    let Some(step) = grid_world_step(camera.scale(), config.grid_target_px) else {
        return GridLines::default();
    };

    let top_left = camera.world_from_screen(0.0, 0.0);
    let bottom_right = camera.world_from_screen(viewport_w, viewport_h);
    if !top_left.is_finite() || !bottom_right.is_finite() {
        return GridLines::default();
    }

    let limit = config.grid_max_lines + 2;
    let major_every = config.grid_major_every.max(1);

    let vertical = axis_lines(top_left.x, bottom_right.x, step, limit, major_every, |x| {
        camera.screen_from_world(x, 0.0).x
    });
    let horizontal = axis_lines(top_left.y, bottom_right.y, step, limit, major_every, |y| {
        camera.screen_from_world(0.0, y).y
    });

    GridLines { world_step: step, vertical, horizontal }
}

fn axis_lines(
    a: f64,
    b: f64,
    step: f64,
    limit: usize,
    major_every: usize,
    to_screen: impl Fn(f64) -> f64,
) -> Vec<GridLine> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let start = (lo / step).floor() * step;

    let mut lines = Vec::new();
    let mut world = start;
    while lines.len() < limit && world <= hi + step {
        let screen = to_screen(world);
        if !screen.is_finite() {
            break;
        }
        lines.push(GridLine { screen, major: lines.len() % major_every == 0 });
        let next = world + step;
        // Step too small to advance at this magnitude.
        if next <= world {
            break;
        }
        world = next;
    }
    lines
}

/// Zoom readout for the corner overlay, e.g. `"Scale: 2^3.50"`.
#[must_use]
pub fn hud_label(camera: &Camera) -> String {
    format!("Scale: 2^{:.2}", camera.zoom_exp())
}
