//! Tunable limits for the camera, strokes, sampling, frame projection, and input.
//!
//! All structs deserialize with `#[serde(default)]`, so a host can supply a
//! partial JSON document and inherit the defaults from [`crate::consts`] for
//! everything it leaves out. [`CanvasConfig::validate`] rejects combinations the
//! core cannot honor (inverted ranges, non-finite or non-positive thresholds).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Errors produced when loading or validating a [`CanvasConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{min_field}` ({min}) must be below `{max_field}` ({max})")]
    InvertedRange {
        min_field: &'static str,
        min: f64,
        max_field: &'static str,
        max: f64,
    },
}

/// Zoom range and precision thresholds for [`crate::camera::Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraLimits {
    /// Lowest allowed zoom exponent.
    pub min_zoom_exp: f64,
    /// Highest allowed zoom exponent.
    pub max_zoom_exp: f64,
    /// `zoom_at` rebases when `|zoom_exp|` exceeds this.
    pub rebase_threshold_exp: f64,
    /// World-center magnitude past which the scene should be recentered.
    pub recenter_threshold: f64,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            min_zoom_exp: consts::MIN_ZOOM_EXP,
            max_zoom_exp: consts::MAX_ZOOM_EXP,
            rebase_threshold_exp: consts::REBASE_THRESHOLD_EXP,
            recenter_threshold: consts::RECENTER_THRESHOLD,
        }
    }
}

/// Exponent ranges applied when a stroke stores and reports its width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeLimits {
    /// Floor for the brush width before `log2`.
    pub min_brush_px: f64,
    /// Lowest stored world width exponent.
    pub min_width_exp: f64,
    /// Highest stored world width exponent.
    pub max_width_exp: f64,
    /// Lowest reported on-screen width exponent.
    pub min_screen_exp: f64,
    /// Highest reported on-screen width exponent.
    pub max_screen_exp: f64,
    /// Exponent sums below this report a width of zero.
    pub negligible_exp: f64,
}

impl Default for StrokeLimits {
    fn default() -> Self {
        Self {
            min_brush_px: consts::MIN_BRUSH_PX,
            min_width_exp: consts::MIN_WIDTH_EXP,
            max_width_exp: consts::MAX_WIDTH_EXP,
            min_screen_exp: consts::MIN_SCREEN_EXP,
            max_screen_exp: consts::MAX_SCREEN_EXP,
            negligible_exp: consts::NEGLIGIBLE_WIDTH_EXP,
        }
    }
}

/// Screen-space sampling density for freehand input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Minimum screen distance between consecutive stored points.
    pub min_step_px: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { min_step_px: consts::MIN_STEP_PX }
    }
}

/// Culling and grid parameters for [`crate::render`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub min_visible_width_px: f64,
    pub max_width_px: f64,
    pub grid_target_px: f64,
    pub grid_max_lines: usize,
    pub grid_major_every: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_visible_width_px: consts::MIN_VISIBLE_WIDTH_PX,
            max_width_px: consts::MAX_WIDTH_PX,
            grid_target_px: consts::GRID_TARGET_PX,
            grid_max_lines: consts::GRID_MAX_LINES,
            grid_major_every: consts::GRID_MAJOR_EVERY,
        }
    }
}

/// Wheel and brush UI parameters for [`crate::engine::Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub wheel_px_per_notch: f64,
    pub notches_per_octave: f64,
    pub min_brush_px: f64,
    pub max_brush_px: f64,
    pub brush_step_px: f64,
    pub default_brush_px: f64,
    pub default_brush_rgb: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_px_per_notch: consts::WHEEL_PX_PER_NOTCH,
            notches_per_octave: consts::NOTCHES_PER_OCTAVE,
            min_brush_px: consts::MIN_BRUSH_UI_PX,
            max_brush_px: consts::MAX_BRUSH_UI_PX,
            brush_step_px: consts::BRUSH_STEP_PX,
            default_brush_px: consts::DEFAULT_BRUSH_PX,
            default_brush_rgb: consts::DEFAULT_BRUSH_RGB,
        }
    }
}

/// Complete configuration for one canvas session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub camera: CameraLimits,
    pub stroke: StrokeLimits,
    pub sampling: SamplingConfig,
    pub render: RenderConfig,
    pub input: InputConfig,
}

impl CanvasConfig {
    /// Parse a (possibly partial) JSON document and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or any validation error
    /// from [`CanvasConfig::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every range is ordered and every threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        finite("camera.min_zoom_exp", cam.min_zoom_exp)?;
        finite("camera.max_zoom_exp", cam.max_zoom_exp)?;
        ordered("camera.min_zoom_exp", cam.min_zoom_exp, "camera.max_zoom_exp", cam.max_zoom_exp)?;
        // 2^exp must stay a normal, finite f64.
        ordered("f64 min exponent", -1022.0, "camera.min_zoom_exp", cam.min_zoom_exp)?;
        ordered("camera.max_zoom_exp", cam.max_zoom_exp, "f64 max exponent", 1023.0)?;
        positive("camera.rebase_threshold_exp", cam.rebase_threshold_exp)?;
        positive("camera.recenter_threshold", cam.recenter_threshold)?;

        let stroke = &self.stroke;
        positive("stroke.min_brush_px", stroke.min_brush_px)?;
        finite("stroke.min_width_exp", stroke.min_width_exp)?;
        finite("stroke.max_width_exp", stroke.max_width_exp)?;
        ordered("stroke.min_width_exp", stroke.min_width_exp, "stroke.max_width_exp", stroke.max_width_exp)?;
        finite("stroke.min_screen_exp", stroke.min_screen_exp)?;
        finite("stroke.max_screen_exp", stroke.max_screen_exp)?;
        ordered(
            "stroke.min_screen_exp",
            stroke.min_screen_exp,
            "stroke.max_screen_exp",
            stroke.max_screen_exp,
        )?;
        finite("stroke.negligible_exp", stroke.negligible_exp)?;

        positive("sampling.min_step_px", self.sampling.min_step_px)?;

        let render = &self.render;
        finite("render.min_visible_width_px", render.min_visible_width_px)?;
        positive("render.max_width_px", render.max_width_px)?;
        positive("render.grid_target_px", render.grid_target_px)?;

        let input = &self.input;
        positive("input.wheel_px_per_notch", input.wheel_px_per_notch)?;
        positive("input.notches_per_octave", input.notches_per_octave)?;
        positive("input.min_brush_px", input.min_brush_px)?;
        finite("input.max_brush_px", input.max_brush_px)?;
        ordered("input.min_brush_px", input.min_brush_px, "input.max_brush_px", input.max_brush_px)?;
        positive("input.brush_step_px", input.brush_step_px)?;
        positive("input.default_brush_px", input.default_brush_px)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() { Ok(()) } else { Err(ConfigError::NotFinite { field, value }) }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { field, value }) }
}

fn ordered(min_field: &'static str, min: f64, max_field: &'static str, max: f64) -> Result<(), ConfigError> {
    if min < max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { min_field, min, max_field, max })
    }
}
