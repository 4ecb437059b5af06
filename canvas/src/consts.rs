//! Shared numeric defaults for the canvas crate.
//!
//! Every value here is only a default: the live value is carried by the
//! matching field of [`crate::config::CanvasConfig`].

// ── Camera ──────────────────────────────────────────────────────

/// Lowest zoom exponent (log2 of scale). 2^-55 px per world unit.
pub const MIN_ZOOM_EXP: f64 = -55.0;

/// Highest zoom exponent (log2 of scale). 2^45 px per world unit.
pub const MAX_ZOOM_EXP: f64 = 45.0;

/// `zoom_at` rebases once `|zoom_exp|` passes this value.
pub const REBASE_THRESHOLD_EXP: f64 = 1.0;

/// `needs_recenter` fires once either world-center component passes this magnitude.
pub const RECENTER_THRESHOLD: f64 = 1e6;

// ── Stroke ──────────────────────────────────────────────────────

/// Floor applied to brush widths before taking `log2`.
pub const MIN_BRUSH_PX: f64 = 1e-12;

/// Lowest stored stroke width exponent (world units).
pub const MIN_WIDTH_EXP: f64 = -60.0;

/// Highest stored stroke width exponent (world units).
pub const MAX_WIDTH_EXP: f64 = 60.0;

/// Lowest on-screen width exponent handed to a renderer.
pub const MIN_SCREEN_EXP: f64 = -24.0;

/// Highest on-screen width exponent handed to a renderer (4096 px).
pub const MAX_SCREEN_EXP: f64 = 12.0;

/// Width exponent sums below this render as zero width.
pub const NEGLIGIBLE_WIDTH_EXP: f64 = -64.0;

// ── Sampling ────────────────────────────────────────────────────

/// Minimum screen distance between consecutive stroke samples.
pub const MIN_STEP_PX: f64 = 1.5;

// ── Frame projection ────────────────────────────────────────────

/// Strokes thinner than this on screen are culled.
pub const MIN_VISIBLE_WIDTH_PX: f64 = 0.05;

/// On-screen stroke widths are capped here.
pub const MAX_WIDTH_PX: f64 = 4096.0;

/// Preferred on-screen spacing between grid lines.
pub const GRID_TARGET_PX: f64 = 48.0;

/// Per-axis grid line budget.
pub const GRID_MAX_LINES: usize = 500;

/// Every Nth grid line is drawn as a major line.
pub const GRID_MAJOR_EVERY: usize = 5;

// ── Input ───────────────────────────────────────────────────────

/// Wheel pixels reported for one notch of a classic mouse wheel.
pub const WHEEL_PX_PER_NOTCH: f64 = 120.0;

/// Wheel notches needed to double (or halve) the scale.
pub const NOTCHES_PER_OCTAVE: f64 = 6.0;

/// Smallest brush width the UI allows.
pub const MIN_BRUSH_UI_PX: f64 = 0.5;

/// Largest brush width the UI allows.
pub const MAX_BRUSH_UI_PX: f64 = 256.0;

/// Brush width change per `[` / `]` key press.
pub const BRUSH_STEP_PX: f64 = 1.0;

/// Brush width a fresh session starts with.
pub const DEFAULT_BRUSH_PX: f64 = 4.0;

/// Brush color a fresh session starts with (light grey).
pub const DEFAULT_BRUSH_RGB: u32 = 0x00E6_E6E6;
