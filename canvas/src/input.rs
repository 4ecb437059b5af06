//! Input model: modes, buttons, keys, the tagged event type, and the gesture state machine.
//!
//! `InputEvent` is what a host produces from its raw device events. It is a
//! plain tagged value (`{"type": "pointer_down", ...}` on the wire) so scripted
//! sessions can be replayed without a windowing system. `InputState` is the
//! active gesture tracked between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Vec2;
use crate::color::Rgb;
use crate::config::InputConfig;

/// What a primary-button drag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Navigate the canvas (default). Drags pan with the middle button, or the
    /// primary button while Space is held.
    #[default]
    Pan,
    /// Draw freehand strokes with the primary button.
    Draw,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Left mouse button (or pen / single-finger contact).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key by name, as reported by the host (`" "`, `"Space"`, `"d"`, `"["`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn is_space(&self) -> bool {
        matches!(self.0.as_str(), " " | "Space" | "space")
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    #[serde(default)]
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, which zooms out).
    pub dy: f64,
}

/// One discrete input event, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { pos: Vec2, button: Button },
    PointerMove { pos: Vec2 },
    PointerUp { pos: Vec2, button: Button },
    Wheel { pos: Vec2, delta: WheelDelta },
    Resize { width: f64, height: f64 },
    KeyDown { key: Key },
    KeyUp { key: Key },
}

/// Pointer cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Default,
    Crosshair,
    Grab,
    Grabbing,
}

/// Ink applied to the next stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    /// Width in screen pixels at the zoom the stroke starts at.
    pub width_px: f64,
    pub color: Rgb,
}

impl BrushSettings {
    #[must_use]
    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            width_px: config.default_brush_px.clamp(config.min_brush_px, config.max_brush_px),
            color: Rgb::new(config.default_brush_rgb),
        }
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UiState {
    /// Current drag mode.
    pub mode: Mode,
    /// Brush used by the next stroke.
    pub brush: BrushSettings,
    /// Space is held (temporary grab in pan mode).
    pub space_down: bool,
}

/// The gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging the view.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Vec2,
        /// The button that started the drag; only its release ends it.
        button: Button,
    },
    /// The user is drawing a stroke with the primary button.
    Drawing,
}
