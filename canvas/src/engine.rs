use crate::camera::{Camera, Vec2};
use crate::color::Rgb;
use crate::config::CanvasConfig;
use crate::input::{BrushSettings, Button, Cursor, InputEvent, InputState, Key, Mode, UiState, WheelDelta};
use crate::render::{self, Frame};
use crate::scene::{self, Scene};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    SetCursor(Cursor),
    ModeChanged(Mode),
    BrushWidthChanged(f64),
    BrushColorChanged(Rgb),
}

/// Engine state for one canvas view.
///
/// Owns the scene, the camera, and the gesture state. The host feeds it
/// [`InputEvent`]s and reads back [`Action`]s plus a [`Frame`] per repaint.
#[derive(Debug, Clone)]
pub struct Engine {
    pub scene: Scene,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    config: CanvasConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            scene: Scene::with_config(&config),
            camera: Camera::new(config.camera),
            ui: UiState { brush: BrushSettings::from_config(&config.input), ..UiState::default() },
            input: InputState::Idle,
            viewport_width: 0.0,
            viewport_height: 0.0,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    // --- Event dispatch ---

    /// Route one input event to its handler.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { pos, button } => self.on_pointer_down(*pos, *button),
            InputEvent::PointerMove { pos } => self.on_pointer_move(*pos),
            InputEvent::PointerUp { pos, button } => self.on_pointer_up(*pos, *button),
            InputEvent::Wheel { pos, delta } => self.on_wheel(*pos, *delta),
            InputEvent::Resize { width, height } => self.on_resize(*width, *height),
            InputEvent::KeyDown { key } => self.on_key_down(key),
            InputEvent::KeyUp { key } => self.on_key_up(key),
        }
    }

    /// Record the new viewport size and put world center at the middle of it.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Vec<Action> {
        if !width.is_finite() || !height.is_finite() {
            return Vec::new();
        }
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
        self.camera
            .set_offset_px(self.viewport_width / 2.0, self.viewport_height / 2.0);
        vec![Action::RenderNeeded]
    }

    pub fn on_wheel(&mut self, screen_pt: Vec2, delta: WheelDelta) -> Vec<Action> {
        let input = &self.config.input;
        let delta_exp = (-delta.dy / input.wheel_px_per_notch) / input.notches_per_octave;
        if delta_exp == 0.0 || !delta_exp.is_finite() {
            return Vec::new();
        }
        self.camera.zoom_at(screen_pt.x, screen_pt.y, delta_exp);
        scene::recenter_frame(&mut self.scene, &mut self.camera);
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_down(&mut self, screen_pt: Vec2, button: Button) -> Vec<Action> {
        if self.input != InputState::Idle {
            return Vec::new();
        }

        match self.ui.mode {
            Mode::Pan => {
                let grab = button == Button::Middle || (button == Button::Primary && self.ui.space_down);
                if !grab {
                    return Vec::new();
                }
                self.input = InputState::Panning { last_screen: screen_pt, button };
                vec![Action::SetCursor(Cursor::Grabbing)]
            }
            Mode::Draw => {
                if button != Button::Primary {
                    return Vec::new();
                }
                let brush = self.ui.brush;
                self.scene.begin_stroke(brush.width_px, brush.color, &self.camera);
                self.scene.add_screen_point(screen_pt.x, screen_pt.y, &self.camera);
                self.input = InputState::Drawing;
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Vec2) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen, button } => {
                let d = screen_pt - last_screen;
                self.camera.pan_px(d.x, d.y);
                self.input = InputState::Panning { last_screen: screen_pt, button };
                vec![Action::RenderNeeded]
            }
            InputState::Drawing => {
                self.scene.add_screen_point(screen_pt.x, screen_pt.y, &self.camera);
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Vec2, button: Button) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { button: started_with, .. } => {
                if button != started_with {
                    return Vec::new();
                }
                self.input = InputState::Idle;
                vec![Action::SetCursor(self.idle_cursor())]
            }
            InputState::Drawing => {
                if button != Button::Primary {
                    return Vec::new();
                }
                self.scene.end_stroke();
                self.input = InputState::Idle;
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if key.is_space() {
            if self.ui.space_down {
                return Vec::new();
            }
            self.ui.space_down = true;
            return match (self.ui.mode, self.input) {
                (Mode::Pan, InputState::Idle) => vec![Action::SetCursor(Cursor::Grab)],
                _ => Vec::new(),
            };
        }

        match key.0.as_str() {
            "d" | "D" => self.set_mode(Mode::Draw),
            "n" | "N" => self.set_mode(Mode::Pan),
            "[" => self.set_brush_width(self.ui.brush.width_px - self.config.input.brush_step_px),
            "]" => self.set_brush_width(self.ui.brush.width_px + self.config.input.brush_step_px),
            _ => Vec::new(),
        }
    }

    pub fn on_key_up(&mut self, key: &Key) -> Vec<Action> {
        if !key.is_space() || !self.ui.space_down {
            return Vec::new();
        }
        self.ui.space_down = false;
        match (self.ui.mode, self.input) {
            (Mode::Pan, InputState::Idle) => vec![Action::SetCursor(Cursor::Default)],
            _ => Vec::new(),
        }
    }

    // --- UI settings ---

    /// Switch the drag mode. Ignored mid-gesture and when unchanged.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        if self.ui.mode == mode || self.input != InputState::Idle {
            return Vec::new();
        }
        self.ui.mode = mode;
        vec![
            Action::ModeChanged(mode),
            Action::SetCursor(self.idle_cursor()),
            Action::RenderNeeded,
        ]
    }

    /// Set the brush width for the next stroke, clamped to the configured UI range.
    pub fn set_brush_width(&mut self, width_px: f64) -> Vec<Action> {
        if !width_px.is_finite() {
            return Vec::new();
        }
        let input = &self.config.input;
        let clamped = width_px.clamp(input.min_brush_px, input.max_brush_px);
        if (self.ui.brush.width_px - clamped).abs() < 1e-6 {
            return Vec::new();
        }
        self.ui.brush.width_px = clamped;
        vec![Action::BrushWidthChanged(clamped), Action::RenderNeeded]
    }

    pub fn set_brush_color(&mut self, color: Rgb) -> Vec<Action> {
        if self.ui.brush.color == color {
            return Vec::new();
        }
        self.ui.brush.color = color;
        vec![Action::BrushColorChanged(color), Action::RenderNeeded]
    }

    fn idle_cursor(&self) -> Cursor {
        match self.ui.mode {
            Mode::Draw => Cursor::Crosshair,
            Mode::Pan if self.ui.space_down => Cursor::Grab,
            Mode::Pan => Cursor::Default,
        }
    }

    // --- Frame ---

    /// Recenter if needed, then project the scene for the current viewport.
    pub fn frame(&mut self) -> Frame {
        scene::recenter_frame(&mut self.scene, &mut self.camera);
        render::build_frame(
            &self.scene,
            &self.camera,
            &self.config.render,
            self.viewport_width,
            self.viewport_height,
        )
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.ui.mode
    }

    #[must_use]
    pub fn brush(&self) -> BrushSettings {
        self.ui.brush
    }
}
