//! Scripted session replay.
//!
//! A script is JSON lines. Each line is either an [`InputEvent`] or the
//! `{"type":"frame"}` marker, which renders a frame and emits a
//! [`FrameSummary`]. Blank lines and `#` comments are skipped.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use canvas::camera::Vec2;
use canvas::config::{CanvasConfig, ConfigError};
use canvas::engine::Engine;
use canvas::input::{InputEvent, Mode};
use serde::Serialize;
use serde_json::Value;

const FRAME_MARKER: &str = "frame";

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: invalid script entry: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
}

/// One parsed, non-blank script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptLine {
    Event(InputEvent),
    Frame,
}

/// Emitted for every frame marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSummary {
    pub frame: usize,
    /// Script line of the marker, 1-based.
    pub line: usize,
    pub strokes: usize,
    /// Strokes that survived width culling.
    pub drawn: usize,
    pub grid_vertical: usize,
    pub grid_horizontal: usize,
    pub hud: String,
    pub offset_px: Vec2,
    pub world_center: Vec2,
}

/// Emitted once at the end of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub events: usize,
    pub frames: usize,
    pub actions: usize,
    pub strokes: usize,
    pub points: usize,
    pub mode: Mode,
    pub zoom_exp: f64,
    pub offset_px: Vec2,
    pub world_center: Vec2,
}

impl SessionSummary {
    fn capture(engine: &Engine, events: usize, frames: usize, actions: usize) -> Self {
        let camera = engine.camera();
        Self {
            events,
            frames,
            actions,
            strokes: engine.scene().len(),
            points: engine.scene().strokes().iter().map(|s| s.point_count()).sum(),
            mode: engine.mode(),
            zoom_exp: camera.zoom_exp(),
            offset_px: camera.offset_px(),
            world_center: camera.world_center(),
        }
    }
}

/// Read and validate a config file, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<CanvasConfig, ReplayError> {
    let Some(path) = path else {
        return Ok(CanvasConfig::default());
    };
    let raw = fs::read_to_string(path)?;
    let config = CanvasConfig::from_json_str(&raw)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parse one script line. `Ok(None)` for blanks and comments.
pub fn parse_script_line(line: &str, line_no: usize) -> Result<Option<ScriptLine>, ReplayError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let to_script_error = |source| ReplayError::Script { line: line_no, source };
    let value = serde_json::from_str::<Value>(trimmed).map_err(to_script_error)?;
    if value.get("type").and_then(Value::as_str) == Some(FRAME_MARKER) {
        return Ok(Some(ScriptLine::Frame));
    }

    let event = serde_json::from_value::<InputEvent>(value).map_err(to_script_error)?;
    Ok(Some(ScriptLine::Event(event)))
}

/// Feed every script line to `engine`.
///
/// Frame summaries are written to `out` as JSON lines unless `summary_only`;
/// the session summary is always written last and returned.
pub fn run(
    engine: &mut Engine,
    input: impl BufRead,
    out: &mut impl Write,
    summary_only: bool,
) -> Result<SessionSummary, ReplayError> {
    let mut events = 0_usize;
    let mut frames = 0_usize;
    let mut actions = 0_usize;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let Some(entry) = parse_script_line(&line?, line_no)? else {
            continue;
        };

        match entry {
            ScriptLine::Event(event) => {
                events += 1;
                actions += engine.handle(&event).len();
            }
            ScriptLine::Frame => {
                frames += 1;
                let frame = engine.frame();
                tracing::debug!(frame = frames, line = line_no, strokes = frame.strokes.len(), "frame");
                if !summary_only {
                    let summary = FrameSummary {
                        frame: frames,
                        line: line_no,
                        strokes: engine.scene().len(),
                        drawn: frame.strokes.len(),
                        grid_vertical: frame.grid.vertical.len(),
                        grid_horizontal: frame.grid.horizontal.len(),
                        hud: frame.hud,
                        offset_px: engine.camera().offset_px(),
                        world_center: engine.camera().world_center(),
                    };
                    write_json_line(out, &summary)?;
                }
            }
        }
    }

    let summary = SessionSummary::capture(engine, events, frames, actions);
    tracing::info!(events, frames, strokes = summary.strokes, "replay complete");
    write_json_line(out, &summary)?;
    Ok(summary)
}

fn write_json_line(out: &mut impl Write, value: &impl Serialize) -> Result<(), ReplayError> {
    let encoded = serde_json::to_string(value).map_err(ReplayError::Encode)?;
    writeln!(out, "{encoded}")?;
    Ok(())
}
