//! Coordinate-transform and stroke-geometry engine for an infinite drawing canvas.
//!
//! The crate keeps freehand ink numerically stable across an extreme zoom range.
//! The camera stores scale as a base-2 exponent and periodically rebases its
//! anchor; strokes store width relative to the zoom they were drawn at and
//! sample points by screen distance. The host owns the event loop and the
//! rasterizer: it turns device events into [`input::InputEvent`]s, feeds them to
//! [`engine::Engine`], and draws the [`render::Frame`] it gets back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`camera`] | `Vec2`, log-scale camera, screen/world conversions, rebase |
//! | [`stroke`] | Scale-independent freehand stroke |
//! | [`scene`] | Stroke collection, drawing state machine, frame recentering |
//! | [`color`] | Packed 24-bit RGB |
//! | [`input`] | Tagged input events and the gesture state machine |
//! | [`engine`] | Event dispatch tying camera, scene, and UI state together |
//! | [`render`] | Screen-space draw list (strokes, grid, HUD) |
//! | [`config`] | Tunable limits with validation |
//! | [`consts`] | Default values for every config field |

pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod input;
pub mod render;
pub mod scene;
pub mod stroke;
