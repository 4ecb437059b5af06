#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn red() -> Rgb {
    Rgb::new(0x00FF_0000)
}

fn draw_segment(scene: &mut Scene, camera: &Camera, from: Vec2, to: Vec2) {
    scene.begin_stroke(4.0, red(), camera);
    scene.add_screen_point(from.x, from.y, camera);
    scene.add_screen_point(to.x, to.y, camera);
    scene.end_stroke();
}

// =============================================================
// State machine
// =============================================================

#[test]
fn new_scene_is_idle_and_empty() {
    let scene = Scene::new();
    assert_eq!(scene.state(), DrawState::Idle);
    assert!(scene.is_empty());
    assert!(scene.active_stroke().is_none());
}

#[test]
fn begin_stroke_opens_a_stroke() {
    let mut scene = Scene::new();
    scene.begin_stroke(4.0, red(), &Camera::default());
    assert!(scene.is_drawing());
    assert_eq!(scene.len(), 1);
    assert!(scene.active_stroke().is_some());
}

#[test]
fn begin_stroke_while_drawing_is_ignored() {
    let cam = Camera::default();
    let mut scene = Scene::new();
    scene.begin_stroke(4.0, red(), &cam);
    let id = scene.strokes()[0].id();
    scene.begin_stroke(9.0, Rgb::WHITE, &cam);
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.strokes()[0].id(), id);
    assert_eq!(scene.strokes()[0].color_rgb(), red());
}

#[test]
fn add_screen_point_while_idle_is_ignored() {
    let cam = Camera::default();
    let mut scene = Scene::new();
    draw_segment(&mut scene, &cam, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
    scene.add_screen_point(50.0, 50.0, &cam);
    assert_eq!(scene.strokes()[0].point_count(), 2);
}

#[test]
fn end_stroke_while_idle_is_ignored() {
    let cam = Camera::default();
    let mut scene = Scene::new();
    draw_segment(&mut scene, &cam, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
    scene.end_stroke();
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.state(), DrawState::Idle);
}

#[test]
fn degenerate_stroke_is_discarded() {
    let mut scene = Scene::new();
    scene.begin_stroke(4.0, red(), &Camera::default());
    scene.end_stroke();
    assert!(scene.is_empty());
    assert_eq!(scene.state(), DrawState::Idle);
}

#[test]
fn single_point_stroke_is_discarded() {
    let cam = Camera::default();
    let mut scene = Scene::new();
    draw_segment(&mut scene, &cam, Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0));
    assert!(scene.is_empty());
}

#[test]
fn discarding_keeps_earlier_strokes() {
    let cam = Camera::default();
    let mut scene = Scene::new();
    draw_segment(&mut scene, &cam, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
    scene.begin_stroke(4.0, red(), &cam);
    scene.end_stroke();
    assert_eq!(scene.len(), 1);
    assert!(!scene.strokes()[0].empty());
}

#[test]
fn strokes_keep_insertion_order() {
    let cam = Camera::default();
    let mut scene = Scene::new();
    let colors = [0x0011_1111, 0x0022_2222, 0x0033_3333];
    for c in colors {
        scene.begin_stroke(2.0, Rgb::new(c), &cam);
        scene.add_screen_point(0.0, 0.0, &cam);
        scene.add_screen_point(5.0, 5.0, &cam);
        scene.end_stroke();
    }
    let got = scene.strokes().iter().map(|s| s.color_rgb().packed()).collect::<Vec<_>>();
    assert_eq!(got, colors);
}

#[test]
fn end_to_end_single_stroke() {
    let cam = Camera::default();
    let mut scene = Scene::new();
    scene.begin_stroke(4.0, Rgb::new(0x00FF_0000), &cam);
    scene.add_screen_point(0.0, 0.0, &cam);
    scene.add_screen_point(10.0, 0.0, &cam);
    scene.end_stroke();

    assert_eq!(scene.len(), 1);
    let stroke = &scene.strokes()[0];
    assert_eq!(stroke.points_world(), &[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]);
    assert_eq!(stroke.color_rgb().packed(), 0x00FF_0000);
    assert!(approx_eq(stroke.width_screen(0.0), 4.0));
}

#[test]
fn scene_uses_configured_min_step() {
    let mut config = CanvasConfig::default();
    config.sampling.min_step_px = 20.0;
    let cam = Camera::default();
    let mut scene = Scene::with_config(&config);
    assert_eq!(scene.min_step_px(), 20.0);

    scene.begin_stroke(4.0, red(), &cam);
    for x in [0.0, 10.0, 19.0, 25.0] {
        scene.add_screen_point(x, 0.0, &cam);
    }
    scene.end_stroke();
    assert_eq!(scene.strokes()[0].point_count(), 2);
}

// =============================================================
// translate / recenter_frame
// =============================================================

#[test]
fn translate_moves_every_stroke() {
    let cam = Camera::default();
    let mut scene = Scene::new();
    draw_segment(&mut scene, &cam, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
    draw_segment(&mut scene, &cam, Vec2::new(5.0, 5.0), Vec2::new(5.0, 15.0));
    scene.translate(Vec2::new(1.0, 2.0));
    assert_eq!(scene.strokes()[0].points_world()[0], Vec2::new(-1.0, -2.0));
    assert_eq!(scene.strokes()[1].points_world()[1], Vec2::new(4.0, 13.0));
}

#[test]
fn recenter_frame_is_noop_below_threshold() {
    let mut cam = Camera::default();
    let mut scene = Scene::new();
    draw_segment(&mut scene, &cam, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
    cam.pan_px(-500.0, 0.0);
    cam.rebase();
    assert_eq!(recenter_frame(&mut scene, &mut cam), None);
    assert_eq!(scene.strokes()[0].points_world()[0], Vec2::ZERO);
}

#[test]
fn recenter_frame_shifts_scene_and_camera_together() {
    let mut cam = Camera::default();
    let mut scene = Scene::new();
    draw_segment(&mut scene, &cam, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
    cam.pan_px(-3.0e6, 1.5e6);
    cam.rebase();
    assert!(cam.needs_recenter());

    let screen_before = scene.strokes()[0]
        .points_world()
        .iter()
        .map(|p| cam.screen_from_world(p.x, p.y))
        .collect::<Vec<_>>();

    let delta = recenter_frame(&mut scene, &mut cam);
    assert_eq!(delta, Some(Vec2::new(3.0e6, -1.5e6)));
    assert_eq!(cam.world_center(), Vec2::ZERO);
    assert!(!cam.needs_recenter());
    assert_eq!(scene.strokes()[0].points_world()[0], Vec2::new(-3.0e6, 1.5e6));

    let screen_after = scene.strokes()[0]
        .points_world()
        .iter()
        .map(|p| cam.screen_from_world(p.x, p.y))
        .collect::<Vec<_>>();
    for (a, b) in screen_before.iter().zip(&screen_after) {
        assert!((*a - *b).length() < 1e-6);
    }
}

#[test]
fn recenter_frame_applies_to_open_stroke() {
    let mut cam = Camera::default();
    let mut scene = Scene::new();
    scene.begin_stroke(4.0, red(), &cam);
    scene.add_screen_point(0.0, 0.0, &cam);
    cam.pan_px(-2.0e6, 0.0);
    cam.rebase();
    recenter_frame(&mut scene, &mut cam);
    // Continue the stroke after the frame moved: new point 10 px right of the first.
    let first_screen = {
        let p = scene.strokes()[0].points_world()[0];
        cam.screen_from_world(p.x, p.y)
    };
    scene.add_screen_point(first_screen.x + 10.0, first_screen.y, &cam);
    scene.end_stroke();
    let pts = scene.strokes()[0].points_world();
    assert_eq!(pts.len(), 2);
    assert!(approx_eq(pts[1].x - pts[0].x, 10.0));
}
