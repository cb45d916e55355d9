// Host-side tests for per-frame orchestration.
// The main crate is wasm-only, so these drive scene-core directly.

use glam::Vec2;
use scene_core::hud::{SinkRegistry, TextSink};
use scene_core::model::cube_mesh;
use scene_core::{
    FrameRenderer, ManualClock, ReplayRandom, Scene, SceneConfig, SceneError, SceneFrame,
};

#[derive(Default)]
struct Recorder {
    frames: usize,
    with_model: usize,
    last_time: f32,
    last_particle_count: usize,
    fail: bool,
}

impl FrameRenderer for Recorder {
    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), SceneError> {
        if self.fail {
            return Err(SceneError::Render("surface lost".into()));
        }
        self.frames += 1;
        if frame.model.is_some() {
            self.with_model += 1;
        }
        self.last_time = frame.time;
        self.last_particle_count = frame.particles.len();
        assert_eq!(frame.particles.len(), frame.looks.len());
        Ok(())
    }

    fn resize(&mut self, _width: u32, _height: u32) {}
}

struct NullSink;

impl TextSink for NullSink {
    fn set_text(&mut self, _text: &str) -> Result<(), SceneError> {
        Ok(())
    }
}

struct BrokenSink(String);

impl TextSink for BrokenSink {
    fn set_text(&mut self, _text: &str) -> Result<(), SceneError> {
        Err(SceneError::Sink {
            tag: self.0.clone(),
            reason: "detached".into(),
        })
    }
}

struct Sinks {
    broken: bool,
}

impl SinkRegistry for Sinks {
    fn lookup(&mut self, tag: &str) -> Option<Box<dyn TextSink>> {
        if self.broken {
            Some(Box::new(BrokenSink(tag.to_string())))
        } else {
            Some(Box::new(NullSink))
        }
    }
}

fn scene(broken_hud: bool) -> Scene {
    Scene::new(
        SceneConfig::default(),
        Box::new(ReplayRandom::new(vec![0.1, 0.7, 0.3, 0.9, 0.5])),
        &mut Sinks { broken: broken_hud },
    )
}

#[test]
fn every_frame_advances_and_renders() {
    let mut s = scene(false);
    let clock = ManualClock::new();
    let mut r = Recorder::default();
    let start = s.cube().rotation;

    for _ in 0..120 {
        clock.advance(1.0 / 60.0);
        let report = s.frame(&clock, Vec2::ZERO, &mut r);
        assert!(report.rendered);
        assert!(report.stage_failures.is_empty());
    }
    assert_eq!(s.frame_count(), 120);
    assert_eq!(r.frames, 120);
    assert_eq!(r.last_particle_count, SceneConfig::default().particles.count);
    assert!((r.last_time - 2.0).abs() < 1e-4);
    let spun = s.cube().rotation - start;
    let expected = s.cube().params.spin_per_frame * 120.0;
    assert!((spun - expected).abs().max_element() < 1e-4);
    assert!((s.particles().time() - 2.0).abs() < 1e-4);
    assert!((s.post().time() - 2.0).abs() < 1e-4);
}

#[test]
fn first_sample_uses_elapsed_as_delta() {
    let mut s = scene(false);
    let clock = ManualClock::new();
    clock.set(0.25);
    let report = s.frame(&clock, Vec2::ZERO, &mut Recorder::default());
    assert_eq!(report.sample.delta, 0.25);
    clock.advance(0.1);
    let report = s.frame(&clock, Vec2::ZERO, &mut Recorder::default());
    assert!((report.sample.delta - 0.1).abs() < 1e-9);
}

#[test]
fn hud_failure_is_isolated_from_other_stages() {
    let mut s = scene(true);
    let clock = ManualClock::new();
    let mut r = Recorder::default();
    let mut hud_failures = 0;
    for _ in 0..(60 * 20) {
        clock.advance(1.0 / 60.0);
        let report = s.frame(&clock, Vec2::ZERO, &mut r);
        if report.stage_failures.contains(&"hud") {
            hud_failures += 1;
        }
        assert!(report.rendered, "render ran despite HUD failure");
    }
    assert!(hud_failures > 0);
    assert_eq!(r.frames, 60 * 20);
}

#[test]
fn render_failure_is_reported_not_fatal() {
    let mut s = scene(false);
    let clock = ManualClock::new();
    let mut r = Recorder {
        fail: true,
        ..Recorder::default()
    };
    clock.advance(1.0 / 60.0);
    let report = s.frame(&clock, Vec2::ZERO, &mut r);
    assert!(!report.rendered);

    r.fail = false;
    clock.advance(1.0 / 60.0);
    assert!(s.frame(&clock, Vec2::ZERO, &mut r).rendered);
}

#[test]
fn skull_appears_and_follows_pointer_only_after_load() {
    let mut s = scene(false);
    let clock = ManualClock::new();
    let mut r = Recorder::default();
    let target = Vec2::new(0.4, -0.2);

    for _ in 0..10 {
        clock.advance(1.0 / 60.0);
        s.frame(&clock, target, &mut r);
    }
    assert_eq!(r.with_model, 0);
    assert_eq!(s.orientation(), Vec2::ZERO);

    assert!(s.model_slot().resolve(Ok(cube_mesh(1.0))));
    clock.advance(1.0 / 60.0);
    s.frame(&clock, target, &mut r);
    assert_eq!(r.with_model, 1);
    let o = s.orientation();
    assert!((o - target * 0.08).abs().max_element() < 1e-6);

    for _ in 0..600 {
        clock.advance(1.0 / 60.0);
        s.frame(&clock, target, &mut r);
    }
    assert!((s.orientation() - target).abs().max_element() < 1e-3);
}

#[test]
fn failed_load_leaves_scene_running_without_skull() {
    let mut s = scene(false);
    let clock = ManualClock::new();
    let mut r = Recorder::default();
    s.model_slot()
        .resolve(Err(SceneError::asset_load("/missing.glb", "404")));
    for _ in 0..30 {
        clock.advance(1.0 / 60.0);
        assert!(s.frame(&clock, Vec2::ONE, &mut r).rendered);
    }
    assert_eq!(r.with_model, 0);
    assert_eq!(s.orientation(), Vec2::ZERO);
}

#[test]
fn resize_reaches_post_chain() {
    let mut s = scene(false);
    s.resize(640, 480);
    assert_eq!(s.post().resolution(), (640, 480));
}
