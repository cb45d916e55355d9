//! Per-frame orchestration.

use crate::camera::{CameraParams, LightRig};
use crate::config::SceneConfig;
use crate::constants::{DIAGNOSTIC_FRAME, MODEL_SCALE};
use crate::cube::CubeSpin;
use crate::error::SceneError;
use crate::hud::{HudSimulator, SinkRegistry};
use crate::interaction::OrientationSmoother;
use crate::model::ModelSlot;
use crate::overlay::{OverlayStage, PhaseChange};
use crate::particles::ParticleField;
use crate::post::PostChain;
use crate::render::{FrameRenderer, ModelView, OverlayFrame, SceneFrame};
use crate::rng::{RandomSource, SeededRandom};
use crate::time::{FrameClock, TimeSample, TimeSampler};
use glam::{Mat4, Vec2, Vec3};
use smallvec::SmallVec;

/// What happened during one call to [`Scene::frame`].
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    pub sample: TimeSample,
    pub transition: Option<PhaseChange>,
    pub hud_updates: usize,
    /// Stages whose update failed this frame. The others still ran.
    pub stage_failures: SmallVec<[&'static str; 2]>,
    pub rendered: bool,
}

pub struct Scene {
    sampler: TimeSampler,
    rng: Box<dyn RandomSource>,
    cube: CubeSpin,
    orientation: OrientationSmoother,
    particles: ParticleField,
    overlay: OverlayStage,
    hud: HudSimulator,
    post: PostChain,
    camera: CameraParams,
    lights: LightRig,
    model: ModelSlot,
    frame_count: u64,
}

impl Scene {
    /// Build with the random source implied by `config.seed`.
    pub fn from_config(config: SceneConfig, registry: &mut dyn SinkRegistry) -> Self {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(SeededRandom::from_entropy()),
        };
        Self::new(config, rng, registry)
    }

    pub fn new(
        config: SceneConfig,
        mut rng: Box<dyn RandomSource>,
        registry: &mut dyn SinkRegistry,
    ) -> Self {
        let particles = ParticleField::new(&config.particles, rng.as_mut());
        log::info!("[frame] particles initialized ({})", particles.len());
        let overlay = OverlayStage::new(config.overlay.build(), rng.as_mut());
        log::info!(
            "[frame] overlay '{}' initialized, first appearance in {:.1}s",
            overlay.shape().name(),
            overlay.machine().state().next_trigger
        );
        let hud = HudSimulator::new(&config.hud, registry, rng.as_mut());
        let post = PostChain::new(config.post);
        log::info!("[frame] post chain initialized: {}", describe_chain(&post));

        Self {
            sampler: TimeSampler::new(),
            rng,
            cube: CubeSpin::new(config.cube),
            orientation: OrientationSmoother::new(),
            particles,
            overlay,
            hud,
            post,
            camera: config.camera,
            lights: config.lights,
            model: ModelSlot::new(&config.model_path),
            frame_count: 0,
        }
    }

    /// Handle the asset loader resolves into.
    pub fn model_slot(&self) -> ModelSlot {
        self.model.clone()
    }

    pub fn cube(&self) -> &CubeSpin {
        &self.cube
    }

    pub fn orientation(&self) -> Vec2 {
        self.orientation.current()
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn overlay(&self) -> &OverlayStage {
        &self.overlay
    }

    pub fn hud(&self) -> &HudSimulator {
        &self.hud
    }

    pub fn post(&self) -> &PostChain {
        &self.post
    }

    pub fn camera(&self) -> &CameraParams {
        &self.camera
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Surface size changed. The renderer is resized by the caller.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.post.resize(width, height);
    }

    /// Advance every stage once and draw. `pointer` is the current
    /// orientation target as `(pitch, yaw)`.
    pub fn frame(
        &mut self,
        clock: &dyn FrameClock,
        pointer: Vec2,
        renderer: &mut dyn FrameRenderer,
    ) -> FrameReport {
        let sample = self.sampler.sample(clock);
        let t = sample.elapsed_f32();
        let dt = sample.delta_f32();
        let mut report = FrameReport {
            sample,
            ..FrameReport::default()
        };

        self.cube.advance();

        let model = self.model.get();
        if model.is_some() {
            self.orientation.advance(pointer);
        }

        self.particles.advance(t, self.rng.as_mut());
        report.transition = self.overlay.advance(dt, t, self.rng.as_mut());

        if let Some(n) = isolate(
            "hud",
            &mut report,
            self.hud.update(sample.elapsed_ms(), self.rng.as_mut()),
        ) {
            report.hud_updates = n;
        }

        self.post.update(t, self.rng.as_mut());

        let frame = SceneFrame {
            time: t,
            cube: self.cube.model_matrix(),
            particles: self.particles.particles(),
            looks: self.particles.looks(),
            particle_time: self.particles.time(),
            overlay: OverlayFrame {
                segments: self.overlay.shape().segments(),
                revision: self.overlay.shape().geometry_revision(),
                transform: self.overlay.shape().transform(),
                material: self.overlay.material(),
            },
            model: model.as_deref().map(|data| ModelView {
                data,
                transform: model_transform(self.orientation.current()),
            }),
            post: &self.post,
            camera: &self.camera,
            lights: &self.lights,
        };
        report.rendered = match renderer.render(&frame) {
            Ok(()) => true,
            Err(e) => {
                log::error!("[frame] {}", e);
                false
            }
        };

        self.frame_count += 1;
        if self.frame_count == DIAGNOSTIC_FRAME {
            self.log_diagnostics();
        }
        report
    }

    fn log_diagnostics(&self) {
        log::info!(
            "[frame] after {} frames: model={} overlay={} opacity={:.2} hud_stats={} post=[{}]",
            self.frame_count,
            if self.model.get().is_some() {
                "loaded"
            } else if self.model.is_pending() {
                "pending"
            } else {
                "failed"
            },
            self.overlay.machine().phase().name(),
            self.overlay.machine().opacity(),
            self.hud.active_count(),
            describe_chain(&self.post)
        );
    }
}

/// Skull pose: smoothed pitch/yaw over a uniform scale.
pub fn model_transform(orientation: Vec2) -> Mat4 {
    Mat4::from_rotation_x(orientation.x)
        * Mat4::from_rotation_y(orientation.y)
        * Mat4::from_scale(Vec3::splat(MODEL_SCALE))
}

fn isolate<T>(
    stage: &'static str,
    report: &mut FrameReport,
    result: Result<T, SceneError>,
) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("[frame] stage '{}' failed: {}", stage, e);
            report.stage_failures.push(stage);
            None
        }
    }
}

fn describe_chain(post: &PostChain) -> String {
    post.kinds().map(|k| k.name()).collect::<Vec<_>>().join(" > ")
}
