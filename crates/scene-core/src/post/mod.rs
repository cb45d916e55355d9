//! Ordered post-processing chain.
//!
//! The chain is fixed at construction: scene render, bloom, depth of field,
//! chromatic aberration, vignette, glitch, film grain, output. Stages can be
//! dimmed with [`PostChain::set_intensity`] but are never reordered or
//! removed. The renderer walks [`PostChain::stages`] and reads one packed
//! [`PostUniforms`] block per frame.

mod glitch;

pub use glitch::GlitchTrigger;

use crate::camera::CameraParams;
use crate::rng::RandomSource;
use bytemuck::{Pod, Zeroable};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PostStageKind {
    Render,
    Bloom,
    DepthOfField,
    ChromaticAberration,
    Vignette,
    Glitch,
    FilmGrain,
    Output,
}

impl PostStageKind {
    pub const ORDER: [PostStageKind; 8] = [
        PostStageKind::Render,
        PostStageKind::Bloom,
        PostStageKind::DepthOfField,
        PostStageKind::ChromaticAberration,
        PostStageKind::Vignette,
        PostStageKind::Glitch,
        PostStageKind::FilmGrain,
        PostStageKind::Output,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PostStageKind::Render => "render",
            PostStageKind::Bloom => "bloom",
            PostStageKind::DepthOfField => "dof",
            PostStageKind::ChromaticAberration => "chromatic",
            PostStageKind::Vignette => "vignette",
            PostStageKind::Glitch => "glitch",
            PostStageKind::FilmGrain => "grain",
            PostStageKind::Output => "output",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthOfFieldParams {
    pub focus: f32,
    pub aperture: f32,
    pub max_blur: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VignetteParams {
    pub darkness: f32,
    pub offset: f32,
    pub smoothness: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchParams {
    pub intensity: f32,
    pub frequency: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrainParams {
    pub intensity: f32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostParams {
    pub bloom: BloomParams,
    pub dof: DepthOfFieldParams,
    pub chromatic_distortion: f32,
    pub vignette: VignetteParams,
    pub glitch: GlitchParams,
    pub grain: GrainParams,
    pub exposure: f32,
}

impl Default for PostParams {
    fn default() -> Self {
        Self {
            bloom: BloomParams {
                strength: 0.15,
                radius: 0.2,
                threshold: 0.95,
            },
            dof: DepthOfFieldParams {
                focus: 5.0,
                aperture: 0.00001,
                max_blur: 0.001,
            },
            chromatic_distortion: 0.00015,
            vignette: VignetteParams {
                darkness: 0.7,
                offset: 0.9,
                smoothness: 0.5,
            },
            glitch: GlitchParams {
                intensity: 0.06,
                frequency: 0.12,
            },
            grain: GrainParams {
                intensity: 0.015,
                speed: 0.5,
            },
            exposure: 1.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostStage {
    pub kind: PostStageKind,
    /// Effect scale; 0 leaves the image untouched by this stage.
    pub intensity: f32,
}

/// Uniform block shared by every post pass. All fields are vec4 so the
/// layout matches WGSL without padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct PostUniforms {
    /// width, height, 1/width, 1/height
    pub resolution: [f32; 4],
    /// time, glitch slot, glitch active, glitch swap
    pub time: [f32; 4],
    /// strength, radius, threshold, -
    pub bloom: [f32; 4],
    /// focus, aperture, max blur, -
    pub dof: [f32; 4],
    /// near, far, -, -
    pub camera: [f32; 4],
    /// chromatic distortion, vignette darkness, offset, smoothness
    pub lens: [f32; 4],
    /// glitch intensity, frequency, -, -
    pub glitch: [f32; 4],
    /// grain intensity, speed, -, -
    pub grain: [f32; 4],
    /// exposure, tone-map mix, -, -
    pub output: [f32; 4],
}

pub struct PostChain {
    stages: SmallVec<[PostStage; 8]>,
    params: PostParams,
    glitch: GlitchTrigger,
    time: f32,
    width: u32,
    height: u32,
}

impl PostChain {
    pub fn new(params: PostParams) -> Self {
        let stages = PostStageKind::ORDER
            .iter()
            .map(|&kind| PostStage {
                kind,
                intensity: 1.0,
            })
            .collect();
        Self {
            stages,
            params,
            glitch: GlitchTrigger::default(),
            time: 0.0,
            width: 1,
            height: 1,
        }
    }

    pub fn stages(&self) -> &[PostStage] {
        &self.stages
    }

    pub fn kinds(&self) -> impl Iterator<Item = PostStageKind> + '_ {
        self.stages.iter().map(|s| s.kind)
    }

    pub fn params(&self) -> &PostParams {
        &self.params
    }

    pub fn glitch(&self) -> &GlitchTrigger {
        &self.glitch
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn intensity(&self, kind: PostStageKind) -> f32 {
        self.stages
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.intensity)
            .unwrap_or(0.0)
    }

    pub fn set_intensity(&mut self, kind: PostStageKind, intensity: f32) {
        if let Some(stage) = self.stages.iter_mut().find(|s| s.kind == kind) {
            stage.intensity = intensity.max(0.0);
        }
    }

    /// Push the frame time into the animated stages.
    pub fn update(&mut self, time: f32, rng: &mut dyn RandomSource) {
        self.time = time;
        self.glitch.update(time, self.params.glitch.frequency, rng);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn uniforms(&self, camera: &CameraParams) -> PostUniforms {
        let p = &self.params;
        let (w, h) = (self.width as f32, self.height as f32);
        let k = |kind| self.intensity(kind);
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        PostUniforms {
            resolution: [w, h, 1.0 / w, 1.0 / h],
            time: [
                self.time,
                self.glitch.slot() as f32,
                flag(self.glitch.active()),
                flag(self.glitch.swap()),
            ],
            bloom: [
                p.bloom.strength * k(PostStageKind::Bloom),
                p.bloom.radius,
                p.bloom.threshold,
                0.0,
            ],
            dof: [
                p.dof.focus,
                p.dof.aperture * k(PostStageKind::DepthOfField),
                p.dof.max_blur * k(PostStageKind::DepthOfField),
                0.0,
            ],
            camera: [camera.near, camera.far, 0.0, 0.0],
            lens: [
                p.chromatic_distortion * k(PostStageKind::ChromaticAberration),
                p.vignette.darkness * k(PostStageKind::Vignette),
                p.vignette.offset,
                p.vignette.smoothness,
            ],
            glitch: [
                p.glitch.intensity * k(PostStageKind::Glitch),
                p.glitch.frequency,
                0.0,
                0.0,
            ],
            grain: [p.grain.intensity * k(PostStageKind::FilmGrain), p.grain.speed, 0.0, 0.0],
            output: [p.exposure, k(PostStageKind::Output).min(1.0), 0.0, 0.0],
        }
    }
}

impl Default for PostChain {
    fn default() -> Self {
        Self::new(PostParams::default())
    }
}
