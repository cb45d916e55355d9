//! Read-only view of one frame, handed to whatever draws it.

use crate::camera::{CameraParams, LightRig};
use crate::error::SceneError;
use crate::model::ModelData;
use crate::overlay::OverlayMaterial;
use crate::particles::{Particle, ParticleLook};
use crate::post::PostChain;
use glam::{Mat4, Vec3};

pub struct OverlayFrame<'a> {
    pub segments: &'a [Vec3],
    pub revision: u64,
    pub transform: Mat4,
    pub material: OverlayMaterial,
}

pub struct ModelView<'a> {
    pub data: &'a ModelData,
    pub transform: Mat4,
}

pub struct SceneFrame<'a> {
    pub time: f32,
    pub cube: Mat4,
    pub particles: &'a [Particle],
    pub looks: &'a [ParticleLook],
    pub particle_time: f32,
    pub overlay: OverlayFrame<'a>,
    /// Absent until the model slot resolves successfully.
    pub model: Option<ModelView<'a>>,
    pub post: &'a PostChain,
    pub camera: &'a CameraParams,
    pub lights: &'a LightRig,
}

pub trait FrameRenderer {
    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), SceneError>;

    fn resize(&mut self, width: u32, height: u32);
}
