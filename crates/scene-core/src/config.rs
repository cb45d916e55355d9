use crate::camera::{CameraParams, LightRig};
use crate::constants::MODEL_PATH;
use crate::cube::CubeParams;
use crate::hud::{default_stats, StatSpec};
use crate::overlay::OverlayVariant;
use crate::particles::ParticleParams;
use crate::post::PostParams;

/// Everything a front-end needs to build a [`crate::Scene`].
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub overlay: OverlayVariant,
    pub particles: ParticleParams,
    pub cube: CubeParams,
    pub hud: Vec<StatSpec>,
    pub post: PostParams,
    pub camera: CameraParams,
    pub lights: LightRig,
    pub model_path: String,
    /// Fixed seed for reproducible runs; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            overlay: OverlayVariant::default(),
            particles: ParticleParams::default(),
            cube: CubeParams::default(),
            hud: default_stats(),
            post: PostParams::default(),
            camera: CameraParams::default(),
            lights: LightRig::default(),
            model_path: MODEL_PATH.to_string(),
            seed: None,
        }
    }
}
