use crate::constants::*;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub fovy_deg: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fovy_deg: CAMERA_FOVY_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
        }
    }
}

impl CameraParams {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy_deg.to_radians(),
            aspect.max(1e-3),
            self.near,
            self.far,
        )
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// Three coloured point lights over a dim ambient term.
#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub points: [PointLight; 3],
    pub ambient: Vec3,
}

impl Default for LightRig {
    fn default() -> Self {
        let points = POINT_LIGHTS.map(|(p, c, i)| PointLight {
            position: Vec3::from(p),
            color: Vec3::from(c),
            intensity: i,
        });
        Self {
            points,
            ambient: Vec3::from(AMBIENT_LIGHT) * AMBIENT_INTENSITY,
        }
    }
}
