use crate::constants::{CUBE_SIZE, CUBE_SPIN_PER_FRAME};
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Debug)]
pub struct CubeParams {
    pub size: f32,
    /// Radians added to each Euler axis every frame.
    pub spin_per_frame: Vec3,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self {
            size: CUBE_SIZE,
            spin_per_frame: Vec3::from(CUBE_SPIN_PER_FRAME),
        }
    }
}

/// Crystal cube that turns by a fixed increment every frame.
///
/// Angles accumulate without wrapping; only their sine/cosine reach the
/// renderer through the model matrix.
#[derive(Clone, Debug)]
pub struct CubeSpin {
    pub rotation: Vec3,
    pub params: CubeParams,
}

impl CubeSpin {
    pub fn new(params: CubeParams) -> Self {
        // Stand the cube on a vertex.
        let rotation = Vec3::new(
            (std::f32::consts::FRAC_PI_4).sin().atan(),
            std::f32::consts::FRAC_PI_4,
            0.0,
        );
        Self { rotation, params }
    }

    pub fn advance(&mut self) {
        self.rotation += self.params.spin_per_frame;
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.params.size),
            self.orientation(),
            Vec3::ZERO,
        )
    }
}

impl Default for CubeSpin {
    fn default() -> Self {
        Self::new(CubeParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_accumulates_without_wrapping() {
        let mut cube = CubeSpin::new(CubeParams {
            size: 1.0,
            spin_per_frame: Vec3::new(1.0, 2.0, 3.0),
        });
        let start = cube.rotation;
        for _ in 0..10 {
            cube.advance();
        }
        assert_eq!(cube.rotation - start, Vec3::new(10.0, 20.0, 30.0));
    }
}
