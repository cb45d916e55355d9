use crate::constants::ORIENTATION_SMOOTHING;
use glam::Vec2;

/// Eases a displayed orientation towards the pointer-driven target.
///
/// Components are `(pitch, yaw)` in radians.
#[derive(Clone, Copy, Debug)]
pub struct OrientationSmoother {
    current: Vec2,
    factor: f32,
}

impl OrientationSmoother {
    pub fn new() -> Self {
        Self::with_factor(ORIENTATION_SMOOTHING)
    }

    pub fn with_factor(factor: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn advance(&mut self, target: Vec2) -> Vec2 {
        self.current += (target - self.current) * self.factor;
        self.current
    }
}

impl Default for OrientationSmoother {
    fn default() -> Self {
        Self::new()
    }
}
