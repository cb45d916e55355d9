use glam::Vec2;
use scene_core::constants::{POINTER_TARGET_SCALE, TOUCH_DRAG_GAIN, TOUCH_TARGET_LIMIT};

/// Normalize a viewport position to [-1, 1] with +y up.
#[inline]
pub fn normalized(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new(x / w * 2.0 - 1.0, -(y / h * 2.0 - 1.0))
}

/// Orientation target for a mouse position, as `(pitch, yaw)`.
#[inline]
pub fn mouse_target(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    let n = normalized(x, y, width, height);
    Vec2::new(n.y * POINTER_TARGET_SCALE, n.x * POINTER_TARGET_SCALE)
}

/// Continuously-updated orientation target fed by mouse and touch events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTarget {
    pub target: Vec2,
    last_touch: Option<Vec2>,
}

impl PointerTarget {
    pub fn on_mouse_move(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.target = mouse_target(x, y, width, height);
    }

    /// Only single-finger gestures steer.
    pub fn on_touch_start(&mut self, touches: u32, x: f32, y: f32) {
        if touches == 1 {
            self.last_touch = Some(Vec2::new(x, y));
        }
    }

    pub fn on_touch_move(&mut self, touches: u32, x: f32, y: f32, width: f32, height: f32) {
        if touches != 1 {
            return;
        }
        let here = Vec2::new(x, y);
        if let Some(last) = self.last_touch {
            let dx = (here.x - last.x) / width.max(1.0);
            let dy = (here.y - last.y) / height.max(1.0);
            self.target.y += dx * TOUCH_DRAG_GAIN;
            self.target.x -= dy * TOUCH_DRAG_GAIN;
            self.target = self
                .target
                .clamp(Vec2::splat(-TOUCH_TARGET_LIMIT), Vec2::splat(TOUCH_TARGET_LIMIT));
        }
        self.last_touch = Some(here);
    }

    pub fn on_touch_end(&mut self) {
        self.last_touch = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last_touch.is_some()
    }
}
