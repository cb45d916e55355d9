use crate::constants::{GLITCH_ROLLS_PER_SEC, GLITCH_SWAP_THRESHOLD};
use crate::rng::RandomSource;

/// Time-quantized on/off decision for the glitch stage.
///
/// Time is cut into slots of `1 / GLITCH_ROLLS_PER_SEC` seconds. The trigger
/// is rolled once when a new slot starts and held for the whole slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlitchTrigger {
    slot: Option<i64>,
    active: bool,
    swap: bool,
}

impl GlitchTrigger {
    pub fn slot_for(time: f32) -> i64 {
        (time * GLITCH_ROLLS_PER_SEC).floor() as i64
    }

    /// Returns true when a new slot was entered and the trigger re-rolled.
    pub fn update(&mut self, time: f32, frequency: f32, rng: &mut dyn RandomSource) -> bool {
        let slot = Self::slot_for(time);
        if self.slot == Some(slot) {
            return false;
        }
        self.slot = Some(slot);
        let roll = rng.next_f32();
        let swap_roll = rng.next_f32();
        self.active = roll >= 1.0 - frequency;
        self.swap = self.active && swap_roll > GLITCH_SWAP_THRESHOLD;
        if self.active {
            log::debug!("[post] glitch slot {} active (swap={})", slot, self.swap);
        }
        true
    }

    pub fn slot(&self) -> i64 {
        self.slot.unwrap_or(0)
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn swap(&self) -> bool {
        self.swap
    }
}
