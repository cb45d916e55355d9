//! Injectable randomness.
//!
//! Every stochastic decision in the scene (overlay timers, particle respawn,
//! HUD jitter, scramble symbols, glitch rolls) draws from a [`RandomSource`]
//! handed in by the caller, so tests can replay exact sequences.

use rand::prelude::*;

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform sample in `[lo, hi)`.
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// Uniform sample in `[-half, half)`.
    fn centered(&mut self, width: f32) -> f32 {
        (self.next_f32() - 0.5) * width
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

/// `StdRng`-backed source used in production.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

/// Replays a fixed sequence of samples, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ReplayRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ReplayRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.5);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 0.999_999);
        }
        Self { values, cursor: 0 }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplayRandom {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
