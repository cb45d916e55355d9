use instant::Instant;
use std::cell::Cell;

/// Elapsed/delta pair produced once per frame and read by every stage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimeSample {
    /// Seconds since the clock started.
    pub elapsed: f64,
    /// Seconds since the previous sample, never negative.
    pub delta: f64,
}

impl TimeSample {
    pub fn elapsed_f32(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn delta_f32(&self) -> f32 {
        self.delta as f32
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed * 1000.0
    }
}

/// Monotonic time source polled once per frame.
pub trait FrameClock {
    fn elapsed(&self) -> f64;
}

/// Wall clock backed by `instant` (uses `performance.now()` on the web).
pub struct InstantClock {
    start: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for InstantClock {
    fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to. Used by tests and the headless runner.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl FrameClock for ManualClock {
    fn elapsed(&self) -> f64 {
        self.now.get()
    }
}

/// Derives per-frame deltas from successive clock polls.
#[derive(Default)]
pub struct TimeSampler {
    last: Option<f64>,
}

impl TimeSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, clock: &dyn FrameClock) -> TimeSample {
        let elapsed = clock.elapsed();
        let delta = match self.last {
            Some(prev) => (elapsed - prev).max(0.0),
            None => elapsed.max(0.0),
        };
        self.last = Some(elapsed);
        TimeSample { elapsed, delta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_never_goes_negative() {
        let clock = ManualClock::new();
        let mut sampler = TimeSampler::new();
        clock.set(2.0);
        assert_eq!(sampler.sample(&clock).delta, 2.0);
        clock.set(1.5);
        let s = sampler.sample(&clock);
        assert_eq!(s.elapsed, 1.5);
        assert_eq!(s.delta, 0.0);
    }
}
