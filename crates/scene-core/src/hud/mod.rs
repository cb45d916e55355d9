//! Readouts that drift around a base value at their own cadence.
//!
//! Each statistic owns a [`StatRecord`] and a text sink looked up once at
//! construction. When its interval elapses it shows a scrambled copy of the
//! new value for [`HUD_SCRAMBLE_MS`], then the real text.

mod scramble;

pub use scramble::{is_scramble_symbol, is_separator, scramble};

use crate::constants::{HUD_INTERVAL_JITTER_MS, HUD_SCRAMBLE_MS};
use crate::error::SceneError;
use crate::rng::RandomSource;
use fnv::FnvHashMap;

const ENTROPY_STATES: &[&str] = &["NOMINAL", "STABLE", "OPTIMAL", "NOMINAL", "NOMINAL"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatFormat {
    /// One decimal followed by `%`.
    Percent1,
    /// One decimal followed by `h`.
    Hours1,
    /// Rounded to the nearest whole number.
    Integer,
    /// One of a fixed set of status words, picked at random.
    Status(&'static [&'static str]),
}

impl StatFormat {
    pub fn format(&self, value: f64, rng: &mut dyn RandomSource) -> String {
        match self {
            StatFormat::Percent1 => format!("{:.1}%", value),
            StatFormat::Hours1 => format!("{:.1}h", value),
            StatFormat::Integer => format!("{}", value.round() as i64),
            StatFormat::Status(states) => {
                if states.is_empty() {
                    String::new()
                } else {
                    states[rng.index(states.len())].to_string()
                }
            }
        }
    }
}

/// Static description of one displayed statistic.
#[derive(Clone, Debug, PartialEq)]
pub struct StatSpec {
    pub tag: &'static str,
    pub base_value: f64,
    pub variance: f64,
    pub format: StatFormat,
    /// First interval is `base + U[0, jitter)` milliseconds.
    pub first_interval_ms: (f64, f64),
}

/// The five readouts of the default HUD.
pub fn default_stats() -> Vec<StatSpec> {
    vec![
        StatSpec {
            tag: "cognitive",
            base_value: 87.3,
            variance: 5.0,
            format: StatFormat::Percent1,
            first_interval_ms: (2000.0, 1000.0),
        },
        StatSpec {
            tag: "caffeine",
            base_value: 4.2,
            variance: 0.3,
            format: StatFormat::Hours1,
            first_interval_ms: (5000.0, 2000.0),
        },
        StatSpec {
            tag: "layers",
            base_value: 7.0,
            variance: 2.0,
            format: StatFormat::Integer,
            first_interval_ms: (8000.0, 4000.0),
        },
        StatSpec {
            tag: "sync",
            base_value: 98.7,
            variance: 1.5,
            format: StatFormat::Percent1,
            first_interval_ms: (3000.0, 2000.0),
        },
        StatSpec {
            tag: "entropy",
            base_value: 0.0,
            variance: 0.0,
            format: StatFormat::Status(ENTROPY_STATES),
            first_interval_ms: (10000.0, 5000.0),
        },
    ]
}

/// Base re-trigger interval in ms for a given variance.
///
/// Step function: exactly zero → 10 s, below 1 → 5 s, below 3 → 3 s,
/// otherwise 2 s.
pub fn base_interval(variance: f64) -> f64 {
    if variance == 0.0 {
        10000.0
    } else if variance < 1.0 {
        5000.0
    } else if variance < 3.0 {
        3000.0
    } else {
        2000.0
    }
}

/// Mutable per-statistic bookkeeping, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatRecord {
    pub base_value: f64,
    pub variance: f64,
    pub update_interval: f64,
    pub last_update: f64,
}

impl StatRecord {
    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms - self.last_update > self.update_interval
    }

    /// Draw a fresh value around the base.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        if self.variance > 0.0 {
            self.base_value + (rng.next_f32() as f64 - 0.5) * 2.0 * self.variance
        } else {
            self.base_value
        }
    }
}

/// Writable text target for one statistic.
pub trait TextSink {
    fn set_text(&mut self, text: &str) -> Result<(), SceneError>;
}

/// Finds the sink for a statistic by tag; `None` disables that statistic.
pub trait SinkRegistry {
    fn lookup(&mut self, tag: &str) -> Option<Box<dyn TextSink>>;
}

struct PendingText {
    text: String,
    at_ms: f64,
}

struct TrackedStat {
    spec: StatSpec,
    record: StatRecord,
    sink: Box<dyn TextSink>,
    pending: Option<PendingText>,
    shown: String,
}

impl TrackedStat {
    fn write(&mut self, text: String) -> Result<(), SceneError> {
        self.sink.set_text(&text)?;
        self.shown = text;
        Ok(())
    }
}

pub struct HudSimulator {
    stats: Vec<TrackedStat>,
    by_tag: FnvHashMap<&'static str, usize>,
    scramble_ms: f64,
}

impl HudSimulator {
    pub fn new(
        specs: &[StatSpec],
        registry: &mut dyn SinkRegistry,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let mut stats = Vec::with_capacity(specs.len());
        let mut by_tag = FnvHashMap::default();
        for spec in specs {
            let Some(sink) = registry.lookup(spec.tag) else {
                log::debug!("[hud] no sink for '{}', stat disabled", spec.tag);
                continue;
            };
            let (base, jitter) = spec.first_interval_ms;
            let record = StatRecord {
                base_value: spec.base_value,
                variance: spec.variance,
                update_interval: base + rng.next_f32() as f64 * jitter,
                last_update: 0.0,
            };
            by_tag.insert(spec.tag, stats.len());
            stats.push(TrackedStat {
                spec: spec.clone(),
                record,
                sink,
                pending: None,
                shown: String::new(),
            });
        }
        log::info!("[hud] {} of {} stats active", stats.len(), specs.len());
        Self {
            stats,
            by_tag,
            scramble_ms: HUD_SCRAMBLE_MS,
        }
    }

    pub fn active_count(&self) -> usize {
        self.stats.len()
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stats.iter().map(|s| s.spec.tag)
    }

    pub fn record(&self, tag: &str) -> Option<&StatRecord> {
        self.by_tag.get(tag).map(|&i| &self.stats[i].record)
    }

    /// Text currently written to the sink for `tag`.
    pub fn shown(&self, tag: &str) -> Option<&str> {
        self.by_tag.get(tag).map(|&i| self.stats[i].shown.as_str())
    }

    /// True while `tag` is showing its scrambled text.
    pub fn is_scrambled(&self, tag: &str) -> bool {
        self.by_tag
            .get(tag)
            .map(|&i| self.stats[i].pending.is_some())
            .unwrap_or(false)
    }

    /// Run one frame at `now_ms` since start. Returns how many statistics
    /// drew a new value. A failing sink does not stop the other statistics;
    /// the first failure is returned after all have run.
    pub fn update(&mut self, now_ms: f64, rng: &mut dyn RandomSource) -> Result<usize, SceneError> {
        let mut updated = 0;
        let mut first_err = None;

        for stat in &mut self.stats {
            let settled = stat.pending.as_ref().is_some_and(|p| now_ms >= p.at_ms);
            if let Some(p) = settled.then(|| stat.pending.take()).flatten() {
                if let Err(e) = stat.write(p.text) {
                    log::warn!("[hud] {}", e);
                    first_err.get_or_insert(e);
                }
            }

            if !stat.record.is_due(now_ms) {
                continue;
            }
            let value = stat.record.sample(rng);
            let text = stat.spec.format.format(value, rng);
            let glitched = scramble(&text, rng);
            stat.record.last_update = now_ms;
            stat.record.update_interval =
                base_interval(stat.record.variance) + rng.next_f32() as f64 * HUD_INTERVAL_JITTER_MS;
            updated += 1;

            match stat.write(glitched) {
                Ok(()) => {
                    stat.pending = Some(PendingText {
                        text,
                        at_ms: now_ms + self.scramble_ms,
                    });
                }
                Err(e) => {
                    log::warn!("[hud] {}", e);
                    first_err.get_or_insert(e);
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(updated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_interval_steps_at_fixed_thresholds() {
        assert_eq!(base_interval(0.0), 10000.0);
        assert_eq!(base_interval(0.3), 5000.0);
        assert_eq!(base_interval(1.0), 3000.0);
        assert_eq!(base_interval(2.99), 3000.0);
        assert_eq!(base_interval(3.0), 2000.0);
        assert_eq!(base_interval(5.0), 2000.0);
    }

    #[test]
    fn integer_format_rounds() {
        let mut rng = crate::rng::ReplayRandom::constant(0.0);
        assert_eq!(StatFormat::Integer.format(6.5, &mut rng), "7");
        assert_eq!(StatFormat::Percent1.format(87.34, &mut rng), "87.3%");
        assert_eq!(StatFormat::Hours1.format(4.21, &mut rng), "4.2h");
    }
}
