// Host-side tests for the HUD simulator.
// The main crate is wasm-only, so these drive scene-core directly.

use scene_core::hud::{
    default_stats, is_scramble_symbol, scramble, HudSimulator, SinkRegistry, StatFormat, StatSpec,
    TextSink,
};
use scene_core::{ReplayRandom, SceneError, SeededRandom};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<(String, String)>>>;

struct RecordingSink {
    tag: String,
    log: Log,
    fail: bool,
}

impl TextSink for RecordingSink {
    fn set_text(&mut self, text: &str) -> Result<(), SceneError> {
        if self.fail {
            return Err(SceneError::Sink {
                tag: self.tag.clone(),
                reason: "gone".into(),
            });
        }
        self.log.borrow_mut().push((self.tag.clone(), text.to_string()));
        Ok(())
    }
}

#[derive(Default)]
struct Registry {
    log: Log,
    missing: HashSet<&'static str>,
    failing: HashSet<&'static str>,
}

impl SinkRegistry for Registry {
    fn lookup(&mut self, tag: &str) -> Option<Box<dyn TextSink>> {
        if self.missing.contains(tag) {
            return None;
        }
        Some(Box::new(RecordingSink {
            tag: tag.to_string(),
            log: self.log.clone(),
            fail: self.failing.contains(tag),
        }))
    }
}

fn single_stat(variance: f64) -> Vec<StatSpec> {
    vec![StatSpec {
        tag: "cognitive",
        base_value: 87.3,
        variance,
        format: StatFormat::Percent1,
        first_interval_ms: (2000.0, 1000.0),
    }]
}

#[test]
fn scramble_preserves_length_and_separators() {
    let mut rng = SeededRandom::new(4);
    for s in ["87.3%", "4.2h", "7", "NOMINAL", "98.7 %", "", "  .%"] {
        let out = scramble(s, &mut rng);
        assert_eq!(out.chars().count(), s.chars().count());
        for (a, b) in s.chars().zip(out.chars()) {
            if matches!(a, ' ' | '.' | '%') {
                assert_eq!(a, b, "separator moved in {:?} -> {:?}", s, out);
            } else {
                assert!(is_scramble_symbol(b), "{:?} not in alphabet", b);
            }
        }
    }
}

#[test]
fn value_changes_only_after_interval_elapses() {
    let mut registry = Registry::default();
    // Zero draw: first interval is exactly 2000 ms.
    let mut rng = ReplayRandom::constant(0.0);
    let mut hud = HudSimulator::new(&single_stat(5.0), &mut registry, &mut rng);
    assert_eq!(hud.record("cognitive").map(|r| r.update_interval), Some(2000.0));

    for now in [1.0, 500.0, 1999.0, 2000.0] {
        assert_eq!(hud.update(now, &mut rng).ok(), Some(0), "changed at {}", now);
    }
    assert!(registry.log.borrow().is_empty());

    assert_eq!(hud.update(2000.5, &mut rng).ok(), Some(1));
    let rec = hud.record("cognitive").copied().expect("record");
    assert_eq!(rec.last_update, 2000.5);
    // variance 5 → 2000 ms base, zero jitter.
    assert_eq!(rec.update_interval, 2000.0);
}

#[test]
fn scrambled_text_is_replaced_after_fifty_ms() {
    let mut registry = Registry::default();
    let log = registry.log.clone();
    let mut rng = ReplayRandom::constant(0.5);
    let mut hud = HudSimulator::new(&single_stat(5.0), &mut registry, &mut rng);

    // 0.5 draw: first interval 2500 ms, value exactly the base.
    hud.update(2600.0, &mut rng).expect("update");
    assert!(hud.is_scrambled("cognitive"));
    let glitched = log.borrow()[0].1.clone();
    assert_ne!(glitched, "87.3%");
    assert_eq!(glitched.chars().count(), 5);

    hud.update(2640.0, &mut rng).expect("update");
    assert_eq!(log.borrow().len(), 1, "restore waits for the scramble window");

    hud.update(2650.0, &mut rng).expect("update");
    assert!(!hud.is_scrambled("cognitive"));
    assert_eq!(hud.shown("cognitive"), Some("87.3%"));
    assert_eq!(log.borrow().last().map(|(_, t)| t.as_str()), Some("87.3%"));
}

#[test]
fn missing_sink_disables_only_that_stat() {
    let mut registry = Registry::default();
    registry.missing.insert("layers");
    let mut rng = SeededRandom::new(2);
    let hud = HudSimulator::new(&default_stats(), &mut registry, &mut rng);
    assert_eq!(hud.active_count(), 4);
    assert!(hud.record("layers").is_none());
    assert!(hud.tags().all(|t| t != "layers"));
}

#[test]
fn failing_sink_does_not_stop_other_stats() {
    let mut registry = Registry::default();
    registry.failing.insert("caffeine");
    let log = registry.log.clone();
    let mut rng = ReplayRandom::constant(0.0);
    let mut hud = HudSimulator::new(&default_stats(), &mut registry, &mut rng);

    // Every stat is due well after its longest first interval.
    let err = hud.update(20_000.0, &mut rng).expect_err("caffeine sink fails");
    assert!(matches!(err, SceneError::Sink { ref tag, .. } if tag == "caffeine"));

    let tags: HashSet<String> = log.borrow().iter().map(|(t, _)| t.clone()).collect();
    for tag in ["cognitive", "layers", "sync", "entropy"] {
        assert!(tags.contains(tag), "{} was not written", tag);
    }
    assert!(!tags.contains("caffeine"));
    // The failing stat still advanced its schedule.
    assert_eq!(hud.record("caffeine").map(|r| r.last_update), Some(20_000.0));
}

#[test]
fn entropy_shows_a_known_status_word() {
    let mut registry = Registry::default();
    let mut rng = SeededRandom::new(21);
    let mut hud = HudSimulator::new(&default_stats(), &mut registry, &mut rng);
    hud.update(20_000.0, &mut rng).expect("update");
    hud.update(20_100.0, &mut rng).expect("update");
    let shown = hud.shown("entropy").expect("entropy active");
    assert!(["NOMINAL", "STABLE", "OPTIMAL"].contains(&shown));
}
