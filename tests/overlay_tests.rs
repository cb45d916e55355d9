// Host-side tests for the overlay visibility cycle.
// The main crate is wasm-only, so these drive scene-core directly.

use scene_core::overlay::{
    DurationRange, OverlayMachine, OverlayPhase, OverlayStage, OverlayTiming, OverlayVariant,
    WireframeOverlay,
};
use scene_core::{RandomSource, ReplayRandom, SeededRandom};

const DT: f32 = 1.0 / 60.0;

fn short_timing() -> OverlayTiming {
    OverlayTiming {
        initial: DurationRange::new(0.5, 1.0),
        visible: DurationRange::new(0.5, 1.0),
        hidden: DurationRange::new(0.5, 1.0),
    }
}

#[test]
fn opacity_stays_within_bounds_for_random_deltas() {
    let mut rng = SeededRandom::new(7);
    let mut deltas = SeededRandom::new(99);
    let mut m = OverlayMachine::new(short_timing(), &mut rng);
    for _ in 0..20_000 {
        // Mix of tiny, normal and huge frame gaps.
        let dt = match deltas.index(4) {
            0 => 0.0,
            1 => deltas.range(0.0, 0.02),
            2 => deltas.range(0.02, 0.5),
            _ => deltas.range(0.5, 5.0),
        };
        m.advance(dt, &mut rng);
        assert!(
            (0.0..=0.6).contains(&m.opacity()),
            "opacity {} out of bounds",
            m.opacity()
        );
    }
}

#[test]
fn huge_delta_causes_at_most_one_transition() {
    let mut rng = ReplayRandom::constant(0.0);
    let mut m = OverlayMachine::new(short_timing(), &mut rng);
    let mut phase = m.phase();
    for _ in 0..32 {
        let change = m.advance(1000.0, &mut rng);
        let change = change.expect("a 1000s tick always leaves the current phase");
        assert_eq!(change.from, phase);
        assert_eq!(change.to, phase.next());
        phase = m.phase();
    }
}

#[test]
fn phases_follow_the_cycle_without_skipping() {
    let mut rng = SeededRandom::new(3);
    let mut m = OverlayMachine::new(short_timing(), &mut rng);
    assert_eq!(m.phase(), OverlayPhase::Hidden);

    let expected = [
        OverlayPhase::FadingIn,
        OverlayPhase::Visible,
        OverlayPhase::FadingOut,
        OverlayPhase::Hidden,
    ];
    let mut seen = Vec::new();
    for _ in 0..(60 * 60) {
        if let Some(change) = m.advance(DT, &mut rng) {
            assert_eq!(change.to, change.from.next());
            seen.push(change.to);
        }
    }
    assert!(seen.len() >= 8, "expected two full cycles, saw {:?}", seen);
    for (i, phase) in seen.iter().enumerate() {
        assert_eq!(*phase, expected[i % 4]);
    }
}

#[test]
fn fade_in_reaches_cap_in_about_ninety_ticks() {
    let mut rng = ReplayRandom::constant(0.0);
    let timing = OverlayTiming {
        initial: DurationRange::new(0.0, 0.0),
        ..short_timing()
    };
    let mut m = OverlayMachine::with_fade(timing, 0.4, 0.6, &mut rng);

    // Zero trigger: the first tick enters fading_in without adding opacity.
    let first = m.advance(DT, &mut rng).expect("enter fading_in");
    assert_eq!(first.to, OverlayPhase::FadingIn);
    assert_eq!(m.opacity(), 0.0);

    let mut ticks = 0;
    loop {
        ticks += 1;
        if let Some(change) = m.advance(DT, &mut rng) {
            assert_eq!(change.to, OverlayPhase::Visible);
            break;
        }
        assert!(ticks < 200, "never reached the cap");
    }
    assert!((89..=91).contains(&ticks), "took {} ticks", ticks);
    assert_eq!(m.opacity(), 0.6);
}

#[test]
fn next_trigger_is_drawn_from_the_phase_range() {
    let mut rng = SeededRandom::new(11);
    let timing = OverlayVariant::Globe.build().timing();
    let mut m = OverlayMachine::new(timing, &mut rng);
    assert!(timing.initial.contains(m.state().next_trigger));

    for _ in 0..(60 * 600) {
        if let Some(change) = m.advance(DT, &mut rng) {
            let next = m.state().next_trigger;
            match change.to {
                OverlayPhase::Visible => assert!(timing.visible.contains(next)),
                OverlayPhase::Hidden => assert!(timing.hidden.contains(next)),
                _ => {}
            }
        }
    }
}

#[test]
fn hidden_machine_stays_invisible_until_trigger() {
    let mut rng = ReplayRandom::constant(0.5);
    let mut m = OverlayMachine::new(short_timing(), &mut rng);
    // Trigger is 0.75s; 40 ticks is about 0.67s.
    for _ in 0..40 {
        assert!(m.advance(DT, &mut rng).is_none());
        assert_eq!(m.opacity(), 0.0);
    }
}

#[test]
fn variants_parse_and_build() {
    assert_eq!(OverlayVariant::parse("Globe"), Some(OverlayVariant::Globe));
    assert_eq!(OverlayVariant::parse(" polyhedra "), Some(OverlayVariant::Polyhedra));
    assert_eq!(OverlayVariant::parse("torus"), None);

    for v in [OverlayVariant::Globe, OverlayVariant::Polyhedra] {
        let shape = v.build();
        assert!(!shape.segments().is_empty());
        assert_eq!(shape.segments().len() % 2, 0, "line list needs vertex pairs");
    }
}

#[test]
fn polyhedra_geometry_keeps_vertex_count_while_animating() {
    let mut rng = SeededRandom::new(5);
    let mut stage = OverlayStage::new(OverlayVariant::Polyhedra.build(), &mut rng);
    let count = stage.shape().segments().len();
    let rev = stage.shape().geometry_revision();
    stage.advance(DT, DT, &mut rng);
    stage.advance(DT, 2.0 * DT, &mut rng);
    assert_eq!(stage.shape().segments().len(), count);
    assert!(stage.shape().geometry_revision() > rev);
    assert_eq!(stage.material().time, 2.0 * DT);
}
