// Host-side tests for the post-processing chain.
// The main crate is wasm-only, so these drive scene-core directly.

use scene_core::camera::CameraParams;
use scene_core::post::{GlitchTrigger, PostChain, PostStageKind};
use scene_core::{ReplayRandom, SeededRandom};

#[test]
fn chain_runs_stages_in_fixed_order() {
    let chain = PostChain::default();
    let kinds: Vec<_> = chain.kinds().collect();
    assert_eq!(kinds, PostStageKind::ORDER.to_vec());
    assert_eq!(kinds.first(), Some(&PostStageKind::Render));
    assert_eq!(kinds.last(), Some(&PostStageKind::Output));
    let names: Vec<_> = kinds.iter().map(|k| k.name()).collect();
    assert_eq!(
        names,
        [
            "render",
            "bloom",
            "dof",
            "chromatic",
            "vignette",
            "glitch",
            "grain",
            "output"
        ]
    );
}

#[test]
fn zero_intensity_keeps_traversal_order() {
    let mut chain = PostChain::default();
    let before: Vec<_> = chain.kinds().collect();
    for kind in [
        PostStageKind::Bloom,
        PostStageKind::Glitch,
        PostStageKind::Vignette,
        PostStageKind::FilmGrain,
    ] {
        chain.set_intensity(kind, 0.0);
        assert_eq!(chain.kinds().collect::<Vec<_>>(), before);
        assert_eq!(chain.intensity(kind), 0.0);
    }
    let u = chain.uniforms(&CameraParams::default());
    assert_eq!(u.bloom[0], 0.0);
    assert_eq!(u.glitch[0], 0.0);
    assert_eq!(u.lens[1], 0.0);
    assert_eq!(u.grain[0], 0.0);
    // Untouched stages keep their strength.
    assert!(u.lens[0] > 0.0);
}

#[test]
fn glitch_rolls_once_per_third_of_a_second() {
    let mut rng = ReplayRandom::constant(0.5);
    let mut trigger = GlitchTrigger::default();
    assert!(trigger.update(0.0, 0.12, &mut rng));
    assert!(!trigger.update(0.1, 0.12, &mut rng));
    assert!(!trigger.update(0.33, 0.12, &mut rng));
    assert_eq!(rng.draws(), 2);
    assert!(trigger.update(0.34, 0.12, &mut rng));
    assert_eq!(trigger.slot(), 1);
    assert_eq!(rng.draws(), 4);
}

#[test]
fn glitch_fires_only_on_high_rolls() {
    let mut trigger = GlitchTrigger::default();

    let mut low = ReplayRandom::new(vec![0.5, 0.99]);
    trigger.update(0.0, 0.12, &mut low);
    assert!(!trigger.active());
    assert!(!trigger.swap(), "swap needs an active glitch");

    let mut high = ReplayRandom::new(vec![0.95, 0.95]);
    trigger.update(1.0, 0.12, &mut high);
    assert!(trigger.active());
    assert!(trigger.swap());

    let mut no_swap = ReplayRandom::new(vec![0.95, 0.5]);
    trigger.update(2.0, 0.12, &mut no_swap);
    assert!(trigger.active());
    assert!(!trigger.swap());
}

#[test]
fn glitch_threshold_is_inclusive() {
    let mut trigger = GlitchTrigger::default();
    // frequency 0.5 puts the threshold at exactly 0.5.
    let mut at_edge = ReplayRandom::new(vec![0.5, 0.0]);
    trigger.update(0.0, 0.5, &mut at_edge);
    assert!(trigger.active());

    let mut below = ReplayRandom::new(vec![0.4999, 0.0]);
    trigger.update(1.0, 0.5, &mut below);
    assert!(!trigger.active());
}

#[test]
fn glitch_rate_tracks_frequency() {
    let mut rng = SeededRandom::new(12);
    let mut trigger = GlitchTrigger::default();
    let slots = 30_000;
    let mut active = 0;
    for slot in 0..slots {
        trigger.update(slot as f32 / 3.0 + 0.01, 0.12, &mut rng);
        if trigger.active() {
            active += 1;
        }
    }
    let rate = active as f32 / slots as f32;
    assert!((rate - 0.12).abs() < 0.02, "rate {}", rate);
}

#[test]
fn uniforms_carry_time_resolution_and_camera() {
    let mut chain = PostChain::default();
    chain.resize(800, 400);
    let mut rng = ReplayRandom::new(vec![0.99, 0.99]);
    chain.update(2.5, &mut rng);
    let camera = CameraParams::default();
    let u = chain.uniforms(&camera);
    assert_eq!(u.resolution, [800.0, 400.0, 1.0 / 800.0, 1.0 / 400.0]);
    assert_eq!(u.time[0], 2.5);
    assert_eq!(u.time[1], 7.0);
    assert_eq!(u.time[2], 1.0);
    assert_eq!(u.camera[0], camera.near);
    assert_eq!(u.camera[1], camera.far);
    assert_eq!(chain.time(), 2.5);
}

#[test]
fn resize_never_reaches_zero() {
    let mut chain = PostChain::default();
    chain.resize(0, 0);
    assert_eq!(chain.resolution(), (1, 1));
}
