// Host-side tests for the particle field.
// The main crate is wasm-only, so these drive scene-core directly.

use glam::Vec3;
use scene_core::particles::{Particle, ParticleBounds, ParticleField, ParticleParams};
use scene_core::{ReplayRandom, SeededRandom};

fn single(position: Vec3, velocity: Vec3) -> ParticleField {
    ParticleField::from_particles(vec![Particle { position, velocity }], ParticleBounds::default())
}

#[test]
fn new_field_has_requested_count_inside_bounds() {
    let mut rng = SeededRandom::new(1);
    let params = ParticleParams::default();
    let field = ParticleField::new(&params, &mut rng);
    assert_eq!(field.len(), params.count);
    assert_eq!(field.looks().len(), params.count);

    let b = params.bounds;
    for p in field.particles() {
        assert!(p.position.x.abs() <= b.spread_x / 2.0);
        assert!(p.position.y.abs() <= b.height / 2.0);
        assert!(p.position.z.abs() <= b.spread_z / 2.0);
        assert!(p.velocity.y > 0.0, "particles only rise");
    }
    for look in field.looks() {
        assert!(look.size > 0.0);
        assert!((0.0..=1.0).contains(&look.opacity));
    }
}

#[test]
fn particle_above_ceiling_respawns_at_floor() {
    let b = ParticleBounds::default();
    let eps = 0.01;
    let velocity = Vec3::new(0.0, 0.002, 0.0);
    let mut field = single(Vec3::new(1.0, b.height / 2.0 + eps, 1.0), velocity);

    // 0.75 re-samples x and z to +spread/4.
    let mut rng = ReplayRandom::constant(0.75);
    field.advance(0.0, &mut rng);

    let p = field.particles()[0];
    assert_eq!(p.position.y, -b.height / 2.0);
    assert!((p.position.x - b.spread_x / 4.0).abs() < 1e-5);
    assert!((p.position.z - b.spread_z / 4.0).abs() < 1e-5);
    assert_eq!(rng.draws(), 2);
}

#[test]
fn respawned_position_rises_from_floor_next_frame() {
    let b = ParticleBounds::default();
    let velocity = Vec3::new(0.0, 0.003, 0.0);
    let mut field = single(Vec3::new(0.0, b.height / 2.0 + 0.001, 0.0), velocity);
    let mut rng = ReplayRandom::constant(0.5);
    field.advance(0.0, &mut rng);
    field.advance(0.0, &mut rng);
    let y = field.particles()[0].position.y;
    assert!((y - (-b.height / 2.0 + velocity.y)).abs() < 1e-5);
}

#[test]
fn horizontal_escape_wraps_to_opposite_side() {
    let b = ParticleBounds::default();
    let mut field = single(
        Vec3::new(b.spread_x / 2.0 - 0.0001, 0.0, -b.spread_z / 2.0 + 0.0001),
        Vec3::new(0.01, 0.0, -0.01),
    );
    let mut rng = ReplayRandom::constant(0.5);
    field.advance(0.0, &mut rng);
    let p = field.particles()[0];
    assert_eq!(p.position.x, -b.spread_x / 2.0);
    assert_eq!(p.position.z, b.spread_z / 2.0);
    assert_eq!(rng.draws(), 0, "wrapping draws no randomness");
}

#[test]
fn sway_is_bounded_by_wave_amplitude() {
    let field = single(Vec3::ZERO, Vec3::ZERO);
    let amp = scene_core::constants::PARTICLE_WAVE_AMPLITUDE;
    for step in 0..100 {
        let t = step as f32 * 0.37;
        let s = field.perturbation(t, step);
        assert!(s.x.abs() <= amp + 1e-7);
        assert_eq!(s.y, 0.0);
        assert!(s.z.abs() <= amp + 1e-7);
    }
}

#[test]
fn field_never_resizes_and_stays_bounded() {
    let mut rng = SeededRandom::new(8);
    let params = ParticleParams::default();
    let mut field = ParticleField::new(&params, &mut rng);
    let b = params.bounds;
    for frame in 0..5000 {
        field.advance(frame as f32 / 60.0, &mut rng);
    }
    assert_eq!(field.len(), params.count);
    for p in field.particles() {
        assert!(p.position.x.abs() <= b.spread_x / 2.0);
        assert!(p.position.y <= b.height / 2.0);
        assert!(p.position.z.abs() <= b.spread_z / 2.0);
    }
    assert_eq!(field.time(), 4999.0 / 60.0);
}
