use crate::constants::*;
use crate::rng::RandomSource;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Per-frame displacement, fixed at creation.
    pub velocity: Vec3,
}

/// Per-particle render attributes drawn once at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleLook {
    pub size: f32,
    pub opacity: f32,
}

/// Box the particles live in, centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleBounds {
    pub spread_x: f32,
    pub height: f32,
    pub spread_z: f32,
}

impl Default for ParticleBounds {
    fn default() -> Self {
        Self {
            spread_x: PARTICLE_SPREAD,
            height: PARTICLE_HEIGHT,
            spread_z: PARTICLE_SPREAD,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ParticleParams {
    pub count: usize,
    pub bounds: ParticleBounds,
    pub wave_amplitude: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            bounds: ParticleBounds::default(),
            wave_amplitude: PARTICLE_WAVE_AMPLITUDE,
        }
    }
}

/// Fixed-size field of slowly rising dust motes.
pub struct ParticleField {
    particles: Vec<Particle>,
    looks: Vec<ParticleLook>,
    bounds: ParticleBounds,
    wave_amplitude: f32,
    time: f32,
}

impl ParticleField {
    pub fn new(params: &ParticleParams, rng: &mut dyn RandomSource) -> Self {
        let b = params.bounds;
        let mut particles = Vec::with_capacity(params.count);
        let mut looks = Vec::with_capacity(params.count);
        for _ in 0..params.count {
            let position = Vec3::new(
                rng.centered(b.spread_x),
                rng.centered(b.height),
                rng.centered(b.spread_z),
            );
            let velocity = Vec3::new(
                rng.centered(PARTICLE_DRIFT_XZ),
                PARTICLE_RISE_MIN + rng.next_f32() * PARTICLE_RISE_SPAN,
                rng.centered(PARTICLE_DRIFT_XZ),
            );
            particles.push(Particle { position, velocity });
            looks.push(ParticleLook {
                size: PARTICLE_SIZE_MIN + rng.next_f32() * PARTICLE_SIZE_SPAN,
                opacity: PARTICLE_OPACITY_MIN + rng.next_f32() * PARTICLE_OPACITY_SPAN,
            });
        }
        Self {
            particles,
            looks,
            bounds: b,
            wave_amplitude: params.wave_amplitude,
            time: 0.0,
        }
    }

    /// Build a field from explicit particles. Looks default to mid values.
    pub fn from_particles(particles: Vec<Particle>, bounds: ParticleBounds) -> Self {
        let looks = vec![
            ParticleLook {
                size: PARTICLE_SIZE_MIN + PARTICLE_SIZE_SPAN * 0.5,
                opacity: PARTICLE_OPACITY_MIN + PARTICLE_OPACITY_SPAN * 0.5,
            };
            particles.len()
        ];
        Self {
            particles,
            looks,
            bounds,
            wave_amplitude: PARTICLE_WAVE_AMPLITUDE,
            time: 0.0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn looks(&self) -> &[ParticleLook] {
        &self.looks
    }

    pub fn bounds(&self) -> ParticleBounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Elapsed time of the last update; drives the colour shimmer.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Horizontal sway for particle `i` at time `t`.
    pub fn perturbation(&self, t: f32, i: usize) -> Vec3 {
        let i = i as f32;
        Vec3::new(
            (t * 0.5 + i * 0.1).sin() * self.wave_amplitude,
            0.0,
            (t * 0.4 + i * 0.15).cos() * self.wave_amplitude,
        )
    }

    pub fn advance(&mut self, t: f32, rng: &mut dyn RandomSource) {
        let b = self.bounds;
        let (half_x, half_y, half_z) = (b.spread_x / 2.0, b.height / 2.0, b.spread_z / 2.0);
        for i in 0..self.particles.len() {
            let sway = self.perturbation(t, i);
            let p = &mut self.particles[i];
            p.position += p.velocity + sway;

            // Respawn at the floor somewhere new.
            if p.position.y > half_y {
                p.position.y = -half_y;
                p.position.x = rng.centered(b.spread_x);
                p.position.z = rng.centered(b.spread_z);
            }

            p.position.x = wrap_axis(p.position.x, half_x);
            p.position.z = wrap_axis(p.position.z, half_z);
        }
        self.time = t;
    }
}

#[inline]
fn wrap_axis(v: f32, half: f32) -> f32 {
    if v > half {
        -half
    } else if v < -half {
        half
    } else {
        v
    }
}
