//! Particle spawning and the randomness it draws on.
//!
//! Spawning needs uniform samples in a range and nothing else, so the source
//! is a one-method trait. The simulator owns its source; tests substitute a
//! deterministic one.

use crate::particle::{Particle, GROWTH_DURATION};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Base launch velocity of a new particle.
pub const SPAWN_DIRECTION: Vec3 = Vec3::new(1.5, 0.0, 0.0);

/// Per-axis half-width of the random velocity jitter.
pub const SPAWN_JITTER: f32 = 0.5;

/// Radius every particle starts from.
pub const SEED_RADIUS: f32 = 0.001;

/// Source of uniform random samples.
pub trait RandomSource {
    /// Uniform sample in `[min, max)`. Requires `min < max`.
    fn random_range(&mut self, min: f32, max: f32) -> f32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn random_range(&mut self, min: f32, max: f32) -> f32 {
        (**self).random_range(min, max)
    }
}

/// Default [`RandomSource`] backed by a seeded [`SmallRng`].
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    /// Reproducible generator for a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the wall clock, different each program execution.
    pub fn from_time() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::from_seed(seed)
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_time()
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }
}

/// Create a fresh particle at `position`.
///
/// Velocity is [`SPAWN_DIRECTION`] jittered independently per axis. The
/// starting age is random over the whole growth phase so a batch spawned
/// together does not pulse in lockstep.
pub fn spawn_particle<R: RandomSource + ?Sized>(rng: &mut R, position: Vec3) -> Particle {
    let jitter = Vec3::new(
        rng.random_range(-SPAWN_JITTER, SPAWN_JITTER),
        rng.random_range(-SPAWN_JITTER, SPAWN_JITTER),
        rng.random_range(-SPAWN_JITTER, SPAWN_JITTER),
    );

    Particle {
        position,
        velocity: SPAWN_DIRECTION + jitter,
        radius: SEED_RADIUS,
        age: rng.random_range(0.0, GROWTH_DURATION),
    }
}
