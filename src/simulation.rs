//! Particle population and per-frame stepping.

use crate::export::ParticleExporter;
use crate::particle::{ExportedParticle, Particle, MAX_PARTICLES};
use crate::spawn::{spawn_particle, RandomSource, SeededRandom};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Tunable simulation parameters.
///
/// Plain fields; changes take effect on the next [`ParticleSimulator::update`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Target population. Values above [`MAX_PARTICLES`] act as [`MAX_PARTICLES`].
    pub max_particle_count: usize,
    /// Radius particles grow towards.
    pub target_radius: f32,
    /// Multiplier applied to every `dt`.
    pub time_scale: f32,
    /// Emission point.
    pub spawn_position: Vec3,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_particle_count: 128,
            target_radius: 0.1,
            time_scale: 1.0,
            spawn_position: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

/// Owns the live particle population and advances it.
///
/// The population is a slot array: it grows by at most one spawn per update,
/// is truncated when over target, and dead slots are overwritten in place.
/// Storage for [`MAX_PARTICLES`] slots is reserved up front.
///
/// # Example
///
/// ```ignore
/// let mut sim = ParticleSimulator::new(SimulationConfig::default(), SeededRandom::from_seed(1));
/// sim.update(1.0 / 60.0, camera_position);
/// let exported = sim.export();
/// ```
#[derive(Clone, Debug)]
pub struct ParticleSimulator<R: RandomSource = SeededRandom> {
    config: SimulationConfig,
    particles: Vec<Particle>,
    camera_position: Vec3,
    rng: R,
}

impl<R: RandomSource> ParticleSimulator<R> {
    /// Create an empty simulator.
    pub fn new(config: SimulationConfig, rng: R) -> Self {
        Self {
            config,
            particles: Vec::with_capacity(MAX_PARTICLES),
            camera_position: Vec3::ZERO,
            rng,
        }
    }

    /// Seed the population with existing particles (at most [`MAX_PARTICLES`]).
    pub fn with_particles<I>(mut self, particles: I) -> Self
    where
        I: IntoIterator<Item = Particle>,
    {
        self.particles.clear();
        self.particles.extend(particles.into_iter().take(MAX_PARTICLES));
        self
    }

    /// Create a particle at the configured spawn position.
    pub fn spawn(&mut self) -> Particle {
        spawn_particle(&mut self.rng, self.config.spawn_position)
    }

    /// Advance the simulation by `dt` seconds, before time scaling.
    ///
    /// `camera_position` is only recorded for [`ParticleSimulator::export`].
    /// `dt` must be finite; it is not validated.
    pub fn update(&mut self, dt: f32, camera_position: Vec3) {
        self.camera_position = camera_position;

        let dt = dt * self.config.time_scale;
        let target = self.target_count();

        if self.particles.len() < target {
            let particle = self.spawn();
            self.particles.push(particle);
        } else if self.particles.len() > target {
            log::debug!(
                "Truncating particle population from {} to {}",
                self.particles.len(),
                target
            );
            self.particles.truncate(target);
        }

        let target_radius = self.config.target_radius;
        let spawn_position = self.config.spawn_position;
        for particle in self.particles.iter_mut() {
            particle.step(dt, target_radius);
            if !particle.is_alive() {
                *particle = spawn_particle(&mut self.rng, spawn_position);
            }
        }
    }

    /// Export the population sorted front-to-back from the last camera position.
    pub fn export(&self) -> Vec<ExportedParticle> {
        ParticleExporter::export(&self.particles, self.camera_position)
    }

    /// Drop every particle. The population regrows from the next update.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Live particles in slot order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Camera position recorded by the last update.
    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Population the next update steers towards.
    fn target_count(&self) -> usize {
        self.config.max_particle_count.min(MAX_PARTICLES)
    }
}

impl Default for ParticleSimulator<SeededRandom> {
    fn default() -> Self {
        Self::new(SimulationConfig::default(), SeededRandom::default())
    }
}
