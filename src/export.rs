//! CPU to GPU particle export.
//!
//! The SDF tracer exits early on the nearest hits, so particles are handed
//! over front-to-back from the camera and capped at [`MAX_PARTICLES`].

use crate::particle::{ExportedParticle, Particle, MAX_PARTICLES};
use glam::Vec3;

/// Stateless conversion from simulation particles to the GPU particle buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParticleExporter;

impl ParticleExporter {
    /// Build the GPU particle list for one frame.
    ///
    /// Drops particles with `radius <= 0`, sorts the rest by squared distance
    /// to `camera_position` (stable) and keeps the nearest [`MAX_PARTICLES`].
    /// The returned `Vec` shares nothing with `particles`.
    pub fn export(particles: &[Particle], camera_position: Vec3) -> Vec<ExportedParticle> {
        let mut exported: Vec<ExportedParticle> = particles
            .iter()
            .filter(|p| p.is_alive())
            .map(ExportedParticle::from)
            .collect();

        exported.sort_by(|a, b| {
            let da = a.position.distance_squared(camera_position);
            let db = b.position.distance_squared(camera_position);
            da.total_cmp(&db)
        });
        exported.truncate(MAX_PARTICLES);

        exported
    }

    /// Largest radius in `exported`, or `0.0` when empty.
    ///
    /// Bounds how far a particle can reach into neighbouring tiles.
    pub fn max_radius(exported: &[ExportedParticle]) -> f32 {
        exported
            .iter()
            .map(|p| p.radius)
            .reduce(f32::max)
            .unwrap_or(0.0)
    }
}
