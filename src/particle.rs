//! Particle records.
//!
//! [`Particle`] is the simulation-side state. [`ExportedParticle`] is the
//! 16-byte record the tiling and SDF passes read from a storage buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Hard cap on live and exported particles. Sizes the GPU particle buffers.
pub const MAX_PARTICLES: usize = 1024;

/// Downward acceleration applied to `velocity.y`.
pub const GRAVITY: f32 = -1.0;

/// Linear damping rate. A step with `dt >= 1 / VELOCITY_ATTENUATION` stops the particle.
pub const VELOCITY_ATTENUATION: f32 = 1.0;

/// Age (seconds) at which a particle stops growing and starts shrinking.
pub const GROWTH_DURATION: f32 = 10.0;

/// Radius change per second while growing or shrinking.
pub const RADIUS_RATE: f32 = 0.2;

/// A simulated particle.
///
/// A `radius <= 0` marks the slot as dead; the simulator respawns it in the
/// same update, so callers never observe one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// World-space center.
    pub position: Vec3,
    /// World-space velocity.
    pub velocity: Vec3,
    /// SDF radius.
    pub radius: f32,
    /// Simulated seconds since spawn.
    pub age: f32,
}

impl Particle {
    /// Whether the particle still contributes geometry.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.radius > 0.0
    }

    /// Whether the particle is still in its growth phase.
    #[inline]
    pub fn is_growing(&self) -> bool {
        self.age < GROWTH_DURATION
    }

    /// Advance one step of `dt` (already time-scaled).
    ///
    /// Does not respawn; the owner checks [`Particle::is_alive`] afterwards.
    pub fn step(&mut self, dt: f32, target_radius: f32) {
        self.age += dt;

        self.velocity.y += GRAVITY * dt;
        self.velocity *= (1.0 - VELOCITY_ATTENUATION * dt).max(0.0);
        self.position += self.velocity * dt;

        // Radius is ignored on purpose: particles look better half sunk into the floor.
        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = 0.0;
        }

        // Tested after the age increment, so the tick crossing the threshold already shrinks.
        if self.is_growing() {
            self.radius = (self.radius + RADIUS_RATE * dt).min(target_radius);
        } else {
            self.radius -= RADIUS_RATE * dt;
        }
    }
}

/// GPU-facing particle: center and radius packed into one `vec4`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ExportedParticle {
    pub position: Vec3,
    pub radius: f32,
}

impl ExportedParticle {
    /// Create a record from a center and radius.
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self { position, radius }
    }
}

impl From<&Particle> for ExportedParticle {
    fn from(p: &Particle) -> Self {
        Self::new(p.position, p.radius)
    }
}
