//! Per-frame constants shared by the tiling and SDF passes.

use bytemuck::{Pod, Zeroable};

use crate::config::RenderSettings;
use crate::export::ParticleExporter;
use crate::particle::ExportedParticle;

/// Fluid constant buffer contents. 32 bytes, 16-byte aligned for uniform use.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FluidInfo {
    /// Records in this frame's particle buffer.
    pub particle_count: u32,
    pub tiles_x: u32,
    pub tiles_y: u32,
    /// Largest exported radius; sizes each tile's overlap test.
    pub biggest_radius: f32,
    pub sdf_blend: f32,
    pub triplanar_blend: f32,
    pub uv_scaling: f32,
    _pad: f32,
}

impl FluidInfo {
    /// Constants for a frame that draws `particles` with `settings`.
    pub fn new(particles: &[ExportedParticle], settings: &RenderSettings) -> Self {
        let grid = settings.tile_grid();
        Self {
            particle_count: particles.len() as u32,
            tiles_x: grid.tiles_x,
            tiles_y: grid.tiles_y,
            biggest_radius: ParticleExporter::max_radius(particles),
            sdf_blend: settings.sdf_blend,
            triplanar_blend: settings.triplanar_blend,
            uv_scaling: settings.uv_scaling,
            _pad: 0.0,
        }
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
