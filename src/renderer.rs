//! The renderer the fluid modules drive.
//!
//! Implementations own the GPU side: the particle buffer ring, the fluid
//! constant buffer and the tiling and SDF pipelines. [`crate::gpu`] provides
//! a wgpu implementation.

use crate::particle::ExportedParticle;
use crate::uniforms::FluidInfo;

/// GPU collaborator fed by [`crate::FluidRenderModule`] and
/// [`crate::FluidDebugRenderModule`].
///
/// Calls for one frame arrive in this order: `write_fluid_info`,
/// `upload_particles` (skipped for an empty frame), `dispatch_tiling`,
/// `render_sdf`, optionally `render_tile_debug`, then `end_frame`.
pub trait FluidRenderer {
    /// Copy this frame's particles into ring buffer `slot`.
    fn upload_particles(&mut self, slot: usize, particles: &[ExportedParticle]);

    /// Update the fluid constant buffer.
    fn write_fluid_info(&mut self, info: &FluidInfo);

    /// Bin the particles of ring buffer `slot` into screen tiles.
    fn dispatch_tiling(&mut self, slot: usize, workgroups: (u32, u32));

    /// Trace the fluid surface into the G-buffer.
    fn render_sdf(&mut self);

    /// Overlay per-tile particle occupancy.
    fn render_tile_debug(&mut self);

    /// Flush work recorded for the frame.
    fn end_frame(&mut self) {}
}

impl<T: FluidRenderer + ?Sized> FluidRenderer for &mut T {
    fn upload_particles(&mut self, slot: usize, particles: &[ExportedParticle]) {
        (**self).upload_particles(slot, particles)
    }

    fn write_fluid_info(&mut self, info: &FluidInfo) {
        (**self).write_fluid_info(info)
    }

    fn dispatch_tiling(&mut self, slot: usize, workgroups: (u32, u32)) {
        (**self).dispatch_tiling(slot, workgroups)
    }

    fn render_sdf(&mut self) {
        (**self).render_sdf()
    }

    fn render_tile_debug(&mut self) {
        (**self).render_tile_debug()
    }

    fn end_frame(&mut self) {
        (**self).end_frame()
    }
}
