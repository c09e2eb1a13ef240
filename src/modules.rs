//! Fluid and tile-debug render modules.

use glam::Vec3;

use crate::config::RenderSettings;
use crate::particle::ExportedParticle;
use crate::renderer::FluidRenderer;
use crate::simulation::ParticleSimulator;
use crate::tiling::TileGrid;
use crate::spawn::{RandomSource, SeededRandom};
use crate::uniforms::FluidInfo;

/// Ring length assumed when the host reports no back buffers.
pub const DEFAULT_BUFFER_RING: usize = 3;

/// Simulates the particles and draws them as a blended SDF surface.
///
/// Each frame's export is uploaded into its own ring slot so the GPU can
/// still read earlier frames while the CPU writes the next one.
pub struct FluidRenderModule<R: RandomSource = SeededRandom> {
    simulator: ParticleSimulator<R>,
    exported: Vec<ExportedParticle>,
    settings: RenderSettings,
    frame: u32,
    ring_len: usize,
    enabled: bool,
}

impl<R: RandomSource> FluidRenderModule<R> {
    /// Create an enabled module. `ring_len` is the host's back buffer count.
    pub fn new(simulator: ParticleSimulator<R>, settings: RenderSettings, ring_len: usize) -> Self {
        let ring_len = if ring_len == 0 {
            log::warn!(
                "Host reported no back buffers, assuming {} for the particle ring",
                DEFAULT_BUFFER_RING
            );
            DEFAULT_BUFFER_RING
        } else {
            ring_len
        };

        Self {
            simulator,
            exported: Vec::new(),
            settings,
            frame: 0,
            ring_len,
            enabled: true,
        }
    }

    /// Step the simulation and rebuild this frame's export.
    pub fn update(&mut self, dt: f32, camera_position: Vec3) {
        self.simulator.update(dt, camera_position);
        self.exported = self.simulator.export();
        self.frame = self.frame.wrapping_add(1);
    }

    /// Constants for the current export.
    pub fn fluid_info(&self) -> FluidInfo {
        FluidInfo::new(&self.exported, &self.settings)
    }

    /// Ring slot holding the current frame's particles.
    pub fn current_slot(&self) -> usize {
        self.frame as usize % self.ring_len
    }

    /// Upload the current export and run the tiling and SDF passes.
    pub fn execute<F: FluidRenderer + ?Sized>(&self, renderer: &mut F) {
        let info = self.fluid_info();
        let slot = self.current_slot();

        renderer.write_fluid_info(&info);
        if !self.exported.is_empty() {
            renderer.upload_particles(slot, &self.exported);
        }
        renderer.dispatch_tiling(slot, self.tile_grid().workgroups());
        renderer.render_sdf();
    }

    pub fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Particles exported by the last update.
    pub fn exported(&self) -> &[ExportedParticle] {
        &self.exported
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn ring_len(&self) -> usize {
        self.ring_len
    }

    pub fn simulator(&self) -> &ParticleSimulator<R> {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut ParticleSimulator<R> {
        &mut self.simulator
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Tile grid the tiling pass dispatches over, clamped to the supported maximum.
    pub fn tile_grid(&self) -> TileGrid {
        self.settings.tile_grid()
    }

    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }
}

/// Overlays the tile grid occupancy computed by the fluid module's tiling pass.
#[derive(Debug)]
pub struct FluidDebugRenderModule {
    enabled: bool,
}

impl FluidDebugRenderModule {
    /// Create a disabled module.
    pub fn new() -> Self {
        Self { enabled: false }
    }

    /// Draw the overlay. Does nothing unless `fluid` is enabled, since its
    /// tiling output is what gets visualized.
    pub fn execute<R, F>(&self, fluid: &FluidRenderModule<R>, renderer: &mut F)
    where
        R: RandomSource,
        F: FluidRenderer + ?Sized,
    {
        if !fluid.is_enabled() {
            return;
        }
        renderer.render_tile_debug();
    }

    pub fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for FluidDebugRenderModule {
    fn default() -> Self {
        Self::new()
    }
}
