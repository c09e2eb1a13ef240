//! The sample: both render modules plus the toggles that switch them.

use glam::Vec3;

use crate::config::FluidSettings;
use crate::modules::{FluidDebugRenderModule, FluidRenderModule};
use crate::renderer::FluidRenderer;
use crate::simulation::ParticleSimulator;
use crate::spawn::{RandomSource, SeededRandom};

/// Fluid sample driven by the host's frame loop.
///
/// # Example
///
/// ```ignore
/// let mut sample = FluidSample::new(&FluidSettings::default(), SeededRandom::from_time(), 3);
/// loop {
///     sample.tick(dt, camera.position());
///     sample.render(&mut renderer);
/// }
/// ```
pub struct FluidSample<R: RandomSource = SeededRandom> {
    fluid: FluidRenderModule<R>,
    debug: FluidDebugRenderModule,
    render_fluid: bool,
    render_tile_debug: bool,
}

impl<R: RandomSource> FluidSample<R> {
    /// Build both modules from `settings`. `ring_len` is the host's back buffer count.
    pub fn new(settings: &FluidSettings, rng: R, ring_len: usize) -> Self {
        let simulator = ParticleSimulator::new(settings.simulation, rng);
        let fluid = FluidRenderModule::new(simulator, settings.render, ring_len);

        let grid = fluid.tile_grid();
        log::info!(
            "Fluid sample ready: {} particles, {}x{} tiles, {} particle buffers",
            settings.simulation.max_particle_count,
            grid.tiles_x,
            grid.tiles_y,
            fluid.ring_len()
        );

        let mut sample = Self {
            fluid,
            debug: FluidDebugRenderModule::new(),
            render_fluid: settings.render_fluid,
            render_tile_debug: settings.render_tile_debug,
        };
        sample.apply_toggles();
        sample
    }

    /// Apply the module toggles, then step the fluid module if it is enabled.
    pub fn tick(&mut self, dt: f32, camera_position: Vec3) {
        self.apply_toggles();
        if self.fluid.is_enabled() {
            self.fluid.update(dt, camera_position);
        }
    }

    /// Execute the enabled modules and finish the frame.
    pub fn render<F: FluidRenderer + ?Sized>(&self, renderer: &mut F) {
        if self.fluid.is_enabled() {
            self.fluid.execute(renderer);
        }
        if self.debug.is_enabled() {
            self.debug.execute(&self.fluid, renderer);
        }
        renderer.end_frame();
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> FluidSettings {
        FluidSettings {
            simulation: *self.fluid.simulator().config(),
            render: *self.fluid.settings(),
            render_fluid: self.render_fluid,
            render_tile_debug: self.render_tile_debug,
        }
    }

    /// Replace all tunables. Takes effect from the next tick.
    pub fn apply_settings(&mut self, settings: &FluidSettings) {
        *self.fluid.simulator_mut().config_mut() = settings.simulation;
        *self.fluid.settings_mut() = settings.render;
        self.render_fluid = settings.render_fluid;
        self.render_tile_debug = settings.render_tile_debug;
    }

    pub fn set_render_fluid(&mut self, enabled: bool) {
        self.render_fluid = enabled;
    }

    pub fn set_render_tile_debug(&mut self, enabled: bool) {
        self.render_tile_debug = enabled;
    }

    pub fn fluid(&self) -> &FluidRenderModule<R> {
        &self.fluid
    }

    pub fn fluid_mut(&mut self) -> &mut FluidRenderModule<R> {
        &mut self.fluid
    }

    pub fn debug(&self) -> &FluidDebugRenderModule {
        &self.debug
    }

    fn apply_toggles(&mut self) {
        self.fluid.enable(self.render_fluid);
        self.debug.enable(self.render_tile_debug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(settings: &FluidSettings) -> FluidSample {
        FluidSample::new(settings, SeededRandom::from_seed(17), 3)
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut settings = FluidSettings::default();
        settings.simulation.max_particle_count = 12;
        settings.render.uv_scaling = 4.0;
        settings.render_tile_debug = true;
        let s = sample(&settings);
        assert_eq!(s.settings(), settings);
    }

    #[test]
    fn test_toggles_apply_on_tick() {
        let mut s = sample(&FluidSettings::default());
        assert!(s.fluid().is_enabled());
        assert!(!s.debug().is_enabled());

        s.set_render_fluid(false);
        s.set_render_tile_debug(true);
        assert!(s.fluid().is_enabled());
        s.tick(0.016, Vec3::ZERO);
        assert!(!s.fluid().is_enabled());
        assert!(s.debug().is_enabled());
    }

    #[test]
    fn test_disabled_fluid_does_not_simulate() {
        let mut settings = FluidSettings::default();
        settings.render_fluid = false;
        let mut s = sample(&settings);
        s.tick(0.016, Vec3::ZERO);
        assert!(s.fluid().simulator().is_empty());
        assert_eq!(s.fluid().frame(), 0);
    }
}
