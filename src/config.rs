//! Sample settings.
//!
//! Everything the UI exposes, serializable to JSON so a tuned setup can be
//! saved and reloaded. Missing fields fall back to defaults.

use crate::error::ConfigError;
use crate::particle::MAX_PARTICLES;
use crate::simulation::SimulationConfig;
use crate::tiling::{TileGrid, TILES_MAX_X, TILES_MAX_Y};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

/// Slider range of the particle count.
pub const PARTICLE_COUNT_RANGE: RangeInclusive<usize> = 0..=MAX_PARTICLES;
/// Slider range of the tile counts along X.
pub const TILES_X_RANGE: RangeInclusive<u32> = 1..=TILES_MAX_X;
/// Slider range of the tile counts along Y.
pub const TILES_Y_RANGE: RangeInclusive<u32> = 1..=TILES_MAX_Y;
/// Slider range of the blend factors (SDF smooth-min and triplanar).
pub const BLEND_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Slider range of the target particle radius.
pub const PARTICLE_SIZE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Slider range of the simulation time scale.
pub const TIME_SCALE_RANGE: RangeInclusive<f32> = 0.0..=10.0;
/// Slider range of each spawn position axis.
pub const SPAWN_AXIS_RANGE: RangeInclusive<f32> = -10.0..=10.0;
/// Slider range of the material UV scaling.
pub const UV_SCALING_RANGE: RangeInclusive<f32> = 0.0..=10.0;

/// Settings of the SDF and tiling passes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub tiles_x: u32,
    pub tiles_y: u32,
    /// Smooth-min blend distance between neighbouring particles.
    pub sdf_blend: f32,
    /// Sharpness of the triplanar material projection.
    pub triplanar_blend: f32,
    pub uv_scaling: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let grid = TileGrid::default();
        Self {
            tiles_x: grid.tiles_x,
            tiles_y: grid.tiles_y,
            sdf_blend: 0.25,
            triplanar_blend: 0.3,
            uv_scaling: 2.0,
        }
    }
}

impl RenderSettings {
    /// Tile grid for these settings, clamped to the supported maximum.
    pub fn tile_grid(&self) -> TileGrid {
        TileGrid::new(self.tiles_x, self.tiles_y)
    }
}

/// Complete sample configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidSettings {
    pub simulation: SimulationConfig,
    pub render: RenderSettings,
    /// Run the fluid module.
    pub render_fluid: bool,
    /// Overlay the tile occupancy debug view.
    pub render_tile_debug: bool,
}

impl Default for FluidSettings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            render: RenderSettings::default(),
            render_fluid: true,
            render_tile_debug: false,
        }
    }
}

impl FluidSettings {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load settings and clamp them to the slider ranges.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse settings from a JSON string and clamp them to the slider ranges.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = serde_json::from_str(json)?;
        if settings.clamp_to_slider_ranges() {
            log::warn!("Settings outside the supported ranges were clamped");
        }
        Ok(settings)
    }

    /// Clamp every field to its UI slider range. Returns `true` if anything changed.
    pub fn clamp_to_slider_ranges(&mut self) -> bool {
        let before = self.clone();

        let sim = &mut self.simulation;
        sim.max_particle_count = clamp_range(sim.max_particle_count, &PARTICLE_COUNT_RANGE);
        sim.target_radius = clamp_range(sim.target_radius, &PARTICLE_SIZE_RANGE);
        sim.time_scale = clamp_range(sim.time_scale, &TIME_SCALE_RANGE);
        sim.spawn_position = sim.spawn_position.clamp(
            glam::Vec3::splat(*SPAWN_AXIS_RANGE.start()),
            glam::Vec3::splat(*SPAWN_AXIS_RANGE.end()),
        );

        let render = &mut self.render;
        render.tiles_x = clamp_range(render.tiles_x, &TILES_X_RANGE);
        render.tiles_y = clamp_range(render.tiles_y, &TILES_Y_RANGE);
        render.sdf_blend = clamp_range(render.sdf_blend, &BLEND_RANGE);
        render.triplanar_blend = clamp_range(render.triplanar_blend, &BLEND_RANGE);
        render.uv_scaling = clamp_range(render.uv_scaling, &UV_SCALING_RANGE);

        *self != before
    }
}

fn clamp_range<T: PartialOrd + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    if value < *range.start() {
        *range.start()
    } else if value > *range.end() {
        *range.end()
    } else {
        value
    }
}
