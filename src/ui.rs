//! Settings panel for hosts that draw their UI with egui.

use crate::config::*;
use egui::Ui;

/// Draw every tunable of `settings`. Returns `true` if anything changed.
pub fn settings_panel(ui: &mut Ui, settings: &mut FluidSettings) -> bool {
    let mut changed = false;

    ui.heading("Fluid");

    changed |= ui
        .checkbox(&mut settings.render_fluid, "Render Fluid")
        .changed();
    changed |= ui
        .checkbox(&mut settings.render_tile_debug, "Render Tile Debug")
        .changed();

    ui.separator();

    let sim = &mut settings.simulation;
    changed |= ui
        .add(egui::Slider::new(&mut sim.max_particle_count, PARTICLE_COUNT_RANGE).text("Max particles"))
        .changed();

    let render = &mut settings.render;
    changed |= ui
        .add(egui::Slider::new(&mut render.tiles_x, TILES_X_RANGE).text("Tiles X"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut render.tiles_y, TILES_Y_RANGE).text("Tiles Y"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut render.sdf_blend, BLEND_RANGE).text("SDF blend"))
        .changed();

    let sim = &mut settings.simulation;
    changed |= ui
        .add(egui::Slider::new(&mut sim.target_radius, PARTICLE_SIZE_RANGE).text("Particle size"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut sim.time_scale, TIME_SCALE_RANGE).text("Particle update speed"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut sim.spawn_position.x, SPAWN_AXIS_RANGE).text("Particle spawner X"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut sim.spawn_position.y, SPAWN_AXIS_RANGE).text("Particle spawner Y"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut sim.spawn_position.z, SPAWN_AXIS_RANGE).text("Particle spawner Z"))
        .changed();

    let render = &mut settings.render;
    changed |= ui
        .add(egui::Slider::new(&mut render.triplanar_blend, BLEND_RANGE).text("Triplanar blend"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut render.uv_scaling, UV_SCALING_RANGE).text("UV scaling"))
        .changed();

    changed
}
