//! Headless fluid demo.
//!
//! Runs the sample for a fixed number of frames against a renderer that only
//! logs what it is asked to do.
//!
//! Run with: `RUST_LOG=debug cargo run -- [settings.json] [frames]`

use fluid_sdf::prelude::*;
use std::f32::consts::TAU;
use std::process::ExitCode;

const DT: f32 = 1.0 / 60.0;
const CAMERA_DISTANCE: f32 = 4.0;
const SUMMARY_WIDTH: u32 = 1920;
const SUMMARY_HEIGHT: u32 = 1080;

/// Renderer that logs every call and tracks a few frame statistics.
#[derive(Default)]
struct LoggingRenderer {
    frames: u64,
    uploaded: usize,
    biggest_radius: f32,
}

impl FluidRenderer for LoggingRenderer {
    fn upload_particles(&mut self, slot: usize, particles: &[ExportedParticle]) {
        log::trace!("upload {} particles into slot {}", particles.len(), slot);
        self.uploaded = particles.len();
    }

    fn write_fluid_info(&mut self, info: &FluidInfo) {
        self.biggest_radius = info.biggest_radius;
    }

    fn dispatch_tiling(&mut self, slot: usize, workgroups: (u32, u32)) {
        log::trace!("tiling slot {} with {:?} workgroups", slot, workgroups);
    }

    fn render_sdf(&mut self) {
        log::trace!("sdf pass");
    }

    fn render_tile_debug(&mut self) {
        log::trace!("tile debug pass");
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::debug!(
                "frame {}: {} particles, biggest radius {:.4}",
                self.frames,
                self.uploaded,
                self.biggest_radius
            );
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match FluidSettings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => FluidSettings::default(),
    };
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(900);

    let mut sample = FluidSample::new(&settings, SeededRandom::from_time(), 3);
    let mut renderer = LoggingRenderer::default();

    for frame in 0..frames {
        // Slow orbit around the spawn point.
        let angle = frame as f32 * DT * 0.2 * TAU;
        let camera = settings.simulation.spawn_position
            + Vec3::new(angle.cos(), 0.5, angle.sin()) * CAMERA_DISTANCE;

        sample.tick(DT, camera);
        sample.render(&mut renderer);
    }

    println!("=== Fluid SDF Demo ===");
    println!("Frames: {}", renderer.frames);
    println!("Live particles: {}", sample.fluid().simulator().len());
    println!("Exported particles: {}", sample.fluid().exported().len());
    println!("Biggest radius: {:.4}", renderer.biggest_radius);

    let grid = sample.fluid().tile_grid();
    let (tile_w, tile_h) = grid.tile_size(SUMMARY_WIDTH, SUMMARY_HEIGHT);
    println!(
        "Tiles: {}x{} ({:.1}x{:.1} px at {}x{})",
        grid.tiles_x, grid.tiles_y, tile_w, tile_h, SUMMARY_WIDTH, SUMMARY_HEIGHT
    );

    ExitCode::SUCCESS
}
