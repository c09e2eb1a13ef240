//! wgpu-backed [`FluidRenderer`].
//!
//! Owns the buffers the fluid passes read and write. The pass pipelines
//! themselves belong to the host and are recorded through [`FluidPasses`].

use crate::error::GpuError;
use crate::particle::{ExportedParticle, MAX_PARTICLES};
use crate::renderer::FluidRenderer;
use crate::tiling::TileGrid;
use crate::uniforms::FluidInfo;

const PARTICLE_STRIDE: u64 = std::mem::size_of::<ExportedParticle>() as u64;

/// Device and queue pair.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Acquire a device without a surface.
    pub async fn headless() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        log::info!("Using GPU: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Fluid Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;

        Ok(Self { device, queue })
    }

    /// Blocking variant of [`GpuContext::headless`].
    pub fn headless_blocking() -> Result<Self, GpuError> {
        pollster::block_on(Self::headless())
    }
}

/// GPU buffers shared by the tiling and SDF passes.
pub struct FluidBuffers {
    /// One particle buffer per in-flight frame.
    particle_ring: Vec<wgpu::Buffer>,
    /// Particles binned per tile, written by the tiling pass.
    sorted_particles: wgpu::Buffer,
    fluid_info: wgpu::Buffer,
}

impl FluidBuffers {
    /// Allocate `ring_len` particle buffers of [`MAX_PARTICLES`] records each.
    pub fn new(device: &wgpu::Device, ring_len: usize) -> Self {
        let particle_ring = (0..ring_len.max(1))
            .map(|i| {
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("Particle Buffer {}", i)),
                    size: PARTICLE_STRIDE * MAX_PARTICLES as u64,
                    usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            })
            .collect();

        let sorted_particles = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sorted Particle Buffer"),
            size: PARTICLE_STRIDE * TileGrid::sorted_buffer_len(),
            usage: wgpu::BufferUsages::STORAGE,
            mapped_at_creation: false,
        });

        let fluid_info = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Fluid Info Buffer"),
            size: std::mem::size_of::<FluidInfo>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            particle_ring,
            sorted_particles,
            fluid_info,
        }
    }

    /// Write `particles` into ring buffer `slot` (wrapped to the ring length).
    pub fn upload_particles(&self, queue: &wgpu::Queue, slot: usize, particles: &[ExportedParticle]) {
        let count = particles.len().min(MAX_PARTICLES);
        if count == 0 {
            return;
        }
        queue.write_buffer(
            self.particle_buffer(slot),
            0,
            bytemuck::cast_slice(&particles[..count]),
        );
    }

    pub fn write_fluid_info(&self, queue: &wgpu::Queue, info: &FluidInfo) {
        queue.write_buffer(&self.fluid_info, 0, info.as_bytes());
    }

    /// Particle buffer for ring `slot` (wrapped to the ring length).
    pub fn particle_buffer(&self, slot: usize) -> &wgpu::Buffer {
        &self.particle_ring[slot % self.particle_ring.len()]
    }

    pub fn sorted_particle_buffer(&self) -> &wgpu::Buffer {
        &self.sorted_particles
    }

    pub fn fluid_info_buffer(&self) -> &wgpu::Buffer {
        &self.fluid_info
    }

    pub fn ring_len(&self) -> usize {
        self.particle_ring.len()
    }
}

/// Host-owned pipelines for the fluid passes.
///
/// Each method records into the frame's encoder, reading the bindings from
/// [`FluidBuffers`]. All default to recording nothing.
pub trait FluidPasses {
    /// Bin ring buffer `slot` into the sorted particle buffer.
    fn tiling(
        &mut self,
        _encoder: &mut wgpu::CommandEncoder,
        _buffers: &FluidBuffers,
        _slot: usize,
        _workgroups: (u32, u32),
    ) {
    }

    /// Trace the SDF surface from the sorted particle buffer.
    fn sdf(&mut self, _encoder: &mut wgpu::CommandEncoder, _buffers: &FluidBuffers) {}

    /// Draw the tile occupancy overlay.
    fn tile_debug(&mut self, _encoder: &mut wgpu::CommandEncoder, _buffers: &FluidBuffers) {}
}

/// No passes; buffers are still uploaded.
impl FluidPasses for () {}

/// [`FluidRenderer`] that uploads into [`FluidBuffers`] and records `P`'s
/// passes into one command encoder per frame.
pub struct GpuFluidRenderer<P: FluidPasses = ()> {
    context: GpuContext,
    buffers: FluidBuffers,
    passes: P,
    encoder: Option<wgpu::CommandEncoder>,
    frames_submitted: u64,
}

impl<P: FluidPasses> GpuFluidRenderer<P> {
    pub fn new(context: GpuContext, ring_len: usize, passes: P) -> Self {
        let buffers = FluidBuffers::new(&context.device, ring_len);
        Self {
            context,
            buffers,
            passes,
            encoder: None,
            frames_submitted: 0,
        }
    }

    pub fn context(&self) -> &GpuContext {
        &self.context
    }

    pub fn buffers(&self) -> &FluidBuffers {
        &self.buffers
    }

    pub fn passes_mut(&mut self) -> &mut P {
        &mut self.passes
    }

    /// Frames whose work has been submitted to the queue.
    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }
}

impl<P: FluidPasses> FluidRenderer for GpuFluidRenderer<P> {
    fn upload_particles(&mut self, slot: usize, particles: &[ExportedParticle]) {
        log::trace!("Uploading {} particles to slot {}", particles.len(), slot);
        self.buffers.upload_particles(&self.context.queue, slot, particles);
    }

    fn write_fluid_info(&mut self, info: &FluidInfo) {
        self.buffers.write_fluid_info(&self.context.queue, info);
    }

    fn dispatch_tiling(&mut self, slot: usize, workgroups: (u32, u32)) {
        log::trace!("Tiling slot {} with {:?} workgroups", slot, workgroups);
        let encoder = frame_encoder(&mut self.encoder, &self.context.device);
        self.passes.tiling(encoder, &self.buffers, slot, workgroups);
    }

    fn render_sdf(&mut self) {
        let encoder = frame_encoder(&mut self.encoder, &self.context.device);
        self.passes.sdf(encoder, &self.buffers);
    }

    fn render_tile_debug(&mut self) {
        let encoder = frame_encoder(&mut self.encoder, &self.context.device);
        self.passes.tile_debug(encoder, &self.buffers);
    }

    fn end_frame(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            self.context.queue.submit(std::iter::once(encoder.finish()));
            self.frames_submitted += 1;
        }
    }
}

/// The frame's encoder, created on first use.
fn frame_encoder<'a>(
    encoder: &'a mut Option<wgpu::CommandEncoder>,
    device: &wgpu::Device,
) -> &'a mut wgpu::CommandEncoder {
    encoder.get_or_insert_with(|| {
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Fluid Encoder"),
        })
    })
}
