//! Screen-space tiling grid for the particle binning pass.
//!
//! The tiling compute pass bins particles into a grid of screen tiles so the
//! SDF pass only evaluates the particles overlapping each pixel's tile.

/// Maximum tiles along X.
pub const TILES_MAX_X: u32 = 192;
/// Maximum tiles along Y.
pub const TILES_MAX_Y: u32 = 108;
/// Particle slots per tile in the sorted particle buffer.
pub const TILE_MAX_PARTICLES: u32 = 32;
/// Tiling workgroup width in threads (one thread per tile).
pub const TILING_THREAD_X: u32 = 8;
/// Tiling workgroup height in threads.
pub const TILING_THREAD_Y: u32 = 8;

/// Tile grid resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    /// Tiles along X, in `1..=TILES_MAX_X`.
    pub tiles_x: u32,
    /// Tiles along Y, in `1..=TILES_MAX_Y`.
    pub tiles_y: u32,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            tiles_x: 96, // 20px tiles at 1920x1080
            tiles_y: 54,
        }
    }
}

impl TileGrid {
    /// Grid clamped to `1..=TILES_MAX_X` by `1..=TILES_MAX_Y`.
    pub fn new(tiles_x: u32, tiles_y: u32) -> Self {
        Self {
            tiles_x: tiles_x.clamp(1, TILES_MAX_X),
            tiles_y: tiles_y.clamp(1, TILES_MAX_Y),
        }
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> u32 {
        self.tiles_x * self.tiles_y
    }

    /// Workgroups to dispatch for the tiling pass, rounding up.
    pub fn workgroups(&self) -> (u32, u32) {
        (
            self.tiles_x.div_ceil(TILING_THREAD_X),
            self.tiles_y.div_ceil(TILING_THREAD_Y),
        )
    }

    /// Tile size in pixels for a render target of `width` x `height`.
    pub fn tile_size(&self, width: u32, height: u32) -> (f32, f32) {
        (
            width as f32 / self.tiles_x as f32,
            height as f32 / self.tiles_y as f32,
        )
    }

    /// Records in the sorted per-tile particle buffer, sized for the largest grid.
    pub const fn sorted_buffer_len() -> u64 {
        TILE_MAX_PARTICLES as u64 * TILES_MAX_X as u64 * TILES_MAX_Y as u64
    }
}
