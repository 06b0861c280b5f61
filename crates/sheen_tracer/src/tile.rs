//! Tile-based dispatch for the CPU kernel.
//!
//! The image is covered by fixed 16x16 tiles, the same footprint as a GPU
//! workgroup. Edge tiles still run all 256 invocations; the ones that land
//! outside the image do nothing.

use glam::Vec4;

use crate::renderer::{render_pixel, FrameInputs};

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 16;

/// Number of tiles (workgroups) needed to cover an image: `ceil(w/16) x ceil(h/16)`.
pub fn workgroup_count(width: u32, height: u32) -> (u32, u32) {
    (width.div_ceil(TILE_SIZE), height.div_ceil(TILE_SIZE))
}

/// A 16x16 block of invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of the tile's top-left corner
    pub x: u32,
    /// Y coordinate of the tile's top-left corner
    pub y: u32,
    /// Index in dispatch order
    pub index: usize,
}

impl Tile {
    pub fn new(x: u32, y: u32, index: usize) -> Self {
        Self { x, y, index }
    }

    /// Pixels of this tile that fall inside a `width x height` image.
    pub fn covered_pixels(&self, width: u32, height: u32) -> u32 {
        let w = width.saturating_sub(self.x).min(TILE_SIZE);
        let h = height.saturating_sub(self.y).min(TILE_SIZE);
        w * h
    }
}

/// Tiles covering an image, in row-major dispatch order.
pub fn generate_tiles(width: u32, height: u32) -> Vec<Tile> {
    let (groups_x, groups_y) = workgroup_count(width, height);
    let mut tiles = Vec::with_capacity((groups_x * groups_y) as usize);

    for ty in 0..groups_y {
        for tx in 0..groups_x {
            let index = tiles.len();
            tiles.push(Tile::new(tx * TILE_SIZE, ty * TILE_SIZE, index));
        }
    }

    tiles
}

/// Output of one tile.
#[derive(Debug, Clone)]
pub struct TileResult {
    /// The tile that was rendered
    pub tile: Tile,
    /// `(x, y, color)` for every in-bounds pixel
    pub pixels: Vec<(u32, u32, Vec4)>,
}

impl TileResult {
    pub fn new(tile: Tile, pixels: Vec<(u32, u32, Vec4)>) -> Self {
        Self { tile, pixels }
    }
}

/// Run all 256 invocations of a tile.
pub fn render_tile(tile: &Tile, width: u32, height: u32, inputs: &FrameInputs<'_>) -> TileResult {
    let mut pixels = Vec::with_capacity(tile.covered_pixels(width, height) as usize);

    for local_y in 0..TILE_SIZE {
        for local_x in 0..TILE_SIZE {
            let x = tile.x + local_x;
            let y = tile.y + local_y;
            if let Some(color) = render_pixel(x, y, width, height, inputs) {
                pixels.push((x, y, color));
            }
        }
    }

    TileResult::new(*tile, pixels)
}
