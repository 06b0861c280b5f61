//! CPU reference kernel.
//!
//! Runs the same per-pixel program as the GPU compute shader: generate a
//! primary ray, trace it through the mirror spheres, write RGB with alpha 1.
//! Tiles are dispatched in parallel with rayon.

use std::path::Path;
use std::time::Instant;

use glam::Vec4;
use rayon::prelude::*;
use sheen_core::{SceneUniform, Sphere};

use crate::path::trace;
use crate::ray_gen::generate_ray;
use crate::sky::SkySampler;
use crate::tile::{generate_tiles, render_tile, TileResult};

/// Per-frame inputs shared by every invocation.
#[derive(Clone, Copy)]
pub struct FrameInputs<'a> {
    pub uniform: &'a SceneUniform,
    pub spheres: &'a [Sphere],
    pub sky: &'a dyn SkySampler,
}

/// Shade a single pixel. `None` when `(x, y)` lies outside the image.
pub fn render_pixel(x: u32, y: u32, width: u32, height: u32, inputs: &FrameInputs<'_>) -> Option<Vec4> {
    let ray = generate_ray(x, y, width, height, inputs.uniform)?;
    let result = trace(ray, inputs.spheres, inputs.sky);
    Some(result.color.extend(1.0))
}

/// Linear to sRGB transfer function.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.0031308 {
        linear.max(0.0) * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Quantize a linear color to 8-bit sRGB.
pub fn color_to_rgba(color: Vec4) -> [u8; 4] {
    let channel = |c: f32| (255.0 * linear_to_srgb(c).clamp(0.0, 1.0)).round() as u8;
    [
        channel(color.x),
        channel(color.y),
        channel(color.z),
        (255.0 * color.w.clamp(0.0, 1.0)).round() as u8,
    ]
}

/// Linear RGBA output image.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Write a finished tile into the image.
    pub fn blit(&mut self, result: &TileResult) {
        for &(x, y, color) in &result.pixels {
            self.set(x, y, color);
        }
    }

    /// Convert to 8-bit sRGB RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Save as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let image = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8()).ok_or_else(|| {
            image::ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ))
        })?;
        image.save_with_format(path, image::ImageFormat::Png)
    }
}

/// Render a full frame, tiles in parallel.
pub fn render_frame(width: u32, height: u32, inputs: &FrameInputs<'_>) -> ImageBuffer {
    let start = Instant::now();
    let tiles = generate_tiles(width, height);

    let results: Vec<TileResult> = tiles
        .par_iter()
        .map(|tile| render_tile(tile, width, height, inputs))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.blit(result);
    }

    log::debug!(
        "Rendered {}x{} ({} tiles) in {:.2?}",
        width,
        height,
        tiles.len(),
        start.elapsed()
    );

    image
}
