//! Sky panorama loading.
//!
//! Loads an equirectangular image from disk into linear float RGBA, a format
//! both the CPU tracer and the GPU viewport can consume directly.

use std::path::{Path, PathBuf};

use glam::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
///
/// Stores pixels in linear RGBA float format, row-major, top row first.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data in RGBA format (linear, 0-1 range)
    pub pixels: Vec<[f32; 4]>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self::new(1, 1, vec![[color.x, color.y, color.z, 1.0]], "<solid>")
    }

    /// Nearest-texel lookup, no filtering.
    ///
    /// `v = 1` is the top row of the image, `v = 0` the bottom row. UVs
    /// outside [0, 1] are clamped to the edge texels.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Vec3 {
        if self.width == 0 || self.height == 0 {
            return Vec3::ZERO;
        }

        let x = texel_index(u, self.width);
        let y = texel_index(1.0 - v, self.height);

        let [r, g, b, _] = self.get_pixel(x, y);
        Vec3::new(r, g, b)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.pixels
            .get(idx)
            .copied()
            .unwrap_or([0.0, 0.0, 0.0, 1.0])
    }

    /// Raw pixel bytes for GPU upload (Rgba32Float, row-major).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<[f32; 4]>()
    }
}

/// Map a coordinate in [0, 1] to a texel index in [0, size).
fn texel_index(t: f32, size: u32) -> u32 {
    let scaled = (t * size as f32).floor();
    if scaled.is_nan() || scaled < 0.0 {
        0
    } else {
        (scaled as u32).min(size - 1)
    }
}

/// Load a texture from a file path.
pub fn load_texture<P: AsRef<Path>>(path: P) -> TextureResult<Texture> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| TextureError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    // Convert to RGBA8
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty(path.display().to_string()));
    }

    // Convert to linear float RGBA
    let pixels: Vec<[f32; 4]> = rgba
        .pixels()
        .map(|p| {
            [
                srgb_to_linear(p[0]),
                srgb_to_linear(p[1]),
                srgb_to_linear(p[2]),
                p[3] as f32 / 255.0, // Alpha is linear
            ]
        })
        .collect();

    let texture = Texture::new(width, height, pixels, path.to_string_lossy().to_string());

    log::debug!(
        "Loaded texture: {} ({}x{}, {:.1} KB)",
        texture.path,
        texture.width,
        texture.height,
        texture.size_bytes() as f32 / 1024.0
    );

    Ok(texture)
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 texture: top row red, green; bottom row blue, white.
    fn quad() -> Texture {
        Texture::new(
            2,
            2,
            vec![
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
                [1.0, 1.0, 1.0, 1.0],
            ],
            "<quad>",
        )
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width, 1);
        assert_eq!(tex.height, 1);

        let sample = tex.sample_nearest(0.5, 0.5);
        assert_eq!(sample, Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_sample_nearest_quadrants() {
        let tex = quad();

        // High v is the top of the image
        assert_eq!(tex.sample_nearest(0.25, 0.75), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample_nearest(0.75, 0.75), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample_nearest(0.25, 0.25), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(tex.sample_nearest(0.75, 0.25), Vec3::ONE);
    }

    #[test]
    fn test_sample_nearest_edges_clamp() {
        let tex = quad();

        assert_eq!(tex.sample_nearest(1.0, 1.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample_nearest(0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(tex.sample_nearest(-3.0, 7.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample_nearest(f32::NAN, 0.9), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_as_bytes_is_rgba32f() {
        let tex = quad();
        assert_eq!(tex.as_bytes().len(), 2 * 2 * 16);
        assert_eq!(tex.size_bytes(), 64);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = load_texture("/no/such/panorama.png").unwrap_err();
        match err {
            TextureError::Image { path, source } => {
                assert_eq!(path, PathBuf::from("/no/such/panorama.png"));
                assert!(matches!(source, image::ImageError::IoError(_)));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_load_png_round_trip() {
        let dir = std::env::temp_dir().join(format!("sheen_texture_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("pano.png");

        // Top row red, mid-gray; bottom row blue, transparent white
        let image = image::RgbaImage::from_raw(
            2,
            2,
            vec![
                255, 0, 0, 255, 128, 128, 128, 255, //
                0, 0, 255, 255, 255, 255, 255, 0,
            ],
        )
        .unwrap();
        image.save(&file).unwrap();

        let tex = load_texture(&file).unwrap();
        assert_eq!((tex.width, tex.height), (2, 2));
        assert_eq!(tex.pixels[0], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(tex.pixels[2], [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(tex.pixels[3], [1.0, 1.0, 1.0, 0.0]);

        // sRGB bytes come back linear
        let gray = tex.pixels[1];
        assert!((gray[0] - srgb_to_linear(128)).abs() < 1e-6);
        assert!((gray[0] - 0.2158).abs() < 1e-3);
        assert_eq!(gray[3], 1.0);

        // Top row sits at high v
        assert_eq!(tex.sample_nearest(0.25, 0.75), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample_nearest(0.25, 0.25), Vec3::new(0.0, 0.0, 1.0));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_srgb_to_linear() {
        // Black stays black
        assert!((srgb_to_linear(0) - 0.0).abs() < 0.001);

        // White stays white
        assert!((srgb_to_linear(255) - 1.0).abs() < 0.001);

        // Mid-gray is darker in linear
        let mid = srgb_to_linear(128);
        assert!(mid < 0.5);
        assert!(mid > 0.1);
    }
}
