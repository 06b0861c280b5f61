//! Environment lookup for rays that escape the scene.

use std::f32::consts::PI;
use std::sync::Arc;

use sheen_core::{load_texture, SceneDescription, SceneResult, SkyColors, SkyMode, Texture};
use sheen_math::Vec3;

use crate::Color;

/// Maps an escaping ray direction to a color.
pub trait SkySampler: Send + Sync {
    /// `direction` is unit length.
    fn sample(&self, direction: Vec3) -> Color;
}

/// Equirectangular UV of a unit direction.
///
/// `u` wraps around the horizon starting at -X, `v` runs from straight down
/// (0) to straight up (1).
#[inline]
pub fn direction_to_uv(direction: Vec3) -> (f32, f32) {
    let u = direction.z.atan2(direction.x) / (2.0 * PI) + 0.5;
    let v = direction.y.clamp(-1.0, 1.0).asin() / PI + 0.5;
    (u, v)
}

/// Sky backed by a pre-loaded panorama, nearest-texel lookup.
#[derive(Debug, Clone)]
pub struct TextureSky {
    texture: Arc<Texture>,
}

impl TextureSky {
    pub fn new(texture: Arc<Texture>) -> Self {
        Self { texture }
    }
}

impl SkySampler for TextureSky {
    fn sample(&self, direction: Vec3) -> Color {
        let (u, v) = direction_to_uv(direction);
        self.texture.sample_nearest(u, v)
    }
}

/// Procedural checkerboard over the UV sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckerSky {
    pub colors: SkyColors,
    /// Tiles per UV axis
    pub check_size: f32,
}

impl CheckerSky {
    pub fn new(colors: SkyColors, check_size: f32) -> Self {
        Self { colors, check_size }
    }
}

impl SkySampler for CheckerSky {
    fn sample(&self, direction: Vec3) -> Color {
        let (u, v) = direction_to_uv(direction);
        let cell_u = (u * self.check_size).floor() as i32;
        let cell_v = (v * self.check_size).floor() as i32;

        if (cell_u ^ cell_v) & 1 == 0 {
            self.colors.color0
        } else {
            self.colors.color1
        }
    }
}

/// The active sky strategy, fixed when the renderer is built.
#[derive(Debug, Clone)]
pub enum Sky {
    Texture(TextureSky),
    Checker(CheckerSky),
}

impl Sky {
    /// Build the sky a scene asks for, loading its panorama if needed.
    pub fn from_scene(scene: &SceneDescription) -> SceneResult<Self> {
        Ok(match &scene.sky.mode {
            SkyMode::Checker { check_size } => {
                Sky::Checker(CheckerSky::new(scene.sky.colors(), *check_size))
            }
            SkyMode::Texture { path } => Sky::Texture(TextureSky::new(Arc::new(load_texture(path)?))),
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sky::Texture(_) => "texture",
            Sky::Checker(_) => "checker",
        }
    }
}

impl SkySampler for Sky {
    fn sample(&self, direction: Vec3) -> Color {
        match self {
            Sky::Texture(sky) => sky.sample(direction),
            Sky::Checker(sky) => sky.sample(direction),
        }
    }
}
