//! Scene description types for Sheen.
//!
//! A scene is a fixed list of mirror spheres, a sky, a starting camera pose
//! and the input tuning. It is built once at start-up, either from a JSON
//! file or from the built-in default, and never mutated while rendering.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sheen_math::{CameraState, ControlSettings, Interval};
use thiserror::Error;

use crate::texture::{load_texture, Texture, TextureError};
use crate::uniform::SkyColors;

/// Default number of checker tiles per UV axis.
pub const DEFAULT_CHECK_SIZE: f32 = 10.0;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Invalid field of view range [{min}, {max}]")]
    InvalidFovRange { min: f32, max: f32 },

    #[error("Checker size must be positive, got {0}")]
    InvalidCheckSize(f32),

    #[error("Sky texture error: {0}")]
    Texture(#[from] TextureError),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// A reflective sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// How the sky is produced. Chosen once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkyMode {
    /// Procedural checkerboard alternating the two sky colors
    Checker {
        #[serde(default = "default_check_size")]
        check_size: f32,
    },
    /// Equirectangular panorama loaded from disk
    Texture { path: PathBuf },
}

fn default_check_size() -> f32 {
    DEFAULT_CHECK_SIZE
}

impl Default for SkyMode {
    fn default() -> Self {
        SkyMode::Checker {
            check_size: DEFAULT_CHECK_SIZE,
        }
    }
}

/// Sky configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub color0: Vec3,
    pub color1: Vec3,
    pub mode: SkyMode,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            color0: Vec3::new(0.9, 0.9, 0.95),
            color1: Vec3::new(0.2, 0.3, 0.6),
            mode: SkyMode::default(),
        }
    }
}

impl SkyConfig {
    /// The two colors carried in the scene uniform.
    pub fn colors(&self) -> SkyColors {
        SkyColors::new(self.color0, self.color1)
    }

    /// Checker tiles per axis (the default when the sky is textured).
    pub fn check_size(&self) -> f32 {
        match self.mode {
            SkyMode::Checker { check_size } => check_size,
            SkyMode::Texture { .. } => DEFAULT_CHECK_SIZE,
        }
    }
}

/// Starting camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub fov_degrees: f32,
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            fov_degrees: 60.0,
            position: Vec3::new(0.0, 0.0, 4.0),
        }
    }
}

impl CameraConfig {
    /// Build the initial camera state. Pitch is clamped, FOV is not.
    pub fn to_state(&self) -> CameraState {
        CameraState::new(
            self.yaw_degrees.to_radians(),
            self.pitch_degrees.to_radians(),
            self.fov_degrees,
            self.position,
        )
    }
}

/// Input tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub sensitivity: f32,
    pub move_speed: f32,
    pub scroll_sensitivity: f32,
    pub fov_min: f32,
    pub fov_max: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        let settings = ControlSettings::default();
        Self {
            sensitivity: settings.sensitivity,
            move_speed: settings.move_speed,
            scroll_sensitivity: settings.scroll_sensitivity,
            fov_min: settings.fov_range.min,
            fov_max: settings.fov_range.max,
        }
    }
}

impl ControlsConfig {
    pub fn to_settings(&self) -> ControlSettings {
        ControlSettings {
            sensitivity: self.sensitivity,
            move_speed: self.move_speed,
            scroll_sensitivity: self.scroll_sensitivity,
            fov_range: Interval::new(self.fov_min, self.fov_max),
        }
    }
}

/// Everything needed to render a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub spheres: Vec<Sphere>,
    pub sky: SkyConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
}

impl Default for SceneDescription {
    /// Three mirror balls floating over a large mirror floor.
    fn default() -> Self {
        Self {
            spheres: vec![
                Sphere::new(Vec3::new(0.0, 0.0, -1.0), 1.0),
                Sphere::new(Vec3::new(-2.5, 0.0, -2.0), 1.0),
                Sphere::new(Vec3::new(2.5, 0.0, -2.0), 1.0),
                Sphere::new(Vec3::new(0.0, 1.6, -3.5), 0.6),
                Sphere::new(Vec3::new(0.0, -1001.0, 0.0), 1000.0),
            ],
            sky: SkyConfig::default(),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

impl SceneDescription {
    /// Load a scene from a JSON file.
    ///
    /// Relative sky texture paths are resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut scene = Self::from_json_str(&source)?;
        if let (SkyMode::Texture { path: texture }, Some(base)) = (&mut scene.sky.mode, path.parent()) {
            if texture.is_relative() {
                *texture = base.join(&*texture);
            }
        }

        log::info!(
            "Loaded scene {} ({} spheres, {} sky)",
            path.display(),
            scene.spheres.len(),
            scene.sky_label()
        );

        Ok(scene)
    }

    /// Parse and validate a scene from a JSON string.
    pub fn from_json_str(source: &str) -> SceneResult<Self> {
        let scene: Self = serde_json::from_str(source)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
        }

        let ControlsConfig { fov_min, fov_max, .. } = self.controls;
        if !(fov_min > 0.0 && fov_min <= fov_max && fov_max < 180.0) {
            return Err(SceneError::InvalidFovRange {
                min: fov_min,
                max: fov_max,
            });
        }

        if let SkyMode::Checker { check_size } = self.sky.mode {
            if !(check_size.is_finite() && check_size > 0.0) {
                return Err(SceneError::InvalidCheckSize(check_size));
            }
        }

        Ok(())
    }

    /// Load the sky panorama if the sky is texture-backed.
    pub fn load_sky_texture(&self) -> SceneResult<Option<Texture>> {
        match &self.sky.mode {
            SkyMode::Texture { path } => Ok(Some(load_texture(path)?)),
            SkyMode::Checker { .. } => Ok(None),
        }
    }

    /// Short human-readable name of the sky strategy.
    pub fn sky_label(&self) -> &'static str {
        match self.sky.mode {
            SkyMode::Checker { .. } => "checker",
            SkyMode::Texture { .. } => "texture",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_is_valid() {
        let scene = SceneDescription::default();
        assert!(scene.validate().is_ok());
        assert_eq!(scene.spheres.len(), 5);
        assert_eq!(scene.sky.check_size(), DEFAULT_CHECK_SIZE);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let scene = SceneDescription::from_json_str("{}").unwrap();
        assert_eq!(scene, SceneDescription::default());
    }

    #[test]
    fn test_parse_full_scene() {
        let json = r#"{
            "spheres": [
                { "center": [0.0, 0.0, 0.0], "radius": 1.0 },
                { "center": [3.0, 0.0, 0.0], "radius": 0.5 }
            ],
            "sky": {
                "color0": [1.0, 0.0, 0.0],
                "color1": [0.0, 0.0, 1.0],
                "mode": { "type": "checker", "check_size": 4.0 }
            },
            "camera": { "yaw_degrees": 90.0, "fov_degrees": 75.0, "position": [0.0, 1.0, 5.0] },
            "controls": { "fov_min": 10.0, "fov_max": 120.0 }
        }"#;

        let scene = SceneDescription::from_json_str(json).unwrap();

        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.spheres[1], Sphere::new(Vec3::new(3.0, 0.0, 0.0), 0.5));
        assert_eq!(scene.sky.check_size(), 4.0);
        assert_eq!(scene.sky.colors().color0, Vec3::new(1.0, 0.0, 0.0));

        let state = scene.camera.to_state();
        assert!((state.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(state.fov_degrees, 75.0);
        assert_eq!(state.position, Vec3::new(0.0, 1.0, 5.0));

        let settings = scene.controls.to_settings();
        assert_eq!(settings.fov_range, Interval::new(10.0, 120.0));
        // Unspecified fields keep their defaults
        assert_eq!(settings.move_speed, ControlSettings::default().move_speed);
    }

    #[test]
    fn test_parse_texture_sky() {
        let json = r#"{ "sky": { "mode": { "type": "texture", "path": "sky.hdr" } } }"#;
        let scene = SceneDescription::from_json_str(json).unwrap();

        assert_eq!(
            scene.sky.mode,
            SkyMode::Texture {
                path: PathBuf::from("sky.hdr")
            }
        );
        assert_eq!(scene.sky_label(), "texture");
    }

    #[test]
    fn test_zero_spheres_is_valid() {
        let scene = SceneDescription::from_json_str(r#"{ "spheres": [] }"#).unwrap();
        assert!(scene.spheres.is_empty());
    }

    #[test]
    fn test_rejects_bad_radius() {
        let json = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 1.0 }, { "center": [0, 0, 0], "radius": -2.0 } ] }"#;
        let err = SceneDescription::from_json_str(json).unwrap_err();
        assert!(matches!(err, SceneError::InvalidRadius { index: 1, .. }));
    }

    #[test]
    fn test_rejects_bad_fov_range() {
        let json = r#"{ "controls": { "fov_min": 90.0, "fov_max": 30.0 } }"#;
        let err = SceneDescription::from_json_str(json).unwrap_err();
        assert!(matches!(err, SceneError::InvalidFovRange { .. }));
    }

    #[test]
    fn test_rejects_bad_check_size() {
        let json = r#"{ "sky": { "mode": { "type": "checker", "check_size": 0.0 } } }"#;
        let err = SceneDescription::from_json_str(json).unwrap_err();
        assert!(matches!(err, SceneError::InvalidCheckSize(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SceneDescription::from_json_str("{ \"spheres\": 3 }").unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }

    #[test]
    fn test_load_resolves_relative_texture() {
        let dir = std::env::temp_dir().join(format!("sheen_scene_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("scene.json");
        fs::write(&file, r#"{ "sky": { "mode": { "type": "texture", "path": "pano.png" } } }"#).unwrap();

        let scene = SceneDescription::load(&file).unwrap();
        assert_eq!(
            scene.sky.mode,
            SkyMode::Texture {
                path: dir.join("pano.png")
            }
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneDescription::load("/definitely/not/here/scene.json").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }

    #[test]
    fn test_bundled_scene_parses() {
        let scene = SceneDescription::from_json_str(include_str!("../../../scenes/mirrors.json")).unwrap();
        assert_eq!(scene.spheres.len(), 5);
        assert_eq!(scene.sky.check_size(), 12.0);
        assert_eq!(scene.sky_label(), "checker");
    }

    #[test]
    fn test_checker_scene_has_no_texture() {
        let scene = SceneDescription::default();
        assert!(scene.load_sky_texture().unwrap().is_none());
    }
}
