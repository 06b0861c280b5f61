//! Sheen Core - scene description and GPU wire records.
//!
//! This crate provides:
//!
//! - **Scene description**: `SceneDescription`, `Sphere`, sky and camera
//!   configuration, loaded from JSON
//! - **Sky textures**: equirectangular panorama loading
//! - **Wire records**: `SceneUniform`, `GpuSphere` and `FrameParams`, the
//!   fixed layouts the tracing kernel reads every frame
//!
//! # Example
//!
//! ```ignore
//! use sheen_core::{encode_scene, SceneDescription};
//! use sheen_math::compute_view_basis;
//!
//! let scene = SceneDescription::load("scene.json")?;
//! let state = scene.camera.to_state();
//! let uniform = encode_scene(&scene.sky.colors(), &state, &compute_view_basis(&state));
//! queue.write_buffer(&buffer, 0, &uniform.to_le_bytes());
//! ```

pub mod scene;
pub mod texture;
pub mod uniform;

// Re-export commonly used types
pub use scene::{
    CameraConfig, ControlsConfig, SceneDescription, SceneError, SceneResult, SkyConfig, SkyMode,
    Sphere, DEFAULT_CHECK_SIZE,
};
pub use texture::{load_texture, Texture, TextureError, TextureResult};
pub use uniform::{
    encode_scene, encode_spheres, FrameParams, GpuSphere, SceneUniform, SkyColors,
    SCENE_UNIFORM_FLOATS, SCENE_UNIFORM_SIZE,
};
