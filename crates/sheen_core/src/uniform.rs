//! Fixed-layout records shared with the tracing kernel.
//!
//! `SceneUniform` mirrors the WGSL uniform struct
//!
//! ```text
//! struct Scene {
//!     sky_color0: vec3<f32>,   // offset  0
//!     sky_color1: vec3<f32>,   // offset 16
//!     origin:     vec3<f32>,   // offset 32
//!     forward:    vec3<f32>,   // offset 48
//!     up:         vec3<f32>,   // offset 64
//!     right:      vec3<f32>,   // offset 80
//!     fov_scale:  f32,         // offset 92
//! }
//! ```
//!
//! Every vec3 occupies four slots. `fov_scale` fills the slot after `right`,
//! which is where uniform layout rules place a scalar following a vec3.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use sheen_math::{CameraState, ViewBasis};

use crate::scene::Sphere;

/// Number of f32 slots in a [`SceneUniform`].
pub const SCENE_UNIFORM_FLOATS: usize = 24;

/// Size of a [`SceneUniform`] in bytes.
pub const SCENE_UNIFORM_SIZE: usize = SCENE_UNIFORM_FLOATS * 4;

/// The two colors of the sky. The checkerboard alternates between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyColors {
    pub color0: Vec3,
    pub color1: Vec3,
}

impl SkyColors {
    pub fn new(color0: Vec3, color1: Vec3) -> Self {
        Self { color0, color1 }
    }
}

/// Per-frame camera and sky state as read by the kernel.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    pub sky_color0: [f32; 3],
    _pad0: f32,
    pub sky_color1: [f32; 3],
    _pad1: f32,
    pub origin: [f32; 3],
    _pad2: f32,
    pub forward: [f32; 3],
    _pad3: f32,
    pub up: [f32; 3],
    _pad4: f32,
    pub right: [f32; 3],
    pub fov_scale: f32,
}

impl SceneUniform {
    /// The record as its 24 f32 slots, padding included.
    pub fn as_floats(&self) -> [f32; SCENE_UNIFORM_FLOATS] {
        bytemuck::cast(*self)
    }

    /// Little-endian byte image, ready for upload.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.as_floats()
            .iter()
            .flat_map(|f| f.to_le_bytes())
            .collect()
    }

    pub fn sky_color0(&self) -> Vec3 {
        Vec3::from_array(self.sky_color0)
    }

    pub fn sky_color1(&self) -> Vec3 {
        Vec3::from_array(self.sky_color1)
    }

    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::from_array(self.forward)
    }

    pub fn up(&self) -> Vec3 {
        Vec3::from_array(self.up)
    }

    pub fn right(&self) -> Vec3 {
        Vec3::from_array(self.right)
    }
}

/// Pack camera and sky state into the kernel's uniform layout.
///
/// Pure: the same inputs always produce the same bytes. Call once per frame
/// after the camera has been integrated.
pub fn encode_scene(sky: &SkyColors, camera: &CameraState, basis: &ViewBasis) -> SceneUniform {
    SceneUniform {
        sky_color0: sky.color0.to_array(),
        sky_color1: sky.color1.to_array(),
        origin: camera.position.to_array(),
        forward: basis.forward.to_array(),
        up: basis.up.to_array(),
        right: basis.right.to_array(),
        fov_scale: basis.fov_scale,
        ..Zeroable::zeroed()
    }
}

/// A sphere as stored in the kernel's storage buffer: (cx, cy, cz, radius).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuSphere {
    pub center: [f32; 3],
    pub radius: f32,
}

impl From<&Sphere> for GpuSphere {
    fn from(sphere: &Sphere) -> Self {
        Self {
            center: sphere.center.to_array(),
            radius: sphere.radius,
        }
    }
}

/// Flatten spheres into storage-buffer order.
pub fn encode_spheres(spheres: &[Sphere]) -> Vec<GpuSphere> {
    spheres.iter().map(GpuSphere::from).collect()
}

/// Dispatch parameters that are not part of the scene record.
///
/// Carries the sphere count separately so an empty scene can still bind a
/// non-empty storage buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameParams {
    pub width: u32,
    pub height: u32,
    pub sphere_count: u32,
    pub check_size: f32,
}

impl FrameParams {
    pub fn new(width: u32, height: u32, sphere_count: usize, check_size: f32) -> Self {
        Self {
            width,
            height,
            sphere_count: sphere_count as u32,
            check_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheen_math::compute_view_basis;
    use std::mem::{offset_of, size_of};

    fn sample_inputs() -> (SkyColors, CameraState) {
        let sky = SkyColors::new(Vec3::new(0.1, 0.2, 0.3), Vec3::new(0.4, 0.5, 0.6));
        let camera = CameraState::new(0.7, -0.2, 75.0, Vec3::new(1.0, 2.0, 3.0));
        (sky, camera)
    }

    #[test]
    fn test_layout_matches_wgsl() {
        assert_eq!(size_of::<SceneUniform>(), SCENE_UNIFORM_SIZE);
        assert_eq!(offset_of!(SceneUniform, sky_color0), 0);
        assert_eq!(offset_of!(SceneUniform, sky_color1), 16);
        assert_eq!(offset_of!(SceneUniform, origin), 32);
        assert_eq!(offset_of!(SceneUniform, forward), 48);
        assert_eq!(offset_of!(SceneUniform, up), 64);
        assert_eq!(offset_of!(SceneUniform, right), 80);
        assert_eq!(offset_of!(SceneUniform, fov_scale), 92);

        assert_eq!(size_of::<GpuSphere>(), 16);
        assert_eq!(size_of::<FrameParams>(), 16);
    }

    #[test]
    fn test_encode_slots() {
        let (sky, camera) = sample_inputs();
        let basis = compute_view_basis(&camera);
        let floats = encode_scene(&sky, &camera, &basis).as_floats();

        assert_eq!(&floats[0..3], &[0.1, 0.2, 0.3]);
        assert_eq!(&floats[4..7], &[0.4, 0.5, 0.6]);
        assert_eq!(&floats[8..11], &[1.0, 2.0, 3.0]);
        assert_eq!(&floats[12..15], &basis.forward.to_array());
        assert_eq!(&floats[16..19], &basis.up.to_array());
        assert_eq!(&floats[20..23], &basis.right.to_array());
        assert_eq!(floats[23], basis.fov_scale);

        // Padding slots stay zero
        for slot in [3, 7, 11, 15, 19] {
            assert_eq!(floats[slot], 0.0, "slot {slot}");
        }
    }

    #[test]
    fn test_encode_is_idempotent() {
        let (sky, camera) = sample_inputs();
        let first = encode_scene(&sky, &camera, &compute_view_basis(&camera)).to_le_bytes();
        let second = encode_scene(&sky, &camera, &compute_view_basis(&camera)).to_le_bytes();

        assert_eq!(first.len(), SCENE_UNIFORM_SIZE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_le_bytes() {
        let (sky, camera) = sample_inputs();
        let uniform = encode_scene(&sky, &camera, &compute_view_basis(&camera));
        let bytes = uniform.to_le_bytes();

        assert_eq!(&bytes[0..4], &0.1f32.to_le_bytes());
        assert_eq!(&bytes[92..96], &uniform.fov_scale.to_le_bytes());
    }

    #[test]
    fn test_accessors_round_trip() {
        let (sky, camera) = sample_inputs();
        let basis = compute_view_basis(&camera);
        let uniform = encode_scene(&sky, &camera, &basis);

        assert_eq!(uniform.origin(), camera.position);
        assert_eq!(uniform.forward(), basis.forward);
        assert_eq!(uniform.right(), basis.right);
        assert_eq!(uniform.up(), basis.up);
        assert_eq!(uniform.sky_color1(), sky.color1);
    }

    #[test]
    fn test_encode_spheres() {
        let spheres = [
            Sphere::new(Vec3::new(1.0, 2.0, 3.0), 4.0),
            Sphere::new(Vec3::ZERO, 0.5),
        ];
        let gpu = encode_spheres(&spheres);
        let floats: &[f32] = bytemuck::cast_slice(&gpu);

        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.5]);
        assert!(encode_spheres(&[]).is_empty());
    }
}
