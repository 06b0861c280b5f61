//! Primary ray generation.

use sheen_core::SceneUniform;
use sheen_math::Ray;

/// Build the camera ray through pixel `(x, y)`.
///
/// Pixels are addressed from the top-left corner; screen Y is flipped so
/// that row 0 looks up. Returns `None` for pixels outside the image, which
/// the dispatch simply skips.
pub fn generate_ray(x: u32, y: u32, width: u32, height: u32, scene: &SceneUniform) -> Option<Ray> {
    if x >= width || y >= height {
        return None;
    }

    let ndc_x = x as f32 / width as f32 * 2.0 - 1.0;
    let ndc_y = y as f32 / height as f32 * 2.0 - 1.0;

    let screen_x = scene.fov_scale * ndc_x;
    let screen_y = -scene.fov_scale * ndc_y;

    let direction = scene.forward() + screen_x * scene.right() + screen_y * scene.up();
    Some(Ray::normalized(scene.origin(), direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheen_core::{encode_scene, SkyColors};
    use sheen_math::{compute_view_basis, CameraState, Vec3};

    fn uniform(camera: CameraState) -> SceneUniform {
        let sky = SkyColors::new(Vec3::ONE, Vec3::ZERO);
        encode_scene(&sky, &camera, &compute_view_basis(&camera))
    }

    #[test]
    fn test_center_pixel_looks_forward() {
        let camera = CameraState::new(0.4, 0.2, 60.0, Vec3::new(1.0, 2.0, 3.0));
        let scene = uniform(camera);

        let ray = generate_ray(50, 50, 100, 100, &scene).unwrap();

        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - compute_view_basis(&camera).forward).length() < 1e-5);
    }

    #[test]
    fn test_directions_are_unit_length() {
        let scene = uniform(CameraState::new(-1.0, 0.7, 120.0, Vec3::ZERO));

        for y in (0..48).step_by(7) {
            for x in (0..64).step_by(9) {
                let ray = generate_ray(x, y, 64, 48, &scene).unwrap();
                assert!((ray.direction.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_corner_pixel_offsets() {
        // 90 degree FOV: fov_scale = 1, so the top-left corner is forward - right + up
        let camera = CameraState::new(0.0, 0.0, 90.0, Vec3::ZERO);
        let basis = compute_view_basis(&camera);
        let scene = uniform(camera);

        let ray = generate_ray(0, 0, 10, 10, &scene).unwrap();
        let expected = (basis.forward - basis.right + basis.up).normalize();

        assert!((ray.direction - expected).length() < 1e-5);
    }

    #[test]
    fn test_first_row_looks_up() {
        let scene = uniform(CameraState::default());

        let top = generate_ray(5, 0, 10, 10, &scene).unwrap();
        let bottom = generate_ray(5, 9, 10, 10, &scene).unwrap();

        assert!(top.direction.y > 0.0);
        assert!(bottom.direction.y < 0.0);
    }

    #[test]
    fn test_out_of_bounds_is_skipped() {
        let scene = uniform(CameraState::default());

        assert!(generate_ray(10, 0, 10, 10, &scene).is_none());
        assert!(generate_ray(0, 10, 10, 10, &scene).is_none());
        assert!(generate_ray(0, 0, 0, 0, &scene).is_none());
        assert!(generate_ray(9, 9, 10, 10, &scene).is_some());
    }
}
