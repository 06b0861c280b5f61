//! Simple mirror-sphere example.
//!
//! Renders a ring of mirror spheres over a checker sky and saves a PNG.

use sheen_core::{encode_scene, SkyColors, Sphere};
use sheen_math::{compute_view_basis, CameraState};
use sheen_tracer::{render_frame, CheckerSky, FrameInputs, Vec3};

fn main() {
    println!("Sheen - Simple Example");
    println!("======================");

    let spheres = build_scene();
    let colors = SkyColors::new(Vec3::new(0.95, 0.9, 0.8), Vec3::new(0.15, 0.2, 0.35));
    let sky = CheckerSky::new(colors, 16.0);

    let camera = CameraState::new(0.0, -0.25, 55.0, Vec3::new(0.0, 2.0, 8.0));
    let uniform = encode_scene(&colors, &camera, &compute_view_basis(&camera));

    let inputs = FrameInputs {
        uniform: &uniform,
        spheres: &spheres,
        sky: &sky,
    };

    let (width, height) = (800, 450);
    println!("Rendering {}x{} with {} spheres...", width, height, spheres.len());

    let start = std::time::Instant::now();
    let image = render_frame(width, height, &inputs);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.save_png(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Vec<Sphere> {
    let mut spheres = vec![Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 999.0)];

    for i in 0..8 {
        let angle = i as f32 / 8.0 * std::f32::consts::TAU;
        spheres.push(Sphere::new(
            Vec3::new(3.0 * angle.cos(), 0.0, 3.0 * angle.sin()),
            0.8,
        ));
    }

    spheres.push(Sphere::new(Vec3::new(0.0, 0.5, 0.0), 1.5));
    spheres
}
