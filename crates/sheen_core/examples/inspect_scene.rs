//! Example: Load a scene file and dump the per-frame records it produces.
//!
//! Run with: cargo run --example inspect_scene -- scenes/mirrors.json

use std::env;

use sheen_core::{encode_scene, encode_spheres, SceneDescription, SCENE_UNIFORM_FLOATS};
use sheen_math::compute_view_basis;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let scene = match args.get(1) {
        Some(path) => match SceneDescription::load(path) {
            Ok(scene) => scene,
            Err(e) => {
                eprintln!("Error loading scene: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            println!("No scene given, using the built-in scene");
            SceneDescription::default()
        }
    };

    println!("\n=== Scene ===");
    println!("Spheres: {}", scene.spheres.len());
    println!("Sky: {}", scene.sky_label());

    println!("\n--- Spheres ---");
    for (i, sphere) in encode_spheres(&scene.spheres).iter().enumerate() {
        println!("  [{}] center {:?}, radius {}", i, sphere.center, sphere.radius);
    }

    let state = scene.camera.to_state();
    let uniform = encode_scene(&scene.sky.colors(), &state, &compute_view_basis(&state));

    println!("\n--- Scene uniform ({} slots) ---", SCENE_UNIFORM_FLOATS);
    for (slot, chunk) in uniform.as_floats().chunks(4).enumerate() {
        println!("  {:2}: {:?}", slot * 4, chunk);
    }
}
