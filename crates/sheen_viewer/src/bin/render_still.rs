// Headless still renderer using the CPU kernel.
// Run with: cargo run --release --bin render_still -- <scene.json|-> <out.png> [width] [height]

use anyhow::{bail, Context, Result};
use sheen_core::{encode_scene, SceneDescription};
use sheen_math::{compute_view_basis, CameraController};
use sheen_tracer::{render_frame, FrameInputs, Sky};
use std::env;
use std::time::Instant;

const DEFAULT_SIZE: (u32, u32) = (1280, 720);

/// Largest accepted edge length.
const MAX_DIMENSION: u32 = 16384;

/// Largest accepted pixel count.
const MAX_PIXELS: u64 = 8192 * 8192;

struct Args {
    scene: Option<String>,
    output: String,
    width: u32,
    height: u32,
}

fn parse_args(args: &[String]) -> Result<Args> {
    if args.len() < 3 {
        bail!("Usage: {} <scene.json|-> <out.png> [width] [height]", args[0]);
    }

    let dimension = |index: usize, default: u32| -> Result<u32> {
        match args.get(index) {
            Some(value) => {
                let parsed: u32 = value
                    .parse()
                    .with_context(|| format!("Invalid image dimension '{}'", value))?;
                if parsed == 0 {
                    bail!("Image dimensions must be non-zero");
                }
                if parsed > MAX_DIMENSION {
                    bail!("Image dimension {} exceeds the maximum of {}", parsed, MAX_DIMENSION);
                }
                Ok(parsed)
            }
            None => Ok(default),
        }
    };

    let width = dimension(3, DEFAULT_SIZE.0)?;
    let height = dimension(4, DEFAULT_SIZE.1)?;
    let pixels = u64::from(width)
        .checked_mul(u64::from(height))
        .filter(|&count| count <= MAX_PIXELS);
    if pixels.is_none() {
        bail!("Image {}x{} is too large (at most {} pixels)", width, height, MAX_PIXELS);
    }

    Ok(Args {
        scene: (args[1] != "-").then(|| args[1].clone()),
        output: args[2].clone(),
        width,
        height,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args)?;

    let scene = match &args.scene {
        Some(path) => SceneDescription::load(path).with_context(|| format!("Failed to load scene {}", path))?,
        None => SceneDescription::default(),
    };

    let sky = Sky::from_scene(&scene).context("Failed to build sky")?;

    let controller = CameraController::new(scene.controls.to_settings());
    let mut camera = scene.camera.to_state();
    controller.clamp(&mut camera);

    let uniform = encode_scene(&scene.sky.colors(), &camera, &compute_view_basis(&camera));
    let inputs = FrameInputs {
        uniform: &uniform,
        spheres: &scene.spheres,
        sky: &sky,
    };

    log::info!(
        "Rendering {}x{} ({} spheres, {} sky)",
        args.width,
        args.height,
        scene.spheres.len(),
        sky.label()
    );

    let start = Instant::now();
    let image = render_frame(args.width, args.height, &inputs);
    log::info!("Rendered in {:.2?}", start.elapsed());

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;
    log::info!("Saved to {}", args.output);

    Ok(())
}
