//! Sheen CPU tracer
//!
//! Reference implementation of the per-pixel kernel: primary ray generation,
//! analytic sphere intersection, bounded mirror reflection and sky lookup.
//! The GPU compute shader in `sheen_viewport` runs the same program; this
//! crate backs the still renderer and the tests.

mod path;
mod ray_gen;
mod renderer;
mod sky;
mod sphere;
mod tile;

pub use path::{trace, PathState, TraceResult, MAX_BOUNCES, REFLECTIVITY};
pub use ray_gen::generate_ray;
pub use renderer::{color_to_rgba, linear_to_srgb, render_frame, render_pixel, FrameInputs, ImageBuffer};
pub use sky::{direction_to_uv, CheckerSky, Sky, SkySampler, TextureSky};
pub use sphere::{intersect, nearest_hit, reflect, surface_normal, Hit, NO_HIT};
pub use tile::{generate_tiles, render_tile, workgroup_count, Tile, TileResult, TILE_SIZE};

/// Re-export math types from sheen_math
pub use sheen_math::{Interval, Ray, Vec3};

/// Linear RGB color.
pub type Color = Vec3;
