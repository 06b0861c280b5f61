//! Bounded reflection tracing.
//!
//! Every sphere is a perfect mirror with a flat 80% reflectivity. A path
//! bounces until it escapes to the sky or runs out of bounces. Paths that
//! never escape keep whatever color they accumulated, which is always black
//! since only the sky contributes light.

use sheen_core::Sphere;
use sheen_math::Ray;

use crate::sky::SkySampler;
use crate::sphere::{nearest_hit, reflect, surface_normal};
use crate::Color;

/// Maximum number of mirror bounces per path.
pub const MAX_BOUNCES: u32 = 6;

/// Fraction of energy kept at each bounce.
pub const REFLECTIVITY: f32 = 0.8;

/// Final state of a traced path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    /// Accumulated color
    pub color: Color,
    /// Sphere hits before termination
    pub bounces: u32,
    /// Throughput when the path stopped
    pub throughput: Color,
    /// Whether the path reached the sky
    pub escaped: bool,
}

/// One path in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathState {
    Tracing {
        bounce: u32,
        ray: Ray,
        throughput: Color,
        color: Color,
    },
    Terminated(TraceResult),
}

impl PathState {
    /// Start a path at the camera.
    pub fn start(ray: Ray) -> Self {
        PathState::Tracing {
            bounce: 0,
            ray,
            throughput: Color::ONE,
            color: Color::ZERO,
        }
    }

    /// Advance by one bounce.
    pub fn step(self, spheres: &[Sphere], sky: &dyn SkySampler) -> Self {
        let PathState::Tracing {
            bounce,
            ray,
            throughput,
            color,
        } = self
        else {
            return self;
        };

        if bounce >= MAX_BOUNCES {
            return PathState::Terminated(TraceResult {
                color,
                bounces: bounce,
                throughput,
                escaped: false,
            });
        }

        match nearest_hit(&ray, spheres) {
            None => PathState::Terminated(TraceResult {
                color: color + throughput * sky.sample(ray.direction),
                bounces: bounce,
                throughput,
                escaped: true,
            }),
            Some(hit) => {
                let point = ray.at(hit.distance);
                let normal = surface_normal(&spheres[hit.index], point);
                let reflected = reflect(ray.direction, normal);

                PathState::Tracing {
                    bounce: bounce + 1,
                    ray: Ray::new(point, reflected),
                    throughput: throughput * REFLECTIVITY,
                    color,
                }
            }
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, PathState::Terminated(_))
    }
}

/// Trace a primary ray to completion. Takes at most `MAX_BOUNCES + 1` steps.
pub fn trace(ray: Ray, spheres: &[Sphere], sky: &dyn SkySampler) -> TraceResult {
    let mut state = PathState::start(ray);
    loop {
        match state {
            PathState::Terminated(result) => return result,
            tracing => state = tracing.step(spheres, sky),
        }
    }
}
