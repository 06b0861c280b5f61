//! Analytic ray-sphere intersection.

use sheen_core::Sphere;
use sheen_math::{Interval, Ray, Vec3};

/// Distance returned when the ray's line misses the sphere entirely.
pub const NO_HIT: f32 = -1.0;

/// Intersect a ray with a single sphere.
///
/// Solves `|O - C + tD|² = r²` and returns the smaller root. The result is
/// [`NO_HIT`] when the discriminant is negative, and may also be negative
/// (or zero) when the sphere lies behind the ray origin. Callers treat
/// anything not strictly positive as a miss.
#[inline]
pub fn intersect(ray: &Ray, sphere: &Sphere) -> f32 {
    let oc = ray.origin - sphere.center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return NO_HIT;
    }

    (-b - discriminant.sqrt()) / (2.0 * a)
}

/// Nearest sphere hit along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index into the sphere list
    pub index: usize,
    /// Ray parameter of the hit, always > 0
    pub distance: f32,
}

/// Find the closest sphere in front of the ray.
///
/// Only strictly positive distances count. On equal distances the sphere
/// that comes first in the list wins.
pub fn nearest_hit(ray: &Ray, spheres: &[Sphere]) -> Option<Hit> {
    let mut closest: Option<Hit> = None;

    for (index, sphere) in spheres.iter().enumerate() {
        let distance = intersect(ray, sphere);
        if !Interval::POSITIVE.surrounds(distance) {
            continue;
        }
        if closest.map_or(true, |hit| distance < hit.distance) {
            closest = Some(Hit { index, distance });
        }
    }

    closest
}

/// Outward unit normal of a sphere at a surface point.
#[inline]
pub fn surface_normal(sphere: &Sphere, point: Vec3) -> Vec3 {
    (point - sphere.center).normalize()
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
