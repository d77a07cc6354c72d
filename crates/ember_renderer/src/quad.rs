//! Planar quadrilateral primitive.
//!
//! The quad spans `q + a*u + b*v` for `a, b` in [0, 1]. Hits are found by
//! intersecting the supporting plane and then resolving the hit point into
//! the (u, v) edge basis.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Interval, Vec3};
use std::sync::Arc;

/// Rays closer than this to parallel with the plane are treated as misses.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A parallelogram defined by a corner and two edge vectors.
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    /// Pre-computed plane normal (unit length)
    normal: Vec3,
    /// Plane offset: normal . x = d
    d: f32,
    /// n / (n . n) with n = u x v, used to resolve planar coordinates
    w: Vec3,
    material: Arc<dyn Material>,
}

impl Quad {
    /// Create a new quad from a corner and two edges.
    ///
    /// The edges must not be parallel.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let w = n / n.dot(n);

        Self {
            q,
            u,
            v,
            normal,
            d,
            w,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Planar coordinates are inside the patch iff both lie in [0, 1].
    fn is_interior(alpha: f32, beta: f32) -> bool {
        let unit = Interval::new(0.0, 1.0);
        unit.contains(alpha) && unit.contains(beta)
    }
}

impl Hittable for Quad {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let planar_hit = ray.at(t) - self.q;
        let alpha = self.w.dot(planar_hit.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hit));

        if !Self::is_interior(alpha, beta) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            t,
            self.normal,
            self.material.as_ref(),
            (alpha, beta),
        ))
    }
}
