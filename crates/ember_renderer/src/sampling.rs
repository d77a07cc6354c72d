//! Random sampling helpers.
//!
//! Every function takes the generator explicitly so renders can be seeded
//! and reproduced.

use ember_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform draw in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform draw in [min, max).
#[inline]
pub fn gen_f32_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Random point strictly inside the unit sphere.
///
/// Rejection sampled from the [-1, 1]^3 cube.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32_range(rng, -1.0, 1.0),
            gen_f32_range(rng, -1.0, 1.0),
            gen_f32_range(rng, -1.0, 1.0),
        );
        let len_sq = p.length_squared();
        // The lower bound keeps normalize() away from a zero vector
        if len_sq > 1e-12 && len_sq < 1.0 {
            return p;
        }
    }
}

/// Random unit vector, uniformly distributed on the unit sphere.
#[inline]
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    random_in_unit_sphere(rng).normalize()
}

/// Random point inside the unit disk in the XY plane (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32_range(rng, -1.0, 1.0),
            gen_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
#[inline]
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

/// Random point in cell `(s_i, s_j)` of an `n` x `n` grid over the same square.
#[inline]
pub fn sample_square_stratified(rng: &mut dyn RngCore, s_i: u32, s_j: u32, n: u32) -> Vec3 {
    let recip = 1.0 / n as f32;
    Vec3::new(
        (s_i as f32 + gen_f32(rng)) * recip - 0.5,
        (s_j as f32 + gen_f32(rng)) * recip - 0.5,
        0.0,
    )
}
