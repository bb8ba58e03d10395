//! Sampling helpers over an explicitly passed random source.
//!
//! Nothing here touches a global generator; callers own and seed the
//! `RngCore`.

use rand::{Rng, RngCore};

use crate::{Vec3, Vec3Ext};

/// Uniform `f64` in `[0, 1)`.
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform `f64` in `[min, max)`.
#[inline]
pub fn random_f64_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Uniformly distributed direction on the unit sphere.
///
/// Rejection-samples the `[-1, 1]` cube, accepting squared lengths in
/// `(1e-160, 1]`.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::random_range(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        if 1e-160 < len_sq && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_f64_range(rng, -1.0, 1.0),
            random_f64_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
