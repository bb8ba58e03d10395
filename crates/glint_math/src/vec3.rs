use glam::DVec3;
use rand::RngCore;

use crate::random::{random_f64, random_f64_range};

/// Three-component vector used for directions.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB colour. Component-wise `*` blends two colours.
pub type Color = DVec3;

/// Per-axis magnitude below which a vector counts as zero.
pub const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Tracer-specific operations on [`Vec3`] that glam does not provide.
pub trait Vec3Ext: Sized {
    /// True if every component is smaller than [`NEAR_ZERO_EPSILON`] in magnitude.
    fn near_zero(&self) -> bool;

    /// Vector with independent components uniform in `[0, 1)`.
    fn random(rng: &mut dyn RngCore) -> Self;

    /// Vector with independent components uniform in `[min, max)`.
    fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Self;
}

impl Vec3Ext for DVec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }

    fn random(rng: &mut dyn RngCore) -> Self {
        DVec3::new(random_f64(rng), random_f64(rng), random_f64(rng))
    }

    fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Self {
        DVec3::new(
            random_f64_range(rng, min, max),
            random_f64_range(rng, min, max),
            random_f64_range(rng, min, max),
        )
    }
}

/// Scale `v` to unit length.
///
/// `v` must not be the zero vector; the result is NaN in that case.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}
