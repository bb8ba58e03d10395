//! Glint math - vector, ray and interval primitives.
//!
//! Vectors are `glam::DVec3`. Points and colours share the same type under
//! the `Point3` and `Color` aliases; the extra operations the tracer needs
//! (near-zero test, random construction) come from [`Vec3Ext`].

pub use glam;

mod interval;
mod ray;
pub mod random;
mod vec3;

pub use interval::Interval;
pub use ray::Ray;
pub use vec3::{unit_vector, Color, Point3, Vec3, Vec3Ext, NEAR_ZERO_EPSILON};
