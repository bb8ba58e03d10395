//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes of spheres.
//!
//! Cameras emit jittered rays per pixel, the world resolves the nearest
//! intersection, and materials scatter or absorb each ray until it escapes
//! to the sky or runs out of bounces.

mod camera;
mod hittable;
mod material;
pub mod output;
mod renderer;
pub mod scene;
mod sphere;

pub use camera::{Camera, CameraConfig, CameraError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    reflect, reflectance, refract, Dielectric, Lambertian, Material, Metal, ScatterResult,
    METAL_ORIGIN_OFFSET,
};
pub use output::{color_to_rgb, save_image, write_ppm, OutputError};
pub use renderer::{
    ray_color, render, render_pixel, ImageBuffer, RenderConfig, SkyGradient, DEFAULT_MAX_DEPTH,
    SELF_INTERSECTION_EPSILON,
};
pub use scene::{load_scene, Scene, SceneDesc, SceneError};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray, Vec3, Vec3Ext};
