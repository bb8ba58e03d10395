//! Camera for ray generation.
//!
//! [`CameraConfig`] holds the user-facing parameters. [`Camera::new`]
//! validates them and derives the pixel grid, camera basis and defocus disk
//! once, so every later `get_ray` call is cheap and read-only.

use glint_math::random::{random_f64, random_in_unit_disk};
use glint_math::{unit_vector, Point3, Ray, Vec3, Vec3Ext};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid camera settings rejected by [`Camera::new`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),

    #[error("image height does not fit in 32 bits, got {0}")]
    InvalidImageHeight(f64),

    #[error("vertical field of view must be between 0 and 180 degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("focus distance must be positive and finite, got {0}")]
    InvalidFocusDistance(f64),

    #[error("defocus angle must be non-negative and finite, got {0}")]
    InvalidDefocusAngle(f64),

    #[error("look_from and look_at are the same point")]
    DegenerateView,

    #[error("up vector is parallel to the view direction")]
    DegenerateUp,
}

/// User-facing camera parameters.
///
/// Angles are in degrees. Every field has a default so scene files only
/// need to spell out what differs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Width over height; the image height is derived from it
    pub aspect_ratio: f64,
    /// Number of jittered samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Camera position
    pub look_from: Point3,
    /// Point the camera looks at
    pub look_at: Point3,
    /// Camera-relative "up" hint
    pub vup: Vec3,
    /// Variation angle of rays through each pixel (0 = pinhole)
    pub defocus_angle: f64,
    /// Distance from `look_from` to the plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 10,
            vfov: 90.0,
            look_from: Point3::new(0.0, 0.0, 0.0),
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    /// Set image width and aspect ratio.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set samples per pixel.
    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    fn validate(&self) -> Result<(), CameraError> {
        if self.image_width == 0 {
            return Err(CameraError::ZeroWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(CameraError::ZeroSamples);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        let image_height = (self.image_width as f64 / self.aspect_ratio).floor();
        if !(image_height.is_finite() && image_height <= u32::MAX as f64) {
            return Err(CameraError::InvalidImageHeight(image_height));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(self.vfov));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(CameraError::InvalidFocusDistance(self.focus_dist));
        }
        if !(self.defocus_angle.is_finite() && self.defocus_angle >= 0.0) {
            return Err(CameraError::InvalidDefocusAngle(self.defocus_angle));
        }
        let view = self.look_from - self.look_at;
        if view.near_zero() {
            return Err(CameraError::DegenerateView);
        }
        if self.vup.cross(view).near_zero() {
            return Err(CameraError::DegenerateUp);
        }
        Ok(())
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,

    // Derived once in new()
    image_height: u32,
    samples_scale: f64,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Validate `config` and derive the viewing geometry.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        config.validate()?;

        let image_width = config.image_width;
        let image_height = ((image_width as f64 / config.aspect_ratio) as u32).max(1);
        let center = config.look_from;

        // Calculate viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // Calculate camera basis vectors
        let w = unit_vector(config.look_from - config.look_at);
        let u = unit_vector(config.vup.cross(w));
        let v = w.cross(u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();

        Ok(Self {
            config,
            image_height,
            samples_scale: 1.0 / config.samples_per_pixel as f64,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        })
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The target is jittered within the pixel footprint; with a non-zero
    /// defocus angle the origin is jittered across the defocus disk too.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f64 {
        self.samples_scale
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    /// World-space centre of pixel (0, 0).
    pub fn pixel00_loc(&self) -> Point3 {
        self.pixel00_loc
    }

    /// Offsets from one pixel centre to the next: (right, down).
    pub fn pixel_deltas(&self) -> (Vec3, Vec3) {
        (self.pixel_delta_u, self.pixel_delta_v)
    }

    /// Orthonormal camera frame: u right, v up, w backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Defocus disk radius vectors along u and v.
    pub fn defocus_disk(&self) -> (Vec3, Vec3) {
        (self.defocus_disk_u, self.defocus_disk_v)
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f64(rng) - 0.5, random_f64(rng) - 0.5, 0.0)
}
