//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative bounce loop with a fixed depth budget
//! - Sky gradient background
//! - Anti-aliasing via multi-sampling

use std::time::Instant;

use crate::{Camera, Color, Hittable, Ray, ScatterResult};
use glint_math::{unit_vector, Interval};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Bounce budget used when none is configured.
pub const DEFAULT_MAX_DEPTH: u32 = 100;

/// Nearest accepted hit distance; keeps scattered rays off their own surface.
pub const SELF_INTERSECTION_EPSILON: f64 = 0.001;

/// Vertical background gradient seen by rays that escape the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyGradient {
    /// Colour for rays pointing straight down
    pub horizon: Color,
    /// Colour for rays pointing straight up
    pub zenith: Color,
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self {
            horizon: Color::new(1.0, 1.0, 1.0),
            zenith: Color::new(0.1, 0.3, 1.0),
        }
    }
}

impl SkyGradient {
    /// Blend keyed on the ray's vertical direction, remapped from [-1, 1] to [0, 1].
    pub fn color(&self, ray: &Ray) -> Color {
        let unit_direction = unit_vector(ray.direction);
        let a = 0.5 * (unit_direction.y + 1.0);
        (1.0 - a) * self.horizon + a * self.zenith
    }
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum number of bounces per path
    pub max_depth: u32,
    /// Background for escaped rays
    pub sky: SkyGradient,
    /// Lower bound of the hit window
    pub t_min: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            sky: SkyGradient::default(),
            t_min: SELF_INTERSECTION_EPSILON,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Follows the path bounce by bounce, multiplying in each surface's
/// attenuation. A path that escapes, or runs out of bounces, is tinted by
/// the sky colour in the direction of its last ray. An absorbed path keeps
/// the colour gathered so far.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut accumulated = Color::ONE;
    let mut current = *ray;
    let window = Interval::new(config.t_min, f64::INFINITY);

    for _ in 0..config.max_depth {
        let Some(rec) = world.hit(&current, window) else {
            break;
        };

        match rec.material.scatter(&current, &rec, rng) {
            Some(ScatterResult {
                attenuation,
                scattered,
            }) => {
                accumulated *= attenuation;
                current = scattered;
            }
            None => return accumulated,
        }
    }

    accumulated * config.sky.color(&current)
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config, rng);
    }

    pixel_color * camera.samples_scale()
}

/// Linear-light image, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded; pixels are traced in row-major order so a seeded `rng`
/// reproduces the image exactly.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        config.max_depth
    );
    let start = Instant::now();

    for y in 0..height {
        log::debug!("Scanlines remaining: {}", height - y);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
