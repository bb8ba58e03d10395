//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use glint_math::random::{random_f64, random_unit_vector};
use glint_math::{unit_vector, Color, Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Distance metal pushes its scattered ray off the surface along the normal.
pub const METAL_ORIGIN_OFFSET: f64 = 0.001;

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Colour multiplier applied to light travelling along `scattered`
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials are immutable once built and are shared between surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // Normal plus a point on the unit sphere gives a cosine-weighted lobe
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
///
/// By default every ray scatters, including fuzzed rays that end up below
/// the surface. `with_strict_scatter(true)` absorbs those instead.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
    strict: bool,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
            strict: false,
        }
    }

    /// Absorb scattered rays that point into the surface.
    pub fn with_strict_scatter(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction, rec.normal) + self.fuzz * random_unit_vector(rng);

        if self.strict && reflected.dot(rec.normal) <= 0.0 {
            return None;
        }

        let origin = rec.p + rec.normal * METAL_ORIGIN_OFFSET;
        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(origin, reflected),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction relative to the surrounding medium
    refraction_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    pub fn refraction_index(&self) -> f64 {
        self.refraction_index
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let ri = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = unit_vector(ray_in.direction);
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = ri * sin_theta > 1.0;

        let direction = if cannot_refract || reflectance(cos_theta, ri) > random_f64(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, ri)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices across the boundary.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation of Fresnel reflectance.
///
/// An index-matched boundary reflects nothing.
pub fn reflectance(cosine: f64, ri: f64) -> f64 {
    if ri == 1.0 {
        return 0.0;
    }
    let r0 = ((1.0 - ri) / (1.0 + ri)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(ray: &Ray, outward_normal: Vec3, material: &'a dyn Material) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, outward_normal, material)
    }

    #[test]
    fn test_lambertian_attenuation_is_albedo() {
        let albedo = Color::new(0.2, 0.4, 0.6);
        let material = Lambertian::new(albedo);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let rec = record(&ray, Vec3::Z, &material);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, albedo);
            assert_eq!(result.scattered.origin, rec.p);
            assert!(!result.scattered.direction.near_zero());
            // Normal + unit vector never points below the surface
            assert!(result.scattered.direction.dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let albedo = Color::new(0.8, 0.6, 0.2);
        let material = Metal::new(albedo, 0.0);
        let direction = Vec3::new(1.0, -1.0, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.0), direction);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(2);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = direction - 2.0 * direction.dot(rec.normal) * rec.normal;
        assert_eq!(result.attenuation, albedo);
        assert!((result.scattered.direction - expected).length() < 1e-12);
        assert_eq!(result.scattered.direction, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(result.scattered.origin, rec.p + rec.normal * METAL_ORIGIN_OFFSET);
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
        assert_eq!(Metal::new(Color::ONE, 0.3).fuzz(), 0.3);
    }

    #[test]
    fn test_metal_default_keeps_rays_below_surface() {
        // Grazing ray plus maximum fuzz regularly lands below the surface
        let lenient = Metal::new(Color::ONE, 1.0);
        let strict = Metal::new(Color::ONE, 1.0).with_strict_scatter(true);
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, &lenient);

        let mut rng = StdRng::seed_from_u64(3);
        let mut below = 0;
        let mut absorbed = 0;
        for _ in 0..200 {
            let result = lenient.scatter(&ray, &rec, &mut rng).unwrap();
            if result.scattered.direction.dot(rec.normal) <= 0.0 {
                below += 1;
            }
            match strict.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction.dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(below > 0);
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_index_one_passes_straight_through() {
        let material = Dielectric::new(1.0);
        let mut rng = StdRng::seed_from_u64(4);

        let directions = [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(5.0, -0.1, 2.0),
            Vec3::new(-3.0, -2.0, 0.5),
        ];
        for direction in directions {
            for outward_normal in [Vec3::Y, Vec3::NEG_Y] {
                let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), direction);
                let rec = HitRecord::new(&ray, 1.0, outward_normal, &material);
                for _ in 0..20 {
                    let result = material.scatter(&ray, &rec, &mut rng).unwrap();
                    assert_eq!(result.attenuation, Color::ONE);
                    let bent = result.scattered.direction - unit_vector(direction);
                    assert!(bent.length() < 1e-9, "direction {direction} bent by {bent}");
                }
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a grazing angle must reflect
        let material = Dielectric::new(1.5);
        let direction = Vec3::new(1.0, 0.2, 0.0);
        let ray = Ray::new(Vec3::ZERO, direction);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, &material);
        assert!(!rec.front_face);

        let mut rng = StdRng::seed_from_u64(5);
        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = reflect(unit_vector(direction), rec.normal);
        assert!((result.scattered.direction - expected).length() < 1e-12);
    }

    #[test]
    fn test_dielectric_entering_glass_bends_toward_normal() {
        let material = Dielectric::new(1.5);
        let direction = Vec3::new(1.0, -1.0, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.0), direction);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, &material);
        assert!(rec.front_face);

        let unit_in = unit_vector(direction);
        let sin_in = unit_in.cross(rec.normal).length();
        let mirror = reflect(unit_in, rec.normal);

        let mut rng = StdRng::seed_from_u64(6);
        let mut refracted = 0;
        for _ in 0..200 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            let out = result.scattered.direction;
            if (out - mirror).length() < 1e-12 {
                continue;
            }
            refracted += 1;
            assert!(out.dot(rec.normal) < 0.0);
            let sin_out = unit_vector(out).cross(rec.normal).length();
            assert!((sin_out - sin_in / 1.5).abs() < 1e-9);
        }
        // Schlick reflectance at 45 degrees is about 5%
        assert!(refracted > 150);
    }

    #[test]
    fn test_refract_follows_snell() {
        let uv = unit_vector(Vec3::new(1.0, -1.0, 0.0));
        let n = Vec3::Y;
        let ratio = 1.0 / 1.5;
        let out = refract(uv, n, ratio);

        let sin_in = uv.cross(-n).length();
        let sin_out = unit_vector(out).cross(-n).length();
        assert!((sin_in * ratio - sin_out).abs() < 1e-9);
        assert!((out.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reflectance_bounds() {
        assert_eq!(reflectance(0.3, 1.0), 0.0);
        // Head-on glass reflects about 4%
        assert!((reflectance(1.0, 1.0 / 1.5) - 0.04).abs() < 1e-9);
        // Grazing incidence reflects everything
        assert!((reflectance(0.0, 1.0 / 1.5) - 1.0).abs() < 1e-9);
    }
}
