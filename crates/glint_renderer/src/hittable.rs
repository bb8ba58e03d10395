//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use glint_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at distance `t` along `ray`.
    ///
    /// `outward_normal` must be unit length and point out of the surface; it
    /// is flipped as needed so the stored normal opposes the ray.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'a dyn Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is flipped only when the ray travels along it, so a
    /// grazing ray counts as a front face hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction.dot(outward_normal) <= 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object at a distance inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// An ordered list of hittable objects, scanned linearly.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the end of the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The members in insertion order.
    pub fn objects(&self) -> &[Box<dyn Hittable>] {
        &self.objects
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    /// Nearest hit over all members.
    ///
    /// Each member is queried with the upper bound shrunk to the closest hit
    /// so far. On equal distances the earlier member is kept.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if let Some(rec) = object.hit(ray, interval) {
                if closest.is_none() || rec.t < closest_so_far {
                    closest_so_far = rec.t;
                    closest = Some(rec);
                }
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.is_empty());
        assert!(world.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_list_returns_nearest() {
        let material = grey();
        let mut world = HittableList::new();
        // Far sphere first so the scan has to replace it.
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, material.clone())));
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, material)));
        assert_eq!(world.len(), 2);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_list_tie_keeps_first_member() {
        let first: Arc<dyn Material> = Arc::new(Lambertian::new(Vec3::new(1.0, 0.0, 0.0)));
        let second: Arc<dyn Material> = Arc::new(Lambertian::new(Vec3::new(0.0, 1.0, 0.0)));
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, first.clone())));
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, second)));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!(std::ptr::addr_eq(rec.material, Arc::as_ptr(&first)));
    }

    #[test]
    fn test_list_matches_reference_scan() {
        let mut rng = StdRng::seed_from_u64(11);
        let material = grey();
        let mut world = HittableList::new();
        let mut spheres = Vec::new();
        for _ in 0..20 {
            let center = Vec3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-8.0..-2.0),
            );
            let radius = rng.gen_range(0.2..1.0);
            spheres.push(Sphere::new(center, radius, material.clone()));
            world.add(Box::new(Sphere::new(center, radius, material.clone())));
        }

        let ray_t = Interval::new(0.001, f64::INFINITY);
        for _ in 0..200 {
            let direction = Vec3::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5), -1.0);
            let ray = Ray::new(Vec3::ZERO, direction);

            // Independent hits, keep the first minimum.
            let mut reference: Option<f64> = None;
            for sphere in &spheres {
                if let Some(rec) = sphere.hit(&ray, ray_t) {
                    if reference.map_or(true, |t| rec.t < t) {
                        reference = Some(rec.t);
                    }
                }
            }

            let scanned = world.hit(&ray, ray_t).map(|rec| rec.t);
            assert_eq!(scanned, reference);
        }
    }

    #[test]
    fn test_set_face_normal() {
        let material = Lambertian::new(Vec3::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let front = HitRecord::new(&ray, 1.0, Vec3::Z, &material);
        assert!(front.front_face);
        assert_eq!(front.normal, Vec3::Z);

        let back = HitRecord::new(&ray, 1.0, Vec3::NEG_Z, &material);
        assert!(!back.front_face);
        assert_eq!(back.normal, Vec3::Z);
        assert_eq!(back.p, Vec3::new(0.0, 0.0, -1.0));

        // A grazing ray keeps the outward normal
        let graze = HitRecord::new(&ray, 1.0, Vec3::X, &material);
        assert!(graze.front_face);
        assert_eq!(graze.normal, Vec3::X);
    }
}
