//! Scene description and loading.
//!
//! A scene file is JSON with four sections: `camera`, `render`, a table of
//! named `materials`, and a list of `spheres` that refer to materials by
//! name. Each named material is built once and shared by every sphere that
//! uses it.
//!
//! # Example
//!
//! ```ignore
//! use glint_renderer::scene::load_scene;
//!
//! let scene = load_scene("scenes/three_spheres.json")?;
//! let image = render(&scene.camera, &scene.world, &scene.render, &mut rng);
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use glint_math::{Color, Point3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    Camera, CameraConfig, CameraError, Dielectric, HittableList, Lambertian, Material, Metal,
    RenderConfig, Sphere,
};

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} refers to unknown material {name:?}")]
    UnknownMaterial { index: usize, name: String },

    #[error("Invalid camera: {0}")]
    Camera(#[from] CameraError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A material entry in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
        /// Absorb fuzzed rays that point into the surface
        #[serde(default)]
        strict: bool,
    },
    Dielectric {
        refraction_index: f64,
    },
}

impl MaterialDesc {
    fn build(&self) -> Arc<dyn Material> {
        match *self {
            MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
            MaterialDesc::Metal {
                albedo,
                fuzz,
                strict,
            } => Arc::new(Metal::new(albedo, fuzz).with_strict_scatter(strict)),
            MaterialDesc::Dielectric { refraction_index } => {
                Arc::new(Dielectric::new(refraction_index))
            }
        }
    }
}

/// A sphere entry in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f64,
    /// Key into the scene's material table
    pub material: String,
}

/// Serializable description of a whole scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDesc {
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

/// A scene ready to render.
pub struct Scene {
    pub camera: Camera,
    pub render: RenderConfig,
    pub world: HittableList,
}

impl SceneDesc {
    /// Parse a scene description from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The built-in demo scene: a ground plane-sized sphere with a diffuse
    /// ball flanked by two metal balls.
    pub fn demo() -> Self {
        let mut materials = BTreeMap::new();
        materials.insert(
            "ground".to_string(),
            MaterialDesc::Lambertian {
                albedo: Color::new(0.8, 0.8, 0.0),
            },
        );
        materials.insert(
            "center".to_string(),
            MaterialDesc::Lambertian {
                albedo: Color::new(0.1, 0.2, 0.5),
            },
        );
        materials.insert(
            "left".to_string(),
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.8, 0.8),
                fuzz: 0.1,
                strict: false,
            },
        );
        materials.insert(
            "right".to_string(),
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                fuzz: 0.3,
                strict: false,
            },
        );

        let sphere = |center: Vec3, radius: f64, material: &str| SphereDesc {
            center,
            radius,
            material: material.to_string(),
        };

        Self {
            camera: CameraConfig::default()
                .with_resolution(1920, 16.0 / 9.0)
                .with_samples(50),
            render: RenderConfig::default(),
            materials,
            spheres: vec![
                sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "ground"),
                sphere(Vec3::new(0.0, 0.0, -1.2), 0.5, "center"),
                sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, "left"),
                sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, "right"),
            ],
        }
    }

    /// Validate the camera and build the world.
    pub fn build(&self) -> SceneResult<Scene> {
        let camera = Camera::new(self.camera)?;

        let materials: BTreeMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.build()))
            .collect();

        let mut world = HittableList::new();
        for (index, desc) in self.spheres.iter().enumerate() {
            let material = materials.get(desc.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    index,
                    name: desc.material.clone(),
                }
            })?;
            if desc.radius < 0.0 {
                log::warn!("Sphere {} has negative radius {}, clamping to 0", index, desc.radius);
            }
            world.add(Box::new(Sphere::new(desc.center, desc.radius, material.clone())));
        }

        log::debug!(
            "Built scene with {} spheres sharing {} materials",
            world.len(),
            materials.len()
        );

        Ok(Scene {
            camera,
            render: self.render,
            world,
        })
    }
}

/// Load a scene description from a JSON file.
pub fn load_scene_desc<P: AsRef<Path>>(path: P) -> SceneResult<SceneDesc> {
    let text = std::fs::read_to_string(path.as_ref())?;
    SceneDesc::from_json_str(&text)
}

/// Load and build a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    load_scene_desc(path)?.build()
}
