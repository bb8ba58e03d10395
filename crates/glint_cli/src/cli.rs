use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::SceneDesc;
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render a scene of spheres with a CPU path tracer")]
pub struct Args {
    /// JSON scene file (renders the built-in demo scene when omitted)
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output file: .ppm or .png, or "-" for PPM on stdout
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Image width in pixels (overrides the scene)
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel (overrides the scene)
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path (overrides the scene)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Random seed; the same seed reproduces the same image
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of a loaded scene.
    pub fn apply_overrides(&self, desc: &mut SceneDesc) {
        if let Some(width) = self.width {
            desc.camera.image_width = width;
        }
        if let Some(samples) = self.samples {
            desc.camera.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            desc.render.max_depth = max_depth;
        }
    }

    /// True when the image should go to stdout instead of a file.
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}
