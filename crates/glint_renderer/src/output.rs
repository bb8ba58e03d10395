//! Pixel encoding and image file output.
//!
//! Colours are accumulated in linear light. On the way out each channel is
//! gamma corrected (gamma 2, i.e. a square root), clamped to
//! `[0.000, 0.999]` and scaled to a byte.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glint_math::{Color, Interval};
use thiserror::Error;

use crate::ImageBuffer;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0:?} (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

/// Output range for a gamma-corrected channel before byte scaling.
const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear colour to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |linear: f64| (255.999 * INTENSITY.clamp(linear_to_gamma(linear))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Write `image` as a plain-text PPM (P3).
///
/// Header, then one `r g b` line per pixel in row-major order.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

/// Save `image` as a PPM file.
pub fn save_ppm(image: &ImageBuffer, path: &Path) -> Result<(), OutputError> {
    let file = File::create(path)?;
    write_ppm(image, BufWriter::new(file))?;
    Ok(())
}

/// Save `image` as an 8-bit PNG file.
pub fn save_png(image: &ImageBuffer, path: &Path) -> Result<(), OutputError> {
    let rgb = image::RgbImage::from_fn(image.width, image.height, |x, y| {
        image::Rgb(color_to_rgb(image.get(x, y)))
    });
    rgb.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Save `image`, picking the format from the file extension.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<(), OutputError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => save_ppm(image, path)?,
        "png" => save_png(image, path)?,
        _ => return Err(OutputError::UnsupportedFormat(extension)),
    }

    log::info!("Image saved as {}", path.display());
    Ok(())
}
