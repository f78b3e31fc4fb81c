//! Saving the current scene as a PNG, one pixel per world unit.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use kurbo::Affine;
use thiserror::Error;

use crate::engine::garden::Garden;

use super::canvas::Canvas;
use super::scene;

/// Largest edge we are willing to rasterize.
const MAX_EDGE: usize = 8192;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("viewport {width}x{height} cannot be exported")]
    BadViewport { width: f64, height: f64 },
    #[error("i/o error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Render the garden at its own resolution.
pub fn render_image(garden: &Garden, supersample: usize) -> Result<Canvas, ExportError> {
    let viewport = garden.viewport();
    let (w, h) = (viewport.width.round(), viewport.height.round());
    let bad = || ExportError::BadViewport {
        width: viewport.width,
        height: viewport.height,
    };
    if !(w >= 1.0 && h >= 1.0 && w <= MAX_EDGE as f64 && h <= MAX_EDGE as f64) {
        return Err(bad());
    }
    let ss = supersample.max(1);
    let mut canvas = Canvas::new(w as usize * ss, h as usize * ss).ok_or_else(bad)?;
    scene::draw(garden, &mut canvas, &Affine::scale(ss as f64));
    canvas.downsample(ss).ok_or_else(bad)
}

pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), ExportError> {
    let io = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io)?;
    let encoder = PngEncoder::new(BufWriter::new(file));
    encoder.write_image(
        &canvas.to_rgb8(),
        canvas.width() as u32,
        canvas.height() as u32,
        ColorType::Rgb8,
    )?;
    Ok(())
}

/// Write `bouquet-<unix millis>.png` into `dir` and return its path.
pub fn export_png(garden: &Garden, dir: &Path, supersample: usize) -> Result<PathBuf, ExportError> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let path = dir.join(format!("bouquet-{millis}.png"));
    let canvas = render_image(garden, supersample)?;
    write_png(&canvas, &path)?;
    log::info!(
        "exported {}x{} image with {} flowers to {}",
        canvas.width(),
        canvas.height(),
        garden.flowers().len(),
        path.display()
    );
    Ok(path)
}
