//! Saving artifacts to disk as `<id>.bmp`.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use thiserror::Error;
use tracing::info;

use crate::generator::{Grid, GENERATED_SIZE};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{} already exists, not overwriting", .0.display())]
    AlreadyExists(PathBuf),
    #[error("failed to write bitmap: {0}")]
    Image(#[from] image::ImageError),
}

/// Writes `grid` into `dir` as `<id>.bmp`, one image pixel per cell.
/// Empty cells become fully transparent pixels. An existing file of
/// that name is never overwritten.
pub fn export_bmp(grid: &Grid, dir: &Path, id: u32) -> Result<PathBuf, ExportError> {
    let path = dir.join(format!("{id}.bmp"));
    if path.exists() {
        return Err(ExportError::AlreadyExists(path));
    }

    let size = GENERATED_SIZE as u32;
    let mut image = RgbaImage::new(size, size);
    for (x, y, cell) in grid.iter() {
        let pixel = match cell.color() {
            Some(color) => Rgba([color.r, color.g, color.b, color.a]),
            None => Rgba([0, 0, 0, 0]),
        };
        image.put_pixel(x as u32, y as u32, pixel);
    }
    image.save_with_format(&path, ImageFormat::Bmp)?;

    info!(id, path = %path.display(), "saved artifact");
    Ok(path)
}
