//! PNG export of finished raster surfaces.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use cdraw_core::Surface;
use image::{ImageFormat, RgbaImage};

use crate::provider::RasterCanvas;

/// Copy `surface` into a straight-alpha `image` buffer.
///
/// # Errors
///
/// Returns an error for zero-area surfaces, which no image format can hold.
pub fn to_rgba_image(surface: &Surface<RasterCanvas>) -> Result<RgbaImage> {
    let size = surface.size();
    let pixmap = surface.canvas().pixmap().ok_or_else(|| {
        anyhow!(
            "cannot encode an empty {}x{} surface",
            size.width,
            size.height
        )
    })?;

    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(size.width, size.height, data)
        .ok_or_else(|| anyhow!("pixel buffer does not match {}x{}", size.width, size.height))
}

/// Encode `surface` as a PNG file at `path`.
///
/// # Errors
///
/// Returns an error if the surface is empty or the file cannot be written.
pub fn save_png(surface: &Surface<RasterCanvas>, path: &Path) -> Result<()> {
    let image = to_rgba_image(surface)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to save surface to '{}'", path.display()))?;
    Ok(())
}
