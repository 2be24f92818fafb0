use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::{LoupeError, Result};
use crate::surface::ImageSurface;

/// Source of decoded images, keyed by path.
pub trait ImageLoader: Send + Sync {
    /// Open and decode the image at `path`.
    fn open(&self, path: &Path) -> Result<ImageSurface>;
}

/// Loads images from the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl ImageLoader for FsLoader {
    fn open(&self, path: &Path) -> Result<ImageSurface> {
        open_surface(path)
    }
}

/// Decode the image file at `path` into a surface.
pub fn open_surface(path: &Path) -> Result<ImageSurface> {
    if !path.exists() {
        return Err(LoupeError::NotFound(path.to_path_buf()));
    }
    let img = image::open(path)?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "Image decoded");
    ImageSurface::new(img)
}

/// Save a rendered image, choosing format from file extension (PNG otherwise).
pub fn save_image(img: &DynamicImage, path: &Path) -> Result<()> {
    match ImageFormat::from_path(path) {
        Ok(format) => img.save_with_format(path, format)?,
        Err(_) => img.save_with_format(path, ImageFormat::Png)?,
    }
    Ok(())
}
