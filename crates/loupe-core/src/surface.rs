use std::sync::Arc;

use image::DynamicImage;

use crate::error::{LoupeError, Result};

/// A decoded image and its fixed pixel dimensions.
///
/// Cloning is cheap: the pixel data is shared, never copied or mutated.
#[derive(Clone, Debug)]
pub struct ImageSurface {
    image: Arc<DynamicImage>,
    width: u32,
    height: u32,
}

impl ImageSurface {
    /// Wrap a decoded image. Zero-sized images are rejected.
    pub fn new(image: DynamicImage) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(LoupeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            image: Arc::new(image),
            width,
            height,
        })
    }

    /// A blank RGB surface, useful where only the geometry matters.
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        Self::new(DynamicImage::new_rgb8(width, height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}
