use image::imageops::FilterType;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::{FilterHint, OutputSize, Region};
use crate::surface::ImageSurface;

/// Everything the renderer needs to produce one displayable image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    /// Source rectangle, always inside the image bounds.
    pub region: Region,
    /// Size of the resampled result.
    pub output: OutputSize,
    pub filter: FilterHint,
}

/// Turns a crop request into pixels.
///
/// Implementations must accept zero-sized requests and answer them with an
/// empty image.
pub trait Renderer: Send + Sync {
    fn resample(&self, surface: &ImageSurface, crop: &Crop) -> DynamicImage;
}

/// Crops and resizes with the `image` crate.
///
/// Nearest neighbour when magnifying keeps individual pixels visible for
/// inspection; Lanczos when shrinking.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageRenderer;

impl ImageRenderer {
    fn filter_type(hint: FilterHint) -> FilterType {
        match hint {
            FilterHint::Upscale => FilterType::Nearest,
            FilterHint::Downscale => FilterType::Lanczos3,
        }
    }
}

impl Renderer for ImageRenderer {
    fn resample(&self, surface: &ImageSurface, crop: &Crop) -> DynamicImage {
        let (img_w, img_h) = (surface.width(), surface.height());
        let region = crop.region.clamped(img_w, img_h);
        if region.is_empty() || crop.output.is_empty() {
            return empty_image();
        }

        // Integer pixel box covering the real-valued region.
        let x0 = (region.left.floor() as u32).min(img_w);
        let y0 = (region.top.floor() as u32).min(img_h);
        let x1 = (region.right.ceil() as u32).clamp(x0, img_w);
        let y1 = (region.bottom.ceil() as u32).clamp(y0, img_h);
        if x1 == x0 || y1 == y0 {
            return empty_image();
        }
        trace!(x0, y0, x1, y1, output = ?crop.output, "Resampling");

        surface
            .image()
            .crop_imm(x0, y0, x1 - x0, y1 - y0)
            .resize_exact(
                crop.output.width,
                crop.output.height,
                Self::filter_type(crop.filter),
            )
    }
}

/// Produces no pixels. For callers that only need the crop geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn resample(&self, _surface: &ImageSurface, _crop: &Crop) -> DynamicImage {
        empty_image()
    }
}

fn empty_image() -> DynamicImage {
    DynamicImage::new_rgb8(0, 0)
}
