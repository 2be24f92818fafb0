#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use loupe_core::error::{LoupeError, Result};
use loupe_core::geometry::{zoomed_extent, DisplaySize};
use loupe_core::io::ImageLoader;
use loupe_core::render::NullRenderer;
use loupe_core::surface::ImageSurface;
use loupe_core::viewport::Viewport;

/// Tolerance for pan comparisons, in zoomed pixels.
pub const PAN_TOLERANCE: f64 = 1e-6;

/// An uninitialized viewport over a blank `width` x `height` image.
pub fn viewport(width: u32, height: u32) -> Viewport {
    let surface = ImageSurface::blank(width, height).expect("valid surface");
    Viewport::new(surface, Arc::new(NullRenderer))
}

/// A viewport fitted to a `dw` x `dh` display.
pub fn ready_viewport(width: u32, height: u32, dw: u32, dh: u32) -> Viewport {
    let mut vp = viewport(width, height);
    vp.reset(Some(DisplaySize::new(dw, dh))).expect("reset with display");
    vp
}

/// Assert the pan lies inside the zoomed image on overflowing axes and is
/// zero on fitting axes.
pub fn assert_pan_in_bounds(vp: &Viewport) {
    let zoom = vp.linear_zoom().expect("ready viewport");
    let display = vp.display().expect("ready viewport");
    let (pan_x, pan_y) = vp.pan_offset();
    let zoomed_w = zoomed_extent(vp.surface().width(), zoom);
    let zoomed_h = zoomed_extent(vp.surface().height(), zoom);
    check_axis("x", pan_x, zoomed_w, display.width as f64);
    check_axis("y", pan_y, zoomed_h, display.height as f64);
}

fn check_axis(axis: &str, pan: f64, zoomed: f64, display: f64) {
    assert!(pan >= 0.0, "pan_{axis} negative: {pan}");
    if zoomed > display {
        assert!(
            pan + display <= zoomed + PAN_TOLERANCE,
            "pan_{axis} {pan} + display {display} exceeds zoomed {zoomed}"
        );
    } else {
        assert_eq!(pan, 0.0, "pan_{axis} must be zero when the image fits");
    }
}

/// Loader handing out blank images of preset sizes and counting opens.
pub struct SizedLoader {
    sizes: HashMap<PathBuf, (u32, u32)>,
    opens: AtomicUsize,
}

impl SizedLoader {
    pub fn new(entries: &[(&str, u32, u32)]) -> Self {
        let sizes = entries
            .iter()
            .map(|&(name, w, h)| (PathBuf::from(name), (w, h)))
            .collect();
        Self {
            sizes,
            opens: AtomicUsize::new(0),
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl ImageLoader for SizedLoader {
    fn open(&self, path: &Path) -> Result<ImageSurface> {
        let &(w, h) = self
            .sizes
            .get(path)
            .ok_or_else(|| LoupeError::NotFound(path.to_path_buf()))?;
        self.opens.fetch_add(1, Ordering::SeqCst);
        ImageSurface::blank(w, h)
    }
}
