use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH};
use crate::error::LoupeError;

/// Values closer than this to an integer are treated as that integer when
/// computing zoomed extents, so that a fitted image does not overflow the
/// display by a rounding error.
const EXTENT_SNAP_EPSILON: f64 = 1e-6;

/// Size of the surface a viewport renders into, in display pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_WIDTH, DEFAULT_DISPLAY_HEIGHT)
    }
}

impl fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for DisplaySize {
    type Err = LoupeError;

    /// Parse `WIDTHxHEIGHT`, e.g. `800x600`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(|| LoupeError::Config(format!("expected WIDTHxHEIGHT, got '{s}'")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| LoupeError::Config(format!("invalid display size '{s}': {e}")))
        };
        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

/// Source-image rectangle to sample, in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Region {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The whole `width` x `height` image.
    pub fn whole(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    /// Clamp so that `0 <= left <= right <= width` and
    /// `0 <= top <= bottom <= height`.
    pub fn clamped(&self, width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        let left = self.left.clamp(0.0, w);
        let top = self.top.clamp(0.0, h);
        Self {
            left,
            top,
            right: self.right.clamp(left, w),
            bottom: self.bottom.clamp(top, h),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Pixel size of the image handed back to the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// How the zoomed image relates to the display on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    /// Fits on both axes: the whole image is shown.
    Fits,
    /// Overflows horizontally only.
    WiderThanDisplay,
    /// Overflows vertically only.
    TallerThanDisplay,
    /// Overflows on both axes.
    ExceedsBoth,
}

impl Containment {
    /// Classify a zoomed image of `zoomed_w` x `zoomed_h` against `display`.
    ///
    /// An axis overflows only when strictly larger than the display; an
    /// image exactly as large as the display fits on that axis. Because
    /// display extents are integers, classifying the exact extent or its
    /// ceiling gives the same answer.
    pub fn classify(zoomed_w: f64, zoomed_h: f64, display: DisplaySize) -> Self {
        let wide = zoomed_w > display.width as f64;
        let tall = zoomed_h > display.height as f64;
        match (wide, tall) {
            (false, false) => Self::Fits,
            (true, false) => Self::WiderThanDisplay,
            (false, true) => Self::TallerThanDisplay,
            (true, true) => Self::ExceedsBoth,
        }
    }

    pub fn overflows_x(self) -> bool {
        matches!(self, Self::WiderThanDisplay | Self::ExceedsBoth)
    }

    pub fn overflows_y(self) -> bool {
        matches!(self, Self::TallerThanDisplay | Self::ExceedsBoth)
    }
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fits => write!(f, "fits"),
            Self::WiderThanDisplay => write!(f, "wider"),
            Self::TallerThanDisplay => write!(f, "taller"),
            Self::ExceedsBoth => write!(f, "larger"),
        }
    }
}

/// Which family of resampling filter the renderer should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterHint {
    Upscale,
    Downscale,
}

impl FilterHint {
    pub fn for_zoom(zoom: f64) -> Self {
        if zoom > 1.0 {
            Self::Upscale
        } else {
            Self::Downscale
        }
    }
}

/// Extent of an image axis after applying linear `zoom`, with near-integer
/// results snapped to the integer.
pub fn zoomed_extent(extent: u32, zoom: f64) -> f64 {
    let value = extent as f64 * zoom;
    let rounded = value.round();
    if (value - rounded).abs() < EXTENT_SNAP_EPSILON {
        rounded
    } else {
        value
    }
}
