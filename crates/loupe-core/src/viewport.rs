use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::consts::ZOOM_BASE;
use crate::error::{LoupeError, Result};
use crate::geometry::{
    zoomed_extent, Containment, DisplaySize, FilterHint, OutputSize, Region,
};
use crate::render::{Crop, Renderer};
use crate::surface::ImageSurface;

/// One discrete zoom request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    /// One step closer (linear zoom times `ZOOM_BASE`).
    In,
    /// One step further (linear zoom divided by `ZOOM_BASE`).
    Out,
    /// Back to the fit-to-display zoom.
    Reset,
}

impl fmt::Display for ZoomDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Out => write!(f, "out"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

impl FromStr for ZoomDirection {
    type Err = LoupeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "reset" => Ok(Self::Reset),
            _ => Err(LoupeError::InvalidDirection(s.to_string())),
        }
    }
}

/// Value snapshot of a viewport, used to put a second viewport in the same
/// zoom/pan state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportParams {
    pub zoom_level: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub display_width: u32,
    pub display_height: u32,
}

impl ViewportParams {
    pub fn display(&self) -> DisplaySize {
        DisplaySize::new(self.display_width, self.display_height)
    }
}

/// Zoom, pan and display state for a single image.
///
/// Zoom is kept in the log domain: the linear factor is
/// `ZOOM_BASE.powf(zoom_level)`. Pan is the offset of the visible rectangle
/// inside the zoomed image. After every operation the pan satisfies:
///
/// - on an axis where the zoomed image overflows the display,
///   `0 <= pan <= zoomed_extent - display_extent`;
/// - on an axis where it fits, `pan == 0`.
///
/// A viewport starts without a display size and accepts only [`reset`],
/// [`resize`] and [`import_params`] until it gets one.
///
/// [`reset`]: Viewport::reset
/// [`resize`]: Viewport::resize
/// [`import_params`]: Viewport::import_params
pub struct Viewport {
    surface: ImageSurface,
    renderer: Arc<dyn Renderer>,
    zoom_level: Option<f64>,
    pan_x: f64,
    pan_y: f64,
    display: Option<DisplaySize>,
    crop: Option<Crop>,
    displayed: Option<DynamicImage>,
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("zoom_level", &self.zoom_level)
            .field("pan_x", &self.pan_x)
            .field("pan_y", &self.pan_y)
            .field("display", &self.display)
            .field("crop", &self.crop)
            .finish_non_exhaustive()
    }
}

impl Viewport {
    pub fn new(surface: ImageSurface, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            surface,
            renderer,
            zoom_level: None,
            pan_x: 0.0,
            pan_y: 0.0,
            display: None,
            crop: None,
            displayed: None,
        }
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// True once a display size is known and a zoom level has been set.
    pub fn is_ready(&self) -> bool {
        self.zoom_level.is_some() && self.display.is_some()
    }

    pub fn zoom_level(&self) -> Option<f64> {
        self.zoom_level
    }

    pub fn linear_zoom(&self) -> Option<f64> {
        self.zoom_level.map(|level| ZOOM_BASE.powf(level))
    }

    /// Offset of the visible rectangle inside the zoomed image.
    pub fn pan_offset(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn display(&self) -> Option<DisplaySize> {
        self.display
    }

    /// The crop computed by the last successful operation.
    pub fn crop(&self) -> Option<Crop> {
        self.crop
    }

    /// The image rendered for the last computed crop.
    pub fn displayed(&self) -> Option<&DynamicImage> {
        self.displayed.as_ref()
    }

    /// How the zoomed image currently relates to the display.
    pub fn containment(&self) -> Option<Containment> {
        let (level, display) = self.state().ok()?;
        let (w, h) = self.zoomed_size(ZOOM_BASE.powf(level));
        Some(Containment::classify(w, h, display))
    }

    /// Fit the image to the display and clear the pan.
    ///
    /// `None` keeps the previously known display size; it is an error only if
    /// there is none yet.
    pub fn reset(&mut self, display: Option<DisplaySize>) -> Result<()> {
        let display = display
            .or(self.display)
            .ok_or(LoupeError::Uninitialized)?;
        self.fit(display);
        Ok(())
    }

    /// The display changed size: store it and fit the image again.
    pub fn resize(&mut self, display: DisplaySize) {
        self.fit(display);
    }

    /// Recompute the crop for the current state and render it.
    pub fn compute_crop(&mut self) -> Result<Crop> {
        let (level, display) = self.state()?;
        Ok(self.render(level, display))
    }

    /// Change the zoom level by one step, keeping the image point under
    /// `anchor` (display coordinates) in place.
    ///
    /// Without an anchor, the centre of the visible part of the image is
    /// kept. On a rejected call the viewport is left untouched.
    pub fn zoom(&mut self, direction: ZoomDirection, anchor: Option<(f64, f64)>) -> Result<()> {
        let (level, display) = self.state()?;
        let new_level = match direction {
            ZoomDirection::In => level + 1.0,
            ZoomDirection::Out => level - 1.0,
            ZoomDirection::Reset => return self.reset(None),
        };

        let old_zoom = ZOOM_BASE.powf(level);
        let new_zoom = ZOOM_BASE.powf(new_level);
        let (old_w, old_h) = self.zoomed_size(old_zoom);
        let (new_w, new_h) = self.zoomed_size(new_zoom);

        let (anchor_x, anchor_y) = anchor.unwrap_or_else(|| {
            default_anchor(
                Containment::classify(old_w, old_h, display),
                (old_w, old_h),
                display,
            )
        });

        // The anchor formula may ask for a negative pan on an axis where the
        // new image fits; the image is simply shown whole on that axis.
        let ratio = new_zoom / old_zoom;
        let new_case = Containment::classify(new_w, new_h, display);
        self.pan_x = if new_case.overflows_x() {
            (self.pan_x + anchor_x) * ratio - anchor_x
        } else {
            0.0
        };
        self.pan_y = if new_case.overflows_y() {
            (self.pan_y + anchor_y) * ratio - anchor_y
        } else {
            0.0
        };
        self.zoom_level = Some(new_level);
        debug!(
            %direction,
            old_zoom,
            new_zoom,
            anchor_x,
            anchor_y,
            case = %new_case,
            "Zoom"
        );

        self.clamp_pan(new_level, display);
        self.render(new_level, display);
        Ok(())
    }

    /// Move the visible rectangle by `(dx, dy)` zoomed pixels. Moves past the
    /// image edge are absorbed by clamping.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<()> {
        let (level, display) = self.state()?;
        self.pan_x += dx;
        self.pan_y += dy;
        self.clamp_pan(level, display);
        self.render(level, display);
        Ok(())
    }

    /// Bring the pan back inside the bounds for the current zoom and display.
    pub fn validate_pan(&mut self) -> Result<()> {
        let (level, display) = self.state()?;
        self.clamp_pan(level, display);
        Ok(())
    }

    pub fn export_params(&self) -> Result<ViewportParams> {
        let (zoom_level, display) = self.state()?;
        Ok(ViewportParams {
            zoom_level,
            pan_x: self.pan_x,
            pan_y: self.pan_y,
            display_width: display.width,
            display_height: display.height,
        })
    }

    /// Adopt another viewport's parameters. The pan is re-validated against
    /// this image, which may be smaller than the one the params came from.
    pub fn import_params(&mut self, params: ViewportParams) {
        let display = params.display();
        self.zoom_level = Some(params.zoom_level);
        self.pan_x = params.pan_x;
        self.pan_y = params.pan_y;
        self.display = Some(display);
        self.clamp_pan(params.zoom_level, display);
        self.render(params.zoom_level, display);
    }

    fn state(&self) -> Result<(f64, DisplaySize)> {
        match (self.zoom_level, self.display) {
            (Some(level), Some(display)) => Ok((level, display)),
            _ => Err(LoupeError::Uninitialized),
        }
    }

    fn zoomed_size(&self, zoom: f64) -> (f64, f64) {
        (
            zoomed_extent(self.surface.width(), zoom),
            zoomed_extent(self.surface.height(), zoom),
        )
    }

    fn fit(&mut self, size: DisplaySize) {
        let (w, h) = (self.surface.width(), self.surface.height());
        // A zero-extent display keeps a finite zoom; the crop comes out empty.
        let level = if size.is_degenerate() || (w < size.width && h < size.height) {
            0.0
        } else {
            let ratio = (size.width as f64 / w as f64).min(size.height as f64 / h as f64);
            ratio.log(ZOOM_BASE)
        };
        debug!(width = w, height = h, display = %size, zoom_level = level, "Reset to fit");

        self.display = Some(size);
        self.zoom_level = Some(level);
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.render(level, size);
    }

    fn clamp_pan(&mut self, level: f64, display: DisplaySize) {
        let (zoomed_w, zoomed_h) = self.zoomed_size(ZOOM_BASE.powf(level));
        let case = Containment::classify(zoomed_w, zoomed_h, display);
        self.pan_x = clamp_axis(self.pan_x, case.overflows_x(), zoomed_w, display.width);
        self.pan_y = clamp_axis(self.pan_y, case.overflows_y(), zoomed_h, display.height);
        trace!(pan_x = self.pan_x, pan_y = self.pan_y, %case, "Pan validated");
    }

    fn derive_crop(&self, level: f64, display: DisplaySize) -> Crop {
        let zoom = ZOOM_BASE.powf(level);
        let (w, h) = (self.surface.width(), self.surface.height());
        let (zoomed_w, zoomed_h) = self.zoomed_size(zoom);
        let (zoomed_w, zoomed_h) = (zoomed_w.ceil(), zoomed_h.ceil());
        let (dw, dh) = (display.width as f64, display.height as f64);
        let (px, py) = (self.pan_x, self.pan_y);

        let case = Containment::classify(zoomed_w, zoomed_h, display);
        let (output, region) = match case {
            Containment::Fits => (
                OutputSize::new(zoomed_w as u32, zoomed_h as u32),
                Region::whole(w, h),
            ),
            Containment::WiderThanDisplay => (
                OutputSize::new(display.width, zoomed_h as u32),
                Region::new(px / zoom, 0.0, (px + dw) / zoom, h as f64),
            ),
            Containment::TallerThanDisplay => (
                OutputSize::new(zoomed_w as u32, display.height),
                Region::new(0.0, py / zoom, w as f64, (py + dh) / zoom),
            ),
            Containment::ExceedsBoth => (
                OutputSize::new(display.width, display.height),
                Region::new(px / zoom, py / zoom, (px + dw) / zoom, (py + dh) / zoom),
            ),
        };
        let region = region.clamped(w, h);
        trace!(%case, ?region, ?output, "Crop computed");

        Crop {
            region,
            output,
            filter: FilterHint::for_zoom(zoom),
        }
    }

    fn render(&mut self, level: f64, display: DisplaySize) -> Crop {
        let crop = self.derive_crop(level, display);
        self.displayed = Some(self.renderer.resample(&self.surface, &crop));
        self.crop = Some(crop);
        crop
    }
}

/// Centre of the visible part of the zoomed image, in display coordinates.
fn default_anchor(case: Containment, zoomed: (f64, f64), display: DisplaySize) -> (f64, f64) {
    let (zoomed_w, zoomed_h) = zoomed;
    let half_dw = display.width as f64 / 2.0;
    let half_dh = display.height as f64 / 2.0;
    match case {
        Containment::Fits => (zoomed_w / 2.0, zoomed_h / 2.0),
        Containment::WiderThanDisplay => (half_dw, zoomed_h / 2.0),
        Containment::TallerThanDisplay => (zoomed_w / 2.0, half_dh),
        Containment::ExceedsBoth => (half_dw, half_dh),
    }
}

fn clamp_axis(pan: f64, overflows: bool, zoomed: f64, display: u32) -> f64 {
    if !overflows {
        return 0.0;
    }
    pan.max(0.0).min(zoomed - display as f64)
}
