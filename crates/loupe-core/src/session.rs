use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ViewerConfig;
use crate::dual::clone_params_by_id;
use crate::error::{LoupeError, Result};
use crate::geometry::DisplaySize;
use crate::io::ImageLoader;
use crate::navigation::{DragTracker, PanDirection};
use crate::render::Renderer;
use crate::store::ViewportStore;
use crate::viewport::{Viewport, ZoomDirection};

/// How many images are on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    #[default]
    Single,
    /// Primary and secondary side by side, secondary following the primary.
    Double,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "Single"),
            Self::Double => write!(f, "Double"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Primary,
    Secondary,
}

impl Slot {
    fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Drives the viewports of the images currently on screen.
///
/// Zoom and pan always act on the primary image. In [`Layout::Double`] each
/// such change is copied onto the secondary image right away.
pub struct ViewerSession {
    store: ViewportStore,
    loader: Arc<dyn ImageLoader>,
    config: ViewerConfig,
    display: DisplaySize,
    layout: Layout,
    primary: Option<PathBuf>,
    secondary: Option<PathBuf>,
    drag: DragTracker,
}

impl ViewerSession {
    pub fn new(
        config: ViewerConfig,
        loader: Arc<dyn ImageLoader>,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Self> {
        config.validate()?;
        let store = ViewportStore::new(config.store_policy()?, renderer);
        Ok(Self {
            store,
            loader,
            display: config.display,
            config,
            layout: Layout::default(),
            primary: None,
            secondary: None,
            drag: DragTracker::new(),
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn display(&self) -> DisplaySize {
        self.display
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn primary(&self) -> Option<&Path> {
        self.primary.as_deref()
    }

    pub fn secondary(&self) -> Option<&Path> {
        self.secondary.as_deref()
    }

    pub fn store(&self) -> &ViewportStore {
        &self.store
    }

    pub fn primary_viewport(&self) -> Option<&Viewport> {
        self.store.peek(self.primary.as_deref()?)
    }

    pub fn secondary_viewport(&self) -> Option<&Viewport> {
        self.store.peek(self.secondary.as_deref()?)
    }

    /// Show `path` as the primary image, fitted to the display.
    pub fn set_primary(&mut self, path: &Path) -> Result<()> {
        info!(path = %path.display(), "Primary image");
        let display = self.display;
        let previous = self.primary.replace(path.to_path_buf());
        match self.viewport_mut(Slot::Primary) {
            Ok(viewport) => viewport.resize(display),
            Err(e) => {
                self.primary = previous;
                return Err(e);
            }
        }
        self.sync()
    }

    /// Show `path` as the secondary image, in the primary's zoom/pan state if
    /// there is a primary.
    pub fn set_secondary(&mut self, path: &Path) -> Result<()> {
        info!(path = %path.display(), "Secondary image");
        // Touch the primary first so loading the secondary cannot evict it.
        if self.primary.is_some() {
            self.viewport_mut(Slot::Primary)?;
        }
        let previous = self.secondary.replace(path.to_path_buf());
        let loaded = self.viewport_mut(Slot::Secondary).map(|_| ());
        let result = match (loaded, self.primary.as_deref()) {
            (Err(e), _) => Err(e),
            (Ok(()), Some(primary)) => clone_params_by_id(&mut self.store, primary, path),
            (Ok(()), None) => Ok(()),
        };
        if result.is_err() {
            self.secondary = previous;
        }
        result
    }

    /// The display changed size: refit the primary image.
    pub fn resize(&mut self, size: DisplaySize) -> Result<()> {
        debug!(display = %size, "Display resized");
        self.display = size;
        if self.primary.is_some() {
            self.viewport_mut(Slot::Primary)?.resize(size);
        }
        self.sync()
    }

    pub fn zoom(&mut self, direction: ZoomDirection, anchor: Option<(f64, f64)>) -> Result<()> {
        self.viewport_mut(Slot::Primary)?.zoom(direction, anchor)?;
        self.sync()
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.viewport_mut(Slot::Primary)?.pan(dx, dy)?;
        self.sync()
    }

    /// One keyboard pan step of `pan_step` pixels.
    pub fn pan_direction(&mut self, direction: PanDirection) -> Result<()> {
        let (dx, dy) = direction.delta(self.config.pan_step);
        self.pan(dx, dy)
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.drag.begin(x, y);
    }

    /// Follow the pointer during a drag; ignored when no drag is active.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Result<()> {
        match self.drag.drag_to(x, y) {
            Some((dx, dy)) => self.pan(dx, dy),
            None => Ok(()),
        }
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    /// Switch layout. Entering the double layout without a secondary image
    /// shows the primary in both places.
    pub fn set_layout(&mut self, layout: Layout) -> Result<()> {
        info!(%layout, "Layout");
        self.layout = layout;
        if layout == Layout::Double && self.secondary.is_none() {
            self.secondary = self.primary.clone();
        }
        self.sync()
    }

    pub fn toggle_layout(&mut self) -> Result<()> {
        match self.layout {
            Layout::Single => self.set_layout(Layout::Double),
            Layout::Double => self.set_layout(Layout::Single),
        }
    }

    /// Exchange the primary and secondary images.
    pub fn swap(&mut self) -> Result<()> {
        std::mem::swap(&mut self.primary, &mut self.secondary);
        self.sync()
    }

    /// In the double layout, copy the primary state onto the secondary.
    fn sync(&mut self) -> Result<()> {
        if self.layout != Layout::Double || self.primary.is_none() || self.secondary.is_none() {
            return Ok(());
        }
        // Make sure both viewports are resident and ready.
        self.viewport_mut(Slot::Secondary)?;
        self.viewport_mut(Slot::Primary)?;
        match (self.primary.as_deref(), self.secondary.as_deref()) {
            (Some(primary), Some(secondary)) => {
                clone_params_by_id(&mut self.store, primary, secondary)
            }
            _ => Ok(()),
        }
    }

    /// Viewport for `slot`, loaded again if the store evicted it and fitted
    /// to the display if it has never been shown.
    fn viewport_mut(&mut self, slot: Slot) -> Result<&mut Viewport> {
        let path = match slot {
            Slot::Primary => self.primary.as_deref(),
            Slot::Secondary => self.secondary.as_deref(),
        }
        .ok_or(LoupeError::NoImage(slot.name()))?;
        let display = self.display;
        let loader = &self.loader;
        let viewport = self.store.get_or_load(path, || loader.open(path))?;
        if !viewport.is_ready() {
            viewport.resize(display);
        }
        Ok(viewport)
    }
}
