pub mod compare;
pub mod config;
pub mod info;
pub mod script;
pub mod view;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use loupe_core::config::ViewerConfig;
use loupe_core::geometry::DisplaySize;
use loupe_core::io::{save_image, FsLoader};
use loupe_core::render::ImageRenderer;
use loupe_core::session::ViewerSession;
use loupe_core::viewport::Viewport;

/// Options shared by the commands that drive a viewer session.
#[derive(Args)]
pub struct SessionArgs {
    /// Viewer config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Display size, overriding the config (e.g. 1920x1080)
    #[arg(short, long)]
    pub display: Option<DisplaySize>,

    /// Pixels moved by one left/right/up/down step, overriding the config
    #[arg(long)]
    pub pan_step: Option<f64>,
}

impl SessionArgs {
    pub fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match self.config {
            Some(ref path) => ViewerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(display) = self.display {
            config.display = display;
        }
        if let Some(step) = self.pan_step {
            config.pan_step = step;
        }
        Ok(config)
    }

    pub fn session(&self) -> Result<ViewerSession> {
        let config = self.viewer_config()?;
        let session = ViewerSession::new(config, Arc::new(FsLoader), Arc::new(ImageRenderer))?;
        Ok(session)
    }
}

/// Write what `viewport` currently shows. Returns false when there is
/// nothing to write (degenerate display).
pub fn save_displayed(viewport: &Viewport, path: &Path) -> Result<bool> {
    match viewport.displayed() {
        Some(img) if img.width() > 0 && img.height() > 0 => {
            save_image(img, path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
