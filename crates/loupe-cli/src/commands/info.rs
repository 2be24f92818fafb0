use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use loupe_core::geometry::DisplaySize;
use loupe_core::io::open_surface;
use loupe_core::render::NullRenderer;
use loupe_core::viewport::Viewport;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Display size to fit against
    #[arg(short, long, default_value = "800x600")]
    pub display: DisplaySize,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let surface = open_surface(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let (width, height) = (surface.width(), surface.height());

    let mut viewport = Viewport::new(surface, Arc::new(NullRenderer));
    viewport.reset(Some(args.display))?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", width, height);
    println!("Megapixels:  {:.1}", (width as f64 * height as f64) / 1_000_000.0);
    if let (Some(zoom), Some(crop)) = (viewport.linear_zoom(), viewport.crop()) {
        println!("Fit zoom:    {:.1}% at {}", zoom * 100.0, args.display);
        println!("Fit size:    {}x{}", crop.output.width, crop.output.height);
    }
    Ok(())
}
