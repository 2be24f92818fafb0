use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::script::parse_ops;
use super::{save_displayed, SessionArgs};
use crate::summary::print_viewport_summary;

#[derive(Args)]
pub struct ViewArgs {
    /// Input image file
    pub file: PathBuf,

    /// Operations applied in order: in, out, reset, in@X,Y, out@X,Y,
    /// pan:DX,DY, left, right, up, down, resize:WxH
    pub ops: Vec<String>,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Save the visible part of the image here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ViewArgs) -> Result<()> {
    let ops = parse_ops(&args.ops)?;
    let mut session = args.session.session()?;
    session
        .set_primary(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    for op in ops {
        info!(?op, "Applying");
        op.apply(&mut session)?;
    }

    let viewport = session
        .primary_viewport()
        .context("Primary image is no longer loaded")?;
    print_viewport_summary("Viewport", &args.file, viewport);

    if let Some(ref path) = args.output {
        if save_displayed(viewport, path)? {
            println!("\nSaved to {}", path.display());
        } else {
            println!("\nNothing visible, {} not written", path.display());
        }
    }
    Ok(())
}
