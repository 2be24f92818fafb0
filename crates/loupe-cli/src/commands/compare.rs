use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use loupe_core::session::Layout;
use tracing::info;

use super::script::parse_ops;
use super::{save_displayed, SessionArgs};
use crate::summary::print_viewport_summary;

#[derive(Args)]
pub struct CompareArgs {
    /// Primary image; operations act on this one
    pub primary: PathBuf,

    /// Secondary image, following the primary's zoom and pan
    pub secondary: PathBuf,

    /// Operations applied in order (same syntax as `view`)
    pub ops: Vec<String>,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Base output path; writes <stem>_primary and <stem>_secondary
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn suffixed(base: &Path, suffix: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "view".to_string());
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    base.with_file_name(format!("{stem}_{suffix}.{ext}"))
}

pub fn run(args: &CompareArgs) -> Result<()> {
    let ops = parse_ops(&args.ops)?;
    let mut session = args.session.session()?;
    session
        .set_primary(&args.primary)
        .with_context(|| format!("Failed to load {}", args.primary.display()))?;
    session
        .set_secondary(&args.secondary)
        .with_context(|| format!("Failed to load {}", args.secondary.display()))?;
    session.set_layout(Layout::Double)?;

    for op in ops {
        info!(?op, "Applying");
        op.apply(&mut session)?;
    }

    let primary = session
        .primary_viewport()
        .context("Primary image is no longer loaded")?;
    let secondary = session
        .secondary_viewport()
        .context("Secondary image is no longer loaded")?;
    print_viewport_summary("Primary", &args.primary, primary);
    print_viewport_summary("Secondary", &args.secondary, secondary);

    if let Some(ref base) = args.output {
        println!();
        for (suffix, viewport) in [("primary", primary), ("secondary", secondary)] {
            let path = suffixed(base, suffix);
            if save_displayed(viewport, &path)? {
                println!("Saved to {}", path.display());
            } else {
                println!("Nothing visible, {} not written", path.display());
            }
        }
    }
    Ok(())
}
