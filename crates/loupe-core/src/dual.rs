//! Keeping two viewports in the same zoom/pan state for side-by-side
//! comparison.

use std::path::Path;

use tracing::trace;

use crate::error::{LoupeError, Result};
use crate::store::ViewportStore;
use crate::viewport::{Viewport, ViewportParams};

/// Copy `primary`'s zoom, pan and display size onto `secondary`.
///
/// The secondary re-validates the pan against its own image, so images of
/// different sizes stay inside bounds. Both viewports must already have a
/// display size; an uninitialized one is rejected and nothing changes.
pub fn clone_params(primary: &Viewport, secondary: &mut Viewport) -> Result<()> {
    let params = primary.export_params()?;
    apply(params, secondary)
}

/// [`clone_params`] between two viewports of the same store.
///
/// Cloning an image onto itself is a no-op.
pub fn clone_params_by_id(store: &mut ViewportStore, primary: &Path, secondary: &Path) -> Result<()> {
    if primary == secondary {
        return Ok(());
    }
    let params = store
        .get(primary)
        .ok_or(LoupeError::NoImage("primary"))?
        .export_params()?;
    let target = store
        .get(secondary)
        .ok_or(LoupeError::NoImage("secondary"))?;
    apply(params, target)
}

fn apply(params: ViewportParams, secondary: &mut Viewport) -> Result<()> {
    if !secondary.is_ready() {
        return Err(LoupeError::Uninitialized);
    }
    trace!(?params, "Cloning viewport params");
    secondary.import_params(params);
    Ok(())
}
