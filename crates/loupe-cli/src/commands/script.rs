use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use loupe_core::geometry::DisplaySize;
use loupe_core::navigation::PanDirection;
use loupe_core::session::ViewerSession;
use loupe_core::viewport::ZoomDirection;

/// One step of an operation script, mirroring a user input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Op {
    /// `in`, `out`, `reset`, or `in@X,Y` / `out@X,Y` for a cursor anchor.
    Zoom(ZoomDirection, Option<(f64, f64)>),
    /// `pan:DX,DY`
    Pan(f64, f64),
    /// `left`, `right`, `up`, `down`
    Step(PanDirection),
    /// `resize:WxH`
    Resize(DisplaySize),
}

impl Op {
    pub fn apply(self, session: &mut ViewerSession) -> Result<()> {
        match self {
            Self::Zoom(direction, anchor) => session.zoom(direction, anchor)?,
            Self::Pan(dx, dy) => session.pan(dx, dy)?,
            Self::Step(direction) => session.pan_direction(direction)?,
            Self::Resize(display) => session.resize(display)?,
        }
        Ok(())
    }
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("pan:") {
            let (dx, dy) = parse_pair(rest)?;
            return Ok(Self::Pan(dx, dy));
        }
        if let Some(rest) = s.strip_prefix("resize:") {
            return Ok(Self::Resize(rest.parse()?));
        }
        if let Some((direction, anchor)) = s.split_once('@') {
            let direction: ZoomDirection = direction.parse()?;
            if direction == ZoomDirection::Reset {
                bail!("reset takes no anchor: {s}");
            }
            return Ok(Self::Zoom(direction, Some(parse_pair(anchor)?)));
        }
        if let Ok(direction) = s.parse::<ZoomDirection>() {
            return Ok(Self::Zoom(direction, None));
        }
        s.parse::<PanDirection>()
            .map(Self::Step)
            .map_err(|_| anyhow!("Unknown operation: {s}"))
    }
}

fn parse_pair(s: &str) -> Result<(f64, f64)> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected X,Y but got {s}"))?;
    let a = a.trim().parse().with_context(|| format!("Invalid number {a}"))?;
    let b = b.trim().parse().with_context(|| format!("Invalid number {b}"))?;
    Ok((a, b))
}

pub fn parse_ops(ops: &[String]) -> Result<Vec<Op>> {
    ops.iter().map(|s| s.parse()).collect()
}
