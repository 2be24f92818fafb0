use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoupeError;

/// Keyboard pan direction. The visible rectangle moves this way over the
/// image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

impl PanDirection {
    /// Pan delta for one step of `step` pixels.
    pub fn delta(self, step: f64) -> (f64, f64) {
        match self {
            Self::Left => (-step, 0.0),
            Self::Right => (step, 0.0),
            Self::Up => (0.0, -step),
            Self::Down => (0.0, step),
        }
    }
}

impl fmt::Display for PanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl FromStr for PanDirection {
    type Err = LoupeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(LoupeError::InvalidDirection(s.to_string())),
        }
    }
}

/// Turns successive pointer positions of a drag into pan deltas.
///
/// Dragging the pointer right moves the image right, so the visible
/// rectangle moves left: the delta is `previous - current`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    last: Option<(f64, f64)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed at `(x, y)`.
    pub fn begin(&mut self, x: f64, y: f64) {
        self.last = Some((x, y));
    }

    /// Pointer moved to `(x, y)`. Returns the pan delta since the previous
    /// position, or `None` if no drag was started.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (last_x, last_y) = self.last?;
        self.last = Some((x, y));
        Some((last_x - x, last_y - y))
    }

    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }
}
