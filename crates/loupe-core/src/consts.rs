/// Ratio between two consecutive zoom levels. Linear zoom is
/// `ZOOM_BASE.powf(zoom_level)`, so two steps double the magnification.
pub const ZOOM_BASE: f64 = std::f64::consts::SQRT_2;

/// Distance in display pixels moved by one keyboard pan step.
pub const DEFAULT_PAN_STEP: f64 = 200.0;

/// Number of viewports kept alive by the default bounded store.
pub const DEFAULT_STORE_CAPACITY: usize = 10;

/// Smallest bounded store capacity: the primary and secondary viewports of a
/// comparison must both stay resident.
pub const MIN_STORE_CAPACITY: usize = 2;

/// Display width assumed before the front-end reports a real size.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 800;

/// Display height assumed before the front-end reports a real size.
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 600;
