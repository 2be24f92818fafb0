use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PAN_STEP, DEFAULT_STORE_CAPACITY};
use crate::error::{LoupeError, Result};
use crate::geometry::DisplaySize;
use crate::store::StorePolicy;

/// User-tunable viewer settings, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Display pixels moved by one keyboard pan step.
    pub pan_step: f64,
    /// Viewports kept alive; 0 keeps every viewport ever created.
    pub cache_capacity: usize,
    /// Display size used until the front-end reports one.
    pub display: DisplaySize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pan_step: DEFAULT_PAN_STEP,
            cache_capacity: DEFAULT_STORE_CAPACITY,
            display: DisplaySize::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| LoupeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LoupeError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.pan_step.is_finite() && self.pan_step > 0.0) {
            return Err(LoupeError::Config(format!(
                "pan_step must be positive, got {}",
                self.pan_step
            )));
        }
        self.store_policy().map(|_| ())
    }

    pub fn store_policy(&self) -> Result<StorePolicy> {
        StorePolicy::from_capacity((self.cache_capacity != 0).then_some(self.cache_capacity))
    }
}
