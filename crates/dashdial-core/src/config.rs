//! Dashboard configuration.

use crate::face::DialLayout;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(String),
    #[error("Invalid config: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Dial and widget settings supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dial: DialLayout,
    /// Interval between clock refreshes.
    pub tick_interval_ms: u64,
    /// Default top-left position per widget id, used when nothing is stored.
    pub widgets: HashMap<String, Point>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dial: DialLayout::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            widgets: HashMap::new(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Load from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded dashboard config from {}", path.display());
        Ok(config)
    }

    /// Default position of a widget, the container origin when unconfigured.
    pub fn default_position(&self, id: &str) -> Point {
        self.widgets.get(id).copied().unwrap_or(Point::ZERO)
    }

    /// Tick interval, never shorter than one millisecond.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
