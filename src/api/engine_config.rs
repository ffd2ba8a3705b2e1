use serde::{Deserialize, Serialize};

use crate::core::{Granularity, PositionMode, Viewport};
use crate::error::{GanttError, GanttResult};

use super::{LayoutConfig, RowMode};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_granularity")]
    pub granularity: Granularity,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl GanttEngineConfig {
    /// Creates a config with month zoom and default layout tuning.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            granularity: default_granularity(),
            layout: LayoutConfig::default(),
        }
    }

    /// Sets initial zoom granularity.
    #[must_use]
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Replaces the whole layout tuning block.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_position_mode(mut self, mode: PositionMode) -> Self {
        self.layout.position_mode = mode;
        self
    }

    #[must_use]
    pub fn with_row_mode(mut self, mode: RowMode) -> Self {
        self.layout.row_mode = mode;
        self
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_granularity() -> Granularity {
    Granularity::Month
}
