use serde::{Deserialize, Serialize};

use crate::core::{Granularity, ItemId, PositionMode};
use crate::error::{GanttError, GanttResult};

/// How items become left-hand rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowMode {
    /// Nested items, flattened with the current expansion state.
    Hierarchy,
    /// One row per top-level item; children are ignored.
    Flat,
    /// Items sharing an id are stacked under one shared label.
    Grouped,
}

impl RowMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hierarchy => "hierarchy",
            Self::Flat => "flat",
            Self::Grouped => "grouped",
        }
    }

    /// Flat layouts only offer day, week and month zoom levels.
    #[must_use]
    pub fn supports(self, granularity: Granularity) -> bool {
        match self {
            Self::Hierarchy => true,
            Self::Flat | Self::Grouped => matches!(
                granularity,
                Granularity::Day | Granularity::Week | Granularity::Month
            ),
        }
    }

    pub(crate) fn ensure_supports(self, granularity: Granularity) -> GanttResult<()> {
        if self.supports(granularity) {
            Ok(())
        } else {
            Err(GanttError::UnsupportedGranularity {
                granularity,
                mode: self.as_str(),
            })
        }
    }
}

/// Pixel width of one axis unit per granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitWidths {
    pub day_px: f64,
    pub week_px: f64,
    pub month_px: f64,
    pub quarter_px: f64,
    pub year_px: f64,
}

impl Default for UnitWidths {
    fn default() -> Self {
        Self {
            day_px: 32.0,
            week_px: 96.0,
            month_px: 120.0,
            quarter_px: 180.0,
            year_px: 240.0,
        }
    }
}

impl UnitWidths {
    #[must_use]
    pub fn width_for(self, granularity: Granularity) -> f64 {
        match granularity {
            Granularity::Day => self.day_px,
            Granularity::Week => self.week_px,
            Granularity::Month => self.month_px,
            Granularity::Quarter => self.quarter_px,
            Granularity::Year => self.year_px,
        }
    }

    fn validate(self) -> GanttResult<Self> {
        for granularity in Granularity::ALL {
            let width = self.width_for(granularity);
            if !width.is_finite() || width <= 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "unit width for `{granularity}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Layout tuning shared by every pass.
///
/// Serializable so hosts can persist timeline setup next to their data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_position_mode")]
    pub position_mode: PositionMode,
    #[serde(default = "default_row_mode")]
    pub row_mode: RowMode,
    #[serde(default)]
    pub unit_widths: UnitWidths,
    #[serde(default = "default_min_bar_width_px")]
    pub min_bar_width_px: f64,
    #[serde(default = "default_min_bar_width_percent")]
    pub min_bar_width_percent: f64,
    #[serde(default = "default_stack_offset_px")]
    pub stack_offset_px: f64,
    #[serde(default = "default_row_height_px")]
    pub row_height_px: f64,
    #[serde(default = "default_label_column_width_px")]
    pub label_column_width_px: f64,
    /// Prepended to the shared id to label a grouped lane.
    #[serde(default = "default_group_label_prefix")]
    pub group_label_prefix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            position_mode: default_position_mode(),
            row_mode: default_row_mode(),
            unit_widths: UnitWidths::default(),
            min_bar_width_px: default_min_bar_width_px(),
            min_bar_width_percent: default_min_bar_width_percent(),
            stack_offset_px: default_stack_offset_px(),
            row_height_px: default_row_height_px(),
            label_column_width_px: default_label_column_width_px(),
            group_label_prefix: default_group_label_prefix(),
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn with_position_mode(mut self, mode: PositionMode) -> Self {
        self.position_mode = mode;
        self
    }

    #[must_use]
    pub fn with_row_mode(mut self, mode: RowMode) -> Self {
        self.row_mode = mode;
        self
    }

    #[must_use]
    pub fn with_unit_widths(mut self, unit_widths: UnitWidths) -> Self {
        self.unit_widths = unit_widths;
        self
    }

    /// Sets the minimum bar width for both position modes.
    #[must_use]
    pub fn with_min_bar_width(mut self, pixels: f64, percent: f64) -> Self {
        self.min_bar_width_px = pixels;
        self.min_bar_width_percent = percent;
        self
    }

    #[must_use]
    pub fn with_stack_offset_px(mut self, stack_offset_px: f64) -> Self {
        self.stack_offset_px = stack_offset_px;
        self
    }

    #[must_use]
    pub fn with_row_height_px(mut self, row_height_px: f64) -> Self {
        self.row_height_px = row_height_px;
        self
    }

    #[must_use]
    pub fn with_label_column_width_px(mut self, label_column_width_px: f64) -> Self {
        self.label_column_width_px = label_column_width_px;
        self
    }

    #[must_use]
    pub fn with_group_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.group_label_prefix = prefix.into();
        self
    }

    /// Label of a grouped lane, e.g. `"Stage 3"`.
    #[must_use]
    pub fn group_label(&self, key: &ItemId) -> String {
        format!("{}{key}", self.group_label_prefix)
    }

    /// Minimum bar width in the units of the active position mode.
    #[must_use]
    pub fn min_bar_width(&self) -> f64 {
        match self.position_mode {
            PositionMode::Percentage => self.min_bar_width_percent,
            PositionMode::Pixel => self.min_bar_width_px,
        }
    }

    pub fn validate(self) -> GanttResult<Self> {
        self.unit_widths.validate()?;

        for (name, value) in [
            ("min_bar_width_px", self.min_bar_width_px),
            ("min_bar_width_percent", self.min_bar_width_percent),
            ("row_height_px", self.row_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "layout config `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("stack_offset_px", self.stack_offset_px),
            ("label_column_width_px", self.label_column_width_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "layout config `{name}` must be finite and >= 0"
                )));
            }
        }

        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize layout config: {e}"))
        })
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidData(format!("failed to parse layout config: {e}")))?;
        config.validate()
    }
}

fn default_position_mode() -> PositionMode {
    PositionMode::Pixel
}

fn default_row_mode() -> RowMode {
    RowMode::Hierarchy
}

fn default_min_bar_width_px() -> f64 {
    2.0
}

fn default_min_bar_width_percent() -> f64 {
    0.25
}

// Matches the 8px step between stacked bars of one group.
fn default_stack_offset_px() -> f64 {
    8.0
}

fn default_row_height_px() -> f64 {
    32.0
}

fn default_label_column_width_px() -> f64 {
    128.0
}

fn default_group_label_prefix() -> String {
    "Stage ".to_owned()
}
