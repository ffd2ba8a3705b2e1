use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Granularity, ItemId, PositionMode, TimeSpan};
use crate::error::{GanttError, GanttResult};
use crate::render::Color;

/// One axis gridline: the start of a calendar unit.
///
/// `offset` and `width` are percent of the span in percentage mode and
/// pixels in pixel mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorTick {
    pub anchor: NaiveDate,
    pub label: String,
    pub offset: f64,
    pub width: f64,
}

/// One left-hand label row. Grouped lanes can hold several stacked bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneModel {
    pub key: ItemId,
    pub label: String,
    pub depth: usize,
    pub parent_id: Option<ItemId>,
    pub has_children: bool,
    pub expanded: bool,
    pub stack_count: usize,
    pub top_px: f64,
    pub height_px: f64,
}

/// Bar geometry of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowModel {
    pub item_id: ItemId,
    pub name: String,
    pub color: Color,
    pub depth: usize,
    pub parent_id: Option<ItemId>,
    pub lane: usize,
    pub stack_index: usize,
    pub start: f64,
    pub width: f64,
    pub top_px: f64,
}

impl RowModel {
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.width
    }
}

/// Complete derived output of one layout pass.
///
/// Recomputed from scratch for every input change; nothing in here is carried
/// into the next pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    pub granularity: Granularity,
    pub position_mode: PositionMode,
    pub span: Option<TimeSpan>,
    /// Total track length: `100` in percentage mode, pixels otherwise.
    pub extent: f64,
    pub ticks: Vec<AnchorTick>,
    pub lanes: Vec<LaneModel>,
    pub rows: Vec<RowModel>,
}

impl RenderModel {
    #[must_use]
    pub fn empty(granularity: Granularity, position_mode: PositionMode) -> Self {
        Self {
            granularity,
            position_mode,
            span: None,
            extent: 0.0,
            ticks: Vec::new(),
            lanes: Vec::new(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of lane heights.
    #[must_use]
    pub fn content_height_px(&self) -> f64 {
        self.lanes
            .last()
            .map_or(0.0, |lane| lane.top_px + lane.height_px)
    }

    /// Serializes the model for snapshot tests and host-side debugging.
    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize render model: {e}"))
        })
    }
}
