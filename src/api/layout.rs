use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::core::types::midnight;
use crate::core::{
    ExpansionState, Granularity, Item, ItemId, PercentScale, PixelScale, PositionMode,
    TimeSpan, TimelineScale, flatten, format_tick_label, generate_ticks, group_items_by_id,
};
use crate::error::GanttResult;

use super::{AnchorTick, LaneModel, LayoutConfig, RenderModel, RowMode, RowModel};

struct WorkingLane<'a> {
    key: &'a ItemId,
    label: String,
    depth: usize,
    parent_id: Option<&'a ItemId>,
    has_children: bool,
    expanded: bool,
    stack_count: usize,
}

struct WorkingRow<'a> {
    item: &'a Item,
    depth: usize,
    parent_id: Option<&'a ItemId>,
    lane: usize,
    stack_index: usize,
}

/// Derives ticks, lanes and bar geometry for `items`.
///
/// The span is the min/max over the rows that end up visible, recomputed on
/// every call. An empty working set yields an empty model.
pub fn compute_layout(
    items: &[Item],
    granularity: Granularity,
    expansion: &ExpansionState,
    config: &LayoutConfig,
) -> GanttResult<RenderModel> {
    let config = config.clone().validate()?;
    config.row_mode.ensure_supports(granularity)?;

    let (lanes, rows) = collect_working_set(items, expansion, &config);
    let Some(span) = TimeSpan::from_items(rows.iter().map(|row| row.item)) else {
        debug!(%granularity, row_mode = config.row_mode.as_str(), "layout of empty item set");
        return Ok(RenderModel::empty(granularity, config.position_mode));
    };
    if span.is_degenerate() {
        debug!(start = %span.start, "degenerate span; all items share one instant");
    }

    let anchors = generate_ticks(span.start, span.end, granularity);
    let (scale, ticks, extent) = match config.position_mode {
        PositionMode::Percentage => {
            let scale = PercentScale::new(span);
            let ticks = percent_ticks(&anchors, span, granularity, scale);
            (TimelineScale::Percent(scale), ticks, 100.0)
        }
        PositionMode::Pixel => {
            let unit_width = config.unit_widths.width_for(granularity);
            let scale = PixelScale::new(span, granularity, unit_width)?;
            let ticks = pixel_ticks(&anchors, granularity, unit_width);
            let extent = anchors.len() as f64 * unit_width;
            (TimelineScale::Pixel(scale), ticks, extent)
        }
    };

    let mut lane_models = Vec::with_capacity(lanes.len());
    let mut top_px = 0.0;
    for lane in lanes {
        let height_px = config.row_height_px
            + lane.stack_count.saturating_sub(1) as f64 * config.stack_offset_px;
        lane_models.push(LaneModel {
            key: lane.key.clone(),
            label: lane.label,
            depth: lane.depth,
            parent_id: lane.parent_id.cloned(),
            has_children: lane.has_children,
            expanded: lane.expanded,
            stack_count: lane.stack_count,
            top_px,
            height_px,
        });
        top_px += height_px;
    }

    let min_width = config.min_bar_width();
    let row_models: Vec<RowModel> = rows
        .iter()
        .map(|row| {
            if row.item.is_inverted() {
                warn!(
                    item_id = %row.item.id,
                    start = %row.item.start,
                    end = %row.item.end,
                    "item ends before it starts; drawing minimum-width marker"
                );
            }
            let (start, width) = scale.bar(row.item.start, row.item.end, min_width);
            RowModel {
                item_id: row.item.id.clone(),
                name: row.item.name.clone(),
                color: row.item.color,
                depth: row.depth,
                parent_id: row.parent_id.cloned(),
                lane: row.lane,
                stack_index: row.stack_index,
                start,
                width,
                top_px: lane_models[row.lane].top_px
                    + row.stack_index as f64 * config.stack_offset_px,
            }
        })
        .collect();

    debug!(
        %granularity,
        ticks = ticks.len(),
        lanes = lane_models.len(),
        rows = row_models.len(),
        extent,
        "computed timeline layout"
    );

    Ok(RenderModel {
        granularity,
        position_mode: config.position_mode,
        span: Some(span),
        extent,
        ticks,
        lanes: lane_models,
        rows: row_models,
    })
}

fn collect_working_set<'a>(
    items: &'a [Item],
    expansion: &ExpansionState,
    config: &LayoutConfig,
) -> (Vec<WorkingLane<'a>>, Vec<WorkingRow<'a>>) {
    let mut lanes = Vec::new();
    let mut rows = Vec::new();

    match config.row_mode {
        RowMode::Hierarchy => {
            for flattened in flatten(items, expansion) {
                rows.push(WorkingRow {
                    item: flattened.item,
                    depth: flattened.depth,
                    parent_id: flattened.parent_id,
                    lane: lanes.len(),
                    stack_index: 0,
                });
                lanes.push(WorkingLane {
                    key: &flattened.item.id,
                    label: flattened.item.name.clone(),
                    depth: flattened.depth,
                    parent_id: flattened.parent_id,
                    has_children: flattened.item.has_children(),
                    expanded: flattened.is_expanded(expansion),
                    stack_count: 1,
                });
            }
        }
        RowMode::Flat => {
            for item in items {
                rows.push(WorkingRow {
                    item,
                    depth: 0,
                    parent_id: None,
                    lane: lanes.len(),
                    stack_index: 0,
                });
                lanes.push(WorkingLane {
                    key: &item.id,
                    label: item.name.clone(),
                    depth: 0,
                    parent_id: None,
                    has_children: false,
                    expanded: false,
                    stack_count: 1,
                });
            }
        }
        RowMode::Grouped => {
            for (key, members) in group_items_by_id(items) {
                let lane = lanes.len();
                let stack_count = members.len();
                rows.extend(
                    members
                        .into_iter()
                        .enumerate()
                        .map(|(stack_index, item)| WorkingRow {
                            item,
                            depth: 0,
                            parent_id: None,
                            lane,
                            stack_index,
                        }),
                );
                lanes.push(WorkingLane {
                    key,
                    label: config.group_label(key),
                    depth: 0,
                    parent_id: None,
                    has_children: false,
                    expanded: false,
                    stack_count,
                });
            }
        }
    }

    (lanes, rows)
}

fn pixel_ticks(
    anchors: &[NaiveDate],
    granularity: Granularity,
    unit_width: f64,
) -> Vec<AnchorTick> {
    anchors
        .iter()
        .enumerate()
        .map(|(index, &anchor)| AnchorTick {
            anchor,
            label: format_tick_label(anchor, granularity),
            offset: index as f64 * unit_width,
            width: unit_width,
        })
        .collect()
}

/// Each tick covers the part of its unit that overlaps the span, so partial
/// first and last units come out narrower and widths sum to 100.
fn percent_ticks(
    anchors: &[NaiveDate],
    span: TimeSpan,
    granularity: Granularity,
    scale: PercentScale,
) -> Vec<AnchorTick> {
    if span.is_degenerate() {
        return anchors
            .iter()
            .map(|&anchor| AnchorTick {
                anchor,
                label: format_tick_label(anchor, granularity),
                offset: 0.0,
                width: 100.0,
            })
            .collect();
    }

    let unit = granularity.unit();
    anchors
        .iter()
        .map(|&anchor| {
            let visible_start = midnight(anchor).max(span.start);
            let visible_end = unit
                .advance(anchor)
                .map_or(span.end, midnight)
                .min(span.end);
            let offset = scale.position(visible_start);
            AnchorTick {
                anchor,
                label: format_tick_label(anchor, granularity),
                offset,
                width: (scale.position(visible_end) - offset).max(0.0),
            }
        })
        .collect()
}
