use crate::core::{PositionMode, Viewport};
use crate::error::{GanttError, GanttResult};
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextPrimitive};

use super::{LayoutConfig, RenderModel, TimelineRenderStyle};

const AXIS_LABEL_PADDING_PX: f64 = 4.0;
const LANE_LABEL_PADDING_PX: f64 = 8.0;
const BAR_LABEL_PADDING_PX: f64 = 6.0;

/// Maps model units (percent or pixels) onto the track right of the label column.
#[derive(Debug, Clone, Copy)]
struct TrackProjection {
    left: f64,
    width: f64,
    mode: PositionMode,
}

impl TrackProjection {
    fn x(self, value: f64) -> f64 {
        self.left + self.length(value)
    }

    fn length(self, value: f64) -> f64 {
        match self.mode {
            PositionMode::Percentage => value / 100.0 * self.width,
            PositionMode::Pixel => value,
        }
    }
}

/// Materializes gridlines, axis labels, lane labels and bars for one draw pass.
///
/// Percentage models are stretched across the viewport; pixel models keep
/// their absolute offsets and may extend past the right edge.
pub fn build_render_frame(
    model: &RenderModel,
    viewport: Viewport,
    config: &LayoutConfig,
    style: &TimelineRenderStyle,
) -> GanttResult<RenderFrame> {
    if !viewport.is_valid() {
        return Err(GanttError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let viewport_width = f64::from(viewport.width);
    let viewport_height = f64::from(viewport.height);
    let projection = TrackProjection {
        left: config.label_column_width_px,
        width: (viewport_width - config.label_column_width_px).max(1.0),
        mode: model.position_mode,
    };
    let header = style.header_height_px;
    let mut frame = RenderFrame::new(viewport, header);

    for tick in &model.ticks {
        let x = projection.x(tick.offset);
        frame.gridlines.push(LinePrimitive::new(
            x,
            0.0,
            x,
            viewport_height,
            style.grid_line_width,
            style.grid_line_color,
        ));
        frame.axis_labels.push(TextPrimitive::new(
            tick.label.clone(),
            x + AXIS_LABEL_PADDING_PX,
            header / 2.0,
            style.axis_label_font_size_px,
            style.axis_label_color,
        ));
    }

    for lane in &model.lanes {
        if lane.label.is_empty() {
            continue;
        }
        frame.lane_labels.push(TextPrimitive::new(
            lane.label.clone(),
            LANE_LABEL_PADDING_PX + lane.depth as f64 * style.depth_indent_px,
            header + lane.top_px + config.row_height_px / 2.0,
            style.lane_label_font_size_px,
            style.lane_label_color,
        ));
    }

    let inset = style.bar_vertical_inset_px;
    let bar_height = if config.row_height_px > 2.0 * inset {
        config.row_height_px - 2.0 * inset
    } else {
        config.row_height_px
    };
    for row in &model.rows {
        let x = projection.x(row.start);
        let y = header + row.top_px + inset;
        frame.bars.push(
            RectPrimitive::new(x, y, projection.length(row.width), bar_height, row.color)
                .with_corner_radius(style.bar_corner_radius_px),
        );
        if !row.name.is_empty() {
            frame.bar_labels.push(TextPrimitive::new(
                row.name.clone(),
                x + BAR_LABEL_PADDING_PX,
                y + bar_height / 2.0,
                style.bar_label_font_size_px,
                style.bar_label_color,
            ));
        }
    }

    Ok(frame)
}
