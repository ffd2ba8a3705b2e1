use crate::error::{GanttError, GanttResult};
use crate::render::Color;

/// Visual constants used when turning a `RenderModel` into draw primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineRenderStyle {
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub axis_label_color: Color,
    pub lane_label_color: Color,
    pub bar_label_color: Color,
    pub axis_label_font_size_px: f64,
    pub lane_label_font_size_px: f64,
    pub bar_label_font_size_px: f64,
    pub header_height_px: f64,
    pub bar_vertical_inset_px: f64,
    pub bar_corner_radius_px: f64,
    pub depth_indent_px: f64,
}

impl Default for TimelineRenderStyle {
    fn default() -> Self {
        Self {
            grid_line_color: Color::rgb(0.898, 0.906, 0.922),
            grid_line_width: 1.0,
            axis_label_color: Color::rgb(0.294, 0.333, 0.388),
            lane_label_color: Color::rgb(0.067, 0.094, 0.153),
            bar_label_color: Color::rgb(1.0, 1.0, 1.0),
            axis_label_font_size_px: 12.0,
            lane_label_font_size_px: 13.0,
            bar_label_font_size_px: 11.0,
            header_height_px: 36.0,
            bar_vertical_inset_px: 4.0,
            bar_corner_radius_px: 4.0,
            depth_indent_px: 14.0,
        }
    }
}

impl TimelineRenderStyle {
    pub fn validate(self) -> GanttResult<Self> {
        self.grid_line_color.validate()?;
        self.axis_label_color.validate()?;
        self.lane_label_color.validate()?;
        self.bar_label_color.validate()?;

        for (name, value) in [
            ("grid_line_width", self.grid_line_width),
            ("axis_label_font_size_px", self.axis_label_font_size_px),
            ("lane_label_font_size_px", self.lane_label_font_size_px),
            ("bar_label_font_size_px", self.bar_label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "render style `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("header_height_px", self.header_height_px),
            ("bar_vertical_inset_px", self.bar_vertical_inset_px),
            ("bar_corner_radius_px", self.bar_corner_radius_px),
            ("depth_indent_px", self.depth_indent_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "render style `{name}` must be finite and >= 0"
                )));
            }
        }

        Ok(self)
    }
}
