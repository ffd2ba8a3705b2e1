use crate::core::Viewport;
use crate::error::{GanttError, GanttResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// One timeline draw pass, split into paint layers.
///
/// Backends draw the layers in field order: gridlines first, bar labels last.
/// Everything below `header_height_px` belongs to the lanes; the band above
/// it is reserved for axis labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub header_height_px: f64,
    pub gridlines: Vec<LinePrimitive>,
    pub axis_labels: Vec<TextPrimitive>,
    pub lane_labels: Vec<TextPrimitive>,
    pub bars: Vec<RectPrimitive>,
    pub bar_labels: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, header_height_px: f64) -> Self {
        Self {
            viewport,
            header_height_px,
            gridlines: Vec::new(),
            axis_labels: Vec::new(),
            lane_labels: Vec::new(),
            bars: Vec::new(),
            bar_labels: Vec::new(),
        }
    }

    /// Checks every primitive and keeps bars and lane labels out of the
    /// axis header band.
    pub fn validate(&self) -> GanttResult<()> {
        if !self.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.header_height_px.is_finite() || self.header_height_px < 0.0 {
            return Err(GanttError::InvalidData(
                "header height must be finite and >= 0".to_owned(),
            ));
        }

        for line in &self.gridlines {
            line.validate()?;
        }
        for text in self.texts() {
            text.validate()?;
        }
        for bar in &self.bars {
            bar.validate()?;
            if bar.y < self.header_height_px {
                return Err(GanttError::InvalidData(format!(
                    "bar at y={} overlaps the axis header ({}px)",
                    bar.y, self.header_height_px
                )));
            }
        }
        for label in &self.lane_labels {
            if label.y < self.header_height_px {
                return Err(GanttError::InvalidData(format!(
                    "lane label `{}` overlaps the axis header",
                    label.text
                )));
            }
        }

        Ok(())
    }

    /// All text layers in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.axis_labels
            .iter()
            .chain(&self.lane_labels)
            .chain(&self.bar_labels)
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.axis_labels.len() + self.lane_labels.len() + self.bar_labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gridlines.is_empty() && self.bars.is_empty() && self.text_count() == 0
    }
}
