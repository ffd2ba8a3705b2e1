use crate::error::GanttResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless layout usage.
///
/// It still validates frame content so tests catch invalid geometry before a
/// real backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GanttResult<()> {
        frame.validate()?;
        self.last_line_count = frame.gridlines.len();
        self.last_rect_count = frame.bars.len();
        self.last_text_count = frame.text_count();
        self.frames_rendered += 1;
        Ok(())
    }
}
