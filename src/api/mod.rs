mod engine;
mod engine_config;
mod layout;
mod layout_config;
mod render_frame_builder;
mod render_model;
mod render_style;

pub use engine::GanttEngine;
pub use engine_config::GanttEngineConfig;
pub use layout::compute_layout;
pub use layout_config::{LayoutConfig, RowMode, UnitWidths};
pub use render_frame_builder::build_render_frame;
pub use render_model::{AnchorTick, LaneModel, RenderModel, RowModel};
pub use render_style::TimelineRenderStyle;
