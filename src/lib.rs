//! gantt-rs: calendar-aware timeline layout engine.
//!
//! Turns a list of dated items, a zoom granularity and an expansion state
//! into axis ticks, lanes and bar geometry. Drawing is left to a `Renderer`
//! backend supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{GanttEngine, GanttEngineConfig, LayoutConfig, RenderModel};
pub use error::{GanttError, GanttResult};
