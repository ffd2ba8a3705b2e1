pub mod calendar;
pub mod granularity;
pub mod grouping;
pub mod hierarchy;
pub mod label;
pub mod position;
pub mod types;

pub use calendar::{days_in_month, generate_ticks};
pub use granularity::{CalendarUnit, Granularity};
pub use grouping::{group_by, group_items_by_id};
pub use hierarchy::{ExpansionState, FlattenedRow, flatten, tree_ids};
pub use label::format_tick_label;
pub use position::{PercentScale, PixelScale, PositionMode, TimelineScale, bar_width};
pub use types::{Item, ItemId, TimeSpan, Viewport, parse_instant};
