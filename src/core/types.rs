use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Grouping / hierarchy key of an item.
///
/// Ids are not required to be unique: items sharing an id are stacked in one
/// lane when grouping is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u32> for ItemId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// One schedulable interval on the timeline.
///
/// `start <= end` is expected but not enforced; inverted items are laid out
/// as minimum-width markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Item>,
}

impl Item {
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        color: Color,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            color,
            children: Vec::new(),
        }
    }

    /// Builds an item from textual dates and a CSS hex color.
    pub fn from_date_strings(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        start: &str,
        end: &str,
        color_hex: &str,
    ) -> GanttResult<Self> {
        Ok(Self::new(
            id,
            name,
            parse_instant(start)?,
            parse_instant(end)?,
            Color::from_hex(color_hex)?,
        ))
    }

    #[must_use]
    pub fn with_child(mut self, child: Item) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Item>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Number of nodes in this item's subtree, including itself.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Item::subtree_len).sum::<usize>()
    }
}

/// The `[start, end]` interval covering every instant under layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSpan {
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Min/max over all start and end instants. `None` for an empty input.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Option<Self> {
        let mut bounds: Option<(NaiveDateTime, NaiveDateTime)> = None;
        for item in items {
            let low = item.start.min(item.end);
            let high = item.start.max(item.end);
            bounds = Some(match bounds {
                None => (low, high),
                Some((min, max)) => (min.min(low), max.max(high)),
            });
        }
        bounds.map(|(start, end)| Self { start, end })
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn duration_millis(self) -> i64 {
        self.end.signed_duration_since(self.start).num_milliseconds()
    }
}

#[must_use]
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` or RFC 3339 into a local
/// wall-clock instant. RFC 3339 offsets are dropped, keeping the local time.
pub fn parse_instant(input: &str) -> GanttResult<NaiveDateTime> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(midnight(date));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(instant) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(instant);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|instant| instant.naive_local())
        .map_err(|err| GanttError::InvalidDate {
            input: input.to_owned(),
            reason: err.to_string(),
        })
}
