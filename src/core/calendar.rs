use chrono::{NaiveDate, NaiveDateTime};

use super::Granularity;
use super::types::midnight;

/// Anchor dates of every unit covering `[min, max]`.
///
/// The first anchor is `min` floored to its unit; each following anchor is
/// exactly one unit later, and generation stops once the next anchor lies
/// past `max`. Always returns at least one anchor.
#[must_use]
pub fn generate_ticks(
    min: NaiveDateTime,
    max: NaiveDateTime,
    granularity: Granularity,
) -> Vec<NaiveDate> {
    let unit = granularity.unit();
    let mut anchor = unit.floor(min.date());
    let mut anchors = vec![anchor];

    while let Some(next) = unit.advance(anchor) {
        if midnight(next) > max {
            break;
        }
        anchors.push(next);
        anchor = next;
    }

    anchors
}

/// Number of days in `date`'s calendar month.
#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    let unit = Granularity::Month.unit();
    let start = unit.floor(date);
    unit.advance(start)
        .map(|next| next.signed_duration_since(start).num_days())
        .and_then(|days| u32::try_from(days).ok())
        .unwrap_or(31)
}
