//! Axis tick label text.
//!
//! Labels use a fixed English month table so output never depends on the
//! host locale.

use chrono::{Datelike, NaiveDate};

use super::Granularity;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[must_use]
pub fn month_abbreviation(date: NaiveDate) -> &'static str {
    MONTH_ABBREVIATIONS[date.month0() as usize]
}

/// Formats the label of one anchor tick.
#[must_use]
pub fn format_tick_label(anchor: NaiveDate, granularity: Granularity) -> String {
    granularity.unit().label(anchor)
}

/// `"D Mon"`, e.g. `"7 Mar"`.
#[must_use]
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), month_abbreviation(date))
}

/// `"Week K"` with `K = ceil(day_of_month / 7)`.
///
/// This is a week ordinal inside the month, not an ISO week number, and it
/// restarts at 1 every month.
#[must_use]
pub fn week_label(date: NaiveDate) -> String {
    format!("Week {}", date.day().div_ceil(7))
}

/// `"Mon YY"`, e.g. `"Jan 25"`.
#[must_use]
pub fn month_label(date: NaiveDate) -> String {
    format!(
        "{} {:02}",
        month_abbreviation(date),
        date.year().rem_euclid(100)
    )
}

/// `"Qn YYYY"`, e.g. `"Q3 2025"`.
#[must_use]
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{} {:04}", date.month0() / 3 + 1, date.year())
}

#[must_use]
pub fn year_label(date: NaiveDate) -> String {
    format!("{:04}", date.year())
}
