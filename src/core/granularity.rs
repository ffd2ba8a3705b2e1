use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::label;
use super::types::midnight;

/// Axis subdivision unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    pub const ALL: [Self; 5] = [
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
    ];

    /// Calendar arithmetic for this granularity.
    #[must_use]
    pub fn unit(self) -> &'static dyn CalendarUnit {
        match self {
            Self::Day => &DayUnit,
            Self::Week => &WeekUnit,
            Self::Month => &MonthUnit,
            Self::Quarter => &QuarterUnit,
            Self::Year => &YearUnit,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-granularity calendar arithmetic.
///
/// Implementations only define how a unit starts, how it advances and how
/// anchors are counted; unit-relative positioning is shared.
pub trait CalendarUnit: Sync {
    fn granularity(&self) -> Granularity;

    /// Start of the unit containing `date`.
    fn floor(&self, date: NaiveDate) -> NaiveDate;

    /// Anchor of the next unit. `None` past the representable calendar.
    fn advance(&self, anchor: NaiveDate) -> Option<NaiveDate>;

    /// Whole units between two anchors produced by `floor`.
    fn units_between(&self, from: NaiveDate, to: NaiveDate) -> i64;

    fn label(&self, anchor: NaiveDate) -> String;

    /// `[start, next_start)` of the unit containing `instant`, as instants.
    fn unit_bounds(&self, instant: NaiveDateTime) -> (NaiveDateTime, Option<NaiveDateTime>) {
        let start = self.floor(instant.date());
        (midnight(start), self.advance(start).map(midnight))
    }

    /// Elapsed share `[0, 1)` of the unit containing `instant`, measured
    /// against that unit's own length.
    fn fraction_elapsed(&self, instant: NaiveDateTime) -> f64 {
        let (start, next) = self.unit_bounds(instant);
        let Some(next) = next else {
            return 0.0;
        };
        let unit_ms = next.signed_duration_since(start).num_milliseconds();
        if unit_ms <= 0 {
            return 0.0;
        }
        let elapsed_ms = instant.signed_duration_since(start).num_milliseconds();
        elapsed_ms as f64 / unit_ms as f64
    }

    /// Fractional units from the unit containing `origin` to `instant`.
    fn units_elapsed(&self, origin: NaiveDate, instant: NaiveDateTime) -> f64 {
        let whole = self.units_between(self.floor(origin), self.floor(instant.date()));
        whole as f64 + self.fraction_elapsed(instant)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DayUnit;

#[derive(Debug, Clone, Copy, Default)]
pub struct WeekUnit;

#[derive(Debug, Clone, Copy, Default)]
pub struct MonthUnit;

#[derive(Debug, Clone, Copy, Default)]
pub struct QuarterUnit;

#[derive(Debug, Clone, Copy, Default)]
pub struct YearUnit;

impl CalendarUnit for DayUnit {
    fn granularity(&self) -> Granularity {
        Granularity::Day
    }

    fn floor(&self, date: NaiveDate) -> NaiveDate {
        date
    }

    fn advance(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        anchor.checked_add_days(Days::new(1))
    }

    fn units_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        to.signed_duration_since(from).num_days()
    }

    fn label(&self, anchor: NaiveDate) -> String {
        label::day_label(anchor)
    }
}

impl CalendarUnit for WeekUnit {
    fn granularity(&self) -> Granularity {
        Granularity::Week
    }

    // Weeks start on Sunday.
    fn floor(&self, date: NaiveDate) -> NaiveDate {
        let back = u64::from(date.weekday().num_days_from_sunday());
        date.checked_sub_days(Days::new(back)).unwrap_or(date)
    }

    fn advance(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        anchor.checked_add_days(Days::new(7))
    }

    fn units_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        to.signed_duration_since(from).num_days().div_euclid(7)
    }

    fn label(&self, anchor: NaiveDate) -> String {
        label::week_label(anchor)
    }
}

impl CalendarUnit for MonthUnit {
    fn granularity(&self) -> Granularity {
        Granularity::Month
    }

    fn floor(&self, date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    fn advance(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        anchor.checked_add_months(Months::new(1))
    }

    fn units_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        month_index(to) - month_index(from)
    }

    fn label(&self, anchor: NaiveDate) -> String {
        label::month_label(anchor)
    }
}

impl CalendarUnit for QuarterUnit {
    fn granularity(&self) -> Granularity {
        Granularity::Quarter
    }

    fn floor(&self, date: NaiveDate) -> NaiveDate {
        let quarter_month = date.month0() / 3 * 3 + 1;
        NaiveDate::from_ymd_opt(date.year(), quarter_month, 1).unwrap_or(date)
    }

    fn advance(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        anchor.checked_add_months(Months::new(3))
    }

    fn units_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        (month_index(to) - month_index(from)).div_euclid(3)
    }

    fn label(&self, anchor: NaiveDate) -> String {
        label::quarter_label(anchor)
    }
}

impl CalendarUnit for YearUnit {
    fn granularity(&self) -> Granularity {
        Granularity::Year
    }

    fn floor(&self, date: NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
    }

    fn advance(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        anchor.checked_add_months(Months::new(12))
    }

    fn units_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        i64::from(to.year()) - i64::from(from.year())
    }

    fn label(&self, anchor: NaiveDate) -> String {
        label::year_label(anchor)
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}
