use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

use super::{Granularity, TimeSpan};

/// How item instants are mapped onto the horizontal track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    /// Linear interpolation over the span, in percent `[0, 100]`.
    /// Granularity only decides which gridlines are drawn.
    Percentage,
    /// Unit-aware pixel offsets: every unit gets a fixed width.
    Pixel,
}

/// Percentage-of-span mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentScale {
    span: TimeSpan,
}

impl PercentScale {
    #[must_use]
    pub fn new(span: TimeSpan) -> Self {
        Self { span }
    }

    /// `(instant - start) / (end - start) * 100`. A degenerate span maps
    /// everything to `0`.
    #[must_use]
    pub fn position(self, instant: NaiveDateTime) -> f64 {
        let span_ms = self.span.duration_millis();
        if span_ms == 0 {
            return 0.0;
        }
        let elapsed_ms = instant.signed_duration_since(self.span.start).num_milliseconds();
        elapsed_ms as f64 / span_ms as f64 * 100.0
    }
}

/// Granularity-aware pixel mapping.
///
/// Offsets are measured from the start of the unit containing the span start,
/// which is where the first tick is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    origin: NaiveDate,
    granularity: Granularity,
    unit_width: f64,
}

impl PixelScale {
    pub fn new(span: TimeSpan, granularity: Granularity, unit_width: f64) -> GanttResult<Self> {
        if !unit_width.is_finite() || unit_width <= 0.0 {
            return Err(GanttError::InvalidData(
                "unit width must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            origin: granularity.unit().floor(span.start.date()),
            granularity,
            unit_width,
        })
    }

    #[must_use]
    pub fn origin(self) -> NaiveDate {
        self.origin
    }

    /// Whole units elapsed times the unit width, plus the elapsed share of
    /// the containing unit.
    #[must_use]
    pub fn position(self, instant: NaiveDateTime) -> f64 {
        self.granularity.unit().units_elapsed(self.origin, instant) * self.unit_width
    }
}

/// Either mapping, picked once per layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineScale {
    Percent(PercentScale),
    Pixel(PixelScale),
}

impl TimelineScale {
    #[must_use]
    pub fn position(self, instant: NaiveDateTime) -> f64 {
        match self {
            Self::Percent(scale) => scale.position(instant),
            Self::Pixel(scale) => scale.position(instant),
        }
    }

    /// Start offset and width of a bar, with the width floored at `min_width`.
    #[must_use]
    pub fn bar(self, start: NaiveDateTime, end: NaiveDateTime, min_width: f64) -> (f64, f64) {
        let left = self.position(start);
        let right = self.position(end);
        (left, bar_width(left, right, min_width))
    }
}

/// `right - left`, never below `min_width` so inverted or zero-length items
/// stay visible.
#[must_use]
pub fn bar_width(left: f64, right: f64, min_width: f64) -> f64 {
    let raw = right - left;
    if raw.is_finite() && raw >= min_width {
        raw
    } else {
        min_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::midnight;
    use approx::assert_relative_eq;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        midnight(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
    }

    #[test]
    fn percent_scale_hits_both_span_bounds() {
        let scale = PercentScale::new(TimeSpan::new(at(2025, 1, 1), at(2025, 1, 11)));
        assert_relative_eq!(scale.position(at(2025, 1, 1)), 0.0, epsilon = 1e-9);
        assert_relative_eq!(scale.position(at(2025, 1, 6)), 50.0, epsilon = 1e-9);
        assert_relative_eq!(scale.position(at(2025, 1, 11)), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn percent_scale_degenerate_span_is_zero() {
        let scale = PercentScale::new(TimeSpan::new(at(2025, 1, 1), at(2025, 1, 1)));
        let value = scale.position(at(2025, 1, 1));
        assert!(value.is_finite());
        assert_eq!(value, 0.0);
    }

    #[test]
    fn day_pixels_are_days_times_width() {
        let span = TimeSpan::new(at(2025, 1, 1), at(2025, 1, 31));
        let scale = PixelScale::new(span, Granularity::Day, 30.0).expect("scale");
        assert_relative_eq!(scale.position(at(2025, 1, 11)), 300.0, epsilon = 1e-9);
    }

    #[test]
    fn week_pixels_split_whole_weeks_and_days() {
        // Origin floors to Sunday 2025-01-05.
        let span = TimeSpan::new(at(2025, 1, 8), at(2025, 2, 1));
        let scale = PixelScale::new(span, Granularity::Week, 70.0).expect("scale");
        assert_eq!(scale.origin(), NaiveDate::from_ymd_opt(2025, 1, 5).expect("date"));
        // 17 days elapsed: 2 weeks * 70 + 3 * 10.
        assert_relative_eq!(scale.position(at(2025, 1, 22)), 170.0, epsilon = 1e-9);
    }

    #[test]
    fn month_pixels_accumulate_full_months_then_fraction() {
        let span = TimeSpan::new(at(2025, 1, 1), at(2025, 3, 31));
        let scale = PixelScale::new(span, Granularity::Month, 120.0).expect("scale");
        assert_relative_eq!(scale.position(at(2025, 1, 10)), 9.0 / 31.0 * 120.0, epsilon = 1e-9);
        assert_relative_eq!(scale.position(at(2025, 2, 1)), 120.0, epsilon = 1e-9);
        assert_relative_eq!(scale.position(at(2025, 3, 15)), 240.0 + 14.0 / 31.0 * 120.0, epsilon = 1e-9);
    }

    #[test]
    fn quarter_pixels_use_quarter_day_span() {
        let span = TimeSpan::new(at(2025, 2, 1), at(2025, 9, 1));
        let scale = PixelScale::new(span, Granularity::Quarter, 90.0).expect("scale");
        // Q2 2025 has 91 days; May 1 is 30 days in.
        assert_relative_eq!(scale.position(at(2025, 5, 1)), 90.0 + 30.0 / 91.0 * 90.0, epsilon = 1e-9);
    }

    #[test]
    fn year_pixels_account_for_leap_years() {
        let span = TimeSpan::new(at(2023, 6, 1), at(2025, 1, 1));
        let scale = PixelScale::new(span, Granularity::Year, 366.0).expect("scale");
        assert_relative_eq!(scale.position(at(2024, 3, 1)), 366.0 + 60.0, epsilon = 1e-9);
    }

    #[test]
    fn pixel_scale_rejects_non_positive_width() {
        let span = TimeSpan::new(at(2025, 1, 1), at(2025, 2, 1));
        assert!(PixelScale::new(span, Granularity::Day, 0.0).is_err());
        assert!(PixelScale::new(span, Granularity::Day, f64::NAN).is_err());
    }

    #[test]
    fn bar_width_is_floored_for_inverted_intervals() {
        assert_eq!(bar_width(50.0, 40.0, 2.0), 2.0);
        assert_eq!(bar_width(50.0, 50.0, 2.0), 2.0);
        assert_eq!(bar_width(10.0, 40.0, 2.0), 30.0);
    }
}
