use chrono::{Days, NaiveDate, NaiveDateTime};
use gantt_rs::api::{LayoutConfig, compute_layout};
use gantt_rs::core::types::midnight;
use gantt_rs::core::{
    ExpansionState, Granularity, Item, PercentScale, PixelScale, PositionMode, TimeSpan,
    generate_ticks,
};
use gantt_rs::render::Color;
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    midnight(NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"))
}

fn day_offset(days: u64) -> NaiveDateTime {
    base()
        .checked_add_days(Days::new(days))
        .expect("offset within range")
}

fn granularity() -> impl Strategy<Value = Granularity> {
    prop::sample::select(Granularity::ALL.to_vec())
}

proptest! {
    #[test]
    fn ticks_cover_span_without_gaps(
        start in 0u64..3_000,
        length in 0u64..1_500,
        granularity in granularity()
    ) {
        let min = day_offset(start);
        let max = day_offset(start + length);
        let unit = granularity.unit();

        let ticks = generate_ticks(min, max, granularity);

        prop_assert!(!ticks.is_empty());
        prop_assert!(midnight(ticks[0]) <= min);
        prop_assert_eq!(unit.floor(ticks[0]), ticks[0]);
        for pair in ticks.windows(2) {
            prop_assert_eq!(unit.advance(pair[0]), Some(pair[1]));
        }
        let last = *ticks.last().expect("non-empty");
        prop_assert!(midnight(last) <= max);
        let after = unit.advance(last).expect("advance within range");
        prop_assert!(midnight(after) > max);
    }

    #[test]
    fn pixel_positions_are_monotonic(
        start in 0u64..2_000,
        a in 0u64..800,
        b in 0u64..800,
        granularity in granularity()
    ) {
        let span = TimeSpan::new(day_offset(start), day_offset(start + 800));
        let scale = PixelScale::new(span, granularity, 100.0).expect("valid width");
        let (early, late) = (a.min(b), a.max(b));

        let left = scale.position(day_offset(start + early));
        let right = scale.position(day_offset(start + late));

        prop_assert!(left >= 0.0);
        prop_assert!(left <= right + 1e-9);
    }

    #[test]
    fn percent_positions_stay_inside_span(
        start in 0u64..2_000,
        length in 1u64..900,
        probe in 0.0f64..=1.0
    ) {
        let span = TimeSpan::new(day_offset(start), day_offset(start + length));
        let scale = PercentScale::new(span);
        let probe_days = (probe * length as f64).floor() as u64;

        let position = scale.position(day_offset(start + probe_days));

        prop_assert!((0.0..=100.0 + 1e-9).contains(&position));
        prop_assert!(scale.position(span.start).abs() <= 1e-9);
        prop_assert!((scale.position(span.end) - 100.0).abs() <= 1e-9);
    }

    #[test]
    fn layout_bars_respect_minimum_width_and_extent(
        intervals in prop::collection::vec((0u64..1_000, 0u64..120, any::<bool>()), 1..24),
        granularity in granularity(),
        percentage in any::<bool>()
    ) {
        let color = Color::rgb(0.1, 0.5, 0.9);
        let items: Vec<Item> = intervals
            .iter()
            .enumerate()
            .map(|(index, &(start, length, inverted))| {
                let (from, to) = (day_offset(start), day_offset(start + length));
                let (from, to) = if inverted { (to, from) } else { (from, to) };
                Item::new(index as u32, format!("item {index}"), from, to, color)
            })
            .collect();
        let mode = if percentage { PositionMode::Percentage } else { PositionMode::Pixel };
        let config = LayoutConfig::default().with_position_mode(mode);

        let model = compute_layout(&items, granularity, &ExpansionState::collapsed(), &config)
            .expect("layout");

        prop_assert_eq!(model.rows.len(), items.len());
        for row in &model.rows {
            prop_assert!(row.width >= config.min_bar_width() - 1e-9);
            prop_assert!(row.start >= -1e-9);
            prop_assert!(row.start <= model.extent + 1e-9);
            prop_assert!(row.end() <= model.extent + config.min_bar_width() + 1e-9);
        }
        let last_tick = model.ticks.last().expect("ticks");
        prop_assert!((last_tick.offset + last_tick.width - model.extent).abs() <= 1e-6);
    }
}
