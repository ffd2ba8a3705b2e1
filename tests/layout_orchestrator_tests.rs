use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};
use gantt_rs::api::{LayoutConfig, RowMode, compute_layout};
use gantt_rs::core::types::midnight;
use gantt_rs::core::{ExpansionState, Granularity, Item, ItemId, PositionMode};
use gantt_rs::error::GanttError;
use gantt_rs::render::Color;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    midnight(date(y, m, d))
}

fn blue() -> Color {
    Color::from_hex("#3B82F6").expect("valid hex")
}

fn pixel_config() -> LayoutConfig {
    LayoutConfig::default().with_position_mode(PositionMode::Pixel)
}

fn percent_config() -> LayoutConfig {
    LayoutConfig::default().with_position_mode(PositionMode::Percentage)
}

fn sample_tasks() -> Vec<Item> {
    [
        (1u32, "Dolor sit amet", "2025-05-21", "2025-08-23", "#EF4444"),
        (1, "Dolor sit amet2", "2025-07-01", "2025-12-24", "#EF4444"),
        (2, "Consectetur", "2025-02-03", "2025-05-03", "#F97316"),
        (3, "Sed do eiusmod", "2025-04-25", "2025-11-06", "#EAB308"),
        (4, "Sed tempor incididunt", "2025-12-19", "2025-12-22", "#94A3B8"),
        (5, "Incididunt", "2025-12-18", "2025-12-28", "#84CC16"),
        (6, "Ut labore", "2025-11-30", "2025-12-12", "#A855F7"),
        (7, "Et dolore", "2025-04-02", "2025-12-19", "#0EA5E9"),
    ]
    .into_iter()
    .map(|(id, name, start, end, color)| {
        Item::from_date_strings(id, name, start, end, color).expect("valid sample task")
    })
    .collect()
}

#[test]
fn single_item_in_one_month_pixel_mode() {
    let items = vec![Item::new(1u32, "Kickoff", at(2025, 1, 1), at(2025, 1, 10), blue())];
    let config = pixel_config();

    let model = compute_layout(&items, Granularity::Month, &ExpansionState::collapsed(), &config)
        .expect("layout");

    assert_eq!(model.ticks.len(), 1);
    assert_eq!(model.ticks[0].anchor, date(2025, 1, 1));
    assert_eq!(model.ticks[0].label, "Jan 25");
    assert_relative_eq!(model.extent, config.unit_widths.month_px, epsilon = 1e-9);

    let row = &model.rows[0];
    assert_relative_eq!(row.start, 0.0, epsilon = 1e-9);
    assert_relative_eq!(row.width, 9.0 / 31.0 * config.unit_widths.month_px, epsilon = 1e-9);
}

#[test]
fn single_item_in_one_month_percentage_mode() {
    let items = vec![Item::new(1u32, "Kickoff", at(2025, 1, 1), at(2025, 1, 10), blue())];

    let model = compute_layout(
        &items,
        Granularity::Month,
        &ExpansionState::collapsed(),
        &percent_config(),
    )
    .expect("layout");

    assert_relative_eq!(model.extent, 100.0, epsilon = 1e-9);
    assert_relative_eq!(model.rows[0].start, 0.0, epsilon = 1e-9);
    assert_relative_eq!(model.rows[0].end(), 100.0, epsilon = 1e-9);
    assert_eq!(model.ticks.len(), 1);
    assert_relative_eq!(model.ticks[0].width, 100.0, epsilon = 1e-9);
}

#[test]
fn empty_input_yields_empty_model() {
    let model = compute_layout(&[], Granularity::Week, &ExpansionState::collapsed(), &pixel_config())
        .expect("layout");

    assert!(model.is_empty());
    assert!(model.span.is_none());
    assert!(model.ticks.is_empty());
    assert!(model.lanes.is_empty());
    assert_relative_eq!(model.extent, 0.0);
}

#[test]
fn degenerate_span_keeps_minimum_width() {
    let instant = at(2025, 3, 14);
    let items = vec![Item::new("m", "Milestone", instant, instant, blue())];
    let config = percent_config();

    let model = compute_layout(&items, Granularity::Day, &ExpansionState::collapsed(), &config)
        .expect("layout");

    assert_eq!(model.ticks.len(), 1);
    assert_relative_eq!(model.ticks[0].offset, 0.0);
    assert_relative_eq!(model.ticks[0].width, 100.0);
    assert_relative_eq!(model.rows[0].start, 0.0);
    assert_relative_eq!(model.rows[0].width, config.min_bar_width_percent);
}

#[test]
fn inverted_item_is_drawn_as_minimum_width_marker() {
    let items = vec![
        Item::new("ok", "Regular", at(2025, 1, 1), at(2025, 1, 20), blue()),
        Item::new("bad", "Inverted", at(2025, 1, 15), at(2025, 1, 5), blue()),
    ];
    let config = pixel_config();

    let model = compute_layout(&items, Granularity::Day, &ExpansionState::collapsed(), &config)
        .expect("layout");

    let inverted = &model.rows[1];
    assert!(items[1].is_inverted());
    assert_relative_eq!(inverted.start, 14.0 * config.unit_widths.day_px, epsilon = 1e-9);
    assert_relative_eq!(inverted.width, config.min_bar_width_px);
    let span = model.span.expect("span");
    assert_eq!(span.start, at(2025, 1, 1));
    assert_eq!(span.end, at(2025, 1, 20));
}

#[test]
fn marker_at_span_end_overhangs_by_at_most_minimum_width() {
    let items = vec![
        Item::new("work", "Work", at(2025, 1, 1), at(2025, 1, 20), blue()),
        Item::new("done", "Done", at(2025, 1, 20), at(2025, 1, 20), blue()),
    ];
    let config = percent_config();

    let model = compute_layout(&items, Granularity::Week, &ExpansionState::collapsed(), &config)
        .expect("layout");

    let marker = &model.rows[1];
    assert_relative_eq!(marker.start, model.extent, epsilon = 1e-9);
    assert_relative_eq!(
        marker.end(),
        model.extent + config.min_bar_width_percent,
        epsilon = 1e-9
    );
}

#[test]
fn hierarchy_rows_get_one_lane_each() {
    let items = vec![
        Item::new("p", "Phase", at(2025, 2, 1), at(2025, 4, 30), blue()).with_children([
            Item::new("p.1", "Design", at(2025, 2, 1), at(2025, 2, 28), blue()),
            Item::new("p.2", "Build", at(2025, 3, 1), at(2025, 4, 30), blue()),
        ]),
        Item::new("r", "Release", at(2025, 5, 1), at(2025, 5, 2), blue()),
    ];
    let mut expansion = ExpansionState::all_expanded(&items);
    let config = pixel_config();

    let model = compute_layout(&items, Granularity::Month, &expansion, &config).expect("layout");
    assert_eq!(model.lanes.len(), 4);
    assert_eq!(model.rows.len(), 4);
    assert!(model.lanes[0].has_children);
    assert!(model.lanes[0].expanded);
    assert_eq!(model.lanes[1].depth, 1);
    assert_eq!(model.lanes[1].parent_id, Some(ItemId::from("p")));
    assert_relative_eq!(model.lanes[3].top_px, 3.0 * config.row_height_px);
    assert_relative_eq!(model.content_height_px(), 4.0 * config.row_height_px);

    expansion.toggle(&ItemId::from("p"));
    let collapsed =
        compute_layout(&items, Granularity::Month, &expansion, &config).expect("layout");
    assert_eq!(collapsed.lanes.len(), 2);
    assert!(!collapsed.lanes[0].expanded);
}

#[test]
fn span_only_covers_visible_rows() {
    let items = vec![
        Item::new("p", "Phase", at(2025, 2, 1), at(2025, 2, 10), blue()).with_children([
            Item::new("p.1", "Late child", at(2025, 9, 1), at(2025, 9, 30), blue()),
        ]),
    ];

    let model = compute_layout(
        &items,
        Granularity::Month,
        &ExpansionState::collapsed(),
        &pixel_config(),
    )
    .expect("layout");

    let span = model.span.expect("span");
    assert_eq!(span.end, at(2025, 2, 10));
    assert_eq!(model.ticks.len(), 1);
}

#[test]
fn grouped_items_stack_inside_one_lane() {
    let items = vec![
        Item::new(1u32, "First", at(2025, 1, 1), at(2025, 1, 20), blue()),
        Item::new(1u32, "Second", at(2025, 1, 10), at(2025, 1, 31), blue()),
    ];
    let config = pixel_config().with_row_mode(RowMode::Grouped);

    let model = compute_layout(&items, Granularity::Day, &ExpansionState::collapsed(), &config)
        .expect("layout");

    assert_eq!(model.lanes.len(), 1);
    assert_eq!(model.lanes[0].label, "Stage 1");
    assert_eq!(model.lanes[0].stack_count, 2);
    assert_relative_eq!(
        model.lanes[0].height_px,
        config.row_height_px + config.stack_offset_px
    );

    let first = &model.rows[0];
    let second = &model.rows[1];
    assert_eq!((first.lane, second.lane), (0, 0));
    assert_ne!(first.top_px, second.top_px);
    assert_relative_eq!(second.top_px - first.top_px, config.stack_offset_px);
    assert_relative_eq!(first.start, 0.0, epsilon = 1e-9);
    assert_relative_eq!(first.width, 19.0 * config.unit_widths.day_px, epsilon = 1e-9);
    assert_relative_eq!(second.start, 9.0 * config.unit_widths.day_px, epsilon = 1e-9);
    assert_relative_eq!(second.width, 21.0 * config.unit_widths.day_px, epsilon = 1e-9);
}

#[test]
fn flat_and_grouped_modes_reject_coarse_granularities() {
    let items = sample_tasks();
    for row_mode in [RowMode::Flat, RowMode::Grouped] {
        for granularity in [Granularity::Quarter, Granularity::Year] {
            let config = pixel_config().with_row_mode(row_mode);
            let err = compute_layout(&items, granularity, &ExpansionState::collapsed(), &config)
                .expect_err("coarse zoom must be rejected");
            assert!(matches!(
                err,
                GanttError::UnsupportedGranularity { granularity: g, .. } if g == granularity
            ));
        }
    }
}

#[test]
fn sample_schedule_lays_out_across_the_year() {
    let items = sample_tasks();
    let config = pixel_config().with_row_mode(RowMode::Grouped);

    let model = compute_layout(&items, Granularity::Month, &ExpansionState::collapsed(), &config)
        .expect("layout");

    let span = model.span.expect("span");
    assert_eq!(span.start, at(2025, 2, 3));
    assert_eq!(span.end, at(2025, 12, 28));
    assert_eq!(model.ticks.len(), 11);
    assert_eq!(model.ticks[0].label, "Feb 25");
    assert_eq!(model.ticks[10].label, "Dec 25");
    assert_eq!(model.lanes.len(), 7);
    assert_eq!(model.rows.len(), items.len());
    for row in &model.rows {
        assert!(row.start >= 0.0);
        assert!(row.end() <= model.extent + 1e-9);
    }

    let json = model.to_json_pretty().expect("serialize model");
    assert!(json.contains("\"Dolor sit amet2\""));
}

#[test]
fn invalid_config_is_rejected_before_layout() {
    let items = sample_tasks();
    let config = pixel_config().with_row_height_px(0.0);
    let err = compute_layout(&items, Granularity::Month, &ExpansionState::collapsed(), &config)
        .expect_err("zero row height");
    assert!(matches!(err, GanttError::InvalidData(_)));
}
