//! Integration tests for lowtide-graphs crate.
//!
//! These tests check the aggregation properties over arbitrary record sets
//! and render the full dashboard to disk.

use lowtide_common::test_utils::{
    activity_fixtures, assert_approx_eq, create_temp_dir, init_test_logging, record_on,
};
use lowtide_common::{ActivityRecord, LowtideError};
use lowtide_config::ChartConfig;
use lowtide_graphs::{ActivitySummary, Dashboard};
use proptest::prelude::*;

fn arb_record() -> impl Strategy<Value = ActivityRecord> {
    (0u32..14, 0u32..24, prop::sample::select(vec!["login", "view", "submit", ""]))
        .prop_map(|(day, hour, kind)| record_on(day, hour, kind))
}

fn arb_records() -> impl Strategy<Value = Vec<ActivityRecord>> {
    prop::collection::vec(arb_record(), 1..200)
}

proptest! {
    #[test]
    fn prop_every_table_accounts_for_every_record(records in arb_records()) {
        let summary = ActivitySummary::from_records(&records);
        let n = records.len() as u64;

        prop_assert_eq!(summary.total(), n);
        prop_assert_eq!(summary.by_day().iter().map(|d| d.count).sum::<u64>(), n);
        prop_assert_eq!(summary.by_hour().iter().map(|h| h.count).sum::<u64>(), n);
        prop_assert_eq!(summary.by_day_hour().iter().map(|c| c.count).sum::<u64>(), n);
        prop_assert_eq!(summary.matrix().iter().flatten().sum::<u64>(), n);
        prop_assert_eq!(
            summary
                .activity_series()
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.count))
                .sum::<u64>(),
            n
        );
    }

    #[test]
    fn prop_tables_ignore_input_order(records in arb_records()) {
        let forward = ActivitySummary::from_records(&records);
        let mut reversed_records = records.clone();
        reversed_records.reverse();
        let reversed = ActivitySummary::from_records(&reversed_records);

        let days: Vec<u8> = forward.by_day().iter().map(|d| d.day_of_week).collect();
        prop_assert!(days.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(forward.by_day(), reversed.by_day());
        prop_assert_eq!(forward.by_hour(), reversed.by_hour());
        prop_assert_eq!(forward.matrix(), reversed.matrix());
    }

    #[test]
    fn prop_day_percentages_sum_to_hundred(records in arb_records()) {
        let summary = ActivitySummary::from_records(&records);
        let total: f64 = summary
            .by_day()
            .iter()
            .filter_map(|d| summary.percentage(d.count))
            .sum();
        assert_approx_eq(total, 100.0, 1e-6);
    }

    #[test]
    fn prop_hour_percentages_sum_to_hundred(records in arb_records()) {
        let summary = ActivitySummary::from_records(&records);
        let total: f64 = summary
            .by_hour()
            .iter()
            .filter_map(|h| summary.percentage(h.count))
            .sum();
        assert_approx_eq(total, 100.0, 1e-6);
    }

    #[test]
    fn prop_least_active_day_is_first_minimum(records in arb_records()) {
        let summary = ActivitySummary::from_records(&records);
        let least = summary.least_active_day().unwrap();
        let min = summary.by_day().iter().map(|d| d.count).min().unwrap();
        let first = summary.by_day().iter().find(|d| d.count == min).unwrap();

        prop_assert_eq!(least.day_of_week, first.day_of_week);
        prop_assert_eq!(least.count, min);
    }

    #[test]
    fn prop_lowest_periods_are_sorted_and_bounded(records in arb_records(), n in 0usize..20) {
        let summary = ActivitySummary::from_records(&records);
        let lowest = summary.lowest_periods(n);

        prop_assert_eq!(lowest.len(), n.min(summary.by_day_hour().len()));
        prop_assert!(lowest.windows(2).all(|w| w[0].count <= w[1].count));
        if let Some(last) = lowest.last() {
            let skipped_min = summary
                .by_day_hour()
                .iter()
                .filter(|c| !lowest.contains(c))
                .map(|c| c.count)
                .min();
            prop_assert!(skipped_min.map_or(true, |m| m >= last.count));
        }
    }
}

#[test]
fn test_render_dashboard_to_disk() {
    init_test_logging();
    let dir = create_temp_dir();
    let path = dir.path().join("reports").join("activity_analysis.png");

    let config = ChartConfig {
        width: 1600,
        height: 1200,
        ..ChartConfig::default()
    };
    let dashboard = Dashboard::from_config(&config).unwrap();
    let summary = ActivitySummary::from_records(&activity_fixtures::sample_week());

    dashboard.render_to_file(&summary, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert!(bytes.len() > 1000);
}

#[test]
fn test_invalid_chart_color_is_rejected() {
    let config = ChartConfig {
        day_bar_color: "steelblue".to_string(),
        ..ChartConfig::default()
    };
    let err = Dashboard::from_config(&config).unwrap_err();
    assert!(matches!(err, LowtideError::Validation { .. }));
}

#[test]
fn test_empty_input_summarises_to_nothing() {
    let summary = ActivitySummary::from_records(&[]);
    assert!(summary.is_empty());
    assert!(summary.least_active_day().is_none());
    assert!(summary.lowest_periods(5).is_empty());
    assert!(Dashboard::default().render_to_buffer(&summary).is_err());
}
