//! Test utilities and shared fixtures for lowtide.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for the unit and integration tests of the other workspace crates.

use crate::ActivityRecord;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a wall-clock timestamp.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, min, sec))
        .expect("valid fixture timestamp")
}

/// Build a record on 2024-01-15 (a Monday) shifted by `day_offset` days.
pub fn record_on(day_offset: u32, hour: u32, activity_type: &str) -> ActivityRecord {
    ActivityRecord::new(mock_timestamp(2024, 1, 15 + day_offset, hour, 0, 0), activity_type)
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Render records as CSV text with the default column headers.
pub fn records_to_csv(records: &[ActivityRecord]) -> String {
    let mut out = String::from("activity_time,activity_type\n");
    for record in records {
        let _ = writeln!(
            out,
            "{},{}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.activity_type
        );
    }
    out
}

/// Write records as a CSV file named `name` inside `dir`.
pub fn write_activity_csv(dir: &Path, name: &str, records: &[ActivityRecord]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, records_to_csv(records)).expect("Failed to write fixture CSV");
    path
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Ready-made record sets.
pub mod activity_fixtures {
    use super::*;

    /// Monday 09:00 twice and Tuesday 10:00 once.
    pub fn three_records() -> Vec<ActivityRecord> {
        vec![
            record_on(0, 9, "login"),
            record_on(0, 9, "login"),
            record_on(1, 10, "submit"),
        ]
    }

    /// A week of traffic: busy weekday office hours, quiet nights and a
    /// lighter weekend, over three activity types.
    pub fn sample_week() -> Vec<ActivityRecord> {
        let kinds = ["login", "view", "submit"];
        let mut records = Vec::new();
        for day in 0..7u32 {
            for hour in 0..24u32 {
                let busy = (9..18).contains(&hour);
                let weekend = day >= 5;
                let count = match (busy, weekend) {
                    (true, false) => 6,
                    (true, true) => 3,
                    (false, false) => 2,
                    (false, true) => 1,
                };
                // Sunday 4am stays silent
                if day == 6 && hour == 4 {
                    continue;
                }
                for i in 0..count {
                    records.push(record_on(day, hour, kinds[(i + hour as usize) % kinds.len()]));
                }
            }
        }
        records
    }
}
