//! CSV source for activity records.
//!
//! The input is a headed CSV table with one timestamp column and one
//! activity-type column; any other columns are ignored. Every failure here
//! is fatal for the run.

use crate::{ActivityRecord, LowtideError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Timestamp layouts carrying a UTC offset, tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f %#z",
];

/// Timestamp layouts without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Column layout of the CSV input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSourceOptions {
    /// Header of the timestamp column
    pub timestamp_column: String,
    /// Header of the activity-type column
    pub activity_type_column: String,
    /// Field delimiter byte
    pub delimiter: u8,
}

impl Default for CsvSourceOptions {
    fn default() -> Self {
        Self {
            timestamp_column: "activity_time".to_string(),
            activity_type_column: "activity_type".to_string(),
            delimiter: b',',
        }
    }
}

/// Loader turning a CSV table into [`ActivityRecord`]s
#[derive(Debug, Clone, Default)]
pub struct ActivitySource {
    options: CsvSourceOptions,
}

impl ActivitySource {
    /// Create a source with the given column layout
    pub const fn new(options: CsvSourceOptions) -> Self {
        Self { options }
    }

    /// Column layout used by this source
    pub const fn options(&self) -> &CsvSourceOptions {
        &self.options
    }

    /// Load all records from a file on disk
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ActivityRecord>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            LowtideError::input_with_source(
                format!("Failed to open activity file {}", path.display()),
                e,
            )
        })?;

        let records = self.load_reader(BufReader::new(file))?;
        info!(count = records.len(), "Loaded activity records");
        Ok(records)
    }

    /// Load all records from any reader producing CSV text
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<ActivityRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.options.delimiter)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let timestamp_idx = column_index(&headers, &self.options.timestamp_column)?;
        let type_idx = column_index(&headers, &self.options.activity_type_column)?;
        debug!(timestamp_idx, type_idx, "Resolved input columns");

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map_or(0, csv::Position::line);
            let raw_timestamp = row.get(timestamp_idx).unwrap_or_default();

            let timestamp = parse_timestamp(raw_timestamp).ok_or_else(|| {
                LowtideError::parse_at(
                    format!(
                        "unparsable timestamp '{}' in column '{}'",
                        raw_timestamp, self.options.timestamp_column
                    ),
                    line,
                )
            })?;

            let activity_type = row.get(type_idx).unwrap_or_default().trim();
            records.push(ActivityRecord::new(timestamp, activity_type));
        }

        Ok(records)
    }
}

/// Load records from `path` using the default column layout
pub fn load_activity_records<P: AsRef<Path>>(path: P) -> Result<Vec<ActivityRecord>> {
    ActivitySource::default().load_path(path)
}

/// Parse an ISO-like timestamp into wall-clock time.
///
/// When an offset is present the wall-clock time in that offset is kept.
/// A bare date is read as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_local());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| {
            LowtideError::input(format!(
                "missing required column '{}' (found: {})",
                name,
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn load(data: &str) -> Result<Vec<ActivityRecord>> {
        ActivitySource::default().load_reader(data.as_bytes())
    }

    #[test]
    fn test_parse_plain_timestamp() {
        let dt = parse_timestamp("2024-01-15 09:30:00").unwrap();
        assert_eq!((dt.day(), dt.hour(), dt.minute()), (15, 9, 30));
    }

    #[test]
    fn test_parse_fractional_and_t_separator() {
        let dt = parse_timestamp("2024-01-15T09:30:00.123456").unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_parse_keeps_offset_wall_clock() {
        let dt = parse_timestamp("2024-01-15T23:30:00+03:00").unwrap();
        assert_eq!((dt.day(), dt.hour()), (15, 23));

        let postgres = parse_timestamp("2024-01-15 23:30:00.5+03").unwrap();
        assert_eq!((postgres.day(), postgres.hour()), (15, 23));

        let zulu = parse_timestamp("2024-01-15T01:00:00Z").unwrap();
        assert_eq!(zulu.hour(), 1);
    }

    #[test]
    fn test_parse_date_only_and_minutes() {
        let midnight = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(midnight.hour(), 0);

        let minutes = parse_timestamp(" 2024-01-15 18:05 ").unwrap();
        assert_eq!((minutes.hour(), minutes.minute()), (18, 5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45 10:00:00").is_none());
    }

    #[test]
    fn test_load_reader_keeps_file_order() {
        let records = load(
            "activity_time,activity_type\n\
             2024-01-16 10:00:00,submit\n\
             2024-01-15 09:00:00,login\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].activity_type, "submit");
        assert_eq!(records[1].features().day_name, "Monday");
    }

    #[test]
    fn test_extra_columns_and_order_ignored() {
        let records = load(
            "user_id,activity_type,activity_time\n\
             42,login,2024-01-15 09:00:00\n",
        )
        .unwrap();
        assert_eq!(records[0].activity_type, "login");
        assert_eq!(records[0].features().hour_of_day, 9);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let err = load("timestamp,activity_type\n2024-01-15 09:00:00,login\n").unwrap_err();
        assert!(matches!(err, LowtideError::Input { .. }));
        assert!(err.to_string().contains("activity_time"));
    }

    #[test]
    fn test_bad_timestamp_names_line() {
        let err = load(
            "activity_time,activity_type\n\
             2024-01-15 09:00:00,login\n\
             not-a-date,login\n",
        )
        .unwrap_err();

        match err {
            LowtideError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("not-a-date"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        let records = load("activity_time,activity_type\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_custom_layout() {
        let source = ActivitySource::new(CsvSourceOptions {
            timestamp_column: "ts".to_string(),
            activity_type_column: "kind".to_string(),
            delimiter: b';',
        });
        let records = source
            .load_reader("ts;kind\n2024-01-20 07:00:00;view\n".as_bytes())
            .unwrap();
        assert_eq!(records[0].features().day_name, "Saturday");
        assert_eq!(records[0].activity_type, "view");
    }

    #[test]
    fn test_missing_file() {
        let err = load_activity_records("/nonexistent/activity_times.csv").unwrap_err();
        assert!(matches!(err, LowtideError::Input { .. }));
        assert!(err.to_string().contains("/nonexistent/activity_times.csv"));
    }
}
