//! Shared formatting helpers.

use chrono::NaiveDateTime;
use num_format::{Locale, ToFormattedString};

/// Formats a count with thousands separators (`12345` -> `12,345`).
pub fn format_count(count: u64) -> String {
    count.to_formatted_string(&Locale::en)
}

/// Share of `count` in `total` as a percentage, `None` when `total` is zero.
#[allow(clippy::cast_precision_loss)]
pub fn percentage(count: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(count as f64 / total as f64 * 100.0)
    }
}

/// Formats a timestamp for display.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Formats an hour bucket as `HH:00-HH:00` without zero padding.
pub fn format_hour_range(hour: u8) -> String {
    format!("{}:00-{}:00", hour, u16::from(hour) + 1)
}
