//! Activity record model and calendar feature derivation.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Number of days in the Monday-start week.
pub const DAYS_PER_WEEK: usize = 7;

/// Number of hour buckets in a day.
pub const HOURS_PER_DAY: usize = 24;

/// Full English day names, indexed by day-of-week (0 = Monday).
pub const DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One logged user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Wall-clock time of the action as written in the source
    pub timestamp: NaiveDateTime,
    /// Free-form activity label (e.g. "login", "submit")
    pub activity_type: String,
}

impl ActivityRecord {
    /// Create a new record
    pub fn new(timestamp: NaiveDateTime, activity_type: impl Into<String>) -> Self {
        Self {
            timestamp,
            activity_type: activity_type.into(),
        }
    }

    /// Derive the calendar features of this record
    pub fn features(&self) -> ActivityFeatures {
        ActivityFeatures::from_timestamp(&self.timestamp)
    }
}

/// Calendar features derived from a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityFeatures {
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    /// Full English day name
    pub day_name: &'static str,
    /// 0-23
    pub hour_of_day: u8,
}

impl ActivityFeatures {
    /// Compute features using the fixed Monday-start week convention
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        let day_of_week = weekday_to_index(timestamp.weekday());
        Self {
            day_of_week,
            day_name: DAY_NAMES[usize::from(day_of_week)],
            // hour() is always < 24
            hour_of_day: u8::try_from(timestamp.hour()).unwrap_or(0),
        }
    }
}

/// Convert weekday to numeric index (Monday = 0, Sunday = 6)
pub const fn weekday_to_index(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    }
}

/// Full day name for a day-of-week index, `None` when out of range
pub fn day_name(day_of_week: u8) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(day_of_week)).copied()
}

/// Three-letter day abbreviation for axis labels
pub fn day_abbreviation(day_of_week: u8) -> Option<&'static str> {
    day_name(day_of_week).map(|name| &name[..3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_features_monday_start_week() {
        // 2024-01-15 is a Monday
        let features = ActivityFeatures::from_timestamp(&at(2024, 1, 15, 9));
        assert_eq!(features.day_of_week, 0);
        assert_eq!(features.day_name, "Monday");
        assert_eq!(features.hour_of_day, 9);

        let sunday = ActivityFeatures::from_timestamp(&at(2024, 1, 21, 23));
        assert_eq!(sunday.day_of_week, 6);
        assert_eq!(sunday.day_name, "Sunday");
        assert_eq!(sunday.hour_of_day, 23);
    }

    #[test]
    fn test_record_features() {
        let record = ActivityRecord::new(at(2024, 1, 16, 0), "login");
        let features = record.features();
        assert_eq!(features.day_name, "Tuesday");
        assert_eq!(features.hour_of_day, 0);
    }

    #[test]
    fn test_weekday_index_order() {
        let week = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for (index, weekday) in (0u8..).zip(week) {
            assert_eq!(weekday_to_index(weekday), index);
        }
    }

    #[test]
    fn test_day_names() {
        assert_eq!(day_name(0), Some("Monday"));
        assert_eq!(day_name(6), Some("Sunday"));
        assert_eq!(day_name(7), None);
        assert_eq!(day_abbreviation(2), Some("Wed"));
    }
}
