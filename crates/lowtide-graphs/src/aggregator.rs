//! Aggregation of activity records into count tables

use chrono::NaiveDateTime;
use lowtide_common::{
    day_name, percentage, ActivityRecord, DAYS_PER_WEEK, HOURS_PER_DAY,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Number of records observed on one day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    /// Full English day name
    pub day_name: &'static str,
    /// Records on that day
    pub count: u64,
}

/// Number of records observed in one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourCount {
    /// 0-23
    pub hour: u8,
    /// Records in that hour
    pub count: u64,
}

/// Number of records observed in one (day, hour) bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayHourCount {
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    /// Full English day name
    pub day_name: &'static str,
    /// 0-23
    pub hour: u8,
    /// Records in that bucket
    pub count: u64,
}

/// Hourly counts of one activity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySeries {
    /// Activity label as found in the input
    pub activity_type: String,
    /// One point per observed hour (zero when this type has none there)
    pub points: Vec<HourCount>,
}

/// All count tables derived from one set of activity records.
///
/// Tables only contain keys that were observed. Days are ordered
/// Monday -> Sunday, hours 0 -> 23, (day, hour) pairs day-major, and
/// activity series by type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    total: u64,
    first: Option<NaiveDateTime>,
    last: Option<NaiveDateTime>,
    by_day: Vec<DayCount>,
    by_hour: Vec<HourCount>,
    by_day_hour: Vec<DayHourCount>,
    matrix: [[u64; HOURS_PER_DAY]; DAYS_PER_WEEK],
    series: Vec<ActivitySeries>,
}

impl ActivitySummary {
    /// Count `records` by day, hour, (day, hour) and (hour, activity type)
    #[instrument(skip(records), fields(records = records.len()))]
    pub fn from_records(records: &[ActivityRecord]) -> Self {
        let mut summary = Self::default();
        let mut per_day: BTreeMap<u8, u64> = BTreeMap::new();
        let mut per_hour: BTreeMap<u8, u64> = BTreeMap::new();
        let mut per_type: BTreeMap<&str, BTreeMap<u8, u64>> = BTreeMap::new();

        for record in records {
            let features = record.features();
            *per_day.entry(features.day_of_week).or_insert(0) += 1;
            *per_hour.entry(features.hour_of_day).or_insert(0) += 1;
            summary.matrix[usize::from(features.day_of_week)][usize::from(features.hour_of_day)] += 1;
            *per_type
                .entry(record.activity_type.as_str())
                .or_default()
                .entry(features.hour_of_day)
                .or_insert(0) += 1;

            summary.first = Some(summary.first.map_or(record.timestamp, |t| t.min(record.timestamp)));
            summary.last = Some(summary.last.map_or(record.timestamp, |t| t.max(record.timestamp)));
        }

        summary.total = records.len() as u64;

        summary.by_day = per_day
            .into_iter()
            .map(|(day_of_week, count)| DayCount {
                day_of_week,
                day_name: day_name(day_of_week).unwrap_or_default(),
                count,
            })
            .collect();

        summary.by_hour = per_hour
            .iter()
            .map(|(&hour, &count)| HourCount { hour, count })
            .collect();

        for (day_index, row) in summary.matrix.iter().enumerate() {
            for (hour_index, &count) in row.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                // indices are bounded by DAYS_PER_WEEK and HOURS_PER_DAY
                let day_of_week = u8::try_from(day_index).unwrap_or_default();
                summary.by_day_hour.push(DayHourCount {
                    day_of_week,
                    day_name: day_name(day_of_week).unwrap_or_default(),
                    hour: u8::try_from(hour_index).unwrap_or_default(),
                    count,
                });
            }
        }

        summary.series = per_type
            .into_iter()
            .map(|(activity_type, hours)| ActivitySeries {
                activity_type: activity_type.to_string(),
                points: per_hour
                    .keys()
                    .map(|&hour| HourCount {
                        hour,
                        count: hours.get(&hour).copied().unwrap_or(0),
                    })
                    .collect(),
            })
            .collect();

        debug!(
            days = summary.by_day.len(),
            hours = summary.by_hour.len(),
            buckets = summary.by_day_hour.len(),
            activity_types = summary.series.len(),
            "Aggregated activity records"
        );
        summary
    }

    /// Number of records summarised
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Whether no records were summarised
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Earliest and latest timestamp, `None` without records
    pub fn period(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.first.zip(self.last)
    }

    /// Counts per observed day, Monday -> Sunday
    pub fn by_day(&self) -> &[DayCount] {
        &self.by_day
    }

    /// Counts per observed hour, 0 -> 23
    pub fn by_hour(&self) -> &[HourCount] {
        &self.by_hour
    }

    /// Counts per observed (day, hour), day-major
    pub fn by_day_hour(&self) -> &[DayHourCount] {
        &self.by_day_hour
    }

    /// Dense day x hour matrix, rows Monday -> Sunday, zero filled
    pub const fn matrix(&self) -> &[[u64; HOURS_PER_DAY]; DAYS_PER_WEEK] {
        &self.matrix
    }

    /// One hourly series per activity type, sorted by type
    pub fn activity_series(&self) -> &[ActivitySeries] {
        &self.series
    }

    /// Share of `count` in the total as a percentage, `None` without records
    pub fn percentage(&self, count: u64) -> Option<f64> {
        percentage(count, self.total)
    }

    /// Day with the fewest records; the earliest day wins ties
    pub fn least_active_day(&self) -> Option<&DayCount> {
        self.by_day.iter().min_by_key(|day| day.count)
    }

    /// Hour with the fewest records; the earliest hour wins ties
    pub fn least_active_hour(&self) -> Option<&HourCount> {
        self.by_hour.iter().min_by_key(|hour| hour.count)
    }

    /// The `n` quietest (day, hour) buckets, ascending by count.
    ///
    /// Equal counts keep their day-major order.
    pub fn lowest_periods(&self, n: usize) -> Vec<DayHourCount> {
        let mut buckets = self.by_day_hour.clone();
        buckets.sort_by_key(|bucket| bucket.count);
        buckets.truncate(n);
        buckets
    }

    /// Largest single cell of the day x hour matrix
    pub fn max_bucket_count(&self) -> u64 {
        self.by_day_hour.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
