//! Plain-text activity report

use lowtide_common::{format_count, format_hour_range, format_timestamp, DAY_NAMES};
use lowtide_graphs::ActivitySummary;
use std::io::{self, Write};
use std::path::Path;

/// Width of the `=` rules framing each section header
const RULE_WIDTH: usize = 60;

/// Printed in place of rows when nothing was loaded
const NO_DATA: &str = "No activity data";

/// Writes the console report for one [`ActivitySummary`].
///
/// Every method writes a complete block of lines so the pipeline can
/// interleave them with rendering.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    /// Report into `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Record count and the covered period
    pub fn loaded(&mut self, summary: &ActivitySummary) -> io::Result<()> {
        writeln!(
            self.out,
            "Loaded {} activity records",
            format_count(summary.total())
        )?;
        match summary.period() {
            Some((first, last)) => writeln!(
                self.out,
                "Data period: {} - {}",
                format_timestamp(&first),
                format_timestamp(&last)
            ),
            None => writeln!(self.out, "Data period: {NO_DATA}"),
        }
    }

    /// Where the dashboard image went
    pub fn chart_saved(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "\nChart saved to {}", path.display())
    }

    /// All statistics sections followed by the closing banner
    pub fn analysis(&mut self, summary: &ActivitySummary, lowest: usize) -> io::Result<()> {
        self.days(summary)?;
        self.hours(summary)?;
        self.least_active(summary)?;
        self.lowest_periods(summary, lowest)?;
        self.header("ANALYSIS COMPLETE")
    }

    fn header(&mut self, title: &str) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "\n{rule}")?;
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{rule}")
    }

    fn days(&mut self, summary: &ActivitySummary) -> io::Result<()> {
        self.header("ACTIVITY BY DAY OF WEEK")?;
        if summary.is_empty() {
            return writeln!(self.out, "{NO_DATA}");
        }
        // all seven days, Monday first, zero for days without records
        for (day_of_week, day_name) in (0u8..).zip(DAY_NAMES) {
            let count = summary
                .by_day()
                .iter()
                .find(|day| day.day_of_week == day_of_week)
                .map_or(0, |day| day.count);
            writeln!(
                self.out,
                "{:<15}: {:>8} activities ({:5.2}%)",
                day_name,
                format_count(count),
                summary.percentage(count).unwrap_or_default()
            )?;
        }
        Ok(())
    }

    fn hours(&mut self, summary: &ActivitySummary) -> io::Result<()> {
        self.header("ACTIVITY BY HOUR OF DAY")?;
        if summary.is_empty() {
            return writeln!(self.out, "{NO_DATA}");
        }
        for hour in summary.by_hour() {
            writeln!(
                self.out,
                "Hour {:>2}:00-{:>2}:00: {:>8} activities ({:5.2}%)",
                hour.hour,
                u16::from(hour.hour) + 1,
                format_count(hour.count),
                summary.percentage(hour.count).unwrap_or_default()
            )?;
        }
        Ok(())
    }

    fn least_active(&mut self, summary: &ActivitySummary) -> io::Result<()> {
        self.header("LEAST ACTIVE PERIODS (recommended release windows)")?;
        let (Some(day), Some(hour)) = (summary.least_active_day(), summary.least_active_hour())
        else {
            return writeln!(self.out, "{NO_DATA}");
        };

        writeln!(
            self.out,
            "\nLeast active day: {} ({} activities)",
            day.day_name,
            format_count(day.count)
        )?;
        writeln!(
            self.out,
            "Least active hour: {} ({} activities)",
            format_hour_range(hour.hour),
            format_count(hour.count)
        )
    }

    fn lowest_periods(&mut self, summary: &ActivitySummary, n: usize) -> io::Result<()> {
        self.header(&format!("TOP-{n} LEAST ACTIVE PERIODS (day + hour)"))?;
        if summary.is_empty() {
            return writeln!(self.out, "{NO_DATA}");
        }
        for period in summary.lowest_periods(n) {
            writeln!(
                self.out,
                "{:<15} {:>2}:00 - {:>6} activities",
                period.day_name,
                period.hour,
                format_count(period.count)
            )?;
        }
        Ok(())
    }
}
