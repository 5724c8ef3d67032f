//! Activity by hour of day bar chart

use crate::{ActivitySummary, DashboardStyle, PanelRenderer};
use lowtide_common::{format_count, Result, HOURS_PER_DAY};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Bar chart of record counts per hour of day
#[derive(Debug, Clone)]
pub struct HourlyDistributionPanel {
    title: String,
}

impl HourlyDistributionPanel {
    /// Create the panel with its default caption
    pub fn new() -> Self {
        Self {
            title: "Activity by hour of day".to_string(),
        }
    }

    fn hour_label(value: &SegmentValue<u32>) -> String {
        match value {
            SegmentValue::CenterOf(hour) => hour.to_string(),
            _ => String::new(),
        }
    }
}

impl Default for HourlyDistributionPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelRenderer for HourlyDistributionPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        summary: &ActivitySummary,
        style: &DashboardStyle,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let hours = summary.by_hour();
        let max_count = hours.iter().map(|h| h.count).max().unwrap_or(0);
        let y_max = self.count_axis_max(max_count);

        let mut chart = ChartBuilder::on(area)
            .caption(self.title(), self.caption_font(style))
            .margin(style.points(8))
            .x_label_area_size(style.points(30))
            .y_label_area_size(style.points(48))
            .build_cartesian_2d((0u32..(HOURS_PER_DAY as u32 - 1)).into_segmented(), 0u64..y_max)?;

        let y_label = |count: &u64| format_count(*count);
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(TRANSPARENT)
            .x_labels(HOURS_PER_DAY)
            .x_desc("Hour of day")
            .y_desc("Number of activities")
            .axis_desc_style(self.axis_desc_font(style))
            .label_style(self.tick_font(style))
            .x_label_formatter(&Self::hour_label)
            .y_label_formatter(&y_label);
        if !style.show_grid {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;

        let gap = area.dim_in_pixel().0 / (HOURS_PER_DAY as u32 * 10);
        let fill = style.hour_bar_color.filled();
        let edge = BLACK.stroke_width(style.points(1));

        for shape in [fill, edge] {
            chart.draw_series(hours.iter().map(|h| {
                let hour = u32::from(h.hour);
                let mut rect = Rectangle::new(
                    [
                        (SegmentValue::Exact(hour), 0),
                        (SegmentValue::Exact(hour + 1), h.count),
                    ],
                    shape,
                );
                rect.set_margin(0, 0, gap, gap);
                rect
            }))?;
        }

        debug!(bars = hours.len(), "Drew hour of day panel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{count_pixels, render_panel_pixels};
    use lowtide_common::test_utils::{activity_fixtures, record_on};

    fn small_style() -> DashboardStyle {
        DashboardStyle {
            width: 800,
            height: 500,
            ..DashboardStyle::default()
        }
    }

    #[test]
    fn test_hour_labels() {
        assert_eq!(HourlyDistributionPanel::hour_label(&SegmentValue::CenterOf(0)), "0");
        assert_eq!(HourlyDistributionPanel::hour_label(&SegmentValue::CenterOf(23)), "23");
        assert_eq!(HourlyDistributionPanel::hour_label(&SegmentValue::Last), "");
    }

    #[test]
    fn test_draws_bars_in_bar_color() {
        let summary = ActivitySummary::from_records(&activity_fixtures::sample_week());
        let style = small_style();
        let pixels = render_panel_pixels(&HourlyDistributionPanel::new(), &summary, &style);
        assert!(count_pixels(&pixels, style.hour_bar_color) > 1000);
        assert_eq!(count_pixels(&pixels, style.day_bar_color), 0);
    }

    #[test]
    fn test_single_hour() {
        let summary = ActivitySummary::from_records(&[record_on(3, 23, "late")]);
        let style = small_style();
        let pixels = render_panel_pixels(&HourlyDistributionPanel::new(), &summary, &style);
        assert!(count_pixels(&pixels, style.hour_bar_color) > 0);
    }
}
