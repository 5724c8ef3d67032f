//! Activity by type and hour of day line chart

use crate::renderer::series_color;
use crate::{ActivitySummary, DashboardStyle, PanelRenderer};
use lowtide_common::{format_count, Result, HOURS_PER_DAY};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// One line per activity type across the observed hours, with circle
/// markers and a legend
#[derive(Debug, Clone)]
pub struct ActivityTypePanel {
    title: String,
}

impl ActivityTypePanel {
    /// Create the panel with its default caption
    pub fn new() -> Self {
        Self {
            title: "Activity by type and hour of day".to_string(),
        }
    }

    /// Legend text for an activity type; blank labels stay visible
    fn legend_label(activity_type: &str) -> String {
        if activity_type.trim().is_empty() {
            "(none)".to_string()
        } else {
            activity_type.to_string()
        }
    }
}

impl Default for ActivityTypePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelRenderer for ActivityTypePanel {
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
        let series = summary.activity_series();
        let max_count = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.count))
            .max()
            .unwrap_or(0);
        let y_max = self.count_axis_max(max_count);

        let mut chart = ChartBuilder::on(area)
            .caption(self.title(), self.caption_font(style))
            .margin(style.points(8))
            .x_label_area_size(style.points(30))
            .y_label_area_size(style.points(48))
            .build_cartesian_2d(0u32..(HOURS_PER_DAY as u32 - 1), 0u64..y_max)?;

        let y_label = |count: &u64| format_count(*count);
        let mut mesh = chart.configure_mesh();
        mesh.bold_line_style(BLACK.mix(0.15))
            .light_line_style(TRANSPARENT)
            .x_labels(HOURS_PER_DAY)
            .x_desc("Hour of day")
            .y_desc("Number of activities")
            .axis_desc_style(self.axis_desc_font(style))
            .label_style(self.tick_font(style))
            .y_label_formatter(&y_label);
        if !style.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let line_width = style.points(2);
        let marker_size = style.points(3);

        for (index, activity) in series.iter().enumerate() {
            let color = series_color(index);
            let points: Vec<(u32, u64)> = activity
                .points
                .iter()
                .map(|p| (u32::from(p.hour), p.count))
                .collect();

            chart
                .draw_series(LineSeries::new(
                    points.iter().copied(),
                    color.stroke_width(line_width),
                ))?
                .label(Self::legend_label(&activity.activity_type))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(line_width))
                });

            chart.draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, marker_size, color.filled())),
            )?;
        }

        if !series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.4))
                .label_font((style.font_family.as_str(), style.font_sizes().annotation))
                .draw()?;
        }

        debug!(series = series.len(), "Drew activity type panel");
        Ok(())
    }
}
