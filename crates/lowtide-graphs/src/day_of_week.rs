//! Activity by day of week bar chart

use crate::{ActivitySummary, DashboardStyle, PanelRenderer};
use lowtide_common::{day_abbreviation, format_count, Result, DAYS_PER_WEEK};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

/// Bar chart of record counts per day, Monday first
#[derive(Debug, Clone)]
pub struct DayOfWeekPanel {
    title: String,
}

impl DayOfWeekPanel {
    /// Create the panel with its default caption
    pub fn new() -> Self {
        Self {
            title: "Activity by day of week".to_string(),
        }
    }

    /// Label for a position on the segmented day axis
    fn day_label(value: &SegmentValue<u32>) -> String {
        match value {
            SegmentValue::CenterOf(day) => u8::try_from(*day)
                .ok()
                .and_then(day_abbreviation)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        }
    }
}

impl Default for DayOfWeekPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelRenderer for DayOfWeekPanel {
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
        let days = summary.by_day();
        let max_count = days.iter().map(|d| d.count).max().unwrap_or(0);
        let y_max = self.count_axis_max(max_count);

        let mut chart = ChartBuilder::on(area)
            .caption(self.title(), self.caption_font(style))
            .margin(style.points(8))
            .x_label_area_size(style.points(30))
            .y_label_area_size(style.points(48))
            .build_cartesian_2d((0u32..(DAYS_PER_WEEK as u32 - 1)).into_segmented(), 0u64..y_max)?;

        let y_label = |count: &u64| format_count(*count);
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(TRANSPARENT)
            .x_desc("Day of week")
            .y_desc("Number of activities")
            .axis_desc_style(self.axis_desc_font(style))
            .label_style(self.tick_font(style))
            .x_label_formatter(&Self::day_label)
            .y_label_formatter(&y_label);
        if !style.show_grid {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;

        let gap = area.dim_in_pixel().0 / (DAYS_PER_WEEK as u32 * 10);
        let bar = |day: u32, count: u64, shape: ShapeStyle| {
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(day), 0),
                    (SegmentValue::Exact(day + 1), count),
                ],
                shape,
            );
            rect.set_margin(0, 0, gap, gap);
            rect
        };

        let fill = style.day_bar_color.filled();
        let edge = BLACK.stroke_width(style.points(1));
        chart.draw_series(
            days.iter()
                .map(|d| bar(u32::from(d.day_of_week), d.count, fill)),
        )?;
        chart.draw_series(
            days.iter()
                .map(|d| bar(u32::from(d.day_of_week), d.count, edge)),
        )?;

        if style.show_bar_values {
            let value_style = TextStyle::from(
                (style.font_family.as_str(), style.font_sizes().annotation).into_font(),
            )
            .pos(Pos::new(HPos::Center, VPos::Bottom));

            chart.draw_series(days.iter().map(|d| {
                Text::new(
                    format_count(d.count),
                    (SegmentValue::CenterOf(u32::from(d.day_of_week)), d.count),
                    value_style.clone(),
                )
            }))?;
        }

        debug!(bars = days.len(), "Drew day of week panel");
        Ok(())
    }
}
