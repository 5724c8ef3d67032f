//! Day x hour activity heatmap with a colour bar

use crate::renderer::ylorrd;
use crate::{ActivitySummary, DashboardStyle, PanelRenderer};
use lowtide_common::{day_abbreviation, format_count, Result, DAYS_PER_WEEK, HOURS_PER_DAY};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Steps used to paint the colour bar gradient
const COLOR_BAR_STEPS: u32 = 100;

/// Heatmap of the dense day x hour matrix; Monday is the top row
#[derive(Debug, Clone)]
pub struct HeatmapPanel {
    title: String,
}

impl HeatmapPanel {
    /// Create the panel with its default caption
    pub fn new() -> Self {
        Self {
            title: "Activity heatmap (day of week x hour of day)".to_string(),
        }
    }

    /// Row on the plot for a day index; rows count up from the bottom
    const fn row_of(day_of_week: u32) -> u32 {
        DAYS_PER_WEEK as u32 - 1 - day_of_week
    }

    fn row_label(value: &SegmentValue<u32>) -> String {
        match value {
            SegmentValue::CenterOf(row) if *row < DAYS_PER_WEEK as u32 => {
                u8::try_from(Self::row_of(*row))
                    .ok()
                    .and_then(day_abbreviation)
                    .unwrap_or_default()
                    .to_string()
            }
            _ => String::new(),
        }
    }

    fn hour_label(value: &SegmentValue<u32>) -> String {
        match value {
            SegmentValue::CenterOf(hour) => hour.to_string(),
            _ => String::new(),
        }
    }

    /// Colour of a cell relative to the busiest cell
    #[allow(clippy::cast_precision_loss)]
    fn cell_color(count: u64, max_count: u64) -> RGBColor {
        if max_count == 0 {
            return ylorrd(0.0);
        }
        ylorrd(count as f64 / max_count as f64)
    }

    fn draw_color_bar<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        max_count: u64,
        style: &DashboardStyle,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        #[allow(clippy::cast_precision_loss)]
        let top = max_count.max(1) as f64;

        let mut bar = ChartBuilder::on(area)
            .margin_top(style.points(30))
            .margin_bottom(style.points(38))
            .margin_right(style.points(4))
            .y_label_area_size(style.points(44))
            .build_cartesian_2d(0f64..1f64, 0f64..top)?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let y_label = |value: &f64| format_count(value.round() as u64);
        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_desc("Number of activities")
            .axis_desc_style(self.axis_desc_font(style))
            .label_style(self.tick_font(style))
            .y_label_formatter(&y_label)
            .draw()?;

        let step = top / f64::from(COLOR_BAR_STEPS);
        bar.draw_series((0..COLOR_BAR_STEPS).map(|i| {
            let low = f64::from(i) * step;
            let color = ylorrd(f64::from(i) / f64::from(COLOR_BAR_STEPS - 1));
            Rectangle::new([(0.0, low), (1.0, low + step)], color.filled())
        }))?;

        Ok(())
    }
}

impl Default for HeatmapPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelRenderer for HeatmapPanel {
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
        let max_count = summary.max_bucket_count();
        let (width, _) = area.dim_in_pixel();
        let (map_area, bar_area) = area.split_horizontally(width * 86 / 100);

        let mut chart = ChartBuilder::on(&map_area)
            .caption(self.title(), self.caption_font(style))
            .margin(style.points(8))
            .x_label_area_size(style.points(30))
            .y_label_area_size(style.points(40))
            .build_cartesian_2d(
                (0u32..(HOURS_PER_DAY as u32 - 1)).into_segmented(),
                (0u32..(DAYS_PER_WEEK as u32 - 1)).into_segmented(),
            )?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(HOURS_PER_DAY)
            .y_labels(DAYS_PER_WEEK)
            .x_desc("Hour of day")
            .y_desc("Day of week")
            .axis_desc_style(self.axis_desc_font(style))
            .label_style(self.tick_font(style))
            .x_label_formatter(&Self::hour_label)
            .y_label_formatter(&Self::row_label)
            .draw()?;

        let cells = summary.matrix().iter().enumerate().flat_map(|(day, row)| {
            row.iter().enumerate().map(move |(hour, &count)| (day, hour, count))
        });
        chart.draw_series(cells.map(|(day, hour, count)| {
            // indices are bounded by the matrix dimensions
            let hour = u32::try_from(hour).unwrap_or_default();
            let row = Self::row_of(u32::try_from(day).unwrap_or_default());
            Rectangle::new(
                [
                    (SegmentValue::Exact(hour), SegmentValue::Exact(row)),
                    (SegmentValue::Exact(hour + 1), SegmentValue::Exact(row + 1)),
                ],
                Self::cell_color(count, max_count).filled(),
            )
        }))?;

        self.draw_color_bar(&bar_area, max_count, style)?;

        debug!(max_count, "Drew activity heatmap panel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{count_pixels, render_panel_pixels};
    use lowtide_common::test_utils::record_on;

    fn small_style() -> DashboardStyle {
        DashboardStyle {
            width: 900,
            height: 500,
            ..DashboardStyle::default()
        }
    }

    #[test]
    fn test_rows_put_monday_on_top() {
        assert_eq!(HeatmapPanel::row_of(0), 6);
        assert_eq!(HeatmapPanel::row_of(6), 0);
        assert_eq!(HeatmapPanel::row_label(&SegmentValue::CenterOf(6)), "Mon");
        assert_eq!(HeatmapPanel::row_label(&SegmentValue::CenterOf(0)), "Sun");
        assert_eq!(HeatmapPanel::row_label(&SegmentValue::CenterOf(7)), "");
    }

    #[test]
    fn test_cell_color_scale() {
        assert_eq!(HeatmapPanel::cell_color(0, 10), ylorrd(0.0));
        assert_eq!(HeatmapPanel::cell_color(10, 10), ylorrd(1.0));
        assert_eq!(HeatmapPanel::cell_color(0, 0), ylorrd(0.0));
    }

    #[test]
    fn test_empty_cells_use_lightest_color() {
        let records = vec![record_on(0, 9, "a"), record_on(0, 9, "a"), record_on(2, 14, "a")];
        let summary = ActivitySummary::from_records(&records);
        let style = small_style();
        let pixels = render_panel_pixels(&HeatmapPanel::new(), &summary, &style);

        // 166 zero cells plus the bottom of the colour bar
        assert!(count_pixels(&pixels, ylorrd(0.0)) > 10_000);
        // the busiest cell and the top of the colour bar
        assert!(count_pixels(&pixels, ylorrd(1.0)) > 0);
    }
}
