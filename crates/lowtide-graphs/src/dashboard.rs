//! The 2x2 activity dashboard

use crate::{
    ActivitySummary, ActivityTypePanel, DashboardStyle, DayOfWeekPanel, HeatmapPanel,
    HourlyDistributionPanel, PanelRenderer,
};
use lowtide_common::{LowtideError, Result};
use lowtide_config::ChartConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// Figure with a title and four panels: days and hours on top, the
/// day x hour heatmap and the per-type lines below
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    style: DashboardStyle,
    day_of_week: DayOfWeekPanel,
    hourly: HourlyDistributionPanel,
    heatmap: HeatmapPanel,
    activity_types: ActivityTypePanel,
}

impl Dashboard {
    /// Create a dashboard with the given style and the default panels
    pub fn new(style: DashboardStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Create a dashboard from a validated chart configuration
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        Ok(Self::new(DashboardStyle::from_config(config)?))
    }

    /// Style used for rendering
    pub const fn style(&self) -> &DashboardStyle {
        &self.style
    }

    /// Render the dashboard as a PNG at `path`.
    ///
    /// Any existing file is overwritten and missing parent directories are
    /// created. An empty summary is rejected before anything is written.
    #[instrument(skip(self, summary, path), fields(path = %path.as_ref().display()))]
    pub fn render_to_file<P: AsRef<Path>>(&self, summary: &ActivitySummary, path: P) -> Result<()> {
        let path = path.as_ref();
        Self::ensure_renderable(summary)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LowtideError::graph_with_source(
                    format!("Failed to create output directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let root = BitMapBackend::new(path, self.style.dimensions()).into_drawing_area();
        self.draw(&root, summary)?;
        root.present().map_err(|e| {
            LowtideError::graph_with_source(format!("Failed to write chart to {}", path.display()), e)
        })?;

        info!(
            width = self.style.width,
            height = self.style.height,
            "Saved activity dashboard"
        );
        Ok(())
    }

    /// Render the dashboard into a raw RGB pixel buffer
    pub fn render_to_buffer(&self, summary: &ActivitySummary) -> Result<Vec<u8>> {
        Self::ensure_renderable(summary)?;

        let (width, height) = self.style.dimensions();
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(&root, summary)?;
            root.present()?;
        }
        Ok(buffer)
    }

    /// Draw the figure title and the four panels onto `root`
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        summary: &ActivitySummary,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        root.fill(&self.style.background)?;

        let title_font: TextStyle = (
            self.style.font_family.as_str(),
            self.style.font_sizes().figure_title,
            FontStyle::Bold,
        )
            .into();
        let body = root.titled(&self.style.title, title_font)?;

        let panels = body.split_evenly((2, 2));
        let [top_left, top_right, bottom_left, bottom_right] = Self::quadrants(&panels)?;
        self.day_of_week.draw(top_left, summary, &self.style)?;
        self.hourly.draw(top_right, summary, &self.style)?;
        self.heatmap.draw(bottom_left, summary, &self.style)?;
        self.activity_types.draw(bottom_right, summary, &self.style)?;

        Ok(())
    }

    /// The four cells of the 2x2 grid, row by row
    fn quadrants<T>(cells: &[T]) -> Result<[&T; 4]> {
        match cells {
            [top_left, top_right, bottom_left, bottom_right] => {
                Ok([top_left, top_right, bottom_left, bottom_right])
            }
            _ => Err(LowtideError::graph(format!(
                "Expected 4 dashboard panels, layout produced {}",
                cells.len()
            ))),
        }
    }

    fn ensure_renderable(summary: &ActivitySummary) -> Result<()> {
        if summary.is_empty() {
            return Err(LowtideError::graph(
                "No activity data available for the dashboard",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{count_pixels, ylorrd};
    use lowtide_common::test_utils::{activity_fixtures, create_temp_dir, init_test_logging};

    fn small_dashboard() -> Dashboard {
        Dashboard::new(DashboardStyle {
            width: 1200,
            height: 900,
            ..DashboardStyle::default()
        })
    }

    #[test]
    fn test_rejects_empty_summary() {
        let dir = create_temp_dir();
        let path = dir.path().join("chart.png");
        let err = small_dashboard()
            .render_to_file(&ActivitySummary::default(), &path)
            .unwrap_err();

        assert!(matches!(err, LowtideError::Graph { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_quadrants_require_full_grid() {
        let cells = ["a", "b", "c", "d"];
        assert_eq!(Dashboard::quadrants(&cells).unwrap(), [&"a", &"b", &"c", &"d"]);

        let err = Dashboard::quadrants(&cells[..3]).unwrap_err();
        assert!(matches!(err, LowtideError::Graph { .. }));
        assert!(err.to_string().contains("produced 3"));
        assert!(Dashboard::quadrants::<&str>(&[]).is_err());
    }

    #[test]
    fn test_render_to_buffer_contains_every_panel() {
        init_test_logging();
        let dashboard = small_dashboard();
        let summary = ActivitySummary::from_records(&activity_fixtures::sample_week());
        let pixels = dashboard.render_to_buffer(&summary).unwrap();

        assert_eq!(pixels.len(), 1200 * 900 * 3);
        let style = dashboard.style();
        assert!(count_pixels(&pixels, style.day_bar_color) > 0);
        assert!(count_pixels(&pixels, style.hour_bar_color) > 0);
        assert!(count_pixels(&pixels, ylorrd(1.0)) > 0);
        assert!(count_pixels(&pixels, crate::renderer::series_color(0)) > 0);
    }

    #[test]
    fn test_render_to_file_creates_parent_and_overwrites() {
        init_test_logging();
        let dir = create_temp_dir();
        let path = dir.path().join("nested").join("out").join("activity_analysis.png");
        let summary = ActivitySummary::from_records(&activity_fixtures::three_records());
        let dashboard = small_dashboard();

        dashboard.render_to_file(&summary, &path).unwrap();
        assert!(path.exists());

        fs::write(&path, b"stale").unwrap();
        dashboard.render_to_file(&summary, &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
