//! Dashboard styling derived from the chart configuration

use crate::renderer::parse_color;
use lowtide_common::{LowtideError, Result};
use lowtide_config::ChartConfig;
use plotters::style::RGBColor;

/// Point-per-pixel reference: the default 3600 px height is a 12 inch
/// figure at 300 DPI, i.e. 864 points tall.
const REFERENCE_POINTS: u32 = 864;

/// Resolved styling for one dashboard render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStyle {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Figure title
    pub title: String,
    /// Figure background
    pub background: RGBColor,
    /// Fill of the day-of-week bars
    pub day_bar_color: RGBColor,
    /// Fill of the hour-of-day bars
    pub hour_bar_color: RGBColor,
    /// Font family for all text
    pub font_family: String,
    /// Print counts above the day-of-week bars
    pub show_bar_values: bool,
    /// Draw grid lines
    pub show_grid: bool,
}

/// Text sizes in pixels, scaled with the image height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSizes {
    /// Figure title
    pub figure_title: u32,
    /// Panel captions
    pub panel_title: u32,
    /// Axis descriptions
    pub axis_desc: u32,
    /// Tick labels
    pub tick_label: u32,
    /// Values printed above bars and legend entries
    pub annotation: u32,
}

impl DashboardStyle {
    /// Resolve a validated chart configuration
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        let color = |field: &str, value: &str| {
            parse_color(value).ok_or_else(|| {
                LowtideError::validation_field(format!("Invalid hex color '{value}'"), field)
            })
        };

        Ok(Self {
            width: config.width,
            height: config.height,
            title: config.title.clone(),
            background: color("chart.background_color", &config.background_color)?,
            day_bar_color: color("chart.day_bar_color", &config.day_bar_color)?,
            hour_bar_color: color("chart.hour_bar_color", &config.hour_bar_color)?,
            font_family: config.font_family.clone(),
            show_bar_values: config.show_bar_values,
            show_grid: config.show_grid,
        })
    }

    /// Image dimensions as expected by plotters backends
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Convert a size in points to pixels for this image height
    pub const fn points(&self, points: u32) -> u32 {
        let px = points * self.height / REFERENCE_POINTS;
        if px == 0 {
            1
        } else {
            px
        }
    }

    /// Text sizes for this image
    pub const fn font_sizes(&self) -> FontSizes {
        FontSizes {
            figure_title: self.points(16),
            panel_title: self.points(12),
            axis_desc: self.points(10),
            tick_label: self.points(9),
            annotation: self.points(8),
        }
    }
}

impl Default for DashboardStyle {
    fn default() -> Self {
        Self {
            width: 4800,
            height: 3600,
            title: "User activity analysis".to_string(),
            background: RGBColor(255, 255, 255),
            day_bar_color: RGBColor(70, 130, 180),
            hour_bar_color: RGBColor(255, 127, 80),
            font_family: "sans-serif".to_string(),
            show_bar_values: true,
            show_grid: true,
        }
    }
}
