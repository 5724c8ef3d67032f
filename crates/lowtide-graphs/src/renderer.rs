//! Panel rendering trait and shared colour helpers

use crate::{ActivitySummary, DashboardStyle};
use lowtide_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Colour stops of the yellow-orange-red sequential map, light to dark
const YLORRD: [RGBColor; 9] = [
    RGBColor(255, 255, 204),
    RGBColor(255, 237, 160),
    RGBColor(254, 217, 118),
    RGBColor(254, 178, 76),
    RGBColor(253, 141, 60),
    RGBColor(252, 78, 42),
    RGBColor(227, 26, 28),
    RGBColor(189, 0, 38),
    RGBColor(128, 0, 38),
];

/// Line colours for the activity-type series, cycled in order
const SERIES_COLORS: [RGBColor; 8] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
];

/// One cell of the dashboard grid
pub trait PanelRenderer {
    /// Caption drawn above the panel
    fn title(&self) -> &str;

    /// Draw the panel into `area`
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        summary: &ActivitySummary,
        style: &DashboardStyle,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static;

    /// Font for the panel caption
    fn caption_font<'a>(&self, style: &'a DashboardStyle) -> TextStyle<'a> {
        (
            style.font_family.as_str(),
            style.font_sizes().panel_title,
            FontStyle::Bold,
        )
            .into()
    }

    /// Font for axis descriptions
    fn axis_desc_font<'a>(&self, style: &'a DashboardStyle) -> TextStyle<'a> {
        (style.font_family.as_str(), style.font_sizes().axis_desc).into()
    }

    /// Font for tick labels
    fn tick_font<'a>(&self, style: &'a DashboardStyle) -> TextStyle<'a> {
        (style.font_family.as_str(), style.font_sizes().tick_label).into()
    }

    /// Upper bound of a count axis: the largest value plus 10% headroom
    fn count_axis_max(&self, max_count: u64) -> u64 {
        if max_count == 0 {
            return 1;
        }
        max_count + (max_count / 10).max(1)
    }
}

/// Parse a `#RRGGBB` colour string
pub fn parse_color(color_str: &str) -> Option<RGBColor> {
    let hex = color_str.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Map `value` in `0.0..=1.0` onto the yellow-orange-red colour map
pub fn ylorrd(value: f64) -> RGBColor {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let scaled = value * (YLORRD.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = (scaled.floor() as usize).min(YLORRD.len() - 2);
    let t = scaled - lower as f64;

    let (a, b) = (YLORRD[lower], YLORRD[lower + 1]);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mix = |x: u8, y: u8| (f64::from(y) - f64::from(x)).mul_add(t, f64::from(x)).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Colour of the `index`-th activity series
pub const fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Render a single panel into an in-memory RGB buffer.
#[cfg(test)]
pub(crate) fn render_panel_pixels<P: PanelRenderer>(
    panel: &P,
    summary: &ActivitySummary,
    style: &DashboardStyle,
) -> Vec<u8> {
    let (width, height) = style.dimensions();
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&style.background).unwrap();
        panel.draw(&root, summary, style).unwrap();
        root.present().unwrap();
    }
    buffer
}

/// Number of pixels in an RGB buffer with exactly `color`.
#[cfg(test)]
pub(crate) fn count_pixels(buffer: &[u8], color: RGBColor) -> usize {
    buffer
        .chunks_exact(3)
        .filter(|px| px[0] == color.0 && px[1] == color.1 && px[2] == color.2)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#4682B4"), Some(RGBColor(70, 130, 180)));
        assert_eq!(parse_color("#ff7f50"), Some(RGBColor(255, 127, 80)));
        assert_eq!(parse_color("4682B4"), None);
        assert_eq!(parse_color("#4682B"), None);
        assert_eq!(parse_color("#GG82B4"), None);
        assert_eq!(parse_color("#é682B"), None);
    }

    #[test]
    fn test_ylorrd_endpoints() {
        assert_eq!(ylorrd(0.0), RGBColor(255, 255, 204));
        assert_eq!(ylorrd(1.0), RGBColor(128, 0, 38));
        assert_eq!(ylorrd(-3.0), ylorrd(0.0));
        assert_eq!(ylorrd(7.0), ylorrd(1.0));
        assert_eq!(ylorrd(f64::NAN), ylorrd(0.0));
    }

    #[test]
    fn test_ylorrd_darkens_monotonically() {
        let brightness = |c: RGBColor| u32::from(c.0) + u32::from(c.1) + u32::from(c.2);
        let mut previous = u32::MAX;
        for step in 0..=20 {
            let current = brightness(ylorrd(f64::from(step) / 20.0));
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_series_colors_cycle() {
        assert_eq!(series_color(0), series_color(8));
        assert_ne!(series_color(0), series_color(1));
    }
}
