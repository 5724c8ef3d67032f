//! # lowtide graphs
//!
//! Aggregation of activity records into count tables and rendering of the
//! four-panel activity dashboard.
//!
//! The [`ActivitySummary`] holds every table the dashboard and the text
//! report need; [`Dashboard`] lays out one panel per [`PanelRenderer`] on a
//! 2x2 grid and writes a PNG with plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod activity_types;
pub mod aggregator;
pub mod dashboard;
pub mod day_of_week;
pub mod heatmap;
pub mod hourly_distribution;
pub mod renderer;
pub mod types;

pub use activity_types::ActivityTypePanel;
pub use aggregator::{ActivitySeries, ActivitySummary, DayCount, DayHourCount, HourCount};
pub use dashboard::Dashboard;
pub use day_of_week::DayOfWeekPanel;
pub use heatmap::HeatmapPanel;
pub use hourly_distribution::HourlyDistributionPanel;
pub use renderer::PanelRenderer;
pub use types::{DashboardStyle, FontSizes};
