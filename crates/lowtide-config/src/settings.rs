//! Application configuration structures

use lowtide_common::{CsvSourceOptions, LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Where activity records are read from
    #[validate]
    pub input: InputConfig,

    /// Where the dashboard image is written
    #[validate]
    pub output: OutputConfig,

    /// Dashboard rendering settings
    #[validate]
    pub chart: ChartConfig,

    /// Text report settings
    #[validate]
    pub report: ReportConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// Input source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the CSV export
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub path: String,

    /// Header of the timestamp column
    #[validate(length(min = 1, message = "Timestamp column name cannot be empty"))]
    pub timestamp_column: String,

    /// Header of the activity-type column
    #[validate(length(min = 1, message = "Activity type column name cannot be empty"))]
    pub activity_type_column: String,

    /// Field delimiter, a single ASCII character
    #[validate(custom(function = "crate::validation::validate_delimiter"))]
    pub delimiter: String,
}

/// Output image configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the PNG file, overwritten on every run
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub path: String,
}

/// Dashboard rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels
    #[validate(range(min = 200, max = 10000, message = "Width must be between 200 and 10000 pixels"))]
    pub width: u32,

    /// Image height in pixels
    #[validate(range(min = 200, max = 10000, message = "Height must be between 200 and 10000 pixels"))]
    pub height: u32,

    /// Figure title drawn above the four panels
    #[validate(length(max = 200, message = "Title cannot exceed 200 characters"))]
    pub title: String,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Bar color of the day-of-week panel (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Day bar color must be valid hex color"))]
    pub day_bar_color: String,

    /// Bar color of the hour-of-day panel (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Hour bar color must be valid hex color"))]
    pub hour_bar_color: String,

    /// Font family for all text
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Whether to print counts above the day-of-week bars
    pub show_bar_values: bool,

    /// Whether to draw grid lines
    pub show_grid: bool,
}

/// Text report configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportConfig {
    /// How many of the least active (day, hour) pairs to list
    #[validate(range(min = 1, max = 168, message = "Lowest periods must be between 1 and 168"))]
    pub lowest_periods: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log filter: a level (trace, debug, info, warn, error) or
    /// `target=level` directives such as `warn,lowtide_graphs=debug`
    #[validate(custom(function = "crate::validation::validate_log_level"))]
    pub level: String,

    /// Line layout (pretty, compact, full)
    pub format: LogFormat,

    /// Optional log file path; stderr when absent
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub file: Option<String>,

    /// Whether to use colored output (for console logging)
    pub colored: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "Query_results/activity_times.csv".to_string(),
            timestamp_column: "activity_time".to_string(),
            activity_type_column: "activity_type".to_string(),
            delimiter: ",".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "activity_analysis.png".to_string(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 4800,
            height: 3600,
            title: "User activity analysis".to_string(),
            background_color: "#FFFFFF".to_string(),
            day_bar_color: "#4682B4".to_string(),
            hour_bar_color: "#FF7F50".to_string(),
            font_family: "sans-serif".to_string(),
            show_bar_values: true,
            show_grid: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { lowest_periods: 5 }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
            colored: true,
        }
    }
}

impl InputConfig {
    /// Column layout for the CSV source
    pub fn source_options(&self) -> CsvSourceOptions {
        CsvSourceOptions {
            timestamp_column: self.timestamp_column.clone(),
            activity_type_column: self.activity_type_column.clone(),
            // validated to be a single ASCII character
            delimiter: self.delimiter.bytes().next().unwrap_or(b','),
        }
    }

    /// Input path as a filesystem path
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl OutputConfig {
    /// Output path as a filesystem path
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl LoggingSettings {
    /// Build the subscriber configuration for `lowtide_common::init_logging`
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file.as_ref().map(PathBuf::from),
            ansi: self.colored,
        }
    }
}
