//! Structured logging infrastructure for lowtide
//!
//! Diagnostics go to stderr (or a log file) so that the text report printed
//! on stdout stays machine-friendly.

use crate::{LowtideError, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output layout of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human friendly output
    Pretty,
    /// Single-line abbreviated output
    #[default]
    Compact,
    /// Single-line output with all span fields
    Full,
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log filter in `EnvFilter` directive syntax (e.g., "info", "warn,lowtide_graphs=trace")
    pub level: String,
    /// Line layout
    pub format: LogFormat,
    /// Optional file path for log output; stderr when absent
    pub file_path: Option<PathBuf>,
    /// Whether to use ANSI colors (ignored for file output)
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file_path: None,
            ansi: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration
///
/// Fails if the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| LowtideError::config_with_source("Invalid log filter", e))?;

    let (writer, ansi) = match &config.file_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    LowtideError::config_with_source(
                        format!("Failed to open log file {}", path.display()),
                        e,
                    )
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), config.ansi),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Full => registry
            .with(
                fmt::layer()
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
    };

    installed.map_err(|e| LowtideError::config_with_source("Failed to install tracing subscriber", e))
}
