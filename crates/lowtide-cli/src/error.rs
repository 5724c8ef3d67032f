//! Application-wide error types using thiserror.

use lowtide_common::LowtideError;
use std::path::PathBuf;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] lowtide_config::ConfigError),

    /// The activity log could not be read or parsed.
    #[error("failed to load activity records from {}", .path.display())]
    Load {
        /// Input file
        path: PathBuf,
        /// Underlying loader error
        #[source]
        source: LowtideError,
    },

    /// The dashboard could not be rendered or saved.
    #[error("failed to render activity dashboard to {}", .path.display())]
    Render {
        /// Output image
        path: PathBuf,
        /// Underlying rendering error
        #[source]
        source: LowtideError,
    },

    /// Writing the text report failed.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
