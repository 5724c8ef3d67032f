//! Error types and utilities for lowtide

use thiserror::Error;

/// Boxed source error carried by the structured variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for lowtide operations
pub type Result<T> = std::result::Result<T, LowtideError>;

/// Main error type for lowtide operations
#[derive(Error, Debug)]
pub enum LowtideError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxError>,
    },

    /// Input source errors (missing file, malformed CSV, missing column)
    #[error("Input error: {message}")]
    Input {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxError>,
    },

    /// A value in the input could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// Human readable description
        message: String,
        /// 1-based line number in the input file
        line: u64,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxError>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description
        message: String,
        /// Offending field, when known
        field: Option<String>,
    },
}

impl LowtideError {
    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new input error with source
    pub fn input_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Input {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a parse error pointing at a line of the input
    pub fn parse_at(msg: impl Into<String>, line: u64) -> Self {
        Self::Parse {
            message: msg.into(),
            line,
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

/// Convert from csv::Error to LowtideError
impl From<csv::Error> for LowtideError {
    fn from(err: csv::Error) -> Self {
        let message = match err.position() {
            Some(pos) => format!("Malformed CSV input near line {}", pos.line()),
            None => "Malformed CSV input".to_string(),
        };
        Self::input_with_source(message, err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to LowtideError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for LowtideError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
