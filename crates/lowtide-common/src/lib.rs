//! # lowtide common
//!
//! Shared types, input loading, logging and error handling for lowtide.
//!
//! This crate provides the foundational pieces used by every other crate in
//! the workspace: the activity record model and its calendar features, the
//! CSV source, the error type and the tracing bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod source;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{LowtideError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use source::{load_activity_records, parse_timestamp, ActivitySource, CsvSourceOptions};
pub use types::*;
pub use utils::*;
