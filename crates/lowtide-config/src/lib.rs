//! # lowtide config
//!
//! Configuration management for lowtide.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! `LOWTIDE_*` environment variables, then command line overrides. The merged
//! result is validated once every layer has been applied.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader, ConfigOverrides};
pub use settings::{
    ChartConfig, Config, InputConfig, LoggingSettings, OutputConfig, ReportConfig,
};
