//! Configuration loading utilities

use crate::Config;
use lowtide_common::LowtideError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "LOWTIDE_CONFIG_PATH";

/// Configuration files probed in the working directory, in order
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["lowtide.yaml", "lowtide.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration {}: {source}", .path.display())]
    Parse {
        /// File that could not be parsed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: serde_yaml::Error,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Offending variable
        var: String,
        /// Underlying cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for LowtideError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("Failed to load configuration", err)
    }
}

/// Values supplied on the command line; they win over every other layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Input CSV path
    pub input: Option<String>,
    /// Output image path
    pub output: Option<String>,
    /// Number of least active (day, hour) pairs to list
    pub lowest_periods: Option<usize>,
    /// Log level
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Apply the overrides that are set
    pub fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.path.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.path.clone_from(output);
        }
        if let Some(lowest) = self.lowest_periods {
            config.report.lowest_periods = lowest;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the full configuration stack.
    ///
    /// The YAML file is `explicit` when given, else `LOWTIDE_CONFIG_PATH`,
    /// else the first of `lowtide.yaml`/`lowtide.yml` that exists; with none
    /// of those the built-in defaults are used.
    pub fn load(
        explicit: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Config, ConfigError> {
        Self::load_with(explicit, overrides, |name| env::var(name).ok())
    }

    /// Like [`ConfigLoader::load`] with a custom environment lookup
    pub fn load_with<F>(
        explicit: Option<&Path>,
        overrides: &ConfigOverrides,
        lookup: F,
    ) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match Self::locate(explicit, &lookup) {
            Some(path) => Self::read_file(&path)?,
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_overrides_from(&mut config, &lookup)?;
        overrides.apply(&mut config);
        config.validate()?;

        Ok(config)
    }

    fn locate<F>(explicit: Option<&Path>, lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = lookup(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
    }

    fn read_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Apply `LOWTIDE_*` overrides read through `lookup`
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("LOWTIDE_INPUT_PATH") {
            config.input.path = path;
        }

        if let Some(path) = lookup("LOWTIDE_OUTPUT_PATH") {
            config.output.path = path;
        }

        if let Some(width) = lookup("LOWTIDE_CHART_WIDTH") {
            config.chart.width = parse_var("LOWTIDE_CHART_WIDTH", &width)?;
        }

        if let Some(height) = lookup("LOWTIDE_CHART_HEIGHT") {
            config.chart.height = parse_var("LOWTIDE_CHART_HEIGHT", &height)?;
        }

        if let Some(lowest) = lookup("LOWTIDE_LOWEST_PERIODS") {
            config.report.lowest_periods = parse_var("LOWTIDE_LOWEST_PERIODS", &lowest)?;
        }

        if let Some(level) = lookup("LOWTIDE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("LOWTIDE_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParse {
        var: var.to_string(),
        source: Box::new(e),
    })
}
