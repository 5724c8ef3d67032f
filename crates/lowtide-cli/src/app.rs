//! The analysis pipeline: load, summarise, render, report

use crate::error::{AppError, AppResult};
use crate::report::Reporter;
use lowtide_common::ActivitySource;
use lowtide_config::{Config, ConfigLoader, ConfigOverrides};
use lowtide_graphs::{ActivitySummary, Dashboard};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of records loaded
    pub records: u64,
    /// Path of the written dashboard, `None` when there was nothing to draw
    pub chart: Option<PathBuf>,
}

/// Load and validate the configuration stack
pub fn load_config(explicit: Option<&Path>, overrides: &ConfigOverrides) -> AppResult<Config> {
    Ok(ConfigLoader::load(explicit, overrides)?)
}

/// Run the full analysis with `config`, writing the report to `out`.
///
/// With zero records the report still prints every section, but no
/// image is rendered and an existing file at the output path is kept.
#[instrument(skip_all, fields(input = %config.input.path, output = %config.output.path))]
pub fn run<W: Write>(config: &Config, out: W) -> AppResult<RunOutcome> {
    let input = config.input.path_buf();
    let output = config.output.path_buf();
    let mut reporter = Reporter::new(out);

    info!("Loading activity data");
    let records = ActivitySource::new(config.input.source_options())
        .load_path(&input)
        .map_err(|source| AppError::Load {
            path: input.clone(),
            source,
        })?;

    let summary = ActivitySummary::from_records(&records);
    reporter.loaded(&summary)?;

    let chart = if summary.is_empty() {
        warn!(path = %input.display(), "No activity records found, skipping chart");
        None
    } else {
        render(config, &summary, &output)?;
        reporter.chart_saved(&output)?;
        Some(output)
    };

    reporter.analysis(&summary, config.report.lowest_periods)?;
    reporter.into_inner().flush()?;

    info!(records = summary.total(), "Analysis complete");
    Ok(RunOutcome {
        records: summary.total(),
        chart,
    })
}

fn render(config: &Config, summary: &ActivitySummary, output: &Path) -> AppResult<()> {
    let to_render_error = |source| AppError::Render {
        path: output.to_path_buf(),
        source,
    };

    let dashboard = Dashboard::from_config(&config.chart).map_err(to_render_error)?;
    dashboard
        .render_to_file(summary, output)
        .map_err(to_render_error)
}
