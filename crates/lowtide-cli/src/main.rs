//! lowtide - Main Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

use lowtide_cli::app;
use lowtide_common::init_logging;
use lowtide_config::ConfigOverrides;

/// Find quiet release windows in a user activity log
#[derive(Parser, Debug)]
#[command(name = "lowtide")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Activity CSV to analyse
    #[arg(short, long)]
    input: Option<String>,

    /// Where to write the dashboard image
    #[arg(short, long)]
    output: Option<String>,

    /// Number of quietest (day, hour) slots to list
    #[arg(short = 'n', long)]
    lowest: Option<usize>,

    /// Log filter: a level or `target=level` directives (e.g. warn,lowtide_graphs=debug)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            lowest_periods: self.lowest,
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = app::load_config(args.config.as_deref(), &args.overrides())
        .context("failed to load configuration")?;

    init_logging(config.logging.to_logging_config()).context("failed to initialise logging")?;
    debug!(?config, "Configuration loaded");
    info!("Starting lowtide");

    let stdout = io::stdout().lock();
    let outcome = app::run(&config, stdout)?;

    debug!(?outcome, "Run finished");
    Ok(())
}
