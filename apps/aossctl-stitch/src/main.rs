//! aossctl-stitch - stitch benchmark metadata into a results file.
//!
//! ```text
//! OSB_START_TIME="2026-01-14 19:00:00" aossctl-stitch params.json results.md smoke
//! ```
//!
//! The results file is rewritten in place with a metadata header built from
//! the parameters file. The start time comes from `OSB_START_TIME`; the end
//! time is the current time in PDT.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aossctl_core::AossConfig;
use aossctl_report::{START_TIME_ENV, stitch_report};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "aossctl-stitch", version, about = "Prepend benchmark metadata to a results file")]
struct Cli {
    /// Flat JSON file of benchmark parameters.
    params_file: PathBuf,

    /// Results file to rewrite.
    results_file: PathBuf,

    /// Scenario name recorded in the header.
    scenario: String,

    /// Benchmark start time [default: OSB_START_TIME].
    #[arg(long, env = START_TIME_ENV)]
    start_time: Option<String>,
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

fn confirmation(results_file: &Path) -> String {
    format!(
        "Combined metadata + result markdown written to: {}",
        results_file.display()
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AossConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    stitch_report(
        &cli.params_file,
        &cli.results_file,
        &cli.scenario,
        cli.start_time.as_deref(),
        chrono::Utc::now(),
    )
    .with_context(|| format!("failed to stitch {}", cli.results_file.display()))?;

    info!(
        params = %cli.params_file.display(),
        results = %cli.results_file.display(),
        scenario = %cli.scenario,
        "stitched report"
    );
    println!("{}", confirmation(&cli.results_file));
    Ok(())
}
