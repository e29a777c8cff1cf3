// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `idf-extract`: run the extraction pipeline over IDF files
//!
//! Prints a JSON array with one report per readable file. Files that fail
//! are reported on stderr and make the exit code 1.
//!
//! Environment:
//!
//! - `RUST_LOG`: tracing filter (default `info`)
//! - `IDF_THREADS`: worker threads for parallel file processing

use anyhow::{Context, Result};
use clap::Parser;
use idf_lite_processing::{run_file, BuildingReport, ExtractionConfig};
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "idf-extract")]
#[command(about = "Extract zone metrics and HVAC classifications from EnergyPlus IDF files")]
#[command(version)]
struct Cli {
    /// IDF files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON file overriding extraction defaults
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every file was processed
fn execute(cli: &Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => ExtractionConfig::from_json_file(path)?,
        None => ExtractionConfig::default(),
    };

    if let Some(threads) = worker_threads()? {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize worker pool")?;
    }

    let start = Instant::now();
    let results: Vec<_> = cli
        .files
        .par_iter()
        .map(|path| (path, run_file(path, &config)))
        .collect();

    let mut reports: Vec<BuildingReport> = Vec::with_capacity(results.len());
    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                failed += 1;
                eprintln!("{}: {e}", path.display());
            }
        }
    }

    tracing::info!(
        files = cli.files.len(),
        failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Processed files"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&reports)
    } else {
        serde_json::to_string(&reports)
    }
    .context("Failed to serialize reports")?;
    println!("{json}");

    Ok(failed == 0)
}

fn worker_threads() -> Result<Option<usize>> {
    match std::env::var("IDF_THREADS") {
        Ok(value) => {
            let threads = value
                .trim()
                .parse::<usize>()
                .with_context(|| format!("IDF_THREADS must be a positive integer, got {value:?}"))?;
            Ok(Some(threads.max(1)))
        }
        Err(_) => Ok(None),
    }
}
