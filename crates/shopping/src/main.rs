//! Shopping predictor CLI
//!
//! Evaluates a nearest-neighbour purchase classifier on a session CSV and
//! prints the four-line summary to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use shopping_predictor::{pipeline, PredictorConfig, VERSION};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shopping")]
#[command(version = VERSION)]
#[command(about = "Predict whether online shopping sessions end in a purchase", long_about = None)]
struct Args {
    /// Session CSV with a header row and a Revenue column
    data: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = PredictorConfig::load().context("Failed to load configuration")?;
    info!("Shopping predictor v{}", VERSION);

    let report = pipeline::run(&args.data, &config)
        .with_context(|| format!("Failed to evaluate {}", args.data.display()))?;

    println!("{report}");
    Ok(())
}
