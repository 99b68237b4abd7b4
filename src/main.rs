//! CLI entry point for the rangeget binary.

use anyhow::Result;
use clap::Parser;
use rangeget_core::Downloader;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let downloader = Downloader::new();
    let outcome = downloader.download(&args.url, args.divisions).await?;

    info!(
        path = %outcome.path.display(),
        bytes = outcome.bytes_written,
        segmented = outcome.segmented,
        "Download complete"
    );

    Ok(())
}
