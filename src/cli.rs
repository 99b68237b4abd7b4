//! CLI argument definitions using clap derive macros.

use clap::Parser;

use rangeget_core::DEFAULT_DIVISIONS;

/// Download a single URL, splitting it into parallel ranged requests when the
/// server supports them.
#[derive(Parser, Debug)]
#[command(name = "rangeget")]
#[command(author, version, about)]
pub struct Args {
    /// URL of the resource to download
    pub url: String,

    /// Number of byte ranges to split the download into (1-100)
    #[arg(short = 'd', long, default_value_t = DEFAULT_DIVISIONS, value_parser = clap::value_parser!(u64).range(1..=100))]
    pub divisions: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
