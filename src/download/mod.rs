//! Segmented HTTP download engine.
//!
//! This module fetches one resource identified by a URL and persists it to a
//! local file. A header-only probe decides the strategy: servers that accept
//! byte ranges and report a usable content length are fetched with parallel
//! ranged requests, everything else with a single unranged GET. The whole
//! payload is assembled in memory before it is written out.
//!
//! # Example
//!
//! ```no_run
//! use rangeget_core::Downloader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = Downloader::new();
//! let outcome = downloader
//!     .download("https://example.com/archive.tar.gz", 5)
//!     .await?;
//! println!("Saved {} bytes to {}", outcome.bytes_written, outcome.path.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod plan;
mod probe;
mod sink;

pub use client::{DownloadOutcome, Downloader};
pub use constants::DEFAULT_DIVISIONS;
pub use error::DownloadError;
pub use plan::{ByteRange, plan_ranges};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
