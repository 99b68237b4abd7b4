//! Downloader entry point: probes server capability, dispatches to the
//! segmented or whole-fetch path, and persists the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::engine::{fetch_segmented, fetch_whole};
use super::error::DownloadError;
use super::plan::plan_ranges;
use super::probe::probe;
use super::sink::write_payload;

/// Downloads one resource, splitting it into parallel ranged requests when
/// the server allows.
///
/// Designed to be created once and reused: every segment fetch shares the
/// inner client and its connection pool.
///
/// # Example
///
/// ```no_run
/// use rangeget_core::Downloader;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let downloader = Downloader::new();
/// let outcome = downloader.download("https://example.com/file.bin", 5).await?;
/// println!("saved to {}", outcome.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

/// What a completed download did.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Final output path.
    pub path: PathBuf,
    /// Total payload size written.
    pub bytes_written: u64,
    /// Whether the parallel segmented path was taken.
    pub segmented: bool,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// Creates a downloader with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for large files)
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a downloader with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Downloads `url` into the current working directory.
    ///
    /// The output file is named after the URL's final path component;
    /// a pre-existing file at that name is overwritten.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`download_to`](Self::download_to).
    #[must_use = "the outcome reports where the payload was written"]
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download(
        &self,
        url: &str,
        divisions: u64,
    ) -> Result<DownloadOutcome, DownloadError> {
        self.download_to(url, divisions, Path::new(".")).await
    }

    /// Downloads `url` into `output_dir`.
    ///
    /// One HEAD probe decides the strategy: the segmented path is taken only
    /// when the server reports both byte-range support and a usable content
    /// length; otherwise the resource is fetched with a single unranged GET.
    /// A zero-length resource short-circuits to an empty file. Any error at
    /// the probe, fetch, or persist stage aborts the run with that error; no
    /// partial success is reported.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidDivisions`] when `divisions` is zero,
    /// [`DownloadError::InvalidUrl`] for an unparsable URL, a transport or
    /// HTTP-status error from the probe or fetch stages, or
    /// [`DownloadError::Io`] when persisting fails.
    #[must_use = "the outcome reports where the payload was written"]
    #[instrument(skip(self, output_dir), fields(url = %url))]
    pub async fn download_to(
        &self,
        url: &str,
        divisions: u64,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        if divisions == 0 {
            return Err(DownloadError::invalid_divisions(divisions));
        }
        // Reject malformed URLs before any request goes out.
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let resource = probe(&self.client, url).await?;

        let (payload, segmented) = if resource.segmentable() {
            let total_len = resource.total_length.unwrap_or(0);
            let ranges = plan_ranges(divisions, total_len);
            debug!(total_len, segments = ranges.len(), "taking segmented path");
            if ranges.is_empty() {
                // Empty resource: nothing to fetch, persist an empty file.
                (Vec::new(), true)
            } else {
                (fetch_segmented(&self.client, url, &ranges).await?, true)
            }
        } else {
            debug!("taking whole-fetch path");
            (fetch_whole(&self.client, url).await?.to_vec(), false)
        };

        let bytes_written = payload.len() as u64;
        let path = write_payload(output_dir, url, &payload).await?;

        info!(
            path = %path.display(),
            bytes = bytes_written,
            segmented,
            "download complete"
        );

        Ok(DownloadOutcome {
            path,
            bytes_written,
            segmented,
        })
    }
}

/// Default User-Agent identifying the tool.
fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("rangeget/{version}")
}
