//! Capability probe: learns range support and resource length before a fetch.

use reqwest::Client;
use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH};
use tracing::{debug, warn};

use super::error::DownloadError;

/// What one header-only probe learned about a resource.
///
/// Populated once per download and immutable afterward.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResourceInfo {
    /// Whether the server advertised `Accept-Ranges: bytes`.
    pub supports_ranges: bool,
    /// Parsed `Content-Length`, when present and numeric.
    pub total_length: Option<u64>,
}

impl ResourceInfo {
    /// Ranged download is viable only with both range support and a usable length.
    pub(crate) fn segmentable(self) -> bool {
        self.supports_ranges && self.total_length.is_some()
    }
}

/// Issues one HEAD request and inspects `Accept-Ranges` and `Content-Length`.
///
/// An absent header, a token other than `bytes`, or an unparsable length all
/// force the whole-fetch fallback rather than failing the run. The same goes
/// for a non-success probe status: servers that reject HEAD often still serve
/// GET, and the fallback fetch will surface any real failure. Transport-level
/// errors abort the operation.
pub(crate) async fn probe(client: &Client, url: &str) -> Result<ResourceInfo, DownloadError> {
    let response = client.head(url).send().await.map_err(|e| {
        if e.is_timeout() {
            DownloadError::timeout(url)
        } else {
            DownloadError::network(url, e)
        }
    })?;

    if !response.status().is_success() {
        debug!(
            status = response.status().as_u16(),
            "probe returned non-success status, forcing whole fetch"
        );
        return Ok(ResourceInfo {
            supports_ranges: false,
            total_length: None,
        });
    }

    let supports_ranges = response
        .headers()
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("bytes"));

    let total_length = match response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
    {
        Some(value) => match value.trim().parse::<u64>() {
            Ok(length) => Some(length),
            Err(_) => {
                warn!(value, "unparsable Content-Length, forcing whole fetch");
                None
            }
        },
        None => None,
    };

    debug!(supports_ranges, ?total_length, "probe complete");
    Ok(ResourceInfo {
        supports_ranges,
        total_length,
    })
}
