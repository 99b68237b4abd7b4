//! Error types for the download module.
//!
//! This module defines structured errors for every stage of a download,
//! providing context-rich messages for debugging and user feedback.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a resource.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The requested division count cannot produce a valid range plan.
    #[error("invalid division count {value}: must be at least 1")]
    InvalidDivisions {
        /// The rejected division count.
        value: u64,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors,
    /// mid-body read failures).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while persisting the payload (create file, write, flush).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A segment finished without error but left its result slot empty.
    #[error("segment {index} produced no data")]
    SegmentMissing {
        /// Plan index of the empty slot.
        index: usize,
    },

    /// A segment task panicked or was aborted before reporting a result.
    #[error("segment task failed to complete: {source}")]
    TaskFailure {
        /// The underlying join error.
        #[source]
        source: tokio::task::JoinError,
    },
}

impl DownloadError {
    /// Creates an invalid-divisions error.
    pub fn invalid_divisions(value: u64) -> Self {
        Self::InvalidDivisions { value }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a missing-segment error.
    pub fn segment_missing(index: usize) -> Self {
        Self::SegmentMissing { index }
    }

    /// Creates a task-failure error from a join error.
    pub fn task_failure(source: tokio::task::JoinError) -> Self {
        Self::TaskFailure { source }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` or `From<std::io::Error>`
// because our error variants require context (url, path) that the source errors
// don't provide. The helper constructor methods (network(), io(), etc.) are the
// correct pattern here as they allow callers to provide necessary context.
