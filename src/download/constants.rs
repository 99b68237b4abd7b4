//! Constants for the download module (timeouts, default split count).

/// Default HTTP connect timeout (30 seconds).
pub(crate) const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large files).
pub(crate) const READ_TIMEOUT_SECS: u64 = 300;

/// Default number of byte ranges a resource is split into.
pub const DEFAULT_DIVISIONS: u64 = 5;
