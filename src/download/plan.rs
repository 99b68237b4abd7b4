//! Byte-range planning for segmented downloads.
//!
//! The planner splits a known resource length into contiguous inclusive
//! byte ranges, one per concurrent segment fetch.

/// An inclusive range of byte offsets within a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte offset covered by this range.
    pub start: u64,
    /// Last byte offset covered by this range (inclusive).
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes this range covers.
    #[must_use]
    pub fn byte_count(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Wire format for the `Range` request header.
    #[must_use]
    pub fn header_value(&self) -> String {
        let Self { start, end } = self;
        format!("bytes={start}-{end}")
    }
}

/// Splits `total_len` bytes into at most `divisions` contiguous ranges.
///
/// The step is the integer quotient `total_len / divisions`; each emitted
/// range covers `step + 1` bytes with the final end offset clamped to the last
/// byte of the resource. The loop terminates on the remaining length budget,
/// not a fixed iteration count, so lengths that do not divide evenly can
/// produce fewer ranges than requested. The resulting plan is gapless,
/// non-overlapping, and covers `[0, total_len)` exactly.
///
/// `divisions` must already be validated as nonzero by the caller;
/// `total_len == 0` yields an empty plan.
#[must_use]
pub fn plan_ranges(divisions: u64, total_len: u64) -> Vec<ByteRange> {
    debug_assert!(divisions >= 1, "caller must reject zero divisions");
    let step = total_len / divisions.max(1);

    let mut ranges = Vec::new();
    let mut start = 0u64;
    while start < total_len {
        let end = (start + step).min(total_len - 1);
        ranges.push(ByteRange { start, end });
        start = end + 1;
    }
    ranges
}
