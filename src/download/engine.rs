//! Concurrent fetch engine: per-range segment fetchers, the coordinator that
//! reassembles them in plan order, and the sequential whole-fetch fallback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use reqwest::Client;
use reqwest::header::RANGE;
use tokio::task::JoinSet;
use tracing::debug;

use super::error::DownloadError;
use super::plan::ByteRange;

/// Fetches every planned range concurrently and reassembles the payload in
/// plan order.
///
/// One tokio task per range; all tasks share the client's connection pool.
/// The first failing segment flips a shared cancellation flag, which sibling
/// tasks poll once before issuing their network call; a task that observes
/// the flag performs no work and contributes nothing. Tasks already past the
/// check run to completion; their results are discarded along with the failed
/// run. Only the first observed error is returned.
///
/// On success the result slots are concatenated strictly by plan index,
/// independent of completion order.
pub(crate) async fn fetch_segmented(
    client: &Client,
    url: &str,
    ranges: &[ByteRange],
) -> Result<Vec<u8>, DownloadError> {
    let cancelled = Arc::new(AtomicBool::new(false));
    let mut tasks: JoinSet<Result<Option<(usize, Bytes)>, DownloadError>> = JoinSet::new();

    for (index, range) in ranges.iter().copied().enumerate() {
        let client = client.clone();
        let url = url.to_owned();
        let cancelled = Arc::clone(&cancelled);
        tasks.spawn(async move {
            if cancelled.load(Ordering::SeqCst) {
                return Ok(None);
            }
            match fetch_segment(&client, &url, range).await {
                Ok(payload) => Ok(Some((index, payload))),
                Err(error) => {
                    // Flip the flag before reporting so siblings that have not
                    // issued their request yet skip it.
                    cancelled.store(true, Ordering::SeqCst);
                    Err(error)
                }
            }
        });
    }

    // Pre-sized slots addressed by plan index; each slot is written at most
    // once, by the coordinator alone, so no locking is needed.
    let mut slots: Vec<Option<Bytes>> = vec![None; ranges.len()];
    let mut first_error: Option<DownloadError> = None;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(Some((index, payload)))) => slots[index] = Some(payload),
            Ok(Ok(None)) => debug!("segment skipped after cancellation"),
            Ok(Err(error)) => {
                if first_error.is_none() {
                    first_error = Some(error);
                } else {
                    debug!(%error, "discarding error from sibling segment");
                }
            }
            Err(join_error) => {
                cancelled.store(true, Ordering::SeqCst);
                if first_error.is_none() {
                    first_error = Some(DownloadError::task_failure(join_error));
                }
            }
        }
    }

    if let Some(error) = first_error {
        return Err(error);
    }

    let assembled_len: usize = slots.iter().flatten().map(Bytes::len).sum();
    let mut payload = Vec::with_capacity(assembled_len);
    for (index, slot) in slots.into_iter().enumerate() {
        let segment = slot.ok_or_else(|| DownloadError::segment_missing(index))?;
        payload.extend_from_slice(&segment);
    }
    Ok(payload)
}

/// Fetches one byte range and reads the full response body.
async fn fetch_segment(
    client: &Client,
    url: &str,
    range: ByteRange,
) -> Result<Bytes, DownloadError> {
    let response = client
        .get(url)
        .header(RANGE, range.header_value())
        .send()
        .await
        .map_err(|e| classify_transport(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::http_status(url, status.as_u16()));
    }
    debug!(
        range = %range.header_value(),
        status = status.as_u16(),
        "segment response received"
    );

    response.bytes().await.map_err(|e| classify_transport(url, e))
}

/// Performs the sequential whole-resource fallback: one unranged GET, full
/// body read. No concurrency.
pub(crate) async fn fetch_whole(client: &Client, url: &str) -> Result<Bytes, DownloadError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_transport(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::http_status(url, status.as_u16()));
    }

    response.bytes().await.map_err(|e| classify_transport(url, e))
}

fn classify_transport(url: &str, error: reqwest::Error) -> DownloadError {
    if error.is_timeout() {
        DownloadError::timeout(url)
    } else {
        DownloadError::network(url, error)
    }
}
