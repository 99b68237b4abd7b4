//! Persistence sink: output-name derivation and payload writing.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use super::error::DownloadError;

/// Derives the output file name from the URL's final path segment.
///
/// Query strings and parent directories are stripped, percent-encoding is
/// decoded, and path separators are sanitized away. A URL with no usable
/// segment (for example `https://host/`) falls back to the host name, then to
/// `download`.
///
/// # Errors
///
/// Returns [`DownloadError::InvalidUrl`] when the URL fails to parse.
pub(crate) fn output_filename(url: &str) -> Result<String, DownloadError> {
    let parsed = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
        .map(str::to_owned);

    if let Some(segment) = segment {
        let decoded = urlencoding::decode(&segment)
            .map_or_else(|_| segment.clone(), std::borrow::Cow::into_owned);
        let name = sanitize_filename(&decoded);
        if !name.is_empty() {
            return Ok(name);
        }
    }

    let fallback = parsed
        .host_str()
        .map_or_else(|| "download".to_owned(), sanitize_filename);
    Ok(if fallback.is_empty() {
        "download".to_owned()
    } else {
        fallback
    })
}

/// Replaces path separators and other unsafe characters with underscores.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == ' ')
        .to_string()
}

/// Writes the assembled payload to `<dir>/<filename>`, creating or truncating
/// the file. Pre-existing files at that name are overwritten without warning.
///
/// Create, write, and flush failures all surface as [`DownloadError::Io`];
/// first error wins across the write lifecycle. A file that failed mid-write
/// is best-effort removed so a failed run leaves no partial output behind.
pub(crate) async fn write_payload(
    dir: &Path,
    url: &str,
    payload: &[u8],
) -> Result<PathBuf, DownloadError> {
    let filename = output_filename(url)?;
    let path = dir.join(&filename);
    debug!(path = %path.display(), bytes = payload.len(), "writing payload");

    let mut file = File::create(&path)
        .await
        .map_err(|e| DownloadError::io(path.clone(), e))?;

    let write_result = write_and_flush(&mut file, payload, &path).await;
    if write_result.is_err() {
        debug!(path = %path.display(), "removing partial file after write error");
        let _ = tokio::fs::remove_file(&path).await;
    }
    write_result?;

    Ok(path)
}

async fn write_and_flush(
    file: &mut File,
    payload: &[u8],
    path: &Path,
) -> Result<(), DownloadError> {
    file.write_all(payload)
        .await
        .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;
    file.flush()
        .await
        .map_err(|e| DownloadError::io(path.to_path_buf(), e))
}
