//! End-to-end CLI tests for the rangeget binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test that invoking with no URL is a usage error.
#[test]
fn test_binary_no_arguments_returns_error() {
    let mut cmd = Command::cargo_bin("rangeget").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

/// Test that more than one URL is rejected.
#[test]
fn test_binary_multiple_urls_returns_error() {
    let mut cmd = Command::cargo_bin("rangeget").unwrap();
    cmd.arg("https://example.com/a.bin")
        .arg("https://example.com/b.bin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("rangeget").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download a single URL"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("rangeget").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rangeget"));
}

/// Test that a zero division count is rejected at parse time.
#[test]
fn test_binary_zero_divisions_rejected() {
    let mut cmd = Command::cargo_bin("rangeget").unwrap();
    cmd.arg("https://example.com/a.bin")
        .args(["-d", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

/// Test that a malformed URL fails with the error on stderr.
#[test]
fn test_binary_invalid_url_reports_error() {
    let mut cmd = Command::cargo_bin("rangeget").unwrap();
    cmd.arg("not-a-valid-url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL"));
}

/// Test a full sequential download into the working directory.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_downloads_file_into_cwd() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let body = b"content fetched end to end";

    Mock::given(method("GET"))
        .and(path("/artifact.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(&mock_server)
        .await;

    let url = format!("{}/artifact.bin", mock_server.uri());
    let workdir = temp_dir.path().to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut cmd = Command::cargo_bin("rangeget").unwrap();
        cmd.current_dir(&workdir).arg(&url).assert().success();
    })
    .await
    .unwrap();

    let output = temp_dir.path().join("artifact.bin");
    assert_eq!(std::fs::read(&output).unwrap(), body);
}

/// Test a segmented download end to end against a range-advertising server.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_segmented_download_matches_fixture() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let body = b"This is a test response";

    // The HEAD body is never sent for HEAD requests but sizes Content-Length.
    Mock::given(method("HEAD"))
        .and(path("/echo.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Accept-Ranges", "bytes")
                .set_body_bytes(vec![0u8; 24]),
        )
        .mount(&mock_server)
        .await;
    // Range-oblivious: each of the three segment GETs receives the full body.
    Mock::given(method("GET"))
        .and(path("/echo.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(&mock_server)
        .await;

    let url = format!("{}/echo.txt", mock_server.uri());
    let workdir = temp_dir.path().to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut cmd = Command::cargo_bin("rangeget").unwrap();
        cmd.current_dir(&workdir)
            .arg(&url)
            .args(["-d", "3"])
            .assert()
            .success();
    })
    .await
    .unwrap();

    let output = temp_dir.path().join("echo.txt");
    assert_eq!(std::fs::read(&output).unwrap(), body.repeat(3));
}

/// Test that a server failure surfaces as a non-zero exit with the error on
/// stderr and leaves no output file behind.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_reports_http_failure() {
    // No mocks mounted: HEAD and GET both get wiremock's default 404.
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    let url = format!("{}/missing.bin", mock_server.uri());
    let workdir = temp_dir.path().to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut cmd = Command::cargo_bin("rangeget").unwrap();
        cmd.current_dir(&workdir)
            .arg(&url)
            .assert()
            .failure()
            .stderr(predicate::str::contains("HTTP 404"));
    })
    .await
    .unwrap();

    let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert!(entries.is_empty(), "failed run must not leave files behind");
}
