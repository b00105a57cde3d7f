//! End-to-end runs of the fetch-and-unpack procedure against a loopback server.

mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use common::{Canned, serve, zip_fixture};
use scenmeta_core::{DatasetLayout, DatasetSource};
use scenmeta_download::{
    DownloadError, HttpArchiveSource, ProgressCallback, UnpackOptions, fetch_and_unpack,
};

const ID: &str = "Fixture_2023_outputs";

fn dataset(base: &str) -> DatasetSource {
    DatasetSource::new(ID, &format!("{base}/files/{ID}.zip?download=1")).unwrap()
}

fn dir_listing(dir: &Path) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            let name = e.file_name().to_string_lossy().into_owned();
            let contents = if e.path().is_file() {
                fs::read_to_string(e.path()).unwrap()
            } else {
                String::new()
            };
            (name, contents)
        })
        .collect();
    entries.sort();
    entries
}

#[tokio::test]
async fn successful_run_populates_directory_and_removes_archive() {
    let base = serve(Canned::ok(zip_fixture(&[
        ("global_ite2_allmodels.csv", "Model,Scenario\n"),
        ("notes/README.txt", "outputs"),
    ])))
    .await;
    let temp = tempfile::tempdir().unwrap();
    let dataset = dataset(&base);
    let layout = DatasetLayout::new(temp.path(), &dataset);
    let source = HttpArchiveSource::new().unwrap();

    let report = fetch_and_unpack(&source, &dataset, &layout, UnpackOptions::default(), None)
        .await
        .unwrap();

    assert_eq!(report.extracted.files, 2);
    assert!(report.archive_bytes > 0);
    assert!(!temp.path().join(format!("{ID}.zip")).exists());
    assert!(!temp.path().join(format!("{ID}.zip.part")).exists());
    assert!(temp.path().join(ID).join("global_ite2_allmodels.csv").is_file());
    assert_eq!(
        fs::read_to_string(temp.path().join(ID).join("notes/README.txt")).unwrap(),
        "outputs"
    );
}

#[tokio::test]
async fn running_twice_matches_running_once() {
    let base = serve(Canned::ok(zip_fixture(&[("a.csv", "1"), ("b.csv", "2")]))).await;
    let temp = tempfile::tempdir().unwrap();
    let dataset = dataset(&base);
    let layout = DatasetLayout::new(temp.path(), &dataset);
    let source = HttpArchiveSource::new().unwrap();

    fetch_and_unpack(&source, &dataset, &layout, UnpackOptions::default(), None)
        .await
        .unwrap();
    let once_work = dir_listing(temp.path());
    let once_extract = dir_listing(&layout.extract_dir);

    fetch_and_unpack(&source, &dataset, &layout, UnpackOptions::default(), None)
        .await
        .unwrap();

    assert_eq!(dir_listing(temp.path()), once_work);
    assert_eq!(dir_listing(&layout.extract_dir), once_extract);
}

#[tokio::test]
async fn http_error_leaves_no_archive_behind() {
    let base = serve(Canned::status(404)).await;
    let temp = tempfile::tempdir().unwrap();
    let dataset = dataset(&base);
    let layout = DatasetLayout::new(temp.path(), &dataset);
    let source = HttpArchiveSource::new().unwrap();

    let err = fetch_and_unpack(&source, &dataset, &layout, UnpackOptions::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Network { .. }));
    assert_eq!(err.status_code(), Some(404));
    assert!(!layout.archive_path.exists());
    assert!(!layout.partial_path.exists());
    assert!(!layout.extract_dir.exists());
}

#[tokio::test]
async fn truncated_body_is_a_fetch_failure() {
    let body = zip_fixture(&[("a.csv", "1")]);
    let advertised = body.len() + 512;
    let base = serve(Canned {
        status: 200,
        body,
        content_length: Some(advertised),
    })
    .await;
    let temp = tempfile::tempdir().unwrap();
    let dataset = dataset(&base);
    let layout = DatasetLayout::new(temp.path(), &dataset);
    let source = HttpArchiveSource::new().unwrap();

    let err = fetch_and_unpack(&source, &dataset, &layout, UnpackOptions::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Network { .. }));
    assert!(!layout.archive_path.exists());
    assert!(!layout.partial_path.exists());
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let temp = tempfile::tempdir().unwrap();
    // Bind and drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dataset = dataset(&format!("http://127.0.0.1:{port}"));
    let layout = DatasetLayout::new(temp.path(), &dataset);
    let source = HttpArchiveSource::new().unwrap();

    let err = fetch_and_unpack(&source, &dataset, &layout, UnpackOptions::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Network { status_code: None, .. }));
    assert!(!layout.archive_path.exists());
}

#[tokio::test]
async fn corrupt_download_keeps_archive() {
    let base = serve(Canned::ok(b"<html>maintenance</html>".to_vec())).await;
    let temp = tempfile::tempdir().unwrap();
    let dataset = dataset(&base);
    let layout = DatasetLayout::new(temp.path(), &dataset);
    let source = HttpArchiveSource::new().unwrap();

    let err = fetch_and_unpack(&source, &dataset, &layout, UnpackOptions::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Extract { .. }));
    assert!(layout.archive_path.is_file());
}

#[tokio::test]
async fn progress_reports_final_byte_count() {
    let body = zip_fixture(&[("a.csv", "1,2,3")]);
    let expected = body.len() as u64;
    let base = serve(Canned::ok(body)).await;
    let temp = tempfile::tempdir().unwrap();
    let dataset = dataset(&base);
    let layout = DatasetLayout::new(temp.path(), &dataset);
    let source = HttpArchiveSource::new().unwrap();

    let seen = Arc::new(AtomicU64::new(0));
    let sink = Arc::clone(&seen);
    let callback: ProgressCallback = Box::new(move |downloaded, _total| {
        sink.store(downloaded, Ordering::SeqCst);
    });

    let options = UnpackOptions { keep_archive: true };
    let report = fetch_and_unpack(&source, &dataset, &layout, options, Some(&callback))
        .await
        .unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), expected);
    assert_eq!(report.archive_bytes, expected);
    assert_eq!(fs::metadata(&layout.archive_path).unwrap().len(), expected);
}
