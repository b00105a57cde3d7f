//! The dataset fetch-and-unpack procedure.
//!
//! Steps run strictly in order and each is checked:
//!
//! 1. fetch the archive into `<id>.zip.part`, renamed to `<id>.zip` once
//!    the whole body is on disk (a failed fetch leaves neither file behind,
//!    including an archive kept by an earlier run)
//! 2. extract every entry into `<id>/` (on failure the archive is kept)
//! 3. delete `<id>.zip` unless asked to keep it

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use scenmeta_core::{DatasetLayout, DatasetSource, DirectoryCreationStrategy, ensure_directory};

use crate::error::DownloadError;
use crate::extract::{ExtractSummary, extract_archive};
use crate::progress::ProgressCallback;
use crate::source::ArchiveSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackOptions {
    /// Leave `<id>.zip` in place after a successful extraction.
    pub keep_archive: bool,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackReport {
    pub archive_bytes: u64,
    pub extracted: ExtractSummary,
    pub extract_dir: PathBuf,
    /// Set when the archive was kept on request.
    pub archive_retained: Option<PathBuf>,
}

/// Fetch the dataset archive, extract it and remove it.
pub async fn fetch_and_unpack<S>(
    source: &S,
    dataset: &DatasetSource,
    layout: &DatasetLayout,
    options: UnpackOptions,
    progress: Option<&ProgressCallback>,
) -> Result<UnpackReport, DownloadError>
where
    S: ArchiveSource + ?Sized,
{
    ensure_directory(&layout.work_dir, DirectoryCreationStrategy::AutoCreate)?;

    let archive_bytes = fetch_archive(source, dataset, layout, progress).await?;

    let archive = layout.archive_path.clone();
    let extract_dir = layout.extract_dir.clone();
    tracing::info!(
        archive = %archive.display(),
        dest = %extract_dir.display(),
        "extracting archive"
    );
    let extracted = tokio::task::spawn_blocking(move || extract_archive(&archive, &extract_dir))
        .await
        .map_err(|e| DownloadError::extract(&layout.archive_path, format!("extraction task failed: {e}")))
        .and_then(|result| result)
        .inspect_err(|_| {
            tracing::warn!(
                archive = %layout.archive_path.display(),
                "extraction failed; archive kept for inspection"
            );
        })?;

    if extracted.files == 0 {
        tracing::warn!(archive = %layout.archive_path.display(), "archive contained no files");
    }

    let archive_retained = if options.keep_archive {
        Some(layout.archive_path.clone())
    } else {
        remove_file_if_exists(&layout.archive_path)?;
        tracing::debug!(archive = %layout.archive_path.display(), "archive removed");
        None
    };

    Ok(UnpackReport {
        archive_bytes,
        extracted,
        extract_dir: layout.extract_dir.clone(),
        archive_retained,
    })
}

/// Step 1: fetch into the partial file and move it into place.
async fn fetch_archive<S>(
    source: &S,
    dataset: &DatasetSource,
    layout: &DatasetLayout,
    progress: Option<&ProgressCallback>,
) -> Result<u64, DownloadError>
where
    S: ArchiveSource + ?Sized,
{
    // A kept archive from an earlier run must not outlive a failed fetch.
    remove_file_if_exists(&layout.archive_path)?;
    remove_file_if_exists(&layout.partial_path)?;

    tracing::info!(dataset = dataset.id(), url = %dataset.url(), "fetching archive");
    let fetched = source
        .fetch_to(dataset.url(), &layout.partial_path, progress)
        .await;

    let bytes = match fetched {
        Ok(bytes) => bytes,
        Err(err) => {
            discard_partial(&layout.partial_path);
            return Err(err);
        }
    };

    if let Err(e) = fs::rename(&layout.partial_path, &layout.archive_path) {
        discard_partial(&layout.partial_path);
        return Err(DownloadError::io(&layout.archive_path, &e));
    }

    tracing::info!(bytes, archive = %layout.archive_path.display(), "archive fetched");
    Ok(bytes)
}

fn discard_partial(path: &Path) {
    if let Err(e) = remove_file_if_exists(path) {
        tracing::warn!(error = %e, "could not remove partial download");
    }
}

fn remove_file_if_exists(path: &Path) -> Result<(), DownloadError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DownloadError::io(path, &e)),
    }
}
