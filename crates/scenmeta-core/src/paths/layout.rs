//! On-disk layout of one dataset inside the working directory.

use std::path::{Path, PathBuf};

use crate::dataset::DatasetSource;

/// Suffix appended to the archive name while a fetch is in flight.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Filesystem artifacts owned by a fetch-and-unpack run.
///
/// - `archive_path`: `<work_dir>/<id>.zip`, deleted after a successful run
/// - `partial_path`: `<work_dir>/<id>.zip.part`, only present mid-fetch
/// - `extract_dir`: `<work_dir>/<id>`, the payload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    pub work_dir: PathBuf,
    pub archive_path: PathBuf,
    pub partial_path: PathBuf,
    pub extract_dir: PathBuf,
}

impl DatasetLayout {
    pub fn new(work_dir: impl AsRef<Path>, source: &DatasetSource) -> Self {
        let work_dir = work_dir.as_ref().to_path_buf();
        let archive_name = source.archive_file_name();
        Self {
            archive_path: work_dir.join(&archive_name),
            partial_path: work_dir.join(format!("{archive_name}{PARTIAL_SUFFIX}")),
            extract_dir: work_dir.join(source.id()),
            work_dir,
        }
    }

    /// Path of a file inside the extraction directory.
    pub fn payload_file(&self, name: &str) -> PathBuf {
        self.extract_dir.join(name)
    }
}
