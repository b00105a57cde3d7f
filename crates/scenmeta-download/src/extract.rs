//! Zip extraction into the dataset directory.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::DownloadError;

/// Counts from one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Regular files written (existing files are overwritten).
    pub files: usize,
    /// Directory entries created.
    pub directories: usize,
    /// Entries whose names would escape the destination.
    pub skipped: usize,
}

/// Extract every entry of `archive` into `dest`, creating `dest` if needed.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<ExtractSummary, DownloadError> {
    let file = File::open(archive).map_err(|e| DownloadError::io(archive, &e))?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| DownloadError::extract(archive, format!("not a readable zip archive: {e}")))?;

    fs::create_dir_all(dest).map_err(|e| DownloadError::io(dest, &e))?;

    let mut summary = ExtractSummary::default();
    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| DownloadError::extract(archive, format!("entry {i}: {e}")))?;

        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!(entry = entry.name(), "skipping entry outside the extraction directory");
            summary.skipped += 1;
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| DownloadError::io(&out_path, &e))?;
            summary.directories += 1;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| DownloadError::io(parent, &e))?;
        }
        let mut out_file = File::create(&out_path).map_err(|e| DownloadError::io(&out_path, &e))?;
        io::copy(&mut entry, &mut out_file).map_err(|e| {
            DownloadError::extract(archive, format!("{}: {e}", entry.name()))
        })?;

        tracing::trace!(path = %out_path.display(), "extracted");
        summary.files += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, contents) in entries {
            if name.ends_with('/') {
                writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(contents).unwrap();
            }
        }
        writer.finish().unwrap();
    }

    #[test]
    fn extracts_files_and_directories() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("a.zip");
        write_zip(
            &archive,
            &[("top.csv", b"a,b\n"), ("nested/", b""), ("nested/inner.txt", b"x")],
        );

        let dest = temp.path().join("out");
        let summary = extract_archive(&archive, &dest).unwrap();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.directories, 1);
        assert_eq!(fs::read(dest.join("top.csv")).unwrap(), b"a,b\n");
        assert_eq!(fs::read(dest.join("nested/inner.txt")).unwrap(), b"x");
    }

    #[test]
    fn overwrites_existing_files() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("a.zip");
        write_zip(&archive, &[("data.csv", b"new")]);

        let dest = temp.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("data.csv"), b"old contents").unwrap();

        extract_archive(&archive, &dest).unwrap();
        assert_eq!(fs::read(dest.join("data.csv")).unwrap(), b"new");
    }

    #[test]
    fn skips_entries_escaping_destination() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("a.zip");
        write_zip(&archive, &[("../evil.txt", b"x"), ("ok.txt", b"y")]);

        let dest = temp.path().join("out");
        let summary = extract_archive(&archive, &dest).unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.files, 1);
        assert!(!temp.path().join("evil.txt").exists());
    }

    #[test]
    fn garbage_is_an_extract_error() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("a.zip");
        fs::write(&archive, b"<html>503 Service Unavailable</html>").unwrap();

        let err = extract_archive(&archive, &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, DownloadError::Extract { .. }));
    }
}
