//! Pure path resolver for CLI introspection.
//!
//! Captures every path a run touches in one call so the `scenmeta paths`
//! command and the handlers agree on locations.

use std::path::PathBuf;

use super::{DatasetLayout, PathError, WorkDirSource, resolve_work_dir};
use crate::dataset::DatasetSource;

/// All resolved paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Directory holding the archive and the extraction directory
    pub work_dir: PathBuf,
    /// How the working directory was resolved
    pub work_dir_source: WorkDirSource,
    /// Dataset identifier the layout was derived from
    pub dataset_id: String,
    /// Layout of the dataset inside `work_dir`
    pub layout: DatasetLayout,
}

impl ResolvedPaths {
    /// Resolve all paths for `source` with an optional working directory override.
    pub fn resolve(work_dir: Option<&str>, source: &DatasetSource) -> Result<Self, PathError> {
        let resolution = resolve_work_dir(work_dir)?;
        let layout = DatasetLayout::new(&resolution.path, source);

        Ok(Self {
            work_dir: resolution.path,
            work_dir_source: resolution.source,
            dataset_id: source.id().to_string(),
            layout,
        })
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "work_dir = {}", self.work_dir.display())?;
        writeln!(f, "work_dir_source = {:?}", self.work_dir_source)?;
        writeln!(f, "dataset_id = {}", self.dataset_id)?;
        writeln!(f, "archive_path = {}", self.layout.archive_path.display())?;
        write!(f, "extract_dir = {}", self.layout.extract_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format_is_parseable() {
        let source = DatasetSource::default();
        let paths = ResolvedPaths::resolve(Some("/tmp/scenmeta"), &source).expect("resolve");
        let output = paths.to_string();

        assert!(output.contains("work_dir = /tmp/scenmeta"));
        assert!(output.contains("work_dir_source = Explicit"));
        assert!(output.contains("archive_path = "));
        assert!(output.contains("extract_dir = "));
    }
}
