//! Path utilities for the working directory and dataset layout.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod ensure;
mod error;
mod layout;
mod platform;
mod resolver;
mod work_dir;

#[cfg(test)]
pub(crate) mod test_utils;

pub use ensure::{DirectoryCreationStrategy, ensure_directory, verify_writable};
pub use error::PathError;
pub use layout::{DatasetLayout, PARTIAL_SUFFIX};
pub use resolver::ResolvedPaths;
pub use work_dir::{WORK_DIR_ENV, WorkDirResolution, WorkDirSource, resolve_work_dir};
