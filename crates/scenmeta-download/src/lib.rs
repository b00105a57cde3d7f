//! Fetch, extract and clean up a published dataset archive.
//!
//! - `source` - the [`ArchiveSource`] port and its reqwest implementation
//! - `extract` - zip extraction
//! - `procedure` - the ordered fetch-and-unpack run
//! - `progress` - throttled progress callbacks

#![deny(unused_crate_dependencies)]

mod error;
mod extract;
mod procedure;
mod progress;
mod source;

pub use error::DownloadError;
pub use extract::{ExtractSummary, extract_archive};
pub use procedure::{UnpackOptions, UnpackReport, fetch_and_unpack};
pub use progress::{ProgressCallback, ProgressThrottle};
pub use source::{ArchiveSource, HttpArchiveSource};
