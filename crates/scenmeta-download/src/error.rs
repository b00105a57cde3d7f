//! Download error types.
//!
//! I/O and transport errors are captured as strings (plus the path or URL
//! they concern) so the error is `Clone` and comparable in tests.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for fetch-and-unpack operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DownloadError {
    /// I/O error during file operations.
    #[error("I/O error on {} ({kind}): {message}", path.display())]
    Io {
        /// The file or directory the operation concerned.
        path: PathBuf,
        /// The kind of I/O error (e.g., "NotFound", "PermissionDenied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Network/HTTP error during the fetch.
    #[error("Network error fetching {url}: {message}")]
    Network {
        /// The URL being fetched.
        url: String,
        /// Detailed error message.
        message: String,
        /// HTTP status code if the server answered.
        status_code: Option<u16>,
    },

    /// The archive could not be read or unpacked.
    #[error("Failed to extract {}: {message}", archive.display())]
    Extract {
        /// The archive, which is left in place for inspection.
        archive: PathBuf,
        /// Detailed error message.
        message: String,
    },

    /// The working directory is missing or unusable.
    #[error("Working directory unavailable: {message}")]
    WorkDir {
        /// Detailed error message.
        message: String,
    },
}

impl DownloadError {
    /// Create an I/O error from a `std::io::Error`.
    pub fn io(path: impl AsRef<Path>, err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            path: path.as_ref().to_path_buf(),
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }

    /// Create a network error.
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a network error with HTTP status code.
    pub fn network_with_status(
        url: impl Into<String>,
        message: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create an extraction error.
    pub fn extract(archive: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Extract {
            archive: archive.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// HTTP status code, if this is a network error with a response.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Network { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

impl From<scenmeta_core::PathError> for DownloadError {
    fn from(err: scenmeta_core::PathError) -> Self {
        Self::WorkDir {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_captures_kind_and_path() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let download = DownloadError::io("/tmp/x.zip", &err);

        assert!(matches!(
            &download,
            DownloadError::Io { kind, .. } if kind == "PermissionDenied"
        ));
        assert!(download.to_string().contains("/tmp/x.zip"));
    }

    #[test]
    fn status_code_only_for_network_errors() {
        assert_eq!(
            DownloadError::network_with_status("u", "Not Found", 404).status_code(),
            Some(404)
        );
        assert_eq!(DownloadError::network("u", "refused").status_code(), None);
        assert_eq!(DownloadError::extract("a.zip", "bad").status_code(), None);
    }
}
