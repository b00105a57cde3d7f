//! CLI-specific error types and mappings.
//!
//! Library errors are folded into [`CliError`], whose variant picks the
//! process exit code.

use scenmeta_core::{
    AggregateError, CoreError, CriterionError, DatasetError, FrameError, MetadataError, PathError,
};
use scenmeta_download::DownloadError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument error not caught by clap.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error (bad dataset id, URL or working directory).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The dataset host could not be reached or refused the request.
    #[error("Network error: {0}")]
    Network(String),

    /// Input data is malformed or inconsistent.
    #[error("Data error: {0}")]
    Data(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Data(_) => 65,     // EX_DATAERR
            Self::Network(_) => 69,  // EX_UNAVAILABLE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

/// Exit code for any error reaching `main`; errors that are not a
/// [`CliError`] exit with 1.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Path(e) => match e {
                PathError::EmptyPath => Self::Arguments(e.to_string()),
                PathError::NoHomeDir | PathError::CurrentDirError(_) => Self::Config(e.to_string()),
                _ => Self::Io(e.to_string()),
            },
            CoreError::Dataset(e) => Self::Config(e.to_string()),
            CoreError::Frame(e) => match e {
                FrameError::Io { .. } => Self::Io(e.to_string()),
                _ => Self::Data(e.to_string()),
            },
            CoreError::Aggregate(e) => Self::Data(e.to_string()),
            CoreError::Criterion(e) => Self::Data(e.to_string()),
            CoreError::Metadata(e) => Self::Io(e.to_string()),
        }
    }
}

macro_rules! via_core_error {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for CliError {
                fn from(err: $err) -> Self {
                    CoreError::from(err).into()
                }
            }
        )*
    };
}

via_core_error!(
    PathError,
    DatasetError,
    FrameError,
    AggregateError,
    CriterionError,
    MetadataError,
);

impl From<DownloadError> for CliError {
    fn from(err: DownloadError) -> Self {
        match err {
            DownloadError::Network { .. } => Self::Network(err.to_string()),
            DownloadError::Io { .. } => Self::Io(err.to_string()),
            DownloadError::Extract { .. } => Self::Data(err.to_string()),
            DownloadError::WorkDir { .. } => Self::Config(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
