//! Dataset identity: the fixed identifier and the versioned archive URL.
//!
//! The identifier names both the archive (`<id>.zip`) and its extraction
//! directory (`<id>`), so it must be a single path component.

use std::env;
use std::fmt;

use thiserror::Error;
use url::Url;

/// Identifier of the Van de Ven et al. (2023) model output release.
pub const DEFAULT_DATASET_ID: &str = "VanDeVenEtAl_2023_NCC_outputs";

/// Versioned Zenodo record holding the archive (doi:10.5281/zenodo.7767192).
pub const DEFAULT_DATASET_URL: &str =
    "https://zenodo.org/records/7767192/files/VanDeVenEtAl_2023_NCC_outputs.zip?download=1";

/// Scenario file inside the extracted dataset used for metadata.
pub const DEFAULT_SCENARIO_FILE: &str = "global_ite2_allmodels.csv";

/// Environment variable overriding the dataset identifier.
pub const DATASET_ID_ENV: &str = "SCENMETA_DATASET_ID";

/// Environment variable overriding the dataset URL.
pub const DATASET_URL_ENV: &str = "SCENMETA_DATASET_URL";

/// Errors raised while building a [`DatasetSource`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Invalid dataset identifier '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },

    #[error("Invalid dataset URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// A published dataset: identifier plus the URL of its zip archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    id: String,
    url: Url,
}

impl DatasetSource {
    /// Build a source, validating the identifier and URL.
    pub fn new(id: impl Into<String>, url: &str) -> Result<Self, DatasetError> {
        let id = id.into();
        validate_id(&id)?;
        let url = parse_url(url)?;
        Ok(Self { id, url })
    }

    /// Resolve the source from explicit overrides, then environment, then defaults.
    pub fn resolve(id: Option<&str>, url: Option<&str>) -> Result<Self, DatasetError> {
        let id = id
            .map(str::to_string)
            .or_else(|| non_empty_env(DATASET_ID_ENV))
            .unwrap_or_else(|| DEFAULT_DATASET_ID.to_string());
        let url = url
            .map(str::to_string)
            .or_else(|| non_empty_env(DATASET_URL_ENV))
            .unwrap_or_else(|| DEFAULT_DATASET_URL.to_string());

        Self::new(id, &url)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// `<id>.zip`
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.id)
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self {
            id: DEFAULT_DATASET_ID.to_string(),
            url: Url::parse(DEFAULT_DATASET_URL).expect("default dataset URL is valid"),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn validate_id(id: &str) -> Result<(), DatasetError> {
    let invalid = |reason| DatasetError::InvalidId {
        id: id.to_string(),
        reason,
    };

    if id.trim().is_empty() {
        return Err(invalid("identifier is empty"));
    }
    if id == "." || id == ".." {
        return Err(invalid("identifier must name a directory"));
    }
    if id.contains(['/', '\\']) {
        return Err(invalid("identifier must not contain path separators"));
    }
    if id.contains('\0') {
        return Err(invalid("identifier contains a NUL byte"));
    }
    Ok(())
}

fn parse_url(raw: &str) -> Result<Url, DatasetError> {
    let url = Url::parse(raw.trim()).map_err(|e| DatasetError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DatasetError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
