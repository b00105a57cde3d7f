//! Working directory resolution.
//!
//! The working directory holds the downloaded archive and the extraction
//! directory. It comes from an explicit path, the environment, or the
//! process's current directory.

use std::env;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::{current_dir, normalize_user_path};

/// Environment variable naming the working directory.
pub const WORK_DIR_ENV: &str = "SCENMETA_WORK_DIR";

/// How the working directory was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkDirSource {
    /// The user passed an explicit path (e.g., `--work-dir`).
    Explicit,
    /// The path came from `SCENMETA_WORK_DIR` / `.env`.
    EnvVar,
    /// Fallback to the process's current directory.
    CurrentDir,
}

/// Resolution result for the working directory.
#[derive(Debug, Clone)]
pub struct WorkDirResolution {
    /// The resolved, absolute working directory.
    pub path: PathBuf,
    /// How the path was determined.
    pub source: WorkDirSource,
}

/// Resolve the working directory from an explicit override, env var, or default.
///
/// Resolution order:
/// 1. Explicit path provided by caller (highest priority)
/// 2. `SCENMETA_WORK_DIR` environment variable
/// 3. Current directory
pub fn resolve_work_dir(explicit: Option<&str>) -> Result<WorkDirResolution, PathError> {
    if let Some(path_str) = explicit {
        return Ok(WorkDirResolution {
            path: normalize_user_path(path_str)?,
            source: WorkDirSource::Explicit,
        });
    }

    if let Ok(env_path) = env::var(WORK_DIR_ENV) {
        if !env_path.trim().is_empty() {
            return Ok(WorkDirResolution {
                path: normalize_user_path(&env_path)?,
                source: WorkDirSource::EnvVar,
            });
        }
    }

    Ok(WorkDirResolution {
        path: current_dir()?,
        source: WorkDirSource::CurrentDir,
    })
}
