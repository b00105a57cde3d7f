//! User path normalization.

use std::env;
use std::path::PathBuf;

use super::error::PathError;

/// Expand `~`, trim whitespace and make a user-supplied path absolute.
///
/// Relative paths are resolved against the current working directory.
pub(super) fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed.starts_with("~/") || trimmed == "~" {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        current_dir().map(|cwd| cwd.join(expanded))
    }
}

pub(super) fn current_dir() -> Result<PathBuf, PathError> {
    env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(normalize_user_path("   "), Err(PathError::EmptyPath)));
    }

    #[test]
    fn relative_path_becomes_absolute() {
        let resolved = normalize_user_path("data/downloads").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("data/downloads"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(normalize_user_path("~").unwrap(), home);
            assert_eq!(normalize_user_path("~/x").unwrap(), home.join("x"));
        }
    }
}
