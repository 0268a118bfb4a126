//! Directory option normalization.
//!
//! Directories are always relative to the project root, so surrounding whitespace
//! and leading slashes are dropped. A value that normalizes to nothing would point
//! at the project root itself and is rejected.

use crate::error::{ConfigError, Result};

/// Normalize `publicDirectory`: trim and drop leading slashes.
pub fn normalize_public_directory(value: &str) -> Result<String> {
    let normalized = value.trim().trim_start_matches('/');

    if normalized.is_empty() {
        return Err(ConfigError::InvalidDirectory {
            field: "publicDirectory",
            example: "public",
        });
    }

    Ok(normalized.to_string())
}

/// Normalize `buildDirectory`: trim and drop leading and trailing slashes.
pub fn normalize_build_directory(value: &str) -> Result<String> {
    normalize_subdirectory(value).ok_or(ConfigError::InvalidDirectory {
        field: "buildDirectory",
        example: "resources",
    })
}

/// Trim whitespace and surrounding slashes; `None` when nothing is left.
pub fn normalize_subdirectory(value: &str) -> Option<String> {
    let normalized = value.trim().trim_start_matches('/').trim_end_matches('/');
    (!normalized.is_empty()).then(|| normalized.to_string())
}
