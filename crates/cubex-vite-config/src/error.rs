//! Error types for plugin configuration.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cubex-vite-plugin: missing configuration")]
    MissingConfiguration,

    #[error("cubex-vite-plugin: missing configuration for \"input\"")]
    MissingInput,

    #[error(
        "cubex-vite-plugin: \"{field}\" must be a subdirectory of the project root. E.g '{example}'"
    )]
    InvalidDirectory {
        field: &'static str,
        example: &'static str,
    },

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    #[error("config not found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read env file {}: {message}", .path.display())]
    EnvFile { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
