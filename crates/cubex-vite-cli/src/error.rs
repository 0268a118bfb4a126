//! Error handling for the CLI.
//!
//! Library errors convert into [`CliError`] through `#[from]`; `main` turns the
//! result into a miette report.

mod miette;

pub use self::miette::cli_error_to_miette;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Plugin options could not be loaded or normalized
    #[error(transparent)]
    Config(#[from] cubex_vite_config::ConfigError),

    /// Entry points could not be resolved
    #[error(transparent)]
    Resolve(#[from] cubex_vite::ResolveError),

    /// Hot file or manifest I/O
    #[error(transparent)]
    Schema(#[from] cubex_vite_schema::SchemaError),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dev server could not bind or failed while running
    #[error("Server error: {0}")]
    Server(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Adds context to fallible CLI operations.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}
