//! Errors raised while reading or writing the shared file formats.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid hot file url {content:?}: {reason}")]
    InvalidHotUrl { content: String, reason: String },

    #[error("malformed manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
