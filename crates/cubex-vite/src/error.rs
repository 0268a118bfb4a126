use cubex_vite_schema::SchemaError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The manifest exists but could not be parsed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
