//! The hot file: a plain-text marker whose existence means "a dev server is live".
//!
//! Content is the dev server base URL followed by the bundler base path, with any
//! trailing slash removed, e.g. `http://localhost:5173/base`.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Result, SchemaError};

/// Default hot file location, relative to the project root.
pub const DEFAULT_HOT_FILE: &str = ".dev";

/// Module id of the bundler's dev client.
pub const DEV_CLIENT_ENTRY: &str = "@vite/client";

/// Module id of the fast-refresh runtime served by the dev server.
pub const REACT_REFRESH_ENTRY: &str = "@react-refresh";

/// Validated base URL read from (or written to) a hot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotUrl(String);

impl HotUrl {
    /// Parse hot file content.
    ///
    /// Surrounding whitespace and trailing slashes are dropped. The remainder must be
    /// an absolute `http` or `https` URL.
    pub fn parse(content: &str) -> Result<Self> {
        let trimmed = content.trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed).map_err(|e| SchemaError::InvalidHotUrl {
            content: content.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SchemaError::InvalidHotUrl {
                content: content.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL the dev server serves `entry` from.
    ///
    /// ```
    /// use cubex_vite_schema::HotUrl;
    ///
    /// let hot = HotUrl::parse("http://localhost:5173/base").unwrap();
    /// assert_eq!(hot.asset_url("/src/app.ts"), "http://localhost:5173/base/src/app.ts");
    /// ```
    pub fn asset_url(&self, entry: &str) -> String {
        format!("{}/{}", self.0, entry.trim_start_matches('/'))
    }
}

impl fmt::Display for HotUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle on a hot file path.
#[derive(Debug, Clone)]
pub struct HotFile {
    path: PathBuf,
}

impl HotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Hot file at its default location under `project_root`.
    pub fn in_project(project_root: impl AsRef<Path>) -> Self {
        Self::new(project_root.as_ref().join(DEFAULT_HOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Content written for a dev server reachable at `server_url` with bundler `base`.
    pub fn format_contents(server_url: &str, base: &str) -> String {
        format!("{}{}", server_url, base.trim_end_matches('/'))
    }

    /// Write the marker synchronously.
    ///
    /// The content is validated before anything touches the disk, so a bad origin
    /// never produces a marker the resolver would reject.
    pub fn write(&self, server_url: &str, base: &str) -> Result<HotUrl> {
        let contents = Self::format_contents(server_url, base);
        let url = HotUrl::parse(&contents)?;

        fs::write(&self.path, &contents).map_err(|source| SchemaError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), url = %url, "wrote hot file");
        Ok(url)
    }

    /// Read the marker.
    ///
    /// A missing file, an unreadable file, and invalid content all mean "not hot".
    pub fn read(&self) -> Option<HotUrl> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "hot file unreadable");
                return None;
            }
        };

        match HotUrl::parse(&content) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring invalid hot file");
                None
            }
        }
    }

    /// Delete the marker. Returns `Ok(false)` when it was already gone.
    pub fn remove(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "removed hot file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(SchemaError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn format_strips_trailing_slash_from_base() {
        assert_eq!(
            HotFile::format_contents("http://localhost:5173", "/base/"),
            "http://localhost:5173/base"
        );
        assert_eq!(
            HotFile::format_contents("http://localhost:5173", "/"),
            "http://localhost:5173"
        );
        assert_eq!(
            HotFile::format_contents("http://localhost:5173", ""),
            "http://localhost:5173"
        );
    }

    #[test]
    fn parse_trims_whitespace_and_slash() {
        let url = HotUrl::parse("http://localhost:5173/base/\n").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5173/base");
    }

    #[test]
    fn parse_rejects_non_http() {
        assert!(matches!(
            HotUrl::parse("ftp://localhost:21"),
            Err(SchemaError::InvalidHotUrl { .. })
        ));
        assert!(HotUrl::parse("not a url").is_err());
        assert!(HotUrl::parse("").is_err());
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let hot = HotFile::in_project(dir.path());

        let written = hot.write("http://localhost:5173", "/base/").unwrap();
        assert_eq!(
            fs::read_to_string(hot.path()).unwrap(),
            "http://localhost:5173/base"
        );
        assert_eq!(hot.read(), Some(written));
    }

    #[test]
    fn write_rejects_invalid_origin_without_touching_disk() {
        let dir = TempDir::new().unwrap();
        let hot = HotFile::in_project(dir.path());

        assert!(hot.write("localhost", "").is_err());
        assert!(!hot.exists());
    }

    #[test]
    fn read_missing_or_invalid_is_none() {
        let dir = TempDir::new().unwrap();
        let hot = HotFile::in_project(dir.path());
        assert!(hot.read().is_none());

        fs::write(hot.path(), "garbage").unwrap();
        assert!(hot.read().is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let hot = HotFile::in_project(dir.path());
        hot.write("http://localhost:5173", "").unwrap();

        assert!(hot.remove().unwrap());
        assert!(!hot.remove().unwrap());
        assert!(!hot.exists());
    }
}
