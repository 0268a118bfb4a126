//! Production build manifest.
//!
//! A JSON object keyed by entry identifier (the source path relative to the project
//! root). Key order is significant: prefix lookups return chunks in file order.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// File name of the manifest inside the build directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Sub-directory some bundler versions nest the manifest under.
pub const MANIFEST_SUBDIR: &str = ".vite";

/// One manifest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestChunk {
    /// Built file, relative to the build directory.
    pub file: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub is_entry: bool,

    #[serde(default)]
    pub is_dynamic_entry: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dynamic_imports: Vec<String>,
}

/// How an entry that is not an exact manifest key is matched against keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrefixMatch {
    /// The entry must be followed by a `/` in the key, so `src/app` matches
    /// `src/app/main.ts` but not `src/app2.ts`.
    #[default]
    Segment,
    /// Plain string prefix. Kept for manifests that relied on the old behaviour.
    Raw,
}

impl PrefixMatch {
    pub fn matches(self, key: &str, entry: &str) -> bool {
        match self {
            PrefixMatch::Raw => key.starts_with(entry),
            PrefixMatch::Segment => {
                if entry.is_empty() || entry.ends_with('/') {
                    return key.starts_with(entry);
                }
                key.strip_prefix(entry)
                    .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Where the manifest lives inside the build directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManifestLocation {
    /// `.vite/manifest.json` when it exists, otherwise `manifest.json`.
    #[default]
    Auto,
    /// `<build>/manifest.json`
    Flat,
    /// `<build>/.vite/manifest.json`
    ViteSubdir,
}

impl ManifestLocation {
    pub fn path_in(self, build_dir: &Path) -> PathBuf {
        let flat = build_dir.join(MANIFEST_FILE);
        let nested = build_dir.join(MANIFEST_SUBDIR).join(MANIFEST_FILE);

        match self {
            ManifestLocation::Flat => flat,
            ManifestLocation::ViteSubdir => nested,
            ManifestLocation::Auto if nested.is_file() => nested,
            ManifestLocation::Auto => flat,
        }
    }
}

/// Parsed manifest with key order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: IndexMap<String, ManifestChunk>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse manifest JSON.
    pub fn parse(json: &str) -> Result<Self> {
        Self::parse_at(json, Path::new(MANIFEST_FILE))
    }

    fn parse_at(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| SchemaError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the manifest at `path`.
    ///
    /// A missing or unreadable file yields an empty manifest. Malformed JSON is an
    /// error: it means the build is broken.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no manifest, treating as empty");
                return Ok(Self::new());
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "manifest unreadable, treating as empty");
                return Ok(Self::new());
            }
        };

        Self::parse_at(&json, path)
    }

    pub fn insert(&mut self, key: impl Into<String>, chunk: ManifestChunk) {
        self.entries.insert(key.into(), chunk);
    }

    pub fn get(&self, key: &str) -> Option<&ManifestChunk> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestChunk)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Chunks an entry point resolves to.
    ///
    /// An exact key wins. Otherwise every key under `entry` is returned in manifest
    /// order, which lets a directory name pull in everything built from it. No match
    /// yields an empty list.
    pub fn lookup(&self, entry: &str, prefix: PrefixMatch) -> Vec<&ManifestChunk> {
        if let Some(chunk) = self.entries.get(entry) {
            return vec![chunk];
        }

        self.entries
            .iter()
            .filter(|(key, _)| prefix.matches(key, entry))
            .map(|(_, chunk)| chunk)
            .collect()
    }
}

impl FromIterator<(String, ManifestChunk)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (String, ManifestChunk)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(file: &str) -> ManifestChunk {
        ManifestChunk {
            file: file.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn segment_prefix_respects_boundaries() {
        assert!(PrefixMatch::Segment.matches("src/app/main.ts", "src/app"));
        assert!(PrefixMatch::Segment.matches("src/app/main.ts", "src/app/"));
        assert!(!PrefixMatch::Segment.matches("src/app2.ts", "src/app"));
        assert!(!PrefixMatch::Segment.matches("src/app", "src/app"));
    }

    #[test]
    fn raw_prefix_matches_any_suffix() {
        assert!(PrefixMatch::Raw.matches("src/app2.ts", "src/app"));
        assert!(PrefixMatch::Raw.matches("src/app/main.ts", "src/app"));
    }

    #[test]
    fn parse_keeps_key_order_and_ignores_unknown_fields() {
        let manifest = Manifest::parse(
            r#"{
                "b.ts": {"file": "assets/b.js", "isEntry": true, "extra": 1},
                "a.css": {"file": "assets/a.css"}
            }"#,
        )
        .unwrap();

        let keys: Vec<_> = manifest.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b.ts", "a.css"]);
        assert!(manifest.get("b.ts").unwrap().is_entry);
    }

    #[test]
    fn parse_rejects_entries_without_file() {
        assert!(matches!(
            Manifest::parse(r#"{"a.ts": {"src": "a.ts"}}"#),
            Err(SchemaError::ManifestParse { .. })
        ));
    }

    #[test]
    fn lookup_exact_beats_prefix() {
        let manifest: Manifest = [
            ("src/app".to_string(), chunk("exact.js")),
            ("src/app/x.ts".to_string(), chunk("x.js")),
        ]
        .into_iter()
        .collect();

        let found = manifest.lookup("src/app", PrefixMatch::Segment);
        assert_eq!(found, vec![&chunk("exact.js")]);
    }

    #[test]
    fn lookup_without_match_is_empty() {
        let manifest: Manifest = [("src/app.ts".to_string(), chunk("app.js"))]
            .into_iter()
            .collect();
        assert!(manifest.lookup("src/other", PrefixMatch::Segment).is_empty());
    }
}
