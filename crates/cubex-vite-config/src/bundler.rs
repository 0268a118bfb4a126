//! The subset of the bundler configuration this plugin reads and writes.
//!
//! The same type describes the user's own bundler config (input to the config hook)
//! and the patch the hook returns. Every field is optional so an absent field always
//! means "not set by the user".

use std::path::PathBuf;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Loopback hosts on any port.
pub const LOOPBACK_ORIGIN_PATTERN: &str =
    r"^https?://(?:(?:[^:]+\.)?localhost|127\.0\.0\.1|\[::1\])(?::\d+)?$";

/// Local development domains (`SCHEME://*.local-host.xyz:PORT`).
pub const LOCAL_DOMAIN_ORIGIN_PATTERN: &str = r"^https?://.*\.local-host\.xyz(:\d+)?$";

/// Aliases injected unless the user maps the same key.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[("@", "assets/ts")];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<PublicDir>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve: Option<ResolveOptions>,
}

impl BundlerConfig {
    /// Whether this config asks for an SSR build.
    pub fn is_ssr_build(&self) -> bool {
        self.build
            .as_ref()
            .and_then(|build| build.ssr.as_ref())
            .is_some_and(SsrOption::is_enabled)
    }

    pub fn server_origin(&self) -> Option<&str> {
        self.server.as_ref()?.origin.as_deref()
    }
}

/// `publicDir`: a directory, or `false` to disable public asset copying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublicDir {
    Toggle(bool),
    Path(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<ManifestOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr: Option<SsrOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup_options: Option<RollupOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_inline_limit: Option<u64>,
}

/// `build.manifest`: on/off, or a custom manifest file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestOption {
    Toggle(bool),
    Path(String),
}

/// `build.ssr`: on/off, or the SSR entry itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SsrOption {
    Toggle(bool),
    Entry(String),
}

impl SsrOption {
    pub fn is_enabled(&self) -> bool {
        match self {
            SsrOption::Toggle(enabled) => *enabled,
            SsrOption::Entry(_) => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<RollupInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RollupInput {
    Single(String),
    Many(Vec<String>),
    Named(IndexMap<String, String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsOption>,
}

/// `server.cors`: on/off, or an explicit allow-list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorsOption {
    Toggle(bool),
    Options(CorsOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Vec<OriginMatcher>>,
}

/// One allow-list entry: an exact origin, or `{ "regex": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OriginMatcher {
    Exact(String),
    Pattern { regex: String },
}

impl OriginMatcher {
    pub fn pattern(regex: impl Into<String>) -> Self {
        OriginMatcher::Pattern {
            regex: regex.into(),
        }
    }
}

/// Compiled CORS allow-list.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins {
    allow_all: bool,
    exact: Vec<String>,
    patterns: Vec<Regex>,
}

impl AllowedOrigins {
    pub fn allow_all() -> Self {
        Self {
            allow_all: true,
            ..Self::default()
        }
    }

    pub fn compile(matchers: &[OriginMatcher]) -> Result<Self> {
        let mut origins = Self::default();

        for matcher in matchers {
            match matcher {
                OriginMatcher::Exact(origin) => origins.exact.push(origin.clone()),
                OriginMatcher::Pattern { regex } => {
                    let compiled = Regex::new(regex).map_err(|e| ConfigError::InvalidValue {
                        field: "server.cors.origin".to_string(),
                        hint: e.to_string(),
                    })?;
                    origins.patterns.push(compiled);
                }
            }
        }

        Ok(origins)
    }

    /// Allow-list for a resolved `server.cors` value. `true` allows every origin,
    /// `false` none.
    pub fn from_cors(cors: Option<&CorsOption>) -> Result<Self> {
        match cors {
            None | Some(CorsOption::Toggle(false)) => Ok(Self::default()),
            Some(CorsOption::Toggle(true)) => Ok(Self::allow_all()),
            Some(CorsOption::Options(options)) => match &options.origin {
                Some(matchers) => Self::compile(matchers),
                None => Ok(Self::allow_all()),
            },
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allow_all
            || self.exact.iter().any(|exact| exact == origin)
            || self.patterns.iter().any(|re| re.is_match(origin))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<AliasOptions>,
}

/// `resolve.alias` in either of its two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AliasOptions {
    List(Vec<AliasEntry>),
    Map(IndexMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub find: String,
    pub replacement: String,
}

/// `base` for production builds: `<ASSET_URL>/<buildDirectory>/`.
///
/// ```
/// use cubex_vite_config::bundler::resolve_base;
///
/// assert_eq!(resolve_base("resources", ""), "/resources/");
/// assert_eq!(resolve_base("resources", "https://cdn.test/"), "https://cdn.test/resources/");
/// ```
pub fn resolve_base(build_directory: &str, asset_url: &str) -> String {
    let separator = if asset_url.ends_with('/') { "" } else { "/" };
    format!("{asset_url}{separator}{build_directory}/")
}

/// Dev server allow-list: loopback, `APP_URL` when set, and local development domains.
pub fn default_cors_origins(app_url: Option<&str>) -> Vec<OriginMatcher> {
    let mut origins = vec![OriginMatcher::pattern(LOOPBACK_ORIGIN_PATTERN)];
    if let Some(app_url) = app_url {
        origins.push(OriginMatcher::Exact(app_url.to_string()));
    }
    origins.push(OriginMatcher::pattern(LOCAL_DOMAIN_ORIGIN_PATTERN));
    origins
}

/// Merge the default aliases with the user's.
///
/// List form: defaults are appended after the user's entries. Map form: the user's
/// entry wins when both define the same key.
pub fn merge_aliases(user: Option<&AliasOptions>) -> AliasOptions {
    match user {
        Some(AliasOptions::List(entries)) => {
            let mut merged = entries.clone();
            merged.extend(DEFAULT_ALIASES.iter().map(|(find, replacement)| AliasEntry {
                find: find.to_string(),
                replacement: replacement.to_string(),
            }));
            AliasOptions::List(merged)
        }
        Some(AliasOptions::Map(map)) => {
            let mut merged: IndexMap<String, String> = DEFAULT_ALIASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            for (key, value) in map {
                merged.insert(key.clone(), value.clone());
            }
            AliasOptions::Map(merged)
        }
        None => AliasOptions::Map(
            DEFAULT_ALIASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ),
    }
}
