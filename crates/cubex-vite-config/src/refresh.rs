//! Translation of the `refresh` option into full-reload plugin instances.
//!
//! Reloading itself is done by `vite-plugin-full-reload`; this module only decides
//! which paths each instance watches and with which options.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Name of the external reload plugin.
pub const FULL_RELOAD_PLUGIN: &str = "vite-plugin-full-reload";

/// Patterns watched when `refresh` is `true`.
pub const DEFAULT_REFRESH_PATHS: &[&str] = &["src/**/*", "assets/**/*"];

/// Options forwarded untouched to the reload plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullReloadOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always: Option<bool>,

    /// Delay before reloading, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

/// One group of watched paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub paths: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<FullReloadOptions>,
}

impl RefreshConfig {
    pub fn new(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            config: None,
        }
    }
}

/// `refresh` as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefreshInput {
    Toggle(bool),
    Path(String),
    Paths(Vec<String>),
    Config(RefreshConfig),
    Configs(Vec<RefreshConfig>),
}

impl RefreshInput {
    /// Canonical form: a list of watch groups, empty when reloading is off.
    ///
    /// Normalizing `RefreshInput::Configs` of an already normalized list returns it
    /// unchanged.
    pub fn normalize(self, project_root: &Path) -> Vec<RefreshConfig> {
        match self {
            RefreshInput::Toggle(false) => Vec::new(),
            RefreshInput::Toggle(true) => vec![RefreshConfig::new(default_refresh_paths(
                project_root,
            ))],
            RefreshInput::Path(path) => vec![RefreshConfig::new([path])],
            RefreshInput::Paths(paths) => vec![RefreshConfig::new(paths)],
            RefreshInput::Config(config) => vec![config],
            RefreshInput::Configs(configs) => configs,
        }
    }
}

/// Default watch patterns whose base directory exists under `project_root`.
pub fn default_refresh_paths(project_root: &Path) -> Vec<String> {
    DEFAULT_REFRESH_PATHS
        .iter()
        .filter(|pattern| project_root.join(static_prefix(pattern)).is_dir())
        .map(|pattern| pattern.to_string())
        .collect()
}

/// Leading path segments of a glob that contain no wildcard.
fn static_prefix(pattern: &str) -> &str {
    let end = pattern
        .find(['*', '?', '[', '{'])
        .unwrap_or(pattern.len());
    pattern[..end].trim_end_matches('/')
}

/// A configured full-reload plugin instance.
///
/// `source` keeps the group the instance was built from so callers can tell the
/// instances apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullReloadPlugin {
    pub name: String,
    pub paths: Vec<String>,
    pub options: FullReloadOptions,
    pub source: RefreshConfig,
}

impl FullReloadPlugin {
    pub fn from_config(config: RefreshConfig) -> Self {
        Self {
            name: FULL_RELOAD_PLUGIN.to_string(),
            paths: config.paths.clone(),
            options: config.config.clone().unwrap_or_default(),
            source: config,
        }
    }
}

/// One plugin instance per watch group.
pub fn resolve_full_reload_plugins(refresh: &[RefreshConfig]) -> Vec<FullReloadPlugin> {
    refresh
        .iter()
        .cloned()
        .map(FullReloadPlugin::from_config)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn static_prefix_stops_at_first_wildcard() {
        assert_eq!(static_prefix("src/**/*"), "src");
        assert_eq!(static_prefix("views/*.php"), "views");
        assert_eq!(static_prefix("routes/web.php"), "routes/web.php");
    }

    #[test]
    fn default_paths_only_include_existing_directories() {
        let dir = TempDir::new().unwrap();
        assert!(default_refresh_paths(dir.path()).is_empty());

        fs::create_dir(dir.path().join("src")).unwrap();
        assert_eq!(default_refresh_paths(dir.path()), vec!["src/**/*"]);

        fs::create_dir(dir.path().join("assets")).unwrap();
        assert_eq!(
            default_refresh_paths(dir.path()),
            vec!["src/**/*", "assets/**/*"]
        );
    }

    #[test]
    fn toggles() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();

        assert!(RefreshInput::Toggle(false).normalize(dir.path()).is_empty());
        assert_eq!(
            RefreshInput::Toggle(true).normalize(dir.path()),
            vec![RefreshConfig::new(["src/**/*"])]
        );
    }

    #[test]
    fn single_path_round_trips() {
        let root = Path::new(".");
        let normalized = RefreshInput::Path("views/**".into()).normalize(root);
        assert_eq!(normalized, vec![RefreshConfig::new(["views/**"])]);

        let again = RefreshInput::Configs(normalized.clone()).normalize(root);
        assert_eq!(again, normalized);
    }

    #[test]
    fn deserializes_structured_config() {
        let input: RefreshInput = serde_json::from_value(json!([
            {"paths": ["views/**"], "config": {"delay": 300}},
            {"paths": ["lang/**"]}
        ]))
        .unwrap();

        let groups = input.normalize(Path::new("."));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].config.as_ref().unwrap().delay, Some(300));

        let plugins = resolve_full_reload_plugins(&groups);
        assert_eq!(plugins[0].name, FULL_RELOAD_PLUGIN);
        assert_eq!(plugins[0].options.delay, Some(300));
        assert_eq!(plugins[1].source, groups[1]);
    }

    #[test]
    fn string_list_is_one_group() {
        let input: RefreshInput = serde_json::from_value(json!(["a/**", "b/**"])).unwrap();
        assert_eq!(
            input.normalize(Path::new(".")),
            vec![RefreshConfig::new(["a/**", "b/**"])]
        );
    }
}
