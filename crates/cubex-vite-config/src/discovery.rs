//! File-based plugin options discovery for CLI use.
//!
//! Library users build a [`PluginInput`] directly; the CLI finds one on disk.

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::input::{PluginInput, PluginOptions};

/// Dedicated config file name.
pub const CONFIG_FILE: &str = "cubex-vite.toml";

/// `package.json` field holding plugin options.
pub const PACKAGE_JSON_FIELD: &str = "cubex";

/// Prefix of environment overrides, e.g. `CUBEX_VITE_BUILD_DIRECTORY`.
pub const ENV_PREFIX: &str = "CUBEX_VITE_";

pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config source in the root directory.
    ///
    /// Searches in this order:
    /// 1. `cubex-vite.toml`
    /// 2. `package.json` with a `cubex` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        parsed
            .get(PACKAGE_JSON_FIELD)
            .is_some_and(|field| !field.is_null())
            .then_some(pkg_path)
    }

    /// Load plugin options, with `CUBEX_VITE_*` variables overriding file values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config source exists.
    pub fn load(&self) -> Result<PluginInput> {
        let path = self.find().ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;

        let figment = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            match self.package_json_field(&path)? {
                // Bare entry or entry list: nothing for the environment to merge into.
                value @ (Value::String(_) | Value::Array(_)) => {
                    return serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
                        field: PACKAGE_JSON_FIELD.to_string(),
                        hint: e.to_string(),
                    });
                }
                value => Figment::from(Serialized::defaults(value)),
            }
        } else {
            Figment::from(Toml::file(&path))
        };

        let options: PluginOptions = figment
            .merge(env_overrides())
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: path.display().to_string(),
                hint: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "loaded plugin options");
        Ok(PluginInput::Options(options))
    }

    fn package_json_field(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        let mut parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: format!("Invalid JSON: {e}"),
            })?;

        match parsed.get_mut(PACKAGE_JSON_FIELD).map(Value::take) {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(ConfigError::InvalidValue {
                field: PACKAGE_JSON_FIELD.to_string(),
                hint: "Add a 'cubex' field to your package.json".to_string(),
            }),
        }
    }
}

/// `CUBEX_VITE_BUILD_DIRECTORY` → `buildDirectory`.
///
/// Lowercasing is turned off: figment applies it after `map`, which would fold
/// `buildDirectory` into `builddirectory`.
fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX)
        .lowercase(false)
        .map(|key| camel_case(key.as_str()).into())
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, part) in key.split('_').filter(|p| !p.is_empty()).enumerate() {
        let lower = part.to_ascii_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::EntryInput;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn camel_cases_env_keys() {
        assert_eq!(camel_case("BUILD_DIRECTORY"), "buildDirectory");
        assert_eq!(camel_case("SSR_OUTPUT_DIRECTORY"), "ssrOutputDirectory");
        assert_eq!(camel_case("INPUT"), "input");
    }

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn package_json_without_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "app"}"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    #[serial]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn load_parses_toml_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "input = [\"src/app.ts\", \"src/app.css\"]\nbuildDirectory = \"build\"\n",
        )
        .unwrap();

        let PluginInput::Options(options) = ConfigDiscovery::new(dir.path()).load().unwrap() else {
            panic!("expected options");
        };
        assert_eq!(
            options.input,
            Some(EntryInput::Many(vec!["src/app.ts".into(), "src/app.css".into()]))
        );
        assert_eq!(options.build_directory.as_deref(), Some("build"));
    }

    #[test]
    #[serial]
    fn env_overrides_file_values() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "input = \"src/app.ts\"\nbuildDirectory = \"build\"\n",
        )
        .unwrap();

        unsafe { std::env::set_var("CUBEX_VITE_BUILD_DIRECTORY", "dist") };
        let loaded = ConfigDiscovery::new(dir.path()).load();
        unsafe { std::env::remove_var("CUBEX_VITE_BUILD_DIRECTORY") };

        let PluginInput::Options(options) = loaded.unwrap() else {
            panic!("expected options");
        };
        assert_eq!(options.build_directory.as_deref(), Some("dist"));
    }

    #[test]
    #[serial]
    fn multi_word_env_keys_reach_options_in_camel_case() {
        unsafe {
            std::env::set_var("CUBEX_VITE_SSR_OUTPUT_DIRECTORY", "storage/ssr");
            std::env::set_var("CUBEX_VITE_HOT_FILE", "storage/hot");
        }
        let options = Figment::from(env_overrides()).extract::<PluginOptions>();
        unsafe {
            std::env::remove_var("CUBEX_VITE_SSR_OUTPUT_DIRECTORY");
            std::env::remove_var("CUBEX_VITE_HOT_FILE");
        }

        let options = options.unwrap();
        assert_eq!(options.ssr_output_directory.as_deref(), Some("storage/ssr"));
        assert_eq!(options.hot_file.as_deref(), Some("storage/hot"));
    }

    #[test]
    #[serial]
    fn package_json_env_override() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "app", "cubex": {"input": "src/app.ts", "buildDirectory": "build"}}"#,
        )
        .unwrap();

        unsafe { std::env::set_var("CUBEX_VITE_BUILD_DIRECTORY", "public/build") };
        let loaded = ConfigDiscovery::new(dir.path()).load();
        unsafe { std::env::remove_var("CUBEX_VITE_BUILD_DIRECTORY") };

        let PluginInput::Options(options) = loaded.unwrap() else {
            panic!("expected options");
        };
        assert_eq!(options.build_directory.as_deref(), Some("public/build"));
        assert_eq!(options.input, Some(EntryInput::Single("src/app.ts".into())));
    }

    #[test]
    #[serial]
    fn package_json_bare_entry() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "app", "cubex": "src/app.ts"}"#,
        )
        .unwrap();

        let input = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(input, PluginInput::Entry("src/app.ts".into()));
    }
}
