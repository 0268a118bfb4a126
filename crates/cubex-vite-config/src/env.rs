//! Bundler command context and `.env` loading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Bundler command the configuration is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Build,
    Serve,
}

/// Command and mode, as handed to the plugin's config hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEnv {
    pub command: Command,
    pub mode: String,
}

impl ConfigEnv {
    pub fn build(mode: impl Into<String>) -> Self {
        Self {
            command: Command::Build,
            mode: mode.into(),
        }
    }

    pub fn serve(mode: impl Into<String>) -> Self {
        Self {
            command: Command::Serve,
            mode: mode.into(),
        }
    }
}

/// Environment variables visible to the plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars(BTreeMap<String, String>);

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key`, treating an empty string as unset.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Env files read for `mode`, lowest priority first.
pub fn env_files(env_dir: &Path, mode: &str) -> Vec<PathBuf> {
    vec![
        env_dir.join(".env"),
        env_dir.join(".env.local"),
        env_dir.join(format!(".env.{mode}")),
        env_dir.join(format!(".env.{mode}.local")),
    ]
}

/// Load variables the way the bundler does.
///
/// Later env files override earlier ones, and the process environment overrides
/// every file. Only keys starting with one of `prefixes` are kept; an empty prefix
/// list keeps everything. The process environment is never modified.
pub fn load_env(mode: &str, env_dir: &Path, prefixes: &[&str]) -> Result<EnvVars> {
    let keep = |key: &str| prefixes.is_empty() || prefixes.iter().any(|p| key.starts_with(p));
    let mut vars = EnvVars::new();

    for path in env_files(env_dir, mode) {
        if !path.is_file() {
            continue;
        }

        let entries = dotenvy::from_path_iter(&path).map_err(|e| ConfigError::EnvFile {
            path: path.clone(),
            message: e.to_string(),
        })?;

        for entry in entries {
            let (key, value) = entry.map_err(|e| ConfigError::EnvFile {
                path: path.clone(),
                message: e.to_string(),
            })?;
            if keep(&key) {
                vars.insert(key, value);
            }
        }

        tracing::debug!(path = %path.display(), "loaded env file");
    }

    let process_vars = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));

    for (key, value) in process_vars {
        if keep(&key) {
            vars.insert(key, value);
        }
    }

    Ok(vars)
}
