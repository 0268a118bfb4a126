//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};

use cubex_vite_config::{ConfigDiscovery, ConfigError, EntryInput, PluginInput};

use crate::error::Result;

/// Project root: `--cwd` if given (relative to the current directory), else the
/// current directory.
pub fn project_root(cwd: Option<PathBuf>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    Ok(match cwd {
        Some(dir) => resolve_path(&dir, &current),
        None => current,
    })
}

/// `path` if absolute, otherwise `path` under `base`.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Plugin options for `root`, with entry points given on the command line
/// replacing the configured `input`.
///
/// Returns `None` when there is neither a config file nor any entries.
pub fn load_plugin_input(root: &Path, entries: &[String]) -> Result<Option<PluginInput>> {
    let discovered = match ConfigDiscovery::new(root).load() {
        Ok(input) => Some(input),
        Err(ConfigError::NotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };

    if entries.is_empty() {
        return Ok(discovered);
    }

    Ok(Some(match discovered {
        Some(PluginInput::Options(mut options)) => {
            options.input = Some(EntryInput::Many(entries.to_vec()));
            PluginInput::Options(options)
        }
        _ => PluginInput::Entries(entries.to_vec()),
    }))
}
