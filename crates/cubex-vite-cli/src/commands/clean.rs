//! `cubex-vite clean`: remove a hot file left behind by a crashed dev server.

use std::path::{Path, PathBuf};

use cubex_vite_config::PluginInput;
use cubex_vite_schema::HotFile;

use crate::cli::CleanArgs;
use crate::commands::utils::{load_plugin_input, project_root, resolve_path};
use crate::error::Result;
use crate::ui;

pub fn execute(args: CleanArgs, cwd: Option<PathBuf>) -> Result<()> {
    let root = project_root(cwd)?;

    let hot_file = match args.hot_file {
        Some(path) => HotFile::new(resolve_path(&path, &root)),
        None => configured_hot_file(&root)?,
    };

    if hot_file.remove()? {
        ui::success(&format!("Removed {}", hot_file.path().display()));
    } else {
        ui::info(&format!("No hot file at {}", hot_file.path().display()));
    }

    Ok(())
}

/// Hot file named by the discovered plugin options, or `<root>/.dev`.
fn configured_hot_file(root: &Path) -> Result<HotFile> {
    let configured = match load_plugin_input(root, &[])? {
        Some(PluginInput::Options(options)) => options.hot_file,
        _ => None,
    };

    Ok(match configured {
        Some(path) => HotFile::new(root.join(path)),
        None => HotFile::in_project(root),
    })
}
