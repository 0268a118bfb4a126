//! `cubex-vite resolve`: resolve entry points the way a page template would.
//!
//! Prints one URI per line by default, or the rendered include tags with `--html`.
//! The build directory and hot file default to the discovered plugin options.

use std::path::{Path, PathBuf};

use cubex_vite::{PrefixMatch, ResourceKind, ResourceStore, Vite, DEFAULT_BUILD_DIRECTORY};
use cubex_vite_config::{validation::normalize_build_directory, PluginInput};

use crate::cli::ResolveArgs;
use crate::commands::utils::{load_plugin_input, project_root};
use crate::error::Result;

pub fn execute(args: ResolveArgs, cwd: Option<PathBuf>) -> Result<()> {
    let root = project_root(cwd)?;
    let configured = ConfiguredPaths::discover(&root)?;

    let build_directory = match args.build_directory.clone().or(configured.build_directory) {
        Some(dir) => dir,
        None => DEFAULT_BUILD_DIRECTORY.to_string(),
    };

    let mut vite = Vite::new(&root).with_build_directory(&build_directory);
    match (&args.hot_file, &configured.hot_file) {
        (Some(path), _) => vite = vite.with_hot_file(path),
        (None, Some(path)) => vite = vite.with_hot_file(path),
        (None, None) => {}
    }
    if args.raw_prefix {
        vite = vite.with_prefix_match(PrefixMatch::Raw);
    }

    let base = args
        .base
        .clone()
        .unwrap_or_else(|| format!("/{}/", build_directory.trim_matches('/')));
    let mut store = ResourceStore::with_local_base(base);

    if args.external {
        vite.external(&args.entries, args.prefix.as_deref(), &mut store);
    } else {
        vite.invoke(&args.entries, args.client, &mut store)?;
    }
    if args.react_refresh && !vite.react_refresh(&mut store) {
        tracing::debug!("no dev server running, skipping fast-refresh preamble");
    }

    tracing::debug!(hot = vite.is_running_hot(), "resolved entries");
    println!("{}", render(&store, args.html));

    Ok(())
}

/// Paths named by the discovered plugin options.
#[derive(Debug, Default, PartialEq, Eq)]
struct ConfiguredPaths {
    build_directory: Option<String>,
    hot_file: Option<String>,
}

impl ConfiguredPaths {
    fn discover(root: &Path) -> Result<Self> {
        let Some(PluginInput::Options(options)) = load_plugin_input(root, &[])? else {
            return Ok(Self::default());
        };

        let build_directory = options
            .build_directory
            .as_deref()
            .map(normalize_build_directory)
            .transpose()?;

        Ok(Self {
            build_directory,
            hot_file: options.hot_file,
        })
    }
}

fn render(store: &ResourceStore, html: bool) -> String {
    if html {
        return [
            store.html_includes(ResourceKind::Style),
            store.inline_scripts(),
            store.html_includes(ResourceKind::Script),
        ]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    }

    store
        .uris(ResourceKind::Style)
        .into_iter()
        .chain(store.uris(ResourceKind::Script))
        .collect::<Vec<_>>()
        .join("\n")
}
