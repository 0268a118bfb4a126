//! `cubex-vite config`: print the bundler config patch.
//!
//! Output is a JSON object with the patch under `config` and the full-reload plugin
//! instances under `plugins`, for a bundler wrapper to merge.

use std::fs;
use std::path::PathBuf;

use cubex_vite_config::{configure, load_env, BundlerConfig, ConfigEnv, SsrOption};
use serde_json::json;

use crate::cli::{BundlerCommand, ConfigArgs};
use crate::commands::utils::{load_plugin_input, project_root, resolve_path};
use crate::error::{Result, ResultExt};

pub fn execute(args: ConfigArgs, cwd: Option<PathBuf>) -> Result<()> {
    let root = project_root(cwd)?;
    let input = load_plugin_input(&root, &args.entries)?;

    let mut user = match &args.user_config {
        Some(path) => {
            let path = resolve_path(path, &root);
            let content = fs::read_to_string(&path).with_path(&path)?;
            serde_json::from_str::<BundlerConfig>(&content)?
        }
        None => BundlerConfig::default(),
    };
    if args.ssr {
        user.build.get_or_insert_with(Default::default).ssr = Some(SsrOption::Toggle(true));
    }

    let env = match args.command {
        BundlerCommand::Build => ConfigEnv::build(args.mode()),
        BundlerCommand::Serve => ConfigEnv::serve(args.mode()),
    };
    let env_dir = user
        .env_dir
        .as_deref()
        .map_or_else(|| root.clone(), |dir| resolve_path(dir, &root));
    let vars = load_env(&env.mode, &env_dir, &[])?;

    let (patch, plugins) = configure(input, &root, &user, &env, &vars)?;
    tracing::debug!(command = ?env.command, mode = %env.mode, "derived bundler config");

    let output = json!({ "config": patch, "plugins": plugins });
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}
