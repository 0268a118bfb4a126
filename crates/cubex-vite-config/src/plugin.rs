//! Resolved plugin configuration and the config hook.

use std::path::{Path, PathBuf};

use cubex_vite_schema::{HotFile, DEFAULT_HOT_FILE};
use serde::Serialize;

use crate::bundler::{
    default_cors_origins, merge_aliases, resolve_base, BuildOptions, BundlerConfig, CorsOption,
    CorsOptions, ManifestOption, OriginMatcher, PublicDir, ResolveOptions, RollupInput,
    RollupOptions, ServerOptions,
};
use crate::env::{Command, ConfigEnv, EnvVars};
use crate::error::{ConfigError, Result};
use crate::input::{EntryInput, PluginInput, PluginOptions};
use crate::refresh::{resolve_full_reload_plugins, FullReloadPlugin, RefreshConfig};
use crate::validation::{
    normalize_build_directory, normalize_public_directory, normalize_subdirectory,
};

pub const DEFAULT_PUBLIC_DIRECTORY: &str = "public";
pub const DEFAULT_BUILD_DIRECTORY: &str = "resources";
pub const DEFAULT_SSR_OUTPUT_DIRECTORY: &str = "bootstrap/ssr";

/// Plugin options with every default applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    pub input: Vec<String>,
    pub public_directory: String,
    pub build_directory: String,
    pub hot_file: PathBuf,
    pub ssr: Vec<String>,
    pub ssr_output_directory: String,
    pub refresh: Vec<RefreshConfig>,
}

impl PluginConfig {
    /// Normalize whatever the user passed into a complete configuration.
    ///
    /// A bare entry or entry list is used for both `input` and `ssr`. Watch paths for
    /// `refresh: true` are checked against `project_root`.
    pub fn resolve(input: Option<PluginInput>, project_root: &Path) -> Result<Self> {
        let options = match input.ok_or(ConfigError::MissingConfiguration)? {
            PluginInput::Entry(entry) => PluginOptions {
                input: Some(EntryInput::Single(entry.clone())),
                ssr: Some(EntryInput::Single(entry)),
                ..PluginOptions::default()
            },
            PluginInput::Entries(entries) => PluginOptions {
                input: Some(EntryInput::Many(entries.clone())),
                ssr: Some(EntryInput::Many(entries)),
                ..PluginOptions::default()
            },
            PluginInput::Options(options) => options,
        };

        let input = options
            .input
            .map(EntryInput::into_vec)
            .filter(|entries| !entries.is_empty())
            .ok_or(ConfigError::MissingInput)?;

        let public_directory = match options.public_directory.as_deref() {
            Some(dir) => normalize_public_directory(dir)?,
            None => DEFAULT_PUBLIC_DIRECTORY.to_string(),
        };

        let build_directory = match options.build_directory.as_deref() {
            Some(dir) => normalize_build_directory(dir)?,
            None => DEFAULT_BUILD_DIRECTORY.to_string(),
        };

        let ssr_output_directory = options
            .ssr_output_directory
            .as_deref()
            .and_then(normalize_subdirectory)
            .unwrap_or_else(|| DEFAULT_SSR_OUTPUT_DIRECTORY.to_string());

        let ssr = options
            .ssr
            .map(EntryInput::into_vec)
            .unwrap_or_else(|| input.clone());

        Ok(Self {
            input,
            public_directory,
            build_directory,
            hot_file: PathBuf::from(options.hot_file.as_deref().unwrap_or(DEFAULT_HOT_FILE)),
            ssr,
            ssr_output_directory,
            refresh: options
                .refresh
                .map(|refresh| refresh.normalize(project_root))
                .unwrap_or_default(),
        })
    }
}

/// The plugin: resolved options plus the reload plugins they imply.
#[derive(Debug, Clone)]
pub struct Configurator {
    config: PluginConfig,
    reload_plugins: Vec<FullReloadPlugin>,
    project_root: PathBuf,
}

impl Configurator {
    pub const NAME: &'static str = "cubex";

    pub fn new(input: Option<PluginInput>, project_root: impl Into<PathBuf>) -> Result<Self> {
        let project_root = project_root.into();
        let config = PluginConfig::resolve(input, &project_root)?;
        let reload_plugins = resolve_full_reload_plugins(&config.refresh);

        tracing::debug!(
            input = ?config.input,
            build_directory = %config.build_directory,
            reload_groups = reload_plugins.len(),
            "resolved plugin config"
        );

        Ok(Self {
            config,
            reload_plugins,
            project_root,
        })
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn reload_plugins(&self) -> &[FullReloadPlugin] {
        &self.reload_plugins
    }

    /// Hot file this plugin writes, resolved against the project root.
    pub fn hot_file(&self) -> HotFile {
        HotFile::new(self.project_root.join(&self.config.hot_file))
    }

    /// Configuration patch for the bundler.
    ///
    /// Every value the user already set in `user` is passed through unchanged.
    pub fn bundler_config(
        &self,
        user: &BundlerConfig,
        env: &ConfigEnv,
        vars: &EnvVars,
    ) -> BundlerConfig {
        let user_build = user.build.clone().unwrap_or_default();
        let user_server = user.server.clone().unwrap_or_default();
        let ssr = user.is_ssr_build();

        let base = user.base.clone().unwrap_or_else(|| match env.command {
            Command::Build => {
                resolve_base(&self.config.build_directory, vars.get("ASSET_URL").unwrap_or(""))
            }
            Command::Serve => String::new(),
        });

        let out_dir = user_build.out_dir.clone().unwrap_or_else(|| {
            if ssr {
                self.config.ssr_output_directory.clone()
            } else {
                self.config.build_directory.clone()
            }
        });

        let input = user_build
            .rollup_options
            .as_ref()
            .and_then(|rollup| rollup.input.clone())
            .unwrap_or_else(|| {
                RollupInput::Many(if ssr {
                    self.config.ssr.clone()
                } else {
                    self.config.input.clone()
                })
            });

        let cors = user_server.cors.clone().unwrap_or_else(|| {
            let origin = match &user_server.origin {
                Some(origin) => vec![OriginMatcher::Exact(origin.clone())],
                None => default_cors_origins(vars.non_empty("APP_URL")),
            };
            CorsOption::Options(CorsOptions {
                origin: Some(origin),
            })
        });

        let alias = merge_aliases(user.resolve.as_ref().and_then(|r| r.alias.as_ref()));

        BundlerConfig {
            base: Some(base),
            public_dir: Some(user.public_dir.clone().unwrap_or(PublicDir::Toggle(false))),
            env_dir: None,
            build: Some(BuildOptions {
                manifest: Some(
                    user_build
                        .manifest
                        .clone()
                        .unwrap_or(ManifestOption::Toggle(!ssr)),
                ),
                out_dir: Some(out_dir),
                ssr: None,
                rollup_options: Some(RollupOptions { input: Some(input) }),
                assets_inline_limit: Some(user_build.assets_inline_limit.unwrap_or(0)),
            }),
            server: Some(ServerOptions {
                origin: user_server.origin.clone(),
                cors: Some(cors),
            }),
            resolve: Some(ResolveOptions { alias: Some(alias) }),
        }
    }
}

/// One-shot form of the plugin contract: normalize `input`, then derive the bundler
/// patch and reload plugins.
pub fn configure(
    input: Option<PluginInput>,
    project_root: &Path,
    user: &BundlerConfig,
    env: &ConfigEnv,
    vars: &EnvVars,
) -> Result<(BundlerConfig, Vec<FullReloadPlugin>)> {
    let configurator = Configurator::new(input, project_root)?;
    let patch = configurator.bundler_config(user, env, vars);
    Ok((patch, configurator.reload_plugins))
}
