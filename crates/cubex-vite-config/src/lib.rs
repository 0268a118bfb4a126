//! Build-time half of cubex-vite.
//!
//! Normalizes the user's plugin options, derives the bundler configuration patch,
//! and translates `refresh` options into full-reload plugin instances. Everything in
//! this crate is synchronous and side-effect free apart from reading project files;
//! the dev-server lifecycle lives in `cubex-vite-cli`.

pub mod app_url;
pub mod bundler;
pub mod discovery;
pub mod env;
pub mod error;
pub mod input;
pub mod plugin;
pub mod refresh;
pub mod validation;
pub mod versions;

pub use app_url::detect_app_url;
pub use bundler::{
    AliasEntry, AliasOptions, AllowedOrigins, BuildOptions, BundlerConfig, CorsOption, CorsOptions,
    ManifestOption, OriginMatcher, PublicDir, ResolveOptions, RollupInput, RollupOptions,
    ServerOptions, SsrOption,
};
pub use discovery::ConfigDiscovery;
pub use env::{load_env, Command, ConfigEnv, EnvVars};
pub use error::{ConfigError, Result};
pub use input::{EntryInput, PluginInput, PluginOptions};
pub use plugin::{configure, Configurator, PluginConfig};
pub use refresh::{FullReloadOptions, FullReloadPlugin, RefreshConfig, RefreshInput};
pub use versions::{framework_version, plugin_version};
