//! `cubex-vite dev`: run the asset dev server.
//!
//! Resolves the plugin options the same way `config` does, serves the project root
//! with the resulting CORS allow-list, and keeps the hot file in place for exactly
//! as long as the server listens.

use std::path::PathBuf;

use cubex_vite_config::{
    detect_app_url, load_env, AllowedOrigins, BundlerConfig, ConfigEnv, Configurator,
    ServerOptions,
};

use crate::cli::DevArgs;
use crate::commands::utils::{load_plugin_input, project_root};
use crate::dev::{DevConfig, DevServer, HotFileLifecycle, PlaceholderPage};
use crate::error::Result;
use crate::ui::{self, Banner};

pub async fn execute(args: DevArgs, cwd: Option<PathBuf>) -> Result<()> {
    let root = project_root(cwd)?;
    let input = load_plugin_input(&root, &args.entries)?;
    let configurator = Configurator::new(input, &root)?;

    let env = ConfigEnv::serve(&args.mode);
    let vars = load_env(&env.mode, &root, &[])?;
    let user = BundlerConfig {
        server: Some(ServerOptions {
            origin: args.origin.clone(),
            cors: None,
        }),
        ..BundlerConfig::default()
    };
    let patch = configurator.bundler_config(&user, &env, &vars);

    let allowed_origins =
        AllowedOrigins::from_cors(patch.server.as_ref().and_then(|s| s.cors.as_ref()))?;
    let config = DevConfig::new(&root, args.host, args.port, args.origin)?;

    let app_url = detect_app_url(&root, &vars);
    if app_url.is_none() {
        ui::warning("APP_URL is not set; the placeholder page cannot link to your application");
    }
    let banner = Banner::new(&root, app_url.as_deref());
    let page = PlaceholderPage::render(&banner.app_url)?;

    let mut lifecycle = HotFileLifecycle::new(configurator.hot_file());
    let exit = lifecycle.bind_exit_handlers()?;
    let shutdown = async move {
        match exit {
            Some(rx) => {
                if let Ok(signal) = rx.await {
                    tracing::info!(%signal, "shutting down dev server");
                }
            }
            None => std::future::pending::<()>().await,
        }
    };

    let base = patch.base.clone().unwrap_or_default();
    DevServer::new(config, allowed_origins, page)
        .run(&mut lifecycle, &base, banner, shutdown)
        .await
}
