//! Asset dev server.
//!
//! Serves files from the project root with the configured CORS allow-list, answers
//! index requests with the placeholder page, and owns the hot file while it runs.
//! Dot-files and key material are refused before reaching the file service.

use std::future::Future;
use std::sync::Arc;

use axum::{middleware, Router};
use cubex_vite_config::AllowedOrigins;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::dev::{
    deny_sensitive_files, placeholder_middleware, schedule_banner, DevConfig, HotFileLifecycle,
    PlaceholderPage,
};
use crate::error::{CliError, Result};
use crate::ui::{self, Banner};

pub struct DevServer {
    config: DevConfig,
    allowed_origins: AllowedOrigins,
    page: Arc<PlaceholderPage>,
}

impl DevServer {
    pub fn new(config: DevConfig, allowed_origins: AllowedOrigins, page: PlaceholderPage) -> Self {
        Self {
            config,
            allowed_origins,
            page: Arc::new(page),
        }
    }

    pub fn config(&self) -> &DevConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        let origins = self.allowed_origins.clone();
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(move |origin, _parts| {
                origin.to_str().is_ok_and(|origin| origins.is_allowed(origin))
            }))
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .fallback_service(ServeDir::new(&self.config.project_root))
            .layer(middleware::from_fn_with_state(
                Arc::clone(&self.page),
                placeholder_middleware,
            ))
            .layer(middleware::from_fn(deny_sensitive_files))
            .layer(cors)
    }

    /// Serve until `shutdown` resolves.
    ///
    /// The hot file is written once the listener is bound, and removed when the
    /// server stops. `base` is the bundler base appended to the hot file URL.
    pub async fn run<F>(
        self,
        lifecycle: &mut HotFileLifecycle,
        base: &str,
        banner: Banner,
        shutdown: F,
    ) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.addr;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {addr}: {e}")))?;
        let local_addr = listener.local_addr()?;

        let url = lifecycle.on_listening(self.config.origin.as_deref(), local_addr, base)?;
        ui::success(&format!("Dev server running at {url}"));
        schedule_banner(banner);

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {e}")));

        if lifecycle.cleanup() {
            tracing::debug!("removed hot file on shutdown");
        }

        result
    }
}
