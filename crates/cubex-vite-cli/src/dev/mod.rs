//! Dev server lifecycle.
//!
//! - [`hot`] - hot file ownership, exit handlers, and the startup banner
//! - [`middleware`] - placeholder page and the dot-file guard
//! - [`server`] - axum server wiring it all together

pub mod config;
pub mod hot;
pub mod middleware;
pub mod server;

pub use config::{DevConfig, DEFAULT_PORT};
pub use hot::{dev_server_url, schedule_banner, ExitSignal, HotFileLifecycle, BANNER_DELAY};
pub use middleware::{deny_sensitive_files, placeholder_middleware, PlaceholderPage};
pub use server::DevServer;
