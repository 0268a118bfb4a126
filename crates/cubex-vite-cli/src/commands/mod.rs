//! Command implementations.
//!
//! - [`config`] prints the bundler config patch for the discovered plugin options
//! - [`dev`] runs the asset dev server and maintains the hot file
//! - [`resolve`] resolves entry points to URIs or HTML includes
//! - [`clean`] removes a stale hot file
//!
//! Each command exposes an `execute` function taking its parsed arguments and the
//! global `--cwd`.

pub mod clean;
pub mod config;
pub mod dev;
pub mod resolve;
pub(crate) mod utils;

pub use clean::execute as clean_execute;
pub use config::execute as config_execute;
pub use dev::execute as dev_execute;
pub use resolve::execute as resolve_execute;
