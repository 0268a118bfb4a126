//! cubex-vite command-line interface.
//!
//! Hosts the parts of the asset pipeline that need a live process:
//!
//! - [`dev`] - dev server lifecycle: hot file, exit handlers, banner, placeholder page
//! - `commands` - `config`, `dev`, `resolve` and `clean`
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages and the startup banner
//!
//! The pure configuration logic lives in `cubex-vite-config` and run-time resolution
//! in `cubex-vite`; this crate wires them to the terminal and the network.

pub mod cli;
pub mod commands;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
