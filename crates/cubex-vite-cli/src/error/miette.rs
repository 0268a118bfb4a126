//! Conversion of CLI errors into miette reports.

use cubex_vite_config::ConfigError;
use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into a report, attaching a help line where one applies.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Resolve(e) => miette::miette!(
            help = "Rebuild the assets; the manifest is written by the production build",
            "{}",
            e
        ),
        CliError::Server(msg) => miette::miette!(
            help = "Pick another port with --port",
            "Server error: {}",
            msg
        ),
        other => miette::miette!("{}", other),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::MissingConfiguration => miette::miette!(
            help = "Pass entry points as arguments, or add cubex-vite.toml / a \"cubex\" field in package.json",
            "{}",
            err
        ),
        ConfigError::MissingInput => miette::miette!(
            help = "Set `input` to the entry points to build, e.g. input = [\"src/app.ts\"]",
            "{}",
            err
        ),
        ConfigError::InvalidDirectory { .. } => miette::miette!(
            help = "Directories are relative to the project root and cannot be empty",
            "{}",
            err
        ),
        other => miette::miette!("{}", other),
    }
}
