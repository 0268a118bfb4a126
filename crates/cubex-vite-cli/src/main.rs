//! cubex-vite CLI entry point.
//!
//! Parses arguments, initializes logging, and dispatches to the command.

use clap::Parser;
use cubex_vite_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let cwd = args.cwd;
    let result = match args.command {
        cli::Command::Config(config_args) => commands::config_execute(config_args, cwd),
        cli::Command::Dev(dev_args) => commands::dev_execute(dev_args, cwd).await,
        cli::Command::Resolve(resolve_args) => commands::resolve_execute(resolve_args, cwd),
        cli::Command::Clean(clean_args) => commands::clean_execute(clean_args, cwd),
    };

    result.map_err(error::cli_error_to_miette)
}
