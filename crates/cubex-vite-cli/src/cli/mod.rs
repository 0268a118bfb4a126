//! Command-line interface definition.
//!
//! - `cubex-vite config` - print the bundler config patch and reload plugins
//! - `cubex-vite dev` - run the dev server lifecycle (hot file, placeholder page)
//! - `cubex-vite resolve` - resolve entry points to URIs or HTML includes
//! - `cubex-vite clean` - remove a stale hot file

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{BundlerCommand, CleanArgs, Command, ConfigArgs, DevArgs, ResolveArgs};

/// cubex-vite - asset pipeline glue between the bundler and the application
#[derive(Parser, Debug)]
#[command(
    name = "cubex-vite",
    version,
    about = "Asset pipeline glue between the bundler and the application",
    long_about = "cubex-vite derives the bundler configuration for a project, manages the\n\
                  hot file while a dev server runs, and resolves entry points to the URLs\n\
                  the browser should load in development and production."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resolve_flags() {
        let cli = Cli::try_parse_from([
            "cubex-vite",
            "resolve",
            "assets/views/example",
            "--external",
            "--prefix",
            "cdn/",
            "--html",
        ])
        .unwrap();

        let Command::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.entries, vec!["assets/views/example"]);
        assert!(args.external);
        assert_eq!(args.prefix.as_deref(), Some("cdn/"));
        assert!(args.html);
    }

    #[test]
    fn prefix_requires_external() {
        let result = Cli::try_parse_from(["cubex-vite", "resolve", "a.ts", "--prefix", "x/"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_defaults_to_build() {
        let cli = Cli::try_parse_from(["cubex-vite", "--cwd", "/srv/app", "config"]).unwrap();
        assert_eq!(cli.cwd, Some(PathBuf::from("/srv/app")));
        let Command::Config(args) = cli.command else {
            panic!("expected config");
        };
        assert_eq!(args.command, BundlerCommand::Build);
        assert_eq!(args.mode(), "production");
        assert!(!args.ssr);
    }

    #[test]
    fn dev_defaults() {
        let cli = Cli::try_parse_from(["cubex-vite", "dev"]).unwrap();
        let Command::Dev(args) = cli.command else {
            panic!("expected dev");
        };
        assert_eq!(args.port, 5173);
        assert_eq!(args.mode, "development");
        assert!(args.origin.is_none());
    }
}
