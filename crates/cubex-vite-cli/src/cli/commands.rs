use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the bundler config patch
    ///
    /// Loads plugin options (entry arguments, cubex-vite.toml or the "cubex" field
    /// of package.json), applies the defaults, and prints the resulting bundler
    /// configuration and full-reload plugins as JSON.
    Config(ConfigArgs),

    /// Run the dev server lifecycle
    ///
    /// Writes the hot file once listening, removes it on exit or on SIGINT,
    /// SIGTERM, SIGHUP and SIGQUIT, serves the project directory, and answers
    /// requests for the index page with a placeholder pointing at APP_URL.
    Dev(DevArgs),

    /// Resolve entry points to URIs
    ///
    /// Uses the dev server when a hot file is present, otherwise the production
    /// manifest.
    Resolve(ResolveArgs),

    /// Remove a stale hot file
    Clean(CleanArgs),
}

/// Bundler command the config is produced for
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum BundlerCommand {
    Build,
    Serve,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Entry points; override `input` from the config file
    #[arg(value_name = "ENTRY")]
    pub entries: Vec<String>,

    #[arg(long = "command", value_enum, default_value = "build")]
    pub command: BundlerCommand,

    /// Bundler mode (defaults to production for build, development for serve)
    #[arg(long)]
    pub mode: Option<String>,

    /// Produce the config for an SSR build
    #[arg(long)]
    pub ssr: bool,

    /// JSON file with the user's own bundler config
    #[arg(long, value_name = "FILE")]
    pub user_config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ConfigArgs {
    pub fn mode(&self) -> &str {
        match (self.mode.as_deref(), self.command) {
            (Some(mode), _) => mode,
            (None, BundlerCommand::Build) => "production",
            (None, BundlerCommand::Serve) => "development",
        }
    }
}

#[derive(Args, Debug)]
pub struct DevArgs {
    /// Entry points; override `input` from the config file
    #[arg(value_name = "ENTRY")]
    pub entries: Vec<String>,

    /// Port to listen on; the next free port is used when taken
    #[arg(short, long, default_value_t = 5173)]
    pub port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Public origin of the dev server, written to the hot file instead of
    /// http://localhost:<port>
    #[arg(long, value_name = "URL")]
    pub origin: Option<String>,

    #[arg(long, default_value = "development")]
    pub mode: String,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Entry points or directories to resolve
    #[arg(required = true, value_name = "ENTRY")]
    pub entries: Vec<String>,

    /// Include the dev client (hot mode only)
    #[arg(long)]
    pub client: bool,

    /// Treat entries as already resolved and emit them on the external channel
    #[arg(long)]
    pub external: bool,

    /// Prefix prepended to external entries
    #[arg(long, requires = "external")]
    pub prefix: Option<String>,

    /// Add the fast-refresh preamble (hot mode only)
    #[arg(long)]
    pub react_refresh: bool,

    /// Print HTML include tags instead of URIs
    #[arg(long)]
    pub html: bool,

    /// Directory holding the production build, relative to the project root
    /// (defaults to the configured one, then `resources`)
    #[arg(long, value_name = "DIR")]
    pub build_directory: Option<String>,

    /// Hot file, relative to the project root (defaults to the configured one)
    #[arg(long, value_name = "FILE")]
    pub hot_file: Option<PathBuf>,

    /// Base for built files in HTML output (defaults to /<build-directory>/)
    #[arg(long, value_name = "URL")]
    pub base: Option<String>,

    /// Match directory entries as plain string prefixes
    #[arg(long)]
    pub raw_prefix: bool,
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Hot file, relative to the project root (defaults to the configured one)
    #[arg(long, value_name = "FILE")]
    pub hot_file: Option<PathBuf>,
}
