//! Startup banner shown once the dev server is listening.

use std::path::Path;
use std::sync::LazyLock;

use cubex_vite_config::{framework_version, plugin_version};
use owo_colors::OwoColorize;
use regex::Regex;

static PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\d+)").expect("port pattern is valid"));

/// Shown in place of `APP_URL` when none could be detected.
pub const UNKNOWN_APP_URL: &str = "undefined";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub framework_version: String,
    pub plugin_version: String,
    pub app_url: String,
}

impl Banner {
    pub fn new(project_root: &Path, app_url: Option<&str>) -> Self {
        Self {
            framework_version: framework_version(project_root),
            plugin_version: plugin_version().to_string(),
            app_url: app_url.unwrap_or(UNKNOWN_APP_URL).to_string(),
        }
    }

    pub fn render(&self, colors: bool) -> String {
        if !colors {
            return format!(
                "\n  CUBEX {}  plugin v{}\n\n  ➜  APP_URL: {}\n",
                self.framework_version, self.plugin_version, self.app_url
            );
        }

        format!(
            "\n  {}  {} {}\n\n  {}  {}: {}\n",
            format!("{} {}", "CUBEX".bold(), self.framework_version).red(),
            "plugin".dimmed(),
            format!("v{}", self.plugin_version).bold(),
            "➜".green(),
            "APP_URL".bold(),
            highlight_port(&self.app_url),
        )
    }
}

/// Cyan URL with the port in bold.
fn highlight_port(url: &str) -> String {
    let Some(port) = PORT.captures(url).and_then(|caps| caps.get(1)) else {
        return url.cyan().to_string();
    };

    let (head, digits, tail) = (
        &url[..port.start()],
        &url[port.range()],
        &url[port.end()..],
    );
    format!("{}{}{}", head.cyan(), digits.cyan().bold(), tail.cyan())
}
