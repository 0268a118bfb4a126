//! Detection of the application URL shown in the dev banner and placeholder page.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::env::EnvVars;

/// Local serve configuration, relative to the project root.
pub const DEFAULTS_INI: &str = "conf/defaults.ini";

static INI_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(schema|host|port)\s*=\s*"?([^"\r\n]*?)"?\s*$"#)
        .expect("static regex is valid")
});

/// URL of the application the assets are served to.
///
/// `conf/defaults.ini` wins when it names a host (`schema` defaults to `http`,
/// `port` is optional); otherwise `APP_URL` is used.
pub fn detect_app_url(project_root: &Path, vars: &EnvVars) -> Option<String> {
    if let Ok(ini) = fs::read_to_string(project_root.join(DEFAULTS_INI)) {
        if let Some(url) = app_url_from_ini(&ini) {
            return Some(url);
        }
        tracing::debug!("{DEFAULTS_INI} has no host, falling back to APP_URL");
    }

    vars.non_empty("APP_URL").map(str::to_string)
}

fn app_url_from_ini(ini: &str) -> Option<String> {
    let (mut schema, mut host, mut port) = (None, None, None);

    for caps in INI_KEY.captures_iter(ini) {
        let value = caps[2].trim();
        if value.is_empty() {
            continue;
        }
        let slot = match &caps[1] {
            "schema" => &mut schema,
            "host" => &mut host,
            _ => &mut port,
        };
        slot.get_or_insert(value.to_string());
    }

    let host = host?;
    let schema = schema.unwrap_or_else(|| "http".to_string());
    Some(match port {
        Some(port) => format!("{schema}://{host}:{port}"),
        None => format!("{schema}://{host}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ini_with_all_keys() {
        let ini = "[serve]\nschema = https\nhost = app.local-host.xyz\nport = 8443\n";
        assert_eq!(
            app_url_from_ini(ini).as_deref(),
            Some("https://app.local-host.xyz:8443")
        );
    }

    #[test]
    fn ini_defaults_schema_and_allows_quotes() {
        let ini = "[serve]\nhost = \"localhost\"\nport = 8080\n";
        assert_eq!(app_url_from_ini(ini).as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn ini_without_host_is_none() {
        assert!(app_url_from_ini("[serve]\nport = 8080\n").is_none());
        assert!(app_url_from_ini("[serve]\nvhost = nope\n").is_none());
    }

    #[test]
    fn falls_back_to_app_url() {
        let dir = TempDir::new().unwrap();
        let vars: EnvVars = [("APP_URL", "http://my-app.tld")].into_iter().collect();
        assert_eq!(
            detect_app_url(dir.path(), &vars).as_deref(),
            Some("http://my-app.tld")
        );
        assert!(detect_app_url(dir.path(), &EnvVars::new()).is_none());
    }

    #[test]
    fn ini_wins_over_app_url() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("conf")).unwrap();
        fs::write(dir.path().join(DEFAULTS_INI), "host=127.0.0.1\nport=8888\n").unwrap();

        let vars: EnvVars = [("APP_URL", "http://my-app.tld")].into_iter().collect();
        assert_eq!(
            detect_app_url(dir.path(), &vars).as_deref(),
            Some("http://127.0.0.1:8888")
        );
    }
}
