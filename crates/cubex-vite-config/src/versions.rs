//! Version strings for the dev banner. Lookups never fail; unknown is `""`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Composer package name of the framework.
pub const FRAMEWORK_PACKAGE: &str = "cubex/framework";

#[derive(Deserialize)]
struct ComposerLock {
    #[serde(default)]
    packages: Vec<ComposerPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<ComposerPackage>,
}

#[derive(Deserialize)]
struct ComposerPackage {
    name: String,
    #[serde(default)]
    version: String,
}

/// Installed framework version from `composer.lock`.
pub fn framework_version(project_root: &Path) -> String {
    let Ok(content) = fs::read_to_string(project_root.join("composer.lock")) else {
        return String::new();
    };
    let Ok(lock) = serde_json::from_str::<ComposerLock>(&content) else {
        tracing::debug!("composer.lock is not valid JSON");
        return String::new();
    };

    lock.packages
        .into_iter()
        .chain(lock.packages_dev)
        .find(|package| package.name == FRAMEWORK_PACKAGE)
        .map(|package| package.version)
        .unwrap_or_default()
}

/// Version of this plugin.
pub fn plugin_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
