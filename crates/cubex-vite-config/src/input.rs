//! User-facing plugin options, in every shape the plugin accepts.

use serde::{Deserialize, Serialize};

use crate::refresh::RefreshInput;

/// One entry point or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryInput {
    Single(String),
    Many(Vec<String>),
}

impl EntryInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            EntryInput::Single(entry) => vec![entry],
            EntryInput::Many(entries) => entries,
        }
    }
}

impl From<&str> for EntryInput {
    fn from(entry: &str) -> Self {
        EntryInput::Single(entry.to_string())
    }
}

impl From<Vec<String>> for EntryInput {
    fn from(entries: Vec<String>) -> Self {
        EntryInput::Many(entries)
    }
}

/// Plugin options as written by the user. Every field is optional here;
/// [`PluginConfig::resolve`](crate::PluginConfig::resolve) fills in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    /// Entry points to compile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<EntryInput>,

    /// Public directory, default `public`
    #[serde(default, alias = "public_directory", skip_serializing_if = "Option::is_none")]
    pub public_directory: Option<String>,

    /// Directory to build into, default `resources`
    #[serde(default, alias = "build_directory", skip_serializing_if = "Option::is_none")]
    pub build_directory: Option<String>,

    /// Hot file path, default `.dev`
    #[serde(default, alias = "hot_file", skip_serializing_if = "Option::is_none")]
    pub hot_file: Option<String>,

    /// SSR entry points, default: same as `input`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr: Option<EntryInput>,

    /// SSR output directory, default `bootstrap/ssr`
    #[serde(
        default,
        alias = "ssr_output_directory",
        skip_serializing_if = "Option::is_none"
    )]
    pub ssr_output_directory: Option<String>,

    /// Full page reload configuration, default off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshInput>,
}

/// Everything the plugin accepts as its argument: a bare entry, a list of entries,
/// or a full options object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginInput {
    Entry(String),
    Entries(Vec<String>),
    Options(PluginOptions),
}

impl From<&str> for PluginInput {
    fn from(entry: &str) -> Self {
        PluginInput::Entry(entry.to_string())
    }
}

impl From<Vec<String>> for PluginInput {
    fn from(entries: Vec<String>) -> Self {
        PluginInput::Entries(entries)
    }
}

impl From<PluginOptions> for PluginInput {
    fn from(options: PluginOptions) -> Self {
        PluginInput::Options(options)
    }
}
