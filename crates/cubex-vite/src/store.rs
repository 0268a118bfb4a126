//! Collected page resources, rendered as HTML includes.
//!
//! The store has two channels. The local channel serves assets this application
//! owns: relative references are placed under the store's local base. The external
//! channel takes references as given. Within a channel each kind keeps insertion
//! order and ignores repeats.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::resource::ResourceKind;

/// Extra attributes rendered on an include tag, in insertion order.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, Default)]
struct Channel {
    scripts: IndexMap<String, Attributes>,
    styles: IndexMap<String, Attributes>,
}

impl Channel {
    fn entries(&self, kind: ResourceKind) -> &IndexMap<String, Attributes> {
        match kind {
            ResourceKind::Script => &self.scripts,
            ResourceKind::Style => &self.styles,
        }
    }

    fn add(&mut self, kind: ResourceKind, uri: String, attributes: Attributes) {
        let entries = match kind {
            ResourceKind::Script => &mut self.scripts,
            ResourceKind::Style => &mut self.styles,
        };
        entries.entry(uri).or_insert(attributes);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    local_base: Option<String>,
    local: Channel,
    external: Channel,
    inline_scripts: Vec<String>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose local channel places relative references under `base`.
    pub fn with_local_base(base: impl Into<String>) -> Self {
        Self {
            local_base: Some(base.into()),
            ..Self::default()
        }
    }

    pub fn local_base(&self) -> Option<&str> {
        self.local_base.as_deref()
    }

    pub fn require_js<I, K, V>(&mut self, uri: &str, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let uri = self.local_uri(uri);
        self.local
            .add(ResourceKind::Script, uri, collect_attributes(attributes));
    }

    pub fn require_css(&mut self, uri: &str) {
        let uri = self.local_uri(uri);
        self.local.add(ResourceKind::Style, uri, Attributes::new());
    }

    pub fn require_external_js<I, K, V>(&mut self, uri: &str, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.external.add(
            ResourceKind::Script,
            uri.to_string(),
            collect_attributes(attributes),
        );
    }

    pub fn require_external_css(&mut self, uri: &str) {
        self.external
            .add(ResourceKind::Style, uri.to_string(), Attributes::new());
    }

    /// Add an inline `<script type="module">` block. Identical blocks are kept once.
    pub fn add_inline_js(&mut self, code: impl Into<String>) {
        let code = code.into();
        if !self.inline_scripts.contains(&code) {
            self.inline_scripts.push(code);
        }
    }

    /// URIs of `kind`, local channel first, as they will be rendered.
    pub fn uris(&self, kind: ResourceKind) -> Vec<&str> {
        self.local
            .entries(kind)
            .keys()
            .chain(self.external.entries(kind).keys())
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        [&self.local, &self.external]
            .iter()
            .all(|channel| channel.scripts.is_empty() && channel.styles.is_empty())
            && self.inline_scripts.is_empty()
    }

    /// Include tags for every resource of `kind`, local channel first.
    pub fn html_includes(&self, kind: ResourceKind) -> String {
        let mut html = String::new();
        for channel in [&self.local, &self.external] {
            for (uri, attributes) in channel.entries(kind) {
                render_include(&mut html, kind, uri, attributes);
            }
        }
        html
    }

    pub fn inline_scripts(&self) -> String {
        self.inline_scripts
            .iter()
            .map(|code| format!("<script type=\"module\">{code}</script>"))
            .collect()
    }

    fn local_uri(&self, uri: &str) -> String {
        match &self.local_base {
            Some(base) if is_relative(uri) => {
                format!("{}/{}", base.trim_end_matches('/'), uri)
            }
            _ => uri.to_string(),
        }
    }
}

fn collect_attributes<I, K, V>(attributes: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    attributes
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// No scheme and no leading slash.
fn is_relative(uri: &str) -> bool {
    !uri.starts_with('/') && !uri.contains("://") && !uri.starts_with("data:")
}

fn render_include(html: &mut String, kind: ResourceKind, uri: &str, attributes: &Attributes) {
    let (open, close) = match kind {
        ResourceKind::Script => (format!("<script src=\"{}\"", escape_attr(uri)), "></script>"),
        ResourceKind::Style => (
            format!(
                "<link href=\"{}\" rel=\"stylesheet\" type=\"text/css\"",
                escape_attr(uri)
            ),
            ">",
        ),
    };

    html.push_str(&open);
    for (name, value) in attributes {
        let _ = write!(html, " {}=\"{}\"", escape_attr(name), escape_attr(value));
    }
    html.push_str(close);
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE: [(&str, &str); 1] = [("type", "module")];

    #[test]
    fn renders_script_and_link_tags() {
        let mut store = ResourceStore::new();
        store.require_js("assets/app.js", MODULE);
        store.require_css("assets/app.css");

        assert_eq!(
            store.html_includes(ResourceKind::Script),
            r#"<script src="assets/app.js" type="module"></script>"#
        );
        assert_eq!(
            store.html_includes(ResourceKind::Style),
            r#"<link href="assets/app.css" rel="stylesheet" type="text/css">"#
        );
    }

    #[test]
    fn local_base_applies_to_relative_references_only() {
        let mut store = ResourceStore::with_local_base("/resources/");
        store.require_css("assets/app.css");
        store.require_css("/static/site.css");
        store.require_css("http://localhost:5173/src/app.css");
        store.require_external_css("vendor/lib.css");

        assert_eq!(
            store.uris(ResourceKind::Style),
            vec![
                "/resources/assets/app.css",
                "/static/site.css",
                "http://localhost:5173/src/app.css",
                "vendor/lib.css",
            ]
        );
    }

    #[test]
    fn repeats_are_ignored() {
        let mut store = ResourceStore::new();
        store.require_js("a.js", MODULE);
        store.require_js("b.js", MODULE);
        store.require_js("a.js", MODULE);

        assert_eq!(store.uris(ResourceKind::Script), vec!["a.js", "b.js"]);
    }

    #[test]
    fn attributes_are_escaped() {
        let mut store = ResourceStore::new();
        store.require_js("a.js?x=1&y=\"2\"", [("data-x", "<tag>")]);

        assert_eq!(
            store.html_includes(ResourceKind::Script),
            r#"<script src="a.js?x=1&amp;y=&quot;2&quot;" data-x="&lt;tag&gt;"></script>"#
        );
    }

    #[test]
    fn inline_scripts_render_in_order() {
        let mut store = ResourceStore::new();
        assert!(store.is_empty());

        store.add_inline_js("a()");
        store.add_inline_js("b()");
        store.add_inline_js("a()");

        assert_eq!(
            store.inline_scripts(),
            r#"<script type="module">a()</script><script type="module">b()</script>"#
        );
    }
}
