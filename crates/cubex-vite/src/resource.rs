//! Classification of resolved references.

use cubex_vite_schema::DEV_CLIENT_ENTRY;

const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".ts", ".tsx"];
const STYLE_EXTENSIONS: &[&str] = &[".css", ".scss", ".sass"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Script,
    Style,
}

impl ResourceKind {
    /// Kind of a resolved reference, judged by its extension.
    ///
    /// References ending in the dev client id are scripts. Anything else that is
    /// neither a script nor a style returns `None` and is not emitted.
    ///
    /// ```
    /// use cubex_vite::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::classify("assets/app-ABC123.js"), Some(ResourceKind::Script));
    /// assert_eq!(ResourceKind::classify("http://localhost:5173/@vite/client"), Some(ResourceKind::Script));
    /// assert_eq!(ResourceKind::classify("src/app.scss"), Some(ResourceKind::Style));
    /// assert_eq!(ResourceKind::classify("fonts/inter.woff2"), None);
    /// ```
    pub fn classify(reference: &str) -> Option<Self> {
        let path = strip_query(reference);

        if path.ends_with(DEV_CLIENT_ENTRY) || SCRIPT_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        {
            return Some(ResourceKind::Script);
        }
        if STYLE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            return Some(ResourceKind::Style);
        }
        None
    }
}

/// `app.js?v=3#x` → `app.js`
fn strip_query(reference: &str) -> &str {
    let end = reference.find(['?', '#']).unwrap_or(reference.len());
    &reference[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts() {
        for reference in ["a.js", "b.ts", "c.tsx", "@vite/client", "/x/y.js?v=1"] {
            assert_eq!(ResourceKind::classify(reference), Some(ResourceKind::Script), "{reference}");
        }
    }

    #[test]
    fn styles() {
        for reference in ["a.css", "b.scss", "c.sass"] {
            assert_eq!(ResourceKind::classify(reference), Some(ResourceKind::Style), "{reference}");
        }
    }

    #[test]
    fn unknown_extensions_are_dropped() {
        for reference in ["a.json", "b.png", "c.jsx.map", "assets/views/example", ""] {
            assert_eq!(ResourceKind::classify(reference), None, "{reference}");
        }
    }
}
