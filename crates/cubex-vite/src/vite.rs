//! Hot/production asset resolution.

use std::path::{Path, PathBuf};

use cubex_vite_schema::{
    HotFile, HotUrl, Manifest, ManifestLocation, PrefixMatch, DEV_CLIENT_ENTRY,
    REACT_REFRESH_ENTRY,
};

use crate::error::Result;
use crate::resource::ResourceKind;
use crate::store::ResourceStore;

pub const DEFAULT_BUILD_DIRECTORY: &str = "resources";

const MODULE_ATTRIBUTES: [(&str, &str); 1] = [("type", "module")];

/// Resolves entry points for one project.
///
/// Every call re-checks the hot file, so a dev server starting or stopping is
/// picked up without rebuilding the resolver.
#[derive(Debug, Clone)]
pub struct Vite {
    project_root: PathBuf,
    hot_file: HotFile,
    build_directory: String,
    manifest_location: ManifestLocation,
    prefix_match: PrefixMatch,
}

impl Vite {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            hot_file: HotFile::in_project(&project_root),
            project_root,
            build_directory: DEFAULT_BUILD_DIRECTORY.to_string(),
            manifest_location: ManifestLocation::default(),
            prefix_match: PrefixMatch::default(),
        }
    }

    /// Use a hot file other than `<root>/.dev`. Relative paths resolve against the root.
    pub fn with_hot_file(mut self, path: impl AsRef<Path>) -> Self {
        self.hot_file = HotFile::new(self.project_root.join(path));
        self
    }

    pub fn with_build_directory(mut self, build_directory: impl Into<String>) -> Self {
        self.build_directory = build_directory.into();
        self
    }

    pub fn with_manifest_location(mut self, location: ManifestLocation) -> Self {
        self.manifest_location = location;
        self
    }

    pub fn with_prefix_match(mut self, prefix_match: PrefixMatch) -> Self {
        self.prefix_match = prefix_match;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn build_directory(&self) -> &str {
        &self.build_directory
    }

    pub fn hot_file(&self) -> &HotFile {
        &self.hot_file
    }

    /// Dev server base URL, if one is live.
    pub fn hot_url(&self) -> Option<HotUrl> {
        self.hot_file.read()
    }

    pub fn is_running_hot(&self) -> bool {
        self.hot_url().is_some()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest_location
            .path_in(&self.project_root.join(&self.build_directory))
    }

    /// Production manifest; empty when none has been built.
    pub fn manifest(&self) -> Result<Manifest> {
        Ok(Manifest::load(self.manifest_path())?)
    }

    /// Resolve `entries` and add them to the store's local channel.
    ///
    /// In hot mode `include_client` adds the dev client ahead of the entries. Entries
    /// that resolve to nothing, or to files that are neither scripts nor styles, are
    /// skipped.
    pub fn invoke<S: AsRef<str>>(
        &self,
        entries: &[S],
        include_client: bool,
        store: &mut ResourceStore,
    ) -> Result<()> {
        let references: Vec<String> = match self.hot_url() {
            Some(hot) => {
                tracing::debug!(url = %hot, "resolving against dev server");
                let client = include_client.then(|| hot.asset_url(DEV_CLIENT_ENTRY));
                client
                    .into_iter()
                    .chain(entries.iter().map(|entry| hot.asset_url(entry.as_ref())))
                    .collect()
            }
            None => self.manifest_references(entries)?,
        };

        for reference in references {
            match ResourceKind::classify(&reference) {
                Some(ResourceKind::Script) => store.require_js(&reference, MODULE_ATTRIBUTES),
                Some(ResourceKind::Style) => store.require_css(&reference),
                None => tracing::trace!(%reference, "skipping unclassified reference"),
            }
        }

        Ok(())
    }

    /// References `entries` resolve to, in order, without touching a store.
    pub fn resource_uris<S: AsRef<str>>(&self, entries: &[S]) -> Result<Vec<String>> {
        match self.hot_url() {
            Some(hot) => Ok(entries
                .iter()
                .map(|entry| hot.asset_url(entry.as_ref()))
                .collect()),
            None => self.manifest_references(entries),
        }
    }

    /// Add already-resolved references to the store's external channel.
    ///
    /// No hot or manifest lookup happens. `prefix` is prepended verbatim.
    pub fn external<S: AsRef<str>>(
        &self,
        entries: &[S],
        prefix: Option<&str>,
        store: &mut ResourceStore,
    ) {
        for entry in entries {
            let reference = format!("{}{}", prefix.unwrap_or_default(), entry.as_ref());
            match ResourceKind::classify(&reference) {
                Some(ResourceKind::Script) => {
                    store.require_external_js(&reference, MODULE_ATTRIBUTES)
                }
                Some(ResourceKind::Style) => store.require_external_css(&reference),
                None => tracing::trace!(%reference, "skipping unclassified reference"),
            }
        }
    }

    /// Add the fast-refresh preamble when a dev server is live.
    ///
    /// Returns whether the preamble was added.
    pub fn react_refresh(&self, store: &mut ResourceStore) -> bool {
        match self.hot_url() {
            Some(hot) => {
                store.add_inline_js(react_refresh_preamble(&hot));
                true
            }
            None => false,
        }
    }

    fn manifest_references<S: AsRef<str>>(&self, entries: &[S]) -> Result<Vec<String>> {
        let manifest = self.manifest()?;
        let mut references = Vec::new();

        for entry in entries {
            let chunks = manifest.lookup(entry.as_ref(), self.prefix_match);
            if chunks.is_empty() {
                tracing::debug!(entry = entry.as_ref(), "entry not in manifest");
            }
            references.extend(chunks.into_iter().map(|chunk| chunk.file.clone()));
        }

        Ok(references)
    }
}

/// Inline module wiring the fast-refresh runtime into the page.
pub fn react_refresh_preamble(hot: &HotUrl) -> String {
    format!(
        "import RefreshRuntime from '{}'\n\
         RefreshRuntime.injectIntoGlobalHook(window)\n\
         window.$RefreshReg$ = () => {{}}\n\
         window.$RefreshSig$ = () => (type) => type\n\
         window.__vite_plugin_react_preamble_installed__ = true\n",
        hot.asset_url(REACT_REFRESH_ENTRY)
    )
}
