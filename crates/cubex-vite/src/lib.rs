//! # cubex-vite
//!
//! Run-time half of the asset pipeline. Given logical entry points, decides whether a
//! dev server is live (hot file present) and emits dev-server URLs, or falls back to
//! the production manifest and emits built file paths.
//!
//! ```no_run
//! use cubex_vite::{ResourceKind, ResourceStore, Vite};
//!
//! let vite = Vite::new("/srv/app");
//! let mut store = ResourceStore::with_local_base("/resources/");
//!
//! vite.invoke(&["src/app.ts", "src/app.css"], true, &mut store)?;
//! println!("{}", store.html_includes(ResourceKind::Style));
//! println!("{}", store.html_includes(ResourceKind::Script));
//! # Ok::<(), cubex_vite::ResolveError>(())
//! ```

pub mod error;
pub mod resource;
pub mod store;
pub mod vite;

pub use cubex_vite_schema::{HotFile, HotUrl, Manifest, ManifestLocation, PrefixMatch};
pub use error::{ResolveError, Result};
pub use resource::ResourceKind;
pub use store::{Attributes, ResourceStore};
pub use vite::{Vite, DEFAULT_BUILD_DIRECTORY};
