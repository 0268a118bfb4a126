//! File formats shared between the build-time configurator and the run-time resolver.
//!
//! Two files make up the contract:
//!
//! - the **hot file** (default `.dev`), whose presence means a dev server is live and
//!   whose content is that server's base URL
//! - the **manifest** (`manifest.json`), written by production builds and mapping
//!   entry identifiers to built files
//!
//! Both sides read and write these only through this crate.

pub mod error;
pub mod hot_file;
pub mod manifest;

pub use error::{Result, SchemaError};
pub use hot_file::{HotFile, HotUrl, DEFAULT_HOT_FILE, DEV_CLIENT_ENTRY, REACT_REFRESH_ENTRY};
pub use manifest::{Manifest, ManifestChunk, ManifestLocation, PrefixMatch};
