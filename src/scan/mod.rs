//! Scan layer
//! - types.rs: Common types (ScanKind, ResolverKind, ScanTarget, ScanError)
//! - manifest.rs: package.json dependency blocks (name -> declared version)
//! - import_map.rs: import maps (alias -> locator)
//! - text.rs: quoted URLs embedded in source text
//! - session.rs: ScanSession owning the resolvers for one run

pub mod import_map;
pub mod manifest;
pub mod session;
pub mod text;
pub mod types;

pub use import_map::{ImportMap, scan_import_map};
pub use manifest::{ManifestSection, scan_manifest};
pub use session::ScanSession;
pub use text::{extract_urls, scan_text};
pub use types::{ResolverKind, ScanError, ScanKind, ScanTarget};
