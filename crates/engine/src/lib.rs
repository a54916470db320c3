//! Storylink Engine library.
//!
//! This crate contains the working parts of the auto-linking engine:
//!
//! - `linking/` - Catalog snapshots and the detection pass
//! - `infrastructure/` - Store port, filesystem adapter, and RTF export
//!
//! Detection and export are pure functions over their inputs; the catalog is
//! an immutable snapshot replaced wholesale on reload, so callers may run
//! detections back-to-back, debounce, or discard stale results freely.

pub mod infrastructure;
pub mod linking;

pub use infrastructure::export::RtfExporter;
pub use infrastructure::ports::{EntityRecord, EntityStore, StoreError};
pub use infrastructure::store::FsEntityStore;
pub use linking::{detect, CatalogHandle, EntityCatalog};
