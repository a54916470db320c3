//! Entity auto-linking: catalog snapshots and the detection pass.

pub mod catalog;
pub mod detector;

pub use catalog::{CatalogHandle, EntityCatalog};
pub use detector::detect;
