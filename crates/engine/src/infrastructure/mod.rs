//! External dependency implementations: the store port and its filesystem
//! adapter, plus document export.

pub mod export;
pub mod ports;
pub mod store;
