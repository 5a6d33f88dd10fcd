//! Data-driven combat content and loaders.
//!
//! This crate houses the static content a zone serves to its casts and the
//! loaders for the RON/TOML files it is authored in:
//! - Action catalog (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//!
//! Content is consumed through combat-core oracles and never appears in actor
//! state. All loaders use combat-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
