//! File loaders for the action catalog and combat tuning.
//!
//! Catalogs are RON lists of [`ActionEntry`](combat_core::ActionEntry);
//! tuning is a flat TOML table mirroring [`CombatConfig`](combat_core::CombatConfig).
//! Both ship embedded copies so a zone can start without a data directory.

pub mod actions;
pub mod config;
pub mod factory;

pub use actions::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
