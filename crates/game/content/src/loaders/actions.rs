//! Action catalog loader.
//!
//! Loads [`ActionEntry`] lists from RON data files into a [`StaticCatalog`].

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::{ActionEntry, CastType, StaticCatalog};

use crate::loaders::{LoadResult, read_file};

/// Built-in catalog shipped with the crate.
const EMBEDDED_CATALOG: &str = include_str!("../../data/actions.ron");

/// Loader for the action catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file holding a list of entries.
    pub fn load(path: &Path) -> LoadResult<StaticCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))
    }

    /// Parse a catalog from RON text.
    ///
    /// Rejects duplicate ids and area shapes without an effect range, since
    /// either would silently change what a cast hits.
    pub fn parse(content: &str) -> LoadResult<StaticCatalog> {
        let entries: Vec<ActionEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.id) {
                anyhow::bail!("duplicate catalog entry for {}", entry.id);
            }
            validate(entry)?;
        }

        Ok(entries.into_iter().collect())
    }

    /// Returns the catalog shipped in `data/actions.ron`.
    pub fn embedded() -> LoadResult<StaticCatalog> {
        Self::parse(EMBEDDED_CATALOG)
    }
}

fn validate(entry: &ActionEntry) -> LoadResult<()> {
    let needs_area = matches!(
        entry.cast_type,
        CastType::CircleAroundCaster
            | CastType::CircleAroundTarget
            | CastType::PlacedCircle
            | CastType::Cone
            | CastType::Line
            | CastType::Chain
    );
    if needs_area && entry.effect_range <= 0.0 {
        anyhow::bail!(
            "{} ({}) is a {} action without an effect range",
            entry.id,
            entry.name,
            entry.cast_type
        );
    }
    if matches!(entry.cast_type, CastType::Cone | CastType::Line) && entry.x_axis_modifier <= 0.0 {
        anyhow::bail!(
            "{} ({}) needs a cone angle or line width",
            entry.id,
            entry.name
        );
    }
    if entry.combo_from == Some(entry.id) {
        anyhow::bail!("{} ({}) cannot combo from itself", entry.id, entry.name);
    }
    Ok(())
}
