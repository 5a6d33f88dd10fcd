//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Built-in tuning shipped with the crate.
const EMBEDDED_CONFIG: &str = include_str!("../../data/combat.toml");

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`CombatConfig::default`] value.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.defense_scale == 0 {
            anyhow::bail!("defense_scale must be greater than zero");
        }

        Ok(config)
    }

    /// Returns the configuration shipped in `data/combat.toml`.
    pub fn embedded() -> LoadResult<CombatConfig> {
        Self::parse(EMBEDDED_CONFIG)
    }
}
