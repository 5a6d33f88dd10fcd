//! Server configuration read from the environment.

use std::env;
use std::path::PathBuf;

use combat_core::CostTiming;

/// Settings for one zone server process.
///
/// Every field has a default so the server starts with no environment at all;
/// a `.env` file in the working directory is honoured via `dotenvy`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Simulated milliseconds per zone tick.
    pub tick_ms: u64,
    /// RON action catalog; the embedded catalog when unset.
    pub catalog_path: Option<PathBuf>,
    /// TOML combat configuration; the embedded configuration when unset.
    pub config_path: Option<PathBuf>,
    /// Directory for the log file; a per-user cache directory when unset.
    pub log_dir: Option<PathBuf>,
    /// Overrides the configured zone seed.
    pub seed: Option<u64>,
    /// Overrides the configured cost timing.
    pub cost_timing: Option<CostTiming>,
}

impl ServerConfig {
    pub const DEFAULT_TICK_MS: u64 = 100;

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(tick_ms) = read("ZONE_TICK_MS").and_then(|v| v.trim().parse::<u64>().ok()) {
            config.tick_ms = tick_ms.max(1);
        }
        config.catalog_path = read("ZONE_CATALOG_PATH").map(PathBuf::from);
        config.config_path = read("ZONE_CONFIG_PATH").map(PathBuf::from);
        config.log_dir = read("ZONE_LOG_DIR").map(PathBuf::from);
        config.seed = read("ZONE_SEED").and_then(|v| v.trim().parse().ok());
        config.cost_timing = read("ZONE_COST_TIMING").and_then(|v| v.trim().parse().ok());

        config
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            tick_ms: Self::DEFAULT_TICK_MS,
            catalog_path: None,
            config_path: None,
            log_dir: None,
            seed: None,
            cost_timing: None,
        }
    }
}
