//! Zone server binary.
//!
//! Composition root that assembles one zone:
//! 1. Configuration from the environment (and `.env`)
//! 2. Logging to stderr and a log file
//! 3. Combat content (catalog + tuning) from disk or the embedded defaults
//! 4. The zone runtime, driven through a scripted session
//!
//! # Environment
//!
//! - `ZONE_TICK_MS`: simulated milliseconds per tick (default 100)
//! - `ZONE_CATALOG_PATH`: RON action catalog
//! - `ZONE_CONFIG_PATH`: TOML combat configuration
//! - `ZONE_LOG_DIR`: log directory
//! - `ZONE_SEED`: zone seed for critical and direct-hit rolls
//! - `ZONE_COST_TIMING`: `on_execute` or `on_start`
//! - `RUST_LOG`: log filter (default `info`)

mod config;
mod demo;
mod logging;

use anyhow::{Context, Result};

use combat_content::{CatalogLoader, ConfigLoader};
use runtime::{Runtime, RuntimeConfig, Topic};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ServerConfig::from_env();

    // 2. Setup logging
    let _log_guard = logging::setup_logging(&config)?;
    tracing::info!("Starting zone server");
    tracing::debug!(?config, "Server configuration");

    // 3. Load content
    let catalog = match &config.catalog_path {
        Some(path) => CatalogLoader::load(path)?,
        None => CatalogLoader::embedded().context("embedded action catalog")?,
    };
    let mut combat = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::embedded().context("embedded combat configuration")?,
    };
    if let Some(seed) = config.seed {
        combat = combat.with_seed(seed);
    }
    if let Some(cost_timing) = config.cost_timing {
        combat = combat.with_cost_timing(cost_timing);
    }
    tracing::info!(
        actions = catalog.len(),
        cost_timing = %combat.cost_timing,
        seed = combat.seed,
        "Content loaded"
    );

    // 4. Build runtime; the script owns the clock
    let runtime = Runtime::builder()
        .config(RuntimeConfig::default().with_combat(combat).manual_clock())
        .world(demo::world())
        .catalog(catalog)
        .build()?;

    let zone = runtime.handle();
    let event_log = tokio::spawn(demo::log_events(
        zone.subscribe(Topic::Cast),
        zone.subscribe(Topic::Combat),
    ));

    demo::run(&zone, config.tick_ms).await?;

    // 5. Shutdown; the event log drains once the worker drops the bus
    drop(zone);
    runtime.shutdown().await?;
    event_log.await?;

    tracing::info!("Zone server shutdown complete");
    Ok(())
}
