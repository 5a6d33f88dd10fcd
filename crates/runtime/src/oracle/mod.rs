//! Runtime wrappers around the combat-core oracles.
//!
//! The catalog, spatial index and randomness source are bundled into an
//! [`OracleManager`] so the zone can build [`CombatEnv`] snapshots on demand.
//! The data is immutable at runtime; dynamic state lives in the zone's
//! [`World`](combat_core::World).

use std::sync::Arc;

use combat_core::{
    ActionOracle, CastObserver, CombatConfig, CombatEnv, PcgRng, RngOracle, ScanSpatial,
    SpatialOracle, StaticCatalog,
};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) catalog: Arc<dyn ActionOracle>,
    pub(crate) spatial: Arc<dyn SpatialOracle + Send + Sync>,
    pub(crate) rng: Arc<dyn RngOracle>,
}

impl OracleManager {
    /// Creates a manager over `catalog` with a linear-scan spatial index and
    /// the deterministic [`PcgRng`].
    pub fn new(catalog: Arc<dyn ActionOracle>) -> Self {
        Self {
            catalog,
            spatial: Arc::new(ScanSpatial),
            rng: Arc::new(PcgRng), // PcgRng is stateless
        }
    }

    pub fn from_catalog(catalog: StaticCatalog) -> Self {
        Self::new(Arc::new(catalog))
    }

    #[must_use]
    pub fn with_spatial(mut self, spatial: Arc<dyn SpatialOracle + Send + Sync>) -> Self {
        self.spatial = spatial;
        self
    }

    #[must_use]
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Converts oracle manager into a CombatEnv for combat-core
    pub fn as_combat_env<'a>(
        &'a self,
        observer: &'a dyn CastObserver,
        config: &'a CombatConfig,
    ) -> CombatEnv<'a> {
        CombatEnv::with_all(
            self.catalog.as_ref(),
            self.spatial.as_ref(),
            self.rng.as_ref(),
            observer,
            config,
        )
    }

    pub fn catalog(&self) -> &dyn ActionOracle {
        self.catalog.as_ref()
    }
}
