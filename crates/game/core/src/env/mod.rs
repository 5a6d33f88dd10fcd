//! Traits describing the collaborators a cast consumes.
//!
//! Oracles expose the static action catalog, spatial queries, randomness and
//! the broadcast observer. The [`CombatEnv`] aggregate bundles them so a cast
//! can access everything it needs without hard coupling to concrete
//! implementations.
mod actions;
mod error;
mod observer;
mod rng;
mod spatial;

pub use actions::{ActionOracle, StaticCatalog};
pub use error::OracleError;
pub use observer::{CastObserver, NullObserver};
pub use rng::{BASIS_POINTS, FixedRng, PcgRng, RngOracle, compute_seed};
pub use spatial::SpatialOracle;

use crate::config::CombatConfig;

static DEFAULT_CONFIG: CombatConfig = CombatConfig::new();

/// Aggregates the read-only collaborators required by the action pipeline.
///
/// Missing catalog, spatial or rng oracles surface as [`OracleError`] when a
/// cast needs them; a missing observer simply drops notifications and a
/// missing config falls back to [`CombatConfig::default`].
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    catalog: Option<&'a dyn ActionOracle>,
    spatial: Option<&'a dyn SpatialOracle>,
    rng: Option<&'a dyn RngOracle>,
    observer: Option<&'a dyn CastObserver>,
    config: Option<&'a CombatConfig>,
}

impl<'a> CombatEnv<'a> {
    pub fn empty() -> Self {
        Self {
            catalog: None,
            spatial: None,
            rng: None,
            observer: None,
            config: None,
        }
    }

    pub fn with_all(
        catalog: &'a dyn ActionOracle,
        spatial: &'a dyn SpatialOracle,
        rng: &'a dyn RngOracle,
        observer: &'a dyn CastObserver,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            catalog: Some(catalog),
            spatial: Some(spatial),
            rng: Some(rng),
            observer: Some(observer),
            config: Some(config),
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: &'a dyn ActionOracle) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn with_spatial(mut self, spatial: &'a dyn SpatialOracle) -> Self {
        self.spatial = Some(spatial);
        self
    }

    #[must_use]
    pub fn with_rng(mut self, rng: &'a dyn RngOracle) -> Self {
        self.rng = Some(rng);
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn CastObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: &'a CombatConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns the ActionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CatalogNotAvailable` if no catalog was provided.
    pub fn catalog(&self) -> Result<&'a dyn ActionOracle, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the SpatialOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SpatialNotAvailable` if no spatial oracle was provided.
    pub fn spatial(&self) -> Result<&'a dyn SpatialOracle, OracleError> {
        self.spatial.ok_or(OracleError::SpatialNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    pub fn observer(&self) -> Option<&'a dyn CastObserver> {
        self.observer
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config.unwrap_or(&DEFAULT_CONFIG)
    }
}

impl Default for CombatEnv<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
