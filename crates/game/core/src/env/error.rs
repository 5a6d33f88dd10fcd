//! Oracle access errors.
//!
//! Errors related to oracle availability in a [`CombatEnv`](super::CombatEnv).

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when a required oracle was not wired into the environment.
///
/// These are fatal for the cast in progress: the core cannot resolve a cast
/// without its catalog, spatial index, or randomness source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// ActionOracle is not available in the environment.
    #[error("ActionOracle not available")]
    CatalogNotAvailable,

    /// SpatialOracle is not available in the environment.
    #[error("SpatialOracle not available")]
    SpatialNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            SpatialNotAvailable => "ORACLE_SPATIAL_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
