//! Deterministic combat action resolution.
//!
//! `combat-core` models a single cast from catalog lookup to staged effects:
//! pre-check, resource accounting, cast-time scheduling, target selection,
//! outcome computation and interruption. It owns no clock, no threads and no
//! I/O; the zone runtime drives every [`Action`] with its own `now` and
//! commits the resulting [`EffectBatch`]es to the [`World`].
//!
//! Collaborators (catalog, spatial queries, randomness, broadcast) are
//! consumed through the oracle traits in [`env`] and bundled in a
//! [`CombatEnv`].
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionCategory, ActionEntry, ActionError, ActionId, ActorFilter, Aspect, AttackType,
    CastPhase, CastProgress, CastType, CommitReport, CostModel, EffectBatch, EffectBuilder,
    EffectKind, EffectRecord, HitSeverity, InterruptType, OutcomeCalculator, PreCheckReason,
    ResourceCost, StatusApplication, TargetEffects, TargetFlags,
};
pub use config::{CombatConfig, CostTiming};
pub use env::{
    ActionOracle, CastObserver, CombatEnv, FixedRng, NullObserver, OracleError, PcgRng, RngOracle,
    SpatialOracle, StaticCatalog,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ActorConditions, ActorKind, ActorState, AppliedStatus, CombatStats, Cooldowns, EntityId,
    Faction, Position, ResourceKind, ResourcePools, ResourceStore, ScanSpatial, World,
};
