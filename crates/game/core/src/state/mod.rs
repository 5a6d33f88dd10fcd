//! Zone-level actor state consumed by cast resolution.
//!
//! Actors live in an arena ([`World`]) keyed by stable [`EntityId`]s. Casts
//! only ever hold ids; the caster's own pools and cooldowns are mutated while
//! a cast resolves, every other actor is touched only when the caller commits
//! a finished [`EffectBatch`](crate::action::EffectBatch).
pub mod types;

pub use types::{
    ActorConditions, ActorKind, ActorState, AppliedStatus, CombatStats, Cooldowns, EntityId,
    Faction, Position, ResourceKind, ResourcePools, ResourceStore, ScanSpatial, World,
    facing_vector,
};
