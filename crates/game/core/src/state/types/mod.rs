pub mod actor;
pub mod common;
pub mod world;

// Re-export all actor-related types
pub use actor::{
    ActorConditions, ActorKind, ActorState, AppliedStatus, CombatStats, Cooldowns, Faction,
    ResourceKind, ResourcePools, ResourceStore,
};

// Re-export common types
pub use common::{EntityId, Position, facing_vector};

// Re-export the actor arena
pub use world::{ScanSpatial, World};
