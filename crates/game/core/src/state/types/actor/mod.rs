//! Actor-related state types.
//!
//! This module contains the per-actor data cast resolution reads and writes:
//! - ActorState: Main actor structure
//! - Resources: Pools and the `ResourceStore` contract used by the cost model
//! - Cooldowns: Recast timers per cooldown group

pub mod cooldowns;
pub mod resources;

use bitflags::bitflags;

pub use cooldowns::Cooldowns;
pub use resources::{ResourceKind, ResourcePools, ResourceStore};

use super::{EntityId, Position};
use crate::action::ActionId;

/// What sort of entity an actor is.
///
/// Only characters can be hit by actions; objects share the arena so spatial
/// queries may return them, and the filter pipeline drops them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    #[default]
    Player,
    BattleNpc,
    /// Non-character resident (event objects, ground markers).
    Object,
}

/// Allegiance used to derive friendly/hostile relations.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Faction {
    #[default]
    Ally,
    Enemy,
    /// Neither friendly nor hostile to anyone but itself.
    Neutral,
}

bitflags! {
    /// Crowd-control conditions that gate which actions an actor may use.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActorConditions: u8 {
        /// Blocks spells.
        const SILENCED = 1 << 0;
        /// Blocks weaponskills and abilities.
        const PACIFIED = 1 << 1;
        /// Blocks every action, including auto-attacks.
        const STUNNED  = 1 << 2;
        /// Cannot be selected by anyone else's actions.
        const UNTARGETABLE = 1 << 3;
    }
}

/// Offensive and defensive stats read by the outcome calculator.
///
/// Rates are in basis points (10 000 = 100 %). Resistances are percentages per
/// element in the order of [`Aspect::element_index`](crate::action::Aspect::element_index);
/// negative values are weaknesses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub attack_power: u32,
    pub magic_power: u32,
    pub healing_power: u32,
    pub defense: u32,
    pub magic_defense: u32,
    pub critical_rate: u32,
    pub direct_hit_rate: u32,
    pub resistances: [i16; 6],
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            attack_power: 100,
            magic_power: 100,
            healing_power: 100,
            defense: 0,
            magic_defense: 0,
            critical_rate: 500,
            direct_hit_rate: 0,
            resistances: [0; 6],
        }
    }
}

/// A status recorded on an actor by a committed effect.
///
/// Only application is tracked here; expiry belongs to the status system.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedStatus {
    pub status_id: u16,
    pub source: EntityId,
    pub duration_ms: u32,
}

/// Complete actor state as seen by the combat core.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub kind: ActorKind,
    pub position: Position,
    /// Facing in radians (0 = +x, counter-clockwise).
    pub rotation: f32,
    pub level: u8,
    pub class_job: u8,
    pub faction: Faction,
    pub party: Option<u32>,
    pub resources: ResourcePools,
    pub stats: CombatStats,
    pub conditions: ActorConditions,
    pub cooldowns: Cooldowns,
    /// Last weaponskill that can be continued by a combo action.
    pub combo: Option<ActionId>,
    pub statuses: Vec<AppliedStatus>,
}

impl ActorState {
    pub fn new(id: EntityId, position: Position) -> Self {
        Self {
            id,
            kind: ActorKind::default(),
            position,
            rotation: 0.0,
            level: 1,
            class_job: 0,
            faction: Faction::default(),
            party: None,
            resources: ResourcePools::default(),
            stats: CombatStats::default(),
            conditions: ActorConditions::empty(),
            cooldowns: Cooldowns::new(),
            combo: None,
            statuses: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ActorKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    #[must_use]
    pub fn with_party(mut self, party: u32) -> Self {
        self.party = Some(party);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_class_job(mut self, class_job: u8) -> Self {
        self.class_job = class_job;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: ResourcePools) -> Self {
        self.resources = resources;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_conditions(mut self, conditions: ActorConditions) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.resources.hp > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn is_character(&self) -> bool {
        !matches!(self.kind, ActorKind::Object)
    }

    pub fn is_hostile_to(&self, other: &ActorState) -> bool {
        matches!(
            (self.faction, other.faction),
            (Faction::Ally, Faction::Enemy) | (Faction::Enemy, Faction::Ally)
        )
    }

    pub fn is_friendly_to(&self, other: &ActorState) -> bool {
        self.faction == other.faction
    }

    /// Party membership; an actor always counts as its own party member.
    pub fn is_in_party_with(&self, other: &ActorState) -> bool {
        self.id == other.id || (self.party.is_some() && self.party == other.party)
    }
}

impl ResourceStore for ActorState {
    fn has(&self, kind: ResourceKind, amount: u32) -> bool {
        self.resources.has(kind, amount)
    }

    fn deduct(&mut self, kind: ResourceKind, amount: u32) -> bool {
        self.resources.deduct(kind, amount)
    }
}
