use std::collections::BTreeMap;

use crate::env::SpatialOracle;

use super::{ActorState, EntityId, Position};

/// Arena of actors in one zone, indexed by stable id.
///
/// Iteration is in ascending id order, which is also the order the zone
/// resolves casts that become ready in the same tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    actors: BTreeMap<EntityId, ActorState>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an actor, replacing (and returning) any actor with the same id.
    pub fn insert(&mut self, actor: ActorState) -> Option<ActorState> {
        self.actors.insert(actor.id, actor)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<ActorState> {
        self.actors.remove(&id)
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.actors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl FromIterator<ActorState> for World {
    fn from_iter<T: IntoIterator<Item = ActorState>>(iter: T) -> Self {
        let mut world = World::new();
        for actor in iter {
            world.insert(actor);
        }
        world
    }
}

/// Linear-scan spatial oracle over the arena.
///
/// Adequate for small zones and tests; large zones plug in a grid index
/// through the same [`SpatialOracle`] trait.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanSpatial;

impl SpatialOracle for ScanSpatial {
    fn actors_within(&self, world: &World, origin: Position, radius: f32) -> Vec<EntityId> {
        world
            .iter()
            .filter(|actor| origin.distance(&actor.position) <= radius)
            .map(|actor| actor.id)
            .collect()
    }
}
