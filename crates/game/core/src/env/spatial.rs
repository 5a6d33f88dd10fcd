//! Spatial query oracle.

use crate::state::{EntityId, Position, World};

/// Proximity queries over a zone's actors.
///
/// Spatial indexing is owned by the zone; the combat core only consumes it.
/// Implementations may over-approximate: the filter pipeline re-checks range
/// and discards duplicates.
pub trait SpatialOracle {
    /// Returns every actor within `radius` of `origin` (ground-plane distance).
    fn actors_within(&self, world: &World, origin: Position, radius: f32) -> Vec<EntityId>;

    /// Returns true if `to` is visible from `from`.
    ///
    /// Zones without collision data treat everything as visible.
    fn line_of_sight(&self, _world: &World, _from: Position, _to: Position) -> bool {
        true
    }
}
