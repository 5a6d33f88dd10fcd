//! Target resolution.
//!
//! 1. Pick the origin from the cast type (caster, selected target or placed
//!    position).
//! 2. Gather candidates from the spatial oracle within the widest shape reach.
//! 3. Drop ids that are not characters in the arena or lie outside the reach,
//!    whatever the oracle returned.
//! 4. Sort by distance, then entity id, and drop duplicates. A target-anchored
//!    cast keeps its selected target in front.
//! 5. Thread the list through the cast's filters in order.

use crate::action::targeting::{ActorFilter, Candidate, FilterContext};
use crate::action::{Action, CastType};
use crate::env::SpatialOracle;
use crate::state::{ActorState, EntityId, World};

/// Radius the pipeline gathers within: the widest reach among shape filters,
/// or zero when the filters only select the caster or target.
pub fn gather_radius(filters: &[ActorFilter]) -> f32 {
    filters
        .iter()
        .filter_map(ActorFilter::reach)
        .fold(0.0, f32::max)
}

/// Resolves the ordered set of actors a cast affects.
///
/// An empty result is valid: a cast may hit nothing, and a cast anchored on a
/// target that has since left the zone hits nothing.
pub fn resolve_targets(
    action: &Action,
    caster: &ActorState,
    world: &World,
    spatial: &dyn SpatialOracle,
) -> Vec<EntityId> {
    let target = action.target_actor();
    let origin = match action.cast_type() {
        cast_type if cast_type.is_caster_centred() => caster.position,
        CastType::PlacedCircle => match action.pos() {
            Some(pos) => pos,
            None => return Vec::new(),
        },
        _ => match target.and_then(|id| world.actor(id)) {
            Some(actor) => actor.position,
            None => return Vec::new(),
        },
    };

    let radius = gather_radius(action.filters());
    let mut candidates: Vec<Candidate> = spatial
        .actors_within(world, origin, radius)
        .into_iter()
        .filter_map(|id| world.actor(id))
        .filter(|actor| actor.is_character())
        .map(|actor| Candidate {
            id: actor.id,
            position: actor.position,
            distance: origin.distance(&actor.position),
        })
        .filter(|candidate| candidate.distance <= radius)
        .collect();

    // The selected target anchors the area and leads even when another actor
    // shares its exact position with a lower id.
    let anchor = target.filter(|_| action.cast_type().needs_target_actor());
    let is_anchor = |candidate: &Candidate| Some(candidate.id) == anchor;
    candidates.sort_by(|a, b| {
        is_anchor(b)
            .cmp(&is_anchor(a))
            .then_with(|| a.distance.total_cmp(&b.distance))
            .then_with(|| a.id.cmp(&b.id))
    });
    // Equal ids share a position, so duplicates are adjacent after sorting.
    candidates.dedup_by_key(|candidate| candidate.id);

    let ctx = FilterContext::new(world, caster, origin).with_target(target);
    for filter in action.filters() {
        candidates = filter.apply(&ctx, candidates);
    }

    candidates.into_iter().map(|candidate| candidate.id).collect()
}
