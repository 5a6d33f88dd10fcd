//! Actor filters applied by the targeting pipeline.
//!
//! A cast owns an ordered list of [`ActorFilter`]s. The pipeline gathers
//! candidates from the spatial oracle, sorts them by distance (ties broken by
//! entity id) and threads them through each filter in turn. Filters may only
//! narrow or truncate the list, never add to it, so the sort order and the
//! range bound established at gather time hold for the final result.

use crate::action::TargetFlags;
use crate::state::{ActorConditions, ActorState, EntityId, Position, World, facing_vector};

// ============================================================================
// Candidates
// ============================================================================

/// An actor under consideration by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub id: EntityId,
    pub position: Position,
    /// Ground-plane distance from the pipeline origin.
    pub distance: f32,
}

/// Read-only view shared by every filter of one resolution.
#[derive(Clone, Copy)]
pub struct FilterContext<'a> {
    pub world: &'a World,
    pub caster: &'a ActorState,
    /// Actor selected by the cast, if it resolves to one.
    pub target: Option<EntityId>,
    /// Anchor of the area: caster, target or placed position.
    pub origin: Position,
}

impl<'a> FilterContext<'a> {
    pub fn new(world: &'a World, caster: &'a ActorState, origin: Position) -> Self {
        Self {
            world,
            caster,
            target: None,
            origin,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: Option<EntityId>) -> Self {
        self.target = target;
        self
    }

    fn actor(&self, id: EntityId) -> Option<&'a ActorState> {
        self.world.actor(id)
    }
}

// ============================================================================
// Filters
// ============================================================================

/// One stage of the targeting pipeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorFilter {
    /// Keep only the caster.
    SelfOnly,
    /// Keep only the actor selected by the cast.
    Target,
    /// Keep actors whose relation to the caster matches any of the flags.
    /// `DEAD` is ignored here; liveness has its own filters.
    Relation(TargetFlags),
    /// Drop dead actors.
    Alive,
    /// Keep dead actors only (resurrection).
    DeadOnly,
    /// Keep actors within `radius` of the origin.
    Circle { radius: f32 },
    /// Keep actors inside a cone from the caster along its facing.
    Cone { radius: f32, angle_deg: f32 },
    /// Keep actors inside a rectangle from the caster along its facing.
    Line { length: f32, width: f32 },
    /// Keep the first `count` candidates (nearest first).
    Nearest { count: usize },
}

impl ActorFilter {
    /// Applies the filter to an ordered candidate list.
    pub fn apply(&self, ctx: &FilterContext<'_>, candidates: Vec<Candidate>) -> Vec<Candidate> {
        match *self {
            Self::Nearest { count } => candidates.into_iter().take(count).collect(),
            _ => candidates
                .into_iter()
                .filter(|candidate| self.accepts(ctx, candidate))
                .collect(),
        }
    }

    /// Returns true if a single candidate passes this filter.
    ///
    /// Truncating filters accept everything here; their effect depends on
    /// the whole list.
    pub fn accepts(&self, ctx: &FilterContext<'_>, candidate: &Candidate) -> bool {
        match *self {
            Self::SelfOnly => candidate.id == ctx.caster.id,
            Self::Target => ctx.target == Some(candidate.id),
            Self::Relation(flags) => ctx
                .actor(candidate.id)
                .is_some_and(|actor| relation_matches(ctx.caster, actor, flags)),
            Self::Alive => ctx.actor(candidate.id).is_some_and(ActorState::is_alive),
            Self::DeadOnly => ctx.actor(candidate.id).is_some_and(ActorState::is_dead),
            Self::Circle { radius } => candidate.distance <= radius,
            Self::Cone { radius, angle_deg } => {
                in_cone(ctx.caster, candidate.position, radius, angle_deg)
            }
            Self::Line { length, width } => in_line(ctx.caster, candidate.position, length, width),
            Self::Nearest { .. } => true,
        }
    }

    /// Maximum reach of a shape filter, if this filter is one.
    pub fn reach(&self) -> Option<f32> {
        match *self {
            Self::Circle { radius } | Self::Cone { radius, .. } => Some(radius),
            Self::Line { length, width } => Some(length.hypot(width / 2.0)),
            _ => None,
        }
    }
}

pub(crate) fn relation_matches(caster: &ActorState, actor: &ActorState, flags: TargetFlags) -> bool {
    if actor.id == caster.id {
        return flags.contains(TargetFlags::SELF);
    }
    if actor.conditions.contains(ActorConditions::UNTARGETABLE) {
        return false;
    }

    (flags.contains(TargetFlags::PARTY) && caster.is_in_party_with(actor))
        || (flags.contains(TargetFlags::FRIENDLY) && caster.is_friendly_to(actor))
        || (flags.contains(TargetFlags::HOSTILE) && caster.is_hostile_to(actor))
}

fn in_cone(caster: &ActorState, position: Position, radius: f32, angle_deg: f32) -> bool {
    let distance = caster.position.distance(&position);
    if distance > radius {
        return false;
    }
    if distance <= f32::EPSILON {
        return true;
    }

    let (fx, fy) = facing_vector(caster.rotation);
    let (dx, dy) = caster.position.offset_to(&position);
    let cos = (fx * dx + fy * dy) / distance;
    let half_angle = (angle_deg / 2.0).to_radians();
    cos >= half_angle.cos() - f32::EPSILON
}

fn in_line(caster: &ActorState, position: Position, length: f32, width: f32) -> bool {
    let (fx, fy) = facing_vector(caster.rotation);
    let (dx, dy) = caster.position.offset_to(&position);
    let along = fx * dx + fy * dy;
    let across = (fx * dy - fy * dx).abs();
    (0.0..=length).contains(&along) && across <= width / 2.0
}
