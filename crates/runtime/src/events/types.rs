//! Event types for different topics.

use combat_core::{
    ActionError, ActionId, CastPhase, EffectBatch, EntityId, GameError, InterruptType, Position,
};
use serde::{Deserialize, Serialize};

/// Events describing the life of one cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CastEvent {
    /// A cast bar began.
    Started {
        source: EntityId,
        action: ActionId,
        sequence: u16,
        target_id: u64,
        cast_time_ms: u32,
        at: u64,
    },

    /// A cast executed; effects are staged but not yet committed.
    Completed {
        source: EntityId,
        action: ActionId,
        sequence: u16,
        hits: Vec<EntityId>,
        effects: EffectBatch,
    },

    /// A pending cast was interrupted by the zone.
    Interrupted {
        source: EntityId,
        action: ActionId,
        sequence: u16,
        cause: InterruptType,
        at: u64,
    },

    /// A cast was refused or failed before producing effects.
    Rejected {
        source: EntityId,
        action: ActionId,
        /// Phase the cast was left in.
        phase: CastPhase,
        code: String,
        error: String,
    },
}

impl CastEvent {
    pub(crate) fn rejected(
        source: EntityId,
        action: ActionId,
        phase: CastPhase,
        error: &ActionError,
    ) -> Self {
        Self::Rejected {
            source,
            action,
            phase,
            code: error.error_code().to_owned(),
            error: error.to_string(),
        }
    }

    /// Actor that owns the cast.
    pub fn source(&self) -> EntityId {
        match self {
            Self::Started { source, .. }
            | Self::Completed { source, .. }
            | Self::Interrupted { source, .. }
            | Self::Rejected { source, .. } => *source,
        }
    }
}

/// Events describing committed changes to actors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A cast's effect batch was applied to the world.
    EffectsCommitted {
        source: EntityId,
        action: ActionId,
        sequence: u16,
        damage: u64,
        healing: u64,
        at: u64,
    },

    /// An actor's health reached zero.
    Died { actor: EntityId, at: u64 },

    /// An actor was repositioned.
    Moved { actor: EntityId, position: Position },
}
