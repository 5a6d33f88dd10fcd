//! Cast resolution errors.
//!
//! Every variant is a non-fatal, per-cast outcome reported to the owner of the
//! cast; none of them should ever abort a zone tick.

use crate::action::{ActionId, CastPhase};
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Why a cast was interrupted.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum InterruptType {
    /// Interrupt without a more specific cause.
    #[default]
    RegularInterrupt,
    /// The caster moved while casting.
    Movement,
    /// The caster took damage while casting.
    DamageTaken,
    /// The caster (or the client) cancelled the cast.
    Cancelled,
    /// The caster died.
    Death,
    /// The caster was silenced during a spell.
    Silenced,
}

/// Why a pre-check rejected a cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PreCheckReason {
    CasterNotFound,
    CasterDead,
    LevelTooLow,
    WrongClass,
    Silenced,
    Pacified,
    Incapacitated,
    OnCooldown,
    MissingCombo,
    TargetNotFound,
    InvalidTarget,
    OutOfRange,
    NoLineOfSight,
}

/// Errors that can occur while resolving a cast.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ActionError {
    /// The action id is not in the catalog.
    #[error("action {action_id} not found in catalog")]
    DataNotFound { action_id: ActionId },

    /// A readiness check failed.
    #[error("pre-check failed: {reason}")]
    PreCheckFailed { reason: PreCheckReason },

    /// Primary or secondary cost cannot be paid.
    #[error("insufficient resources")]
    InsufficientResources,

    /// The cast was interrupted before it could execute.
    #[error("cast interrupted: {cause}")]
    Interrupted { cause: InterruptType },

    /// The caster left the zone while the cast was pending.
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    /// A lifecycle operation was called in a phase that does not allow it.
    #[error("cannot {operation} a cast in phase {phase}")]
    InvalidPhase {
        phase: CastPhase,
        operation: &'static str,
    },

    /// A required oracle is missing from the environment.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ActionError {
    pub fn pre_check(reason: PreCheckReason) -> Self {
        Self::PreCheckFailed { reason }
    }

    pub fn interrupted(cause: InterruptType) -> Self {
        Self::Interrupted { cause }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            DataNotFound { .. } => ErrorSeverity::Validation,
            PreCheckFailed { reason } => match reason {
                PreCheckReason::LevelTooLow
                | PreCheckReason::WrongClass
                | PreCheckReason::InvalidTarget
                | PreCheckReason::CasterNotFound => ErrorSeverity::Validation,
                _ => ErrorSeverity::Recoverable,
            },
            InsufficientResources | Interrupted { .. } => ErrorSeverity::Recoverable,
            ActorNotFound(_) => ErrorSeverity::Validation,
            InvalidPhase { .. } => ErrorSeverity::Internal,
            Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            DataNotFound { .. } => "ACTION_DATA_NOT_FOUND",
            PreCheckFailed { .. } => "ACTION_PRE_CHECK_FAILED",
            InsufficientResources => "ACTION_INSUFFICIENT_RESOURCES",
            Interrupted { .. } => "ACTION_INTERRUPTED",
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            InvalidPhase { .. } => "ACTION_INVALID_PHASE",
            Oracle(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cause() {
        let err = ActionError::interrupted(InterruptType::DamageTaken);
        assert_eq!(err.to_string(), "cast interrupted: damage_taken");

        let err = ActionError::pre_check(PreCheckReason::OutOfRange);
        assert_eq!(err.to_string(), "pre-check failed: out_of_range");
    }

    #[test]
    fn severities_classify_recoverability() {
        assert!(ActionError::InsufficientResources.severity().is_recoverable());
        assert_eq!(
            ActionError::DataNotFound {
                action_id: ActionId(9)
            }
            .severity(),
            ErrorSeverity::Validation
        );
        assert!(
            ActionError::from(OracleError::RngNotAvailable)
                .severity()
                .is_internal()
        );
    }
}
