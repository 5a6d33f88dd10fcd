//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and cast resolution so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{ActionError, EntityId, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("actor {actor} already has a cast in progress")]
    CastInProgress { actor: EntityId },

    #[error("cast by {actor} rejected")]
    CastRejected {
        actor: EntityId,
        #[source]
        error: ActionError,
    },

    #[error("actor {0} not found in zone")]
    ActorNotFound(EntityId),

    #[error("runtime requires an action catalog before building")]
    MissingCatalog,

    #[error("zone worker command channel closed")]
    CommandChannelClosed,

    #[error("zone worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("zone worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// The cast error behind a rejection, if this is one.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            Self::CastRejected { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CastRejected { error, .. } => error.severity(),
            Self::CastInProgress { .. } => ErrorSeverity::Recoverable,
            Self::ActorNotFound(_) => ErrorSeverity::Validation,
            Self::MissingCatalog => ErrorSeverity::Internal,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CastRejected { error, .. } => error.error_code(),
            Self::CastInProgress { .. } => "RUNTIME_CAST_IN_PROGRESS",
            Self::ActorNotFound(_) => "RUNTIME_ACTOR_NOT_FOUND",
            Self::MissingCatalog => "RUNTIME_MISSING_CATALOG",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
        }
    }
}
