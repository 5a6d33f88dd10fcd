//! Error classification shared by every combat-core error.
//!
//! Concrete errors live next to the code that raises them
//! ([`ActionError`](crate::action::ActionError) for casts,
//! [`OracleError`](crate::env::OracleError) for missing collaborators). They
//! are plain values: a rejected cast never aborts the zone tick, the owner of
//! the cast turns it into a rejection for the client.

/// How a caller should react to a failed cast.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The same cast may succeed later: cooldown, range, resources, interrupts.
    Recoverable,
    /// The request itself is wrong: unknown action, unknown actor, bad target kind.
    Validation,
    /// A lifecycle call arrived out of order.
    Internal,
    /// The environment lacks a collaborator; no cast can resolve.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for failures that point at a bug in the caller or the wiring.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Severity and a stable rejection code for an error.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Upper snake case code sent to clients with a rejection.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
