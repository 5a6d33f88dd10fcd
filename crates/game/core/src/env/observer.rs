//! Broadcast collaborator notified about cast progress.

use crate::action::{Action, EffectBatch};

/// Fire-and-forget observer for cast bars and results.
///
/// Nothing returned by an observer feeds back into resolution.
pub trait CastObserver {
    /// A cast with a cast bar has begun.
    fn notify_cast_start(&self, action: &Action);

    /// A cast finished and its effects were finalized.
    fn notify_cast_result(&self, action: &Action, effects: &EffectBatch);
}

/// Observer that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl CastObserver for NullObserver {
    fn notify_cast_start(&self, _action: &Action) {}

    fn notify_cast_result(&self, _action: &Action, _effects: &EffectBatch) {}
}
