//! Recast bookkeeping per cooldown group.

use std::collections::BTreeMap;

/// Cooldown groups that are busy until a given zone timestamp (milliseconds).
///
/// Group `0` is the "no group" sentinel and is never tracked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldowns {
    ready_at: BTreeMap<u8, u64>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `group` can be used at `now_ms`.
    pub fn is_ready(&self, group: u8, now_ms: u64) -> bool {
        group == 0
            || self
                .ready_at
                .get(&group)
                .is_none_or(|&ready_at| ready_at <= now_ms)
    }

    /// Marks `group` busy until `ready_at_ms`. Never shortens a running recast.
    pub fn trigger(&mut self, group: u8, ready_at_ms: u64) {
        if group == 0 {
            return;
        }
        let entry = self.ready_at.entry(group).or_insert(0);
        *entry = (*entry).max(ready_at_ms);
    }

    /// Returns the timestamp at which `group` becomes ready, if it is tracked.
    pub fn ready_at(&self, group: u8) -> Option<u64> {
        self.ready_at.get(&group).copied()
    }
}
