//! Resource pools and the per-actor resource store contract.

/// Individual resource pools an action can cost or restore.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    /// Health points.
    Hp,
    /// Magic points (spell costs).
    Mp,
    /// Tactical points (weaponskill costs).
    Tp,
    /// Class gauge used as a secondary cost (e.g. combo or stack resources).
    Gauge,
}

/// Per-actor resource store consumed by the cost model.
///
/// `deduct` must succeed exactly when `has` returns true for the same
/// arguments, and leave the pool untouched when it refuses.
pub trait ResourceStore {
    /// Returns true if `amount` of `kind` can be paid.
    fn has(&self, kind: ResourceKind, amount: u32) -> bool;

    /// Deducts `amount` of `kind`, returning false if it cannot be paid.
    fn deduct(&mut self, kind: ResourceKind, amount: u32) -> bool;
}

/// Current and maximum values of every pool an actor carries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePools {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub tp: u32,
    pub max_tp: u32,
    pub gauge: u32,
    pub max_gauge: u32,
}

impl ResourcePools {
    pub const fn new(max_hp: u32, max_mp: u32, max_tp: u32, max_gauge: u32) -> Self {
        Self {
            hp: max_hp,
            mp: max_mp,
            tp: max_tp,
            gauge: 0,
            max_hp,
            max_mp,
            max_tp,
            max_gauge,
        }
    }

    /// Sets the current gauge value (clamped to the maximum).
    #[must_use]
    pub fn with_gauge(mut self, gauge: u32) -> Self {
        self.gauge = gauge.min(self.max_gauge);
        self
    }

    pub fn current(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Hp => self.hp,
            ResourceKind::Mp => self.mp,
            ResourceKind::Tp => self.tp,
            ResourceKind::Gauge => self.gauge,
        }
    }

    pub fn maximum(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Hp => self.max_hp,
            ResourceKind::Mp => self.max_mp,
            ResourceKind::Tp => self.max_tp,
            ResourceKind::Gauge => self.max_gauge,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Hp => &mut self.hp,
            ResourceKind::Mp => &mut self.mp,
            ResourceKind::Tp => &mut self.tp,
            ResourceKind::Gauge => &mut self.gauge,
        }
    }

    /// Removes up to `amount`, returning how much was actually removed.
    pub fn drain(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let slot = self.slot_mut(kind);
        let actual = amount.min(*slot);
        *slot -= actual;
        actual
    }

    /// Restores up to `amount` without exceeding the maximum, returning the
    /// amount actually restored.
    pub fn restore(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let max = self.maximum(kind);
        let slot = self.slot_mut(kind);
        let actual = amount.min(max.saturating_sub(*slot));
        *slot += actual;
        actual
    }
}

impl Default for ResourcePools {
    fn default() -> Self {
        Self::new(1_000, 1_000, 1_000, 100)
    }
}

impl ResourceStore for ResourcePools {
    fn has(&self, kind: ResourceKind, amount: u32) -> bool {
        match kind {
            // Paying with health may never be lethal.
            ResourceKind::Hp => amount == 0 || self.hp > amount,
            _ => self.current(kind) >= amount,
        }
    }

    fn deduct(&mut self, kind: ResourceKind, amount: u32) -> bool {
        if !self.has(kind, amount) {
            return false;
        }
        *self.slot_mut(kind) -= amount;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduct_refuses_without_touching_pool() {
        let mut pools = ResourcePools::new(100, 50, 0, 10);
        assert!(!pools.deduct(ResourceKind::Mp, 51));
        assert_eq!(pools.mp, 50);
        assert!(pools.deduct(ResourceKind::Mp, 50));
        assert_eq!(pools.mp, 0);
    }

    #[test]
    fn hp_cost_cannot_be_lethal() {
        let pools = ResourcePools::new(100, 0, 0, 0);
        assert!(!pools.has(ResourceKind::Hp, 100));
        assert!(pools.has(ResourceKind::Hp, 99));
    }

    #[test]
    fn restore_clamps_to_maximum() {
        let mut pools = ResourcePools::new(100, 100, 100, 0);
        pools.drain(ResourceKind::Mp, 30);
        assert_eq!(pools.restore(ResourceKind::Mp, 50), 30);
        assert_eq!(pools.mp, 100);
    }

    #[test]
    fn resource_kind_parses_from_snake_case() {
        assert_eq!("gauge".parse::<ResourceKind>(), Ok(ResourceKind::Gauge));
        assert_eq!(ResourceKind::Tp.as_ref(), "tp");
    }
}
