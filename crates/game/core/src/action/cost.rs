//! Resource cost model.
//!
//! An action has two independent cost slots. Payment is all-or-nothing: both
//! slots are checked against the caster's [`ResourceStore`] before anything is
//! deducted, so a cast can never pay its primary cost and then fail on its
//! secondary cost (or the other way around).

use crate::action::{ActionError, ResourceCost};
use crate::state::ResourceStore;

/// Primary and secondary cost of one cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    pub primary: Option<ResourceCost>,
    pub secondary: Option<ResourceCost>,
}

impl CostModel {
    pub const fn new(primary: Option<ResourceCost>, secondary: Option<ResourceCost>) -> Self {
        Self { primary, secondary }
    }

    /// Cost model that charges nothing.
    pub const fn free() -> Self {
        Self::new(None, None)
    }

    pub fn is_free(&self) -> bool {
        self.primary.is_none_or(|cost| cost.amount == 0)
            && self.secondary.is_none_or(|cost| cost.amount == 0)
    }

    /// Returns true if the primary cost alone is affordable.
    pub fn primary_check<S: ResourceStore + ?Sized>(&self, store: &S) -> bool {
        self.primary
            .is_none_or(|cost| store.has(cost.resource, cost.amount))
    }

    /// Returns true if the secondary cost alone is affordable.
    pub fn secondary_check<S: ResourceStore + ?Sized>(&self, store: &S) -> bool {
        self.secondary
            .is_none_or(|cost| store.has(cost.resource, cost.amount))
    }

    /// Returns true if both costs are affordable together. Never mutates.
    ///
    /// When both slots draw from the same pool the combined amount is checked.
    pub fn has_resources<S: ResourceStore + ?Sized>(&self, store: &S) -> bool {
        match (self.primary, self.secondary) {
            (Some(primary), Some(secondary)) if primary.resource == secondary.resource => {
                store.has(
                    primary.resource,
                    primary.amount.saturating_add(secondary.amount),
                )
            }
            _ => self.primary_check(store) && self.secondary_check(store),
        }
    }

    /// Deducts both costs, or neither.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::InsufficientResources` with the store untouched if
    /// either cost cannot be paid.
    pub fn consume_resources<S: ResourceStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<(), ActionError> {
        if !self.has_resources(store) {
            return Err(ActionError::InsufficientResources);
        }

        for cost in [self.primary, self.secondary].into_iter().flatten() {
            let paid = store.deduct(cost.resource, cost.amount);
            debug_assert!(paid, "ResourceStore::deduct disagreed with has()");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ResourceKind, ResourcePools};

    fn pools(mp: u32, gauge: u32) -> ResourcePools {
        let mut pools = ResourcePools::default().with_gauge(gauge);
        pools.mp = mp;
        pools
    }

    #[test]
    fn consumes_both_slots_when_affordable() {
        let model = CostModel::new(Some(ResourceCost::mp(200)), Some(ResourceCost::gauge(50)));
        let mut store = pools(500, 60);

        model.consume_resources(&mut store).unwrap();

        assert_eq!(store.mp, 300);
        assert_eq!(store.gauge, 10);
    }

    #[test]
    fn secondary_shortfall_leaves_primary_untouched() {
        let model = CostModel::new(Some(ResourceCost::mp(200)), Some(ResourceCost::gauge(50)));
        let mut store = pools(500, 49);

        let result = model.consume_resources(&mut store);

        assert_eq!(result, Err(ActionError::InsufficientResources));
        assert_eq!(store.mp, 500);
        assert_eq!(store.gauge, 49);
    }

    #[test]
    fn primary_shortfall_leaves_secondary_untouched() {
        let model = CostModel::new(Some(ResourceCost::mp(200)), Some(ResourceCost::gauge(50)));
        let mut store = pools(199, 100);

        assert!(model.consume_resources(&mut store).is_err());
        assert_eq!(store.mp, 199);
        assert_eq!(store.gauge, 100);
    }

    #[test]
    fn same_pool_costs_are_checked_together() {
        let model = CostModel::new(
            Some(ResourceCost::new(ResourceKind::Mp, 300)),
            Some(ResourceCost::new(ResourceKind::Mp, 300)),
        );
        let mut store = pools(500, 0);

        assert!(model.primary_check(&store) && model.secondary_check(&store));
        assert!(!model.has_resources(&store));
        assert!(model.consume_resources(&mut store).is_err());
        assert_eq!(store.mp, 500);
    }

    #[test]
    fn free_model_always_succeeds() {
        let mut store = pools(0, 0);
        assert!(CostModel::free().is_free());
        assert!(CostModel::free().consume_resources(&mut store).is_ok());
    }
}
