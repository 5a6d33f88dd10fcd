//! Action categories and their per-variant rules.
//!
//! Weaponskills, spells, abilities, item uses and auto-attacks share one
//! [`Action`](super::Action) state machine; the differences between them are
//! answered here by a closed enum instead of subclass overrides.

use crate::action::PreCheckReason;
use crate::state::ActorConditions;

/// Kind of action, deciding which conditions block it and how it is paid for.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionCategory {
    #[default]
    Weaponskill,
    Spell,
    Ability,
    /// Consumable use; the item itself is spent by the inventory system.
    Item,
    AutoAttack,
}

impl ActionCategory {
    /// Returns the reason `conditions` forbid this category, if any.
    pub fn blocked_by(self, conditions: ActorConditions) -> Option<PreCheckReason> {
        if conditions.contains(ActorConditions::STUNNED) {
            return Some(PreCheckReason::Incapacitated);
        }
        match self {
            Self::Spell if conditions.contains(ActorConditions::SILENCED) => {
                Some(PreCheckReason::Silenced)
            }
            Self::Weaponskill | Self::Ability
                if conditions.contains(ActorConditions::PACIFIED) =>
            {
                Some(PreCheckReason::Pacified)
            }
            _ => None,
        }
    }

    /// Returns true if casts of this category pay catalog costs.
    pub const fn pays_costs(self) -> bool {
        !matches!(self, Self::AutoAttack | Self::Item)
    }

    /// Returns true if this category uses cooldown groups and level gates.
    pub const fn has_requirements(self) -> bool {
        !matches!(self, Self::AutoAttack)
    }

    /// Returns true if a successful cast of this category opens a combo.
    pub const fn starts_combo(self) -> bool {
        matches!(self, Self::Weaponskill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_only_blocks_spells() {
        let silenced = ActorConditions::SILENCED;
        assert_eq!(
            ActionCategory::Spell.blocked_by(silenced),
            Some(PreCheckReason::Silenced)
        );
        assert_eq!(ActionCategory::Weaponskill.blocked_by(silenced), None);
        assert_eq!(ActionCategory::AutoAttack.blocked_by(silenced), None);
    }

    #[test]
    fn stun_blocks_everything() {
        for category in [
            ActionCategory::Weaponskill,
            ActionCategory::Spell,
            ActionCategory::Ability,
            ActionCategory::Item,
            ActionCategory::AutoAttack,
        ] {
            assert_eq!(
                category.blocked_by(ActorConditions::STUNNED),
                Some(PreCheckReason::Incapacitated)
            );
        }
    }

    #[test]
    fn pacify_blocks_weaponskills_and_abilities() {
        let pacified = ActorConditions::PACIFIED;
        assert!(ActionCategory::Weaponskill.blocked_by(pacified).is_some());
        assert!(ActionCategory::Ability.blocked_by(pacified).is_some());
        assert!(ActionCategory::Spell.blocked_by(pacified).is_none());
    }
}
