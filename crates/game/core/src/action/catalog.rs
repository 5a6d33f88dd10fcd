//! Static action parameters - the catalog entry for each action id.
//!
//! Entries are loaded from RON data files by `combat-content` and served
//! through [`ActionOracle`](crate::env::ActionOracle). An [`Action`](super::Action)
//! copies what it needs out of its entry at `init` and never consults the
//! catalog again.

use std::fmt;

use bitflags::bitflags;

use crate::action::ActionCategory;
use crate::state::ResourceKind;

/// Identifier of a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionId(pub u32);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action:{}", self.0)
    }
}

/// Area shape and anchor of an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CastType {
    /// One explicitly selected actor.
    #[default]
    SingleTarget,
    /// The caster only.
    SelfOnly,
    /// Circle centred on the caster.
    CircleAroundCaster,
    /// Circle centred on the selected target.
    CircleAroundTarget,
    /// Circle centred on a ground position chosen by the client.
    PlacedCircle,
    /// Cone from the caster in its facing direction.
    Cone,
    /// Rectangle from the caster in its facing direction.
    Line,
    /// Selected target plus the nearest actors around it.
    Chain,
}

impl CastType {
    /// Returns true if the shape is anchored on an explicitly selected actor.
    pub const fn needs_target_actor(self) -> bool {
        matches!(
            self,
            Self::SingleTarget | Self::CircleAroundTarget | Self::Chain
        )
    }

    /// Returns true if the shape is anchored on the caster.
    pub const fn is_caster_centred(self) -> bool {
        matches!(
            self,
            Self::SelfOnly | Self::CircleAroundCaster | Self::Cone | Self::Line
        )
    }
}

/// How an attack is delivered; decides which defence applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackType {
    #[default]
    Slashing,
    Piercing,
    Blunt,
    Shot,
    Magic,
    Breath,
    Sound,
    /// Neither physical nor magical (fixed-potency effects).
    Unaspected,
}

impl AttackType {
    pub const fn is_physical(self) -> bool {
        matches!(
            self,
            Self::Slashing | Self::Piercing | Self::Blunt | Self::Shot
        )
    }

    pub const fn is_magical(self) -> bool {
        matches!(self, Self::Magic | Self::Breath | Self::Sound)
    }
}

/// Elemental aspect of an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Aspect {
    /// No element; resistances do not apply.
    #[default]
    None,
    Fire,
    Ice,
    Wind,
    Earth,
    Lightning,
    Water,
}

impl Aspect {
    /// Index into [`CombatStats::resistances`](crate::state::CombatStats::resistances).
    pub const fn element_index(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Fire => Some(0),
            Self::Ice => Some(1),
            Self::Wind => Some(2),
            Self::Earth => Some(3),
            Self::Lightning => Some(4),
            Self::Water => Some(5),
        }
    }
}

bitflags! {
    /// Relations an action may affect.
    ///
    /// `DEAD` marks resurrection-style actions: only dead actors qualify.
    /// Without it, dead actors are never affected.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TargetFlags: u8 {
        const SELF     = 1 << 0;
        const PARTY    = 1 << 1;
        const FRIENDLY = 1 << 2;
        const HOSTILE  = 1 << 3;
        const DEAD     = 1 << 4;
    }
}

/// Amount of one resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub resource: ResourceKind,
    pub amount: u32,
}

impl ResourceCost {
    pub const fn new(resource: ResourceKind, amount: u32) -> Self {
        Self { resource, amount }
    }

    pub const fn mp(amount: u32) -> Self {
        Self::new(ResourceKind::Mp, amount)
    }

    pub const fn tp(amount: u32) -> Self {
        Self::new(ResourceKind::Tp, amount)
    }

    pub const fn gauge(amount: u32) -> Self {
        Self::new(ResourceKind::Gauge, amount)
    }
}

/// Status applied when an action lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub status_id: u16,
    pub duration_ms: u32,
    /// Apply to the caster instead of every hit actor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_caster: bool,
}

/// Static parameters for one action id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionEntry {
    pub id: ActionId,
    pub name: String,
    pub category: ActionCategory,
    pub cast_type: CastType,
    pub attack_type: AttackType,
    pub aspect: Aspect,

    /// Cast bar duration; zero for instant actions.
    pub cast_time_ms: u32,
    pub recast_ms: u32,
    /// Zero means the action has no cooldown group.
    pub cooldown_group: u8,
    /// Maximum caster-to-target distance in yalms.
    pub range: f32,
    /// Radius (or length) of the affected area in yalms.
    pub effect_range: f32,
    /// Cone angle in degrees or line width in yalms, depending on `cast_type`.
    pub x_axis_modifier: f32,
    /// Maximum actors affected by a chain.
    pub chain_targets: u8,
    pub targets: TargetFlags,

    pub primary_cost: Option<ResourceCost>,
    pub secondary_cost: Option<ResourceCost>,

    pub level: u8,
    /// Class/job required to use the action, if any.
    pub class_job: Option<u8>,

    /// Damage potency in basis points (10 000 = 100 % of the caster's offence).
    pub potency: u32,
    /// Damage potency used when the action continues a combo.
    pub combo_potency: u32,
    /// Healing potency in basis points.
    pub heal_potency: u32,
    /// Action that must precede this one to count as a combo.
    pub combo_from: Option<ActionId>,
    /// Refuse the action entirely unless it continues a combo.
    pub requires_combo: bool,
    /// Resource restored to the caster on execution.
    pub restore: Option<ResourceCost>,
    pub status: Option<StatusApplication>,
    pub animation_lock_ms: Option<u32>,
}

impl Default for ActionEntry {
    fn default() -> Self {
        Self {
            id: ActionId::default(),
            name: String::new(),
            category: ActionCategory::default(),
            cast_type: CastType::default(),
            attack_type: AttackType::default(),
            aspect: Aspect::default(),
            cast_time_ms: 0,
            recast_ms: 0,
            cooldown_group: 0,
            range: 3.0,
            effect_range: 0.0,
            x_axis_modifier: 0.0,
            chain_targets: 0,
            targets: TargetFlags::HOSTILE,
            primary_cost: None,
            secondary_cost: None,
            level: 1,
            class_job: None,
            potency: 0,
            combo_potency: 0,
            heal_potency: 0,
            combo_from: None,
            requires_combo: false,
            restore: None,
            status: None,
            animation_lock_ms: None,
        }
    }
}

impl ActionEntry {
    pub fn new(id: ActionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_combo_action(&self) -> bool {
        self.combo_from.is_some()
    }
}
