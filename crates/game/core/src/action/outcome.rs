//! Damage and healing magnitude.
//!
//! The deterministic base is built from caster offence, target defence and
//! elemental resistance. Critical and direct hits are two independent rolls
//! against the caster's rates, drawn from the injected [`RngOracle`] with seeds
//! derived from the zone seed, the cast sequence and both actor ids.

use crate::action::{Aspect, AttackType};
use crate::config::CombatConfig;
use crate::env::{BASIS_POINTS, RngOracle, compute_seed};
use crate::state::ActorState;

/// Severity of a computed hit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HitSeverity {
    #[default]
    Normal,
    Critical,
    DirectHit,
    CriticalDirectHit,
}

impl HitSeverity {
    pub const fn from_rolls(critical: bool, direct_hit: bool) -> Self {
        match (critical, direct_hit) {
            (false, false) => Self::Normal,
            (true, false) => Self::Critical,
            (false, true) => Self::DirectHit,
            (true, true) => Self::CriticalDirectHit,
        }
    }

    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Critical | Self::CriticalDirectHit)
    }

    pub const fn is_direct_hit(self) -> bool {
        matches!(self, Self::DirectHit | Self::CriticalDirectHit)
    }
}

/// How an action's damage is delivered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageProfile {
    pub attack_type: AttackType,
    pub aspect: Aspect,
}

impl DamageProfile {
    pub const fn new(attack_type: AttackType, aspect: Aspect) -> Self {
        Self {
            attack_type,
            aspect,
        }
    }
}

/// Computes outcomes of one caster against one target.
pub struct OutcomeCalculator<'a> {
    caster: &'a ActorState,
    target: &'a ActorState,
    profile: DamageProfile,
    config: &'a CombatConfig,
    rng: &'a dyn RngOracle,
    critical_seed: u64,
    direct_hit_seed: u64,
}

impl<'a> OutcomeCalculator<'a> {
    pub fn new(
        caster: &'a ActorState,
        target: &'a ActorState,
        profile: DamageProfile,
        config: &'a CombatConfig,
        rng: &'a dyn RngOracle,
        sequence: u64,
    ) -> Self {
        let context = target.id.0.wrapping_mul(2);
        Self {
            caster,
            target,
            profile,
            config,
            rng,
            critical_seed: compute_seed(config.seed, sequence, caster.id.0, context),
            direct_hit_seed: compute_seed(config.seed, sequence, caster.id.0, context | 1),
        }
    }

    /// Damage before severity rolls.
    ///
    /// Physical attacks scale with attack power and are mitigated by defence;
    /// magical attacks use magic power and magic defence. Unaspected attacks
    /// use attack power and ignore defence.
    pub fn base_damage(&self, potency: u32) -> u32 {
        let stats = &self.caster.stats;
        let offense = if self.profile.attack_type.is_magical() {
            stats.magic_power
        } else {
            stats.attack_power
        };

        let defense = if self.profile.attack_type.is_physical() {
            Some(self.target.stats.defense)
        } else if self.profile.attack_type.is_magical() {
            Some(self.target.stats.magic_defense)
        } else {
            None
        };

        let mut amount = scale(potency, offense);
        if let Some(defense) = defense
            && self.config.defense_scale > 0
        {
            let scale = u64::from(self.config.defense_scale);
            amount = amount * scale / (scale + u64::from(defense));
        }

        let resist = self
            .profile
            .aspect
            .element_index()
            .map(|index| i64::from(self.target.stats.resistances[index]).clamp(-100, 100))
            .unwrap_or(0);
        // resist is within [-100, 100], so the factor is within [0, 200].
        amount = amount * (100 - resist) as u64 / 100;

        saturate(amount)
    }

    /// Healing before the critical roll.
    pub fn base_healing(&self, potency: u32) -> u32 {
        saturate(scale(potency, self.caster.stats.healing_power))
    }

    /// Damage with severity.
    pub fn calc_damage(&self, potency: u32) -> (u32, HitSeverity) {
        let critical = self.roll_critical();
        let direct_hit =
            self.rng.roll_basis_points(self.direct_hit_seed) < self.caster.stats.direct_hit_rate;

        let mut amount = u64::from(self.base_damage(potency));
        if critical {
            amount = apply_multiplier(amount, self.config.critical_multiplier);
        }
        if direct_hit {
            amount = apply_multiplier(amount, self.config.direct_hit_multiplier);
        }

        (saturate(amount), HitSeverity::from_rolls(critical, direct_hit))
    }

    /// Healing with severity; heals never direct-hit.
    pub fn calc_healing(&self, potency: u32) -> (u32, HitSeverity) {
        let critical = self.roll_critical();
        let mut amount = u64::from(self.base_healing(potency));
        if critical {
            amount = apply_multiplier(amount, self.config.critical_multiplier);
        }

        (saturate(amount), HitSeverity::from_rolls(critical, false))
    }

    fn roll_critical(&self) -> bool {
        self.rng.roll_basis_points(self.critical_seed) < self.caster.stats.critical_rate
    }
}

fn scale(potency: u32, stat: u32) -> u64 {
    u64::from(potency) * u64::from(stat) / u64::from(BASIS_POINTS)
}

fn apply_multiplier(amount: u64, multiplier: u32) -> u64 {
    amount.saturating_mul(u64::from(multiplier)) / u64::from(BASIS_POINTS)
}

fn saturate(amount: u64) -> u32 {
    u32::try_from(amount).unwrap_or(u32::MAX)
}
