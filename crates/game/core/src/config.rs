/// When a cast pays its primary and secondary costs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CostTiming {
    /// Costs are paid when the cast completes. Interrupted casts pay nothing.
    #[default]
    OnExecute,
    /// Costs are paid when the cast bar starts. Interrupts do not refund.
    OnStart,
}

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// When costs are charged.
    pub cost_timing: CostTiming,
    /// Cooldown group shared by global-cooldown actions.
    pub gcd_group: u8,
    /// Animation lock applied when the catalog entry does not specify one.
    pub default_animation_lock_ms: u32,
    /// Reach of auto-attacks in yalms.
    pub auto_attack_range: f32,
    /// Potency of auto-attacks in basis points.
    pub auto_attack_potency: u32,
    /// Damage/healing multiplier on a critical roll, in basis points.
    pub critical_multiplier: u32,
    /// Damage multiplier on a direct-hit roll, in basis points.
    pub direct_hit_multiplier: u32,
    /// Defence scale `k` in `damage * k / (k + defence)`.
    pub defense_scale: u32,
    /// Zone seed mixed into every roll.
    pub seed: u64,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GCD_GROUP: u8 = 58;
    pub const DEFAULT_ANIMATION_LOCK_MS: u32 = 600;
    pub const DEFAULT_AUTO_ATTACK_RANGE: f32 = 3.0;
    pub const DEFAULT_AUTO_ATTACK_POTENCY: u32 = 10_000;
    pub const DEFAULT_CRITICAL_MULTIPLIER: u32 = 14_000;
    pub const DEFAULT_DIRECT_HIT_MULTIPLIER: u32 = 12_500;
    pub const DEFAULT_DEFENSE_SCALE: u32 = 1_000;

    pub const fn new() -> Self {
        Self {
            cost_timing: CostTiming::OnExecute,
            gcd_group: Self::DEFAULT_GCD_GROUP,
            default_animation_lock_ms: Self::DEFAULT_ANIMATION_LOCK_MS,
            auto_attack_range: Self::DEFAULT_AUTO_ATTACK_RANGE,
            auto_attack_potency: Self::DEFAULT_AUTO_ATTACK_POTENCY,
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
            direct_hit_multiplier: Self::DEFAULT_DIRECT_HIT_MULTIPLIER,
            defense_scale: Self::DEFAULT_DEFENSE_SCALE,
            seed: 0,
        }
    }

    #[must_use]
    pub fn with_cost_timing(mut self, cost_timing: CostTiming) -> Self {
        self.cost_timing = cost_timing;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_gcd_group(mut self, gcd_group: u8) -> Self {
        self.gcd_group = gcd_group;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
