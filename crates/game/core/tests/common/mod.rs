//! Shared fixtures for cast lifecycle tests.
#![allow(dead_code)]

use combat_core::{
    ActionCategory, ActionEntry, ActionId, ActorState, Aspect, AttackType, CastType, CombatConfig,
    CombatEnv, EntityId, Faction, NullObserver, Position, ResourceCost, RngOracle, ScanSpatial,
    StaticCatalog, TargetFlags, World,
};

pub const PLAYER: EntityId = EntityId(1);
pub const HEALER: EntityId = EntityId(2);
pub const GOBLIN: EntityId = EntityId(10);
pub const ORC: EntityId = EntityId(11);

pub const HEAVY_SWING: ActionId = ActionId(1);
pub const FIRE: ActionId = ActionId(2);
pub const HOLY: ActionId = ActionId(3);
pub const FLARE: ActionId = ActionId(4);
pub const CURE: ActionId = ActionId(5);
pub const MAIM: ActionId = ActionId(6);
pub const STORM_PATH: ActionId = ActionId(7);
pub const ASYLUM: ActionId = ActionId(8);
pub const CHAIN_LIGHTNING: ActionId = ActionId(9);

pub fn catalog() -> StaticCatalog {
    let heavy_swing = ActionEntry {
        category: ActionCategory::Weaponskill,
        potency: 20_000,
        recast_ms: 2_500,
        cooldown_group: CombatConfig::DEFAULT_GCD_GROUP,
        primary_cost: Some(ResourceCost::tp(100)),
        ..ActionEntry::new(HEAVY_SWING, "Heavy Swing")
    };
    let fire = ActionEntry {
        category: ActionCategory::Spell,
        attack_type: AttackType::Magic,
        aspect: Aspect::Fire,
        cast_time_ms: 2_500,
        recast_ms: 2_500,
        cooldown_group: CombatConfig::DEFAULT_GCD_GROUP,
        range: 25.0,
        potency: 18_000,
        primary_cost: Some(ResourceCost::mp(400)),
        ..ActionEntry::new(FIRE, "Fire")
    };
    let holy = ActionEntry {
        category: ActionCategory::Spell,
        cast_type: CastType::CircleAroundTarget,
        attack_type: AttackType::Magic,
        range: 25.0,
        effect_range: 5.0,
        potency: 10_000,
        ..ActionEntry::new(HOLY, "Holy")
    };
    let flare = ActionEntry {
        category: ActionCategory::Spell,
        attack_type: AttackType::Magic,
        range: 25.0,
        potency: 28_000,
        primary_cost: Some(ResourceCost::mp(300)),
        secondary_cost: Some(ResourceCost::gauge(50)),
        ..ActionEntry::new(FLARE, "Flare")
    };
    let cure = ActionEntry {
        category: ActionCategory::Spell,
        range: 30.0,
        targets: TargetFlags::SELF | TargetFlags::PARTY,
        heal_potency: 15_000,
        primary_cost: Some(ResourceCost::mp(200)),
        ..ActionEntry::new(CURE, "Cure")
    };
    let maim = ActionEntry {
        category: ActionCategory::Weaponskill,
        potency: 10_000,
        combo_potency: 30_000,
        combo_from: Some(HEAVY_SWING),
        ..ActionEntry::new(MAIM, "Maim")
    };
    let storm_path = ActionEntry {
        category: ActionCategory::Weaponskill,
        potency: 10_000,
        combo_potency: 40_000,
        combo_from: Some(MAIM),
        requires_combo: true,
        restore: Some(ResourceCost::gauge(20)),
        ..ActionEntry::new(STORM_PATH, "Storm's Path")
    };
    let asylum = ActionEntry {
        category: ActionCategory::Ability,
        cast_type: CastType::PlacedCircle,
        range: 30.0,
        effect_range: 4.0,
        targets: TargetFlags::SELF | TargetFlags::FRIENDLY,
        heal_potency: 5_000,
        ..ActionEntry::new(ASYLUM, "Asylum")
    };
    let chain_lightning = ActionEntry {
        category: ActionCategory::Spell,
        cast_type: CastType::Chain,
        attack_type: AttackType::Magic,
        aspect: Aspect::Lightning,
        range: 25.0,
        effect_range: 10.0,
        chain_targets: 2,
        potency: 8_000,
        ..ActionEntry::new(CHAIN_LIGHTNING, "Chain Lightning")
    };

    [
        heavy_swing,
        fire,
        holy,
        flare,
        cure,
        maim,
        storm_path,
        asylum,
        chain_lightning,
    ]
    .into_iter()
    .collect()
}

pub fn player(id: EntityId, x: f32, y: f32) -> ActorState {
    ActorState::new(id, Position::planar(x, y))
        .with_faction(Faction::Ally)
        .with_party(1)
        .with_level(50)
}

pub fn enemy(id: EntityId, x: f32, y: f32) -> ActorState {
    ActorState::new(id, Position::planar(x, y)).with_faction(Faction::Enemy)
}

/// Player at the origin, a party healer behind it and a goblin in melee range.
pub fn world() -> World {
    [
        player(PLAYER, 0.0, 0.0),
        player(HEALER, -5.0, 0.0),
        enemy(GOBLIN, 2.0, 0.0),
    ]
    .into_iter()
    .collect()
}

/// Zone collaborators for one test.
pub struct Zone {
    pub catalog: StaticCatalog,
    pub spatial: ScanSpatial,
    pub observer: NullObserver,
    pub config: CombatConfig,
}

impl Zone {
    pub fn new() -> Self {
        Self::with_config(CombatConfig::default())
    }

    pub fn with_config(config: CombatConfig) -> Self {
        Self {
            catalog: catalog(),
            spatial: ScanSpatial,
            observer: NullObserver,
            config,
        }
    }

    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle) -> CombatEnv<'a> {
        CombatEnv::with_all(&self.catalog, &self.spatial, rng, &self.observer, &self.config)
    }
}
