//! Invariants that must hold for every cast, not just the scripted scenarios.

mod common;

use combat_core::{
    Action, ActionCategory, ActionEntry, ActionId, AttackType, CastPhase, CastProgress, CastType,
    CombatConfig, CombatEnv, CostModel, EntityId, FixedRng, InterruptType, NullObserver, PcgRng,
    Position, ResourceCost, ResourcePools, SpatialOracle, StaticCatalog, World,
};

use common::*;

// ============================================================================
// Resource atomicity
// ============================================================================

#[test]
fn consumption_is_all_or_nothing() {
    let model = CostModel::new(Some(ResourceCost::mp(300)), Some(ResourceCost::gauge(50)));

    for mp in [0, 299, 300, 1_000] {
        for gauge in [0, 49, 50, 100] {
            let mut pools = ResourcePools::default().with_gauge(gauge);
            pools.mp = mp;
            let affordable = mp >= 300 && gauge >= 50;

            let result = model.consume_resources(&mut pools);

            assert_eq!(result.is_ok(), affordable, "mp {mp} gauge {gauge}");
            if affordable {
                assert_eq!((pools.mp, pools.gauge), (mp - 300, gauge - 50));
            } else {
                assert_eq!((pools.mp, pools.gauge), (mp, gauge));
            }
        }
    }
}

// ============================================================================
// Interruption
// ============================================================================

#[test]
fn any_interrupt_before_execute_keeps_hits_empty() {
    let zone = Zone::new();
    let rng = FixedRng(0);
    let env = zone.env(&rng);

    for cause in [
        InterruptType::RegularInterrupt,
        InterruptType::Movement,
        InterruptType::DamageTaken,
        InterruptType::Cancelled,
        InterruptType::Death,
        InterruptType::Silenced,
    ] {
        let mut world = world();
        let mut action = Action::new(FIRE, PLAYER, 1).with_target(GOBLIN);
        action.init(&env).unwrap();
        action.start(&mut world, &env, 0).unwrap();

        assert!(action.interrupt(cause));
        assert!(action.execute(&mut world, &env, 5_000).is_err());
        assert!(action.execute(&mut world, &env, 6_000).is_err());

        assert!(action.hit_actors().is_empty(), "{cause}");
        assert!(action.effects().is_none(), "{cause}");
        assert_eq!(action.interrupt_type(), Some(cause));
        assert_eq!(world.actor(PLAYER).unwrap().resources.mp, 1_000);
        assert_eq!(world.actor(GOBLIN).unwrap().resources.hp, 1_000);
    }
}

#[test]
fn terminal_casts_cannot_be_interrupted() {
    let zone = Zone::new();
    let rng = FixedRng(0);
    let env = zone.env(&rng);
    let mut world = world();

    let mut action = Action::new(HEAVY_SWING, PLAYER, 1).with_target(GOBLIN);
    action.init(&env).unwrap();
    action.start(&mut world, &env, 0).unwrap();

    assert!(!action.interrupt(InterruptType::Death));
    assert_eq!(action.phase(), CastPhase::Executed);
    assert_eq!(action.interrupt_type(), None);
}

// ============================================================================
// Target pipeline
// ============================================================================

/// Spatial index that over-reports: every actor, twice, regardless of range.
struct Sloppy;

impl SpatialOracle for Sloppy {
    fn actors_within(&self, world: &World, _origin: Position, _radius: f32) -> Vec<EntityId> {
        world.ids().chain(world.ids()).collect()
    }
}

#[test]
fn pipeline_stays_in_range_without_duplicates() {
    let catalog = catalog();
    let config = CombatConfig::default();
    let rng = FixedRng(9_999);
    let env = CombatEnv::with_all(&catalog, &Sloppy, &rng, &NullObserver, &config);

    let mut world: World = (0..40)
        .map(|i| {
            let x = (i % 8) as f32 * 1.5;
            let y = (i / 8) as f32 * 1.5;
            enemy(EntityId(100 + i), 10.0 + x, y)
        })
        .collect();
    world.insert(player(PLAYER, 0.0, 0.0));
    let target = EntityId(100);
    let origin = world.actor(target).unwrap().position;

    let mut action = Action::new(HOLY, PLAYER, 1).with_target(target);
    action.init(&env).unwrap();
    action.start(&mut world, &env, 0).unwrap();

    let hits = action.hit_actors();
    assert!(!hits.is_empty());
    for (i, id) in hits.iter().enumerate() {
        let position = world.actor(*id).unwrap().position;
        assert!(origin.distance(&position) <= action.effect_range());
        assert!(!hits[i + 1..].contains(id), "{id} hit twice");
    }

    let distances: Vec<f32> = hits
        .iter()
        .map(|id| origin.distance(&world.actor(*id).unwrap().position))
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn empty_area_is_a_valid_result() {
    let zone = Zone::new();
    let rng = FixedRng(9_999);
    let env = zone.env(&rng);
    let mut world: World = [player(PLAYER, 0.0, 0.0), enemy(GOBLIN, 2.0, 0.0)]
        .into_iter()
        .collect();

    let mut action = Action::new(HEAVY_SWING, PLAYER, 1).with_target(GOBLIN);
    action.init(&env).unwrap();
    action.set_filters(vec![combat_core::ActorFilter::DeadOnly]);
    assert_eq!(action.start(&mut world, &env, 0), Ok(CastPhase::Executed));

    assert!(action.hit_actors().is_empty());
    assert!(action.effects().unwrap().is_empty());
}

// ============================================================================
// Outcome monotonicity
// ============================================================================

#[test]
fn damage_never_drops_as_potency_rises() {
    let potencies: Vec<u32> = (0..=40).map(|step| step * 1_250).collect();
    let catalog: StaticCatalog = potencies
        .iter()
        .enumerate()
        .map(|(i, &potency)| ActionEntry {
            category: ActionCategory::Ability,
            cast_type: CastType::SingleTarget,
            attack_type: AttackType::Piercing,
            potency,
            ..ActionEntry::new(ActionId(1_000 + i as u32), "Probe")
        })
        .collect();
    let config = CombatConfig::default().with_seed(0xC0FFEE);
    let rng = PcgRng;
    let env = CombatEnv::default()
        .with_catalog(&catalog)
        .with_spatial(&combat_core::ScanSpatial)
        .with_rng(&rng)
        .with_config(&config);

    let mut previous = 0;
    for i in 0..potencies.len() {
        let mut world = world();
        world.actor_mut(GOBLIN).unwrap().stats.defense = 350;

        // Same sequence every time, so the severity rolls are identical.
        let mut action = Action::new(ActionId(1_000 + i as u32), PLAYER, 7).with_target(GOBLIN);
        action.init(&env).unwrap();
        action.start(&mut world, &env, 0).unwrap();

        let damage = action.effects().unwrap().total_damage();
        assert!(damage >= previous, "potency {} dropped damage", potencies[i]);
        previous = damage;
    }
    assert!(previous > 0);
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn update_before_completion_has_no_effect() {
    let zone = Zone::new();
    let rng = FixedRng(0);
    let env = zone.env(&rng);
    let mut world = world();

    let mut action = Action::new(FIRE, PLAYER, 1).with_target(GOBLIN);
    action.init(&env).unwrap();
    action.start(&mut world, &env, 0).unwrap();
    let snapshot = world.clone();

    assert_eq!(action.update(1_200), CastProgress::Pending);
    assert_eq!(action.update(1_200), CastProgress::Pending);
    assert_eq!(action.phase(), CastPhase::Started);
    assert_eq!(action.start_time(), Some(0));
    assert!(action.hit_actors().is_empty());
    assert_eq!(world, snapshot);
}

#[test]
fn second_execute_is_a_no_op() {
    let zone = Zone::new();
    let rng = PcgRng;
    let env = zone.env(&rng);
    let mut world = world();

    let mut action = Action::new(FIRE, PLAYER, 1).with_target(GOBLIN);
    action.init(&env).unwrap();
    action.start(&mut world, &env, 0).unwrap();

    action.execute(&mut world, &env, 2_500).unwrap();
    let hits = action.hit_actors().to_vec();
    let effects = action.effects().cloned();
    let after_first = world.clone();

    action.execute(&mut world, &env, 2_600).unwrap();

    assert_eq!(action.hit_actors(), hits.as_slice());
    assert_eq!(action.effects().cloned(), effects);
    assert_eq!(world, after_first);
}

#[test]
fn lifecycle_calls_out_of_order_are_rejected() {
    let zone = Zone::new();
    let rng = FixedRng(0);
    let env = zone.env(&rng);
    let mut world = world();

    let mut action = Action::new(FIRE, PLAYER, 1).with_target(GOBLIN);
    assert!(action.start(&mut world, &env, 0).is_err());
    assert!(action.execute(&mut world, &env, 0).is_err());

    action.init(&env).unwrap();
    assert!(action.init(&env).is_err());
    action.start(&mut world, &env, 0).unwrap();
    assert!(action.start(&mut world, &env, 10).is_err());
    assert_eq!(action.start_time(), Some(0));
}
