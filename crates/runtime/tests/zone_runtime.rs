//! End-to-end zone scenarios driven through the async handle.

use combat_content::CatalogLoader;
use combat_core::{
    ActionId, ActorState, CastPhase, CostTiming, EntityId, Faction, InterruptType, Position,
    ResourcePools, World,
};
use runtime::{
    CastEvent, CastRequest, CombatEvent, Event, Runtime, RuntimeConfig, RuntimeError, Topic,
};

const PLAYER: EntityId = EntityId(1);
const HEALER: EntityId = EntityId(2);
const GOBLIN: EntityId = EntityId(10);

const HEAVY_SWING: ActionId = ActionId(31);
const FIRE: ActionId = ActionId(141);
const CURE: ActionId = ActionId(120);

fn ally(id: EntityId, x: f32, y: f32) -> ActorState {
    ActorState::new(id, Position::planar(x, y))
        .with_faction(Faction::Ally)
        .with_party(1)
        .with_level(50)
}

fn goblin(hp: u32) -> ActorState {
    let mut resources = ResourcePools::default();
    resources.hp = hp;
    ActorState::new(GOBLIN, Position::planar(2.0, 0.0))
        .with_faction(Faction::Enemy)
        .with_resources(resources)
}

fn world() -> World {
    [ally(PLAYER, 0.0, 0.0), ally(HEALER, -5.0, 0.0), goblin(1_000)]
        .into_iter()
        .collect()
}

fn start(config: RuntimeConfig, world: World) -> Runtime {
    Runtime::builder()
        .config(config)
        .world(world)
        .catalog(CatalogLoader::embedded().unwrap())
        .build()
        .unwrap()
}

fn manual() -> RuntimeConfig {
    RuntimeConfig::default().manual_clock()
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

// ============================================================================
// Cast bars
// ============================================================================

#[tokio::test]
async fn cast_bar_completes_and_commits() {
    let runtime = start(manual(), world());
    let zone = runtime.handle();
    let mut casts = zone.subscribe(Topic::Cast);

    let phase = zone
        .cast(CastRequest::new(PLAYER, FIRE).with_target(GOBLIN))
        .await
        .unwrap();
    assert_eq!(phase, CastPhase::Started);

    let early = zone.advance(2_000).await.unwrap();
    assert!(early.executed.is_empty());

    let done = zone.advance(500).await.unwrap();
    assert_eq!(done.executed, vec![PLAYER]);
    assert_eq!(done.committed.damaged, vec![GOBLIN]);

    let player = zone.query_actor(PLAYER).await.unwrap().unwrap();
    let goblin = zone.query_actor(GOBLIN).await.unwrap().unwrap();
    assert_eq!(player.resources.mp, 600);
    assert!(goblin.resources.hp < 1_000);

    let events = drain(&mut casts);
    assert!(matches!(
        events.as_slice(),
        [
            Event::Cast(CastEvent::Started { source: PLAYER, at: 0, .. }),
            Event::Cast(CastEvent::Completed { source: PLAYER, .. }),
        ]
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn damage_interrupts_cast_without_refund() {
    let config = RuntimeConfig::default()
        .manual_clock()
        .with_combat(combat_core::CombatConfig::default().with_cost_timing(CostTiming::OnStart));
    let runtime = start(config, world());
    let zone = runtime.handle();
    let mut casts = zone.subscribe(Topic::Cast);

    zone.cast(CastRequest::new(PLAYER, FIRE).with_target(GOBLIN))
        .await
        .unwrap();
    zone.advance(1_000).await.unwrap();

    let swing = zone
        .cast(CastRequest::new(GOBLIN, HEAVY_SWING).with_target(PLAYER))
        .await
        .unwrap();
    assert_eq!(swing, CastPhase::Executed);

    let report = zone.advance(2_000).await.unwrap();
    assert!(report.executed.is_empty());

    let player = zone.query_actor(PLAYER).await.unwrap().unwrap();
    assert!(player.resources.hp < 1_000);
    // Paid at start, not refunded.
    assert_eq!(player.resources.mp, 600);

    let interrupted: Vec<_> = drain(&mut casts)
        .into_iter()
        .filter_map(|event| match event {
            Event::Cast(CastEvent::Interrupted { source, cause, at, .. }) => {
                Some((source, cause, at))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        interrupted,
        vec![(PLAYER, InterruptType::DamageTaken, 1_000)]
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn damage_does_not_interrupt_when_disabled() {
    let config = RuntimeConfig {
        interrupt_on_damage: false,
        ..manual()
    };
    let runtime = start(config, world());
    let zone = runtime.handle();

    zone.cast(CastRequest::new(PLAYER, FIRE).with_target(GOBLIN))
        .await
        .unwrap();
    zone.advance(1_000).await.unwrap();
    zone.cast(CastRequest::new(GOBLIN, HEAVY_SWING).with_target(PLAYER))
        .await
        .unwrap();

    let report = zone.advance(1_500).await.unwrap();
    assert_eq!(report.executed, vec![PLAYER]);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn movement_interrupts_cast_bar() {
    let runtime = start(manual(), world());
    let zone = runtime.handle();

    zone.cast(CastRequest::new(PLAYER, FIRE).with_target(GOBLIN))
        .await
        .unwrap();
    zone.move_actor(PLAYER, Position::planar(-1.0, 0.0))
        .await
        .unwrap();

    let report = zone.advance(100).await.unwrap();
    assert_eq!(report.interrupted, vec![(PLAYER, InterruptType::Movement)]);

    // The slot is free again.
    let again = zone
        .cast(CastRequest::new(PLAYER, FIRE).with_target(GOBLIN))
        .await
        .unwrap();
    assert_eq!(again, CastPhase::Started);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn explicit_interrupt_reports_whether_anything_stopped() {
    let runtime = start(manual(), world());
    let zone = runtime.handle();

    assert!(!zone.interrupt(PLAYER, InterruptType::Cancelled).await.unwrap());

    zone.cast(CastRequest::new(PLAYER, FIRE).with_target(GOBLIN))
        .await
        .unwrap();
    assert!(zone.interrupt(PLAYER, InterruptType::Cancelled).await.unwrap());
    assert!(!zone.interrupt(PLAYER, InterruptType::Cancelled).await.unwrap());

    runtime.shutdown().await.unwrap();
}

// ============================================================================
// Tick ordering and batched commit
// ============================================================================

#[tokio::test]
async fn casts_completing_together_resolve_before_any_commit() {
    let mut world = world();
    world.insert(goblin(100));
    let runtime = start(manual(), world);
    let zone = runtime.handle();
    let mut combat = zone.subscribe(Topic::Combat);

    for caster in [HEALER, PLAYER] {
        zone.cast(CastRequest::new(caster, FIRE).with_target(GOBLIN))
            .await
            .unwrap();
    }
    let report = zone.advance(2_500).await.unwrap();

    // Both casts saw a living goblin; ascending id order.
    assert_eq!(report.executed, vec![PLAYER, HEALER]);
    assert_eq!(report.committed.killed, vec![GOBLIN]);

    let events = drain(&mut combat);
    let committed = events
        .iter()
        .filter(|e| matches!(e, Event::Combat(CombatEvent::EffectsCommitted { .. })))
        .count();
    let deaths: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::Combat(CombatEvent::Died { actor, at }) => Some((*actor, *at)),
            _ => None,
        })
        .collect();
    assert_eq!(committed, 2);
    assert_eq!(deaths, vec![(GOBLIN, 2_500)]);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn death_interrupts_the_victims_cast() {
    let mut world = world();
    world.insert(goblin(50));
    let runtime = start(manual(), world);
    let zone = runtime.handle();
    let mut casts = zone.subscribe(Topic::Cast);

    zone.cast(CastRequest::new(GOBLIN, FIRE).with_target(PLAYER))
        .await
        .unwrap();
    zone.cast(CastRequest::new(PLAYER, HEAVY_SWING).with_target(GOBLIN))
        .await
        .unwrap();

    let causes: Vec<_> = drain(&mut casts)
        .into_iter()
        .filter_map(|event| match event {
            Event::Cast(CastEvent::Interrupted { source, cause, .. }) => Some((source, cause)),
            _ => None,
        })
        .collect();
    assert_eq!(causes, vec![(GOBLIN, InterruptType::Death)]);

    let player = zone.query_actor(PLAYER).await.unwrap().unwrap();
    assert_eq!(player.resources.hp, 1_000);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn healing_lands_on_party_members() {
    let mut world = world();
    let mut hurt = ally(PLAYER, 0.0, 0.0);
    hurt.resources.hp = 400;
    world.insert(hurt);
    let runtime = start(manual(), world);
    let zone = runtime.handle();

    zone.cast(CastRequest::new(HEALER, CURE).with_target(PLAYER))
        .await
        .unwrap();
    let report = zone.advance(1_500).await.unwrap();
    assert_eq!(report.executed, vec![HEALER]);

    let player = zone.query_actor(PLAYER).await.unwrap().unwrap();
    assert!(player.resources.hp > 400);

    runtime.shutdown().await.unwrap();
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn unknown_action_is_rejected_and_published() {
    let runtime = start(manual(), world());
    let zone = runtime.handle();
    let mut casts = zone.subscribe(Topic::Cast);

    let err = zone
        .cast(CastRequest::new(PLAYER, ActionId(9_999)).with_target(GOBLIN))
        .await
        .unwrap_err();
    assert!(matches!(
        err.action_error(),
        Some(combat_core::ActionError::DataNotFound { .. })
    ));

    match drain(&mut casts).as_slice() {
        [Event::Cast(CastEvent::Rejected { source, code, .. })] => {
            assert_eq!(*source, PLAYER);
            assert_eq!(code, "ACTION_DATA_NOT_FOUND");
        }
        other => panic!("unexpected events {other:?}"),
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn one_pending_cast_per_actor() {
    let runtime = start(manual(), world());
    let zone = runtime.handle();

    zone.cast(CastRequest::new(PLAYER, FIRE).with_target(GOBLIN))
        .await
        .unwrap();
    let err = zone
        .cast(CastRequest::new(PLAYER, FIRE).with_target(GOBLIN))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::CastInProgress { actor: PLAYER }));

    let missing = zone
        .cast(CastRequest::new(EntityId(77), FIRE).with_target(GOBLIN))
        .await
        .unwrap_err();
    assert!(matches!(missing, RuntimeError::ActorNotFound(EntityId(77))));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn auto_attacks_are_free_and_instant() {
    let runtime = start(manual(), world());
    let zone = runtime.handle();

    let phase = zone
        .cast(CastRequest::auto_attack(PLAYER, GOBLIN))
        .await
        .unwrap();
    assert_eq!(phase, CastPhase::Executed);

    let player = zone.query_actor(PLAYER).await.unwrap().unwrap();
    let goblin = zone.query_actor(GOBLIN).await.unwrap().unwrap();
    assert_eq!(player.resources, ResourcePools::default());
    assert!(goblin.resources.hp < 1_000);

    runtime.shutdown().await.unwrap();
}

// ============================================================================
// Worker lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn timer_drives_cast_bars() {
    let runtime = start(
        RuntimeConfig::default().with_tick_interval_ms(100),
        world(),
    );
    let zone = runtime.handle();
    let mut casts = zone.subscribe(Topic::Cast);

    zone.cast(CastRequest::new(PLAYER, FIRE).with_target(GOBLIN))
        .await
        .unwrap();

    loop {
        match casts.recv().await.unwrap() {
            Event::Cast(CastEvent::Completed { source, .. }) => {
                assert_eq!(source, PLAYER);
                break;
            }
            _ => continue,
        }
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn handles_fail_after_shutdown() {
    let runtime = start(manual(), world());
    let zone = runtime.handle();
    zone.spawn(ally(EntityId(3), 1.0, 1.0)).await.unwrap();
    assert!(zone.query_actor(EntityId(3)).await.unwrap().is_some());

    runtime.shutdown().await.unwrap();

    let err = zone.advance(100).await.unwrap_err();
    assert!(matches!(err, RuntimeError::CommandChannelClosed));
}
