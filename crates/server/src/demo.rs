//! Scripted zone session.
//!
//! A small party fights a pack of goblins on simulated time so a fresh server
//! exercises every cast path: combos, cast bars, interrupts, area spells,
//! placed circles, healing, auto-attacks and rejections.

use anyhow::Result;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use combat_core::{
    ActionId, ActorState, CombatStats, EntityId, Faction, GameError, InterruptType, Position,
    World,
};
use runtime::{CastRequest, Event, Topic, ZoneHandle};

pub const WARRIOR: EntityId = EntityId(1);
pub const WHITE_MAGE: EntityId = EntityId(2);
pub const BLACK_MAGE: EntityId = EntityId(3);
pub const GOBLINS: [EntityId; 3] = [EntityId(10), EntityId(11), EntityId(12)];

const HEAVY_SWING: ActionId = ActionId(31);
const MAIM: ActionId = ActionId(37);
const STORMS_PATH: ActionId = ActionId(42);
const OVERPOWER: ActionId = ActionId(41);
const FIRE: ActionId = ActionId(141);
const FLARE: ActionId = ActionId(162);
const THUNDER_II: ActionId = ActionId(7447);
const CURE: ActionId = ActionId(120);
const ASYLUM: ActionId = ActionId(3569);

/// Global cooldown shared by weaponskills and spells in the catalog.
const GCD_MS: u64 = 2_500;

fn member(id: EntityId, position: Position, stats: CombatStats) -> ActorState {
    ActorState::new(id, position)
        .with_faction(Faction::Ally)
        .with_party(1)
        .with_level(50)
        .with_stats(stats)
}

/// The party and the goblin pack.
pub fn world() -> World {
    let warrior = member(
        WARRIOR,
        Position::ORIGIN,
        CombatStats {
            attack_power: 140,
            defense: 300,
            ..CombatStats::default()
        },
    );
    let white_mage = member(
        WHITE_MAGE,
        Position::planar(-8.0, 0.0),
        CombatStats {
            healing_power: 160,
            ..CombatStats::default()
        },
    );
    let black_mage = member(
        BLACK_MAGE,
        Position::planar(-10.0, 3.0),
        CombatStats {
            magic_power: 170,
            direct_hit_rate: 1_500,
            ..CombatStats::default()
        },
    );

    let goblins = [(2.0, 0.0), (3.0, 1.5), (3.5, -1.0)]
        .into_iter()
        .zip(GOBLINS)
        .map(|((x, y), id)| {
            ActorState::new(id, Position::planar(x, y))
                .with_faction(Faction::Enemy)
                .with_rotation(std::f32::consts::PI)
        });

    [warrior, white_mage, black_mage]
        .into_iter()
        .chain(goblins)
        .collect()
}

/// Runs the script, advancing simulated time in `tick_ms` steps.
pub async fn run(zone: &ZoneHandle, tick_ms: u64) -> Result<()> {
    info!("Pull: warrior opens the combo on the first goblin");
    cast(zone, CastRequest::new(WARRIOR, HEAVY_SWING).with_target(GOBLINS[0])).await;
    cast(zone, CastRequest::new(BLACK_MAGE, FIRE).with_target(GOBLINS[0])).await;
    cast(zone, CastRequest::auto_attack(GOBLINS[1], WARRIOR)).await;
    advance(zone, GCD_MS, tick_ms).await?;

    info!("Warrior continues the combo while the black mage chains lightning");
    cast(zone, CastRequest::new(WARRIOR, MAIM).with_target(GOBLINS[0])).await;
    cast(zone, CastRequest::new(BLACK_MAGE, THUNDER_II).with_target(GOBLINS[1])).await;
    cast(zone, CastRequest::new(WHITE_MAGE, CURE).with_target(WARRIOR)).await;
    advance(zone, 1_000, tick_ms).await?;

    info!("The goblins strike back at the warrior");
    cast(zone, CastRequest::new(GOBLINS[0], HEAVY_SWING).with_target(WARRIOR)).await;
    cast(zone, CastRequest::auto_attack(GOBLINS[2], WARRIOR)).await;
    advance(zone, GCD_MS - 1_000, tick_ms).await?;

    info!("Combo finisher, then a cone sweep");
    cast(zone, CastRequest::new(WARRIOR, STORMS_PATH).with_target(GOBLINS[0])).await;
    cast(zone, CastRequest::new(WHITE_MAGE, ASYLUM).at(Position::planar(-4.0, 0.0))).await;
    advance(zone, GCD_MS, tick_ms).await?;
    cast(zone, CastRequest::new(WARRIOR, OVERPOWER)).await;

    info!("Flare without gauge is refused; the black mage moves and loses its cast");
    cast(zone, CastRequest::new(BLACK_MAGE, FLARE).with_target(GOBLINS[1])).await;
    cast(zone, CastRequest::new(BLACK_MAGE, FIRE).with_target(GOBLINS[1])).await;
    zone.move_actor(BLACK_MAGE, Position::planar(-9.0, 3.0)).await?;
    advance(zone, tick_ms, tick_ms).await?;

    info!("Mop-up on auto-attacks");
    for goblin in GOBLINS {
        cast(zone, CastRequest::auto_attack(WARRIOR, goblin)).await;
    }
    if zone.interrupt(WHITE_MAGE, InterruptType::Cancelled).await? {
        info!("White mage cancelled a lingering cast");
    }
    advance(zone, GCD_MS, tick_ms).await?;

    for id in [WARRIOR, WHITE_MAGE, BLACK_MAGE].into_iter().chain(GOBLINS) {
        if let Some(actor) = zone.query_actor(id).await? {
            info!(
                actor = %id,
                hp = actor.resources.hp,
                mp = actor.resources.mp,
                tp = actor.resources.tp,
                gauge = actor.resources.gauge,
                statuses = actor.statuses.len(),
                "Final state"
            );
        }
    }
    Ok(())
}

async fn cast(zone: &ZoneHandle, request: CastRequest) {
    let source = request.source;
    let action = request.action;
    match zone.cast(request).await {
        Ok(phase) => info!(actor = %source, action = %action, phase = %phase, "Cast accepted"),
        Err(err) => warn!(
            actor = %source,
            action = %action,
            code = err.error_code(),
            error = %err,
            "Cast refused"
        ),
    }
}

async fn advance(zone: &ZoneHandle, ms: u64, tick_ms: u64) -> Result<()> {
    let tick_ms = tick_ms.max(1);
    let mut elapsed = 0;
    while elapsed < ms {
        let step = tick_ms.min(ms - elapsed);
        let report = zone.advance(step).await?;
        for (actor, cause) in &report.interrupted {
            info!(actor = %actor, cause = %cause, now = report.now, "Interrupted");
        }
        elapsed += step;
    }
    Ok(())
}

/// Writes every cast and combat event to the log as JSON until both topics close.
pub async fn log_events(
    mut casts: broadcast::Receiver<Event>,
    mut combat: broadcast::Receiver<Event>,
) {
    let mut casts_open = true;
    let mut combat_open = true;
    while casts_open || combat_open {
        let received = tokio::select! {
            event = casts.recv(), if casts_open => (Topic::Cast, event),
            event = combat.recv(), if combat_open => (Topic::Combat, event),
        };
        match received {
            (_, Ok(event)) => log_event(&event),
            (topic, Err(RecvError::Lagged(skipped))) => {
                warn!(?topic, skipped, "Event log fell behind");
            }
            (Topic::Cast, Err(RecvError::Closed)) => casts_open = false,
            (Topic::Combat, Err(RecvError::Closed)) => combat_open = false,
        }
    }
}

fn log_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => info!(target: "zone::events", "{json}"),
        Err(err) => warn!(error = %err, "Failed to encode event"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_content::CatalogLoader;
    use runtime::{Runtime, RuntimeConfig};

    #[test]
    fn world_seats_party_against_goblins() {
        let world = world();

        assert_eq!(world.len(), 6);
        for id in [WARRIOR, WHITE_MAGE, BLACK_MAGE] {
            let actor = world.actor(id).unwrap();
            assert_eq!(actor.party, Some(1));
            assert_eq!(actor.level, 50);
        }
        let warrior = world.actor(WARRIOR).unwrap();
        for id in GOBLINS {
            assert!(world.actor(id).unwrap().is_hostile_to(warrior));
        }
    }

    #[tokio::test]
    async fn scripted_session_runs_to_completion() {
        let runtime = Runtime::builder()
            .config(RuntimeConfig::default().manual_clock())
            .world(world())
            .catalog(CatalogLoader::embedded().unwrap())
            .build()
            .unwrap();
        let zone = runtime.handle();

        run(&zone, 100).await.unwrap();

        let goblin = zone.query_actor(GOBLINS[0]).await.unwrap().unwrap();
        assert!(goblin.resources.hp < goblin.resources.max_hp);
        let warrior = zone.query_actor(WARRIOR).await.unwrap().unwrap();
        assert!(warrior.is_alive());

        drop(zone);
        runtime.shutdown().await.unwrap();
    }
}
