//! Authoritative zone simulation.
//!
//! A [`Zone`] owns the actor arena and at most one pending cast per actor.
//! Each [`tick`](Zone::tick) drives the pending casts in ascending actor id,
//! executes the ones whose cast bar has elapsed, and then commits every
//! resulting effect batch in one step. Damage and deaths from that commit
//! interrupt other pending casts only after all batches have landed.

use std::collections::BTreeMap;

use tracing::{debug, info, trace, warn};

use combat_core::{
    Action, ActionCategory, ActionId, ActorState, CastPhase, CastProgress, CommitReport,
    EffectBatch, EntityId, InterruptType, Position, PreCheckReason, World,
};

use crate::api::{Result, RuntimeError};
use crate::events::{CastEvent, CombatEvent, Event, EventBus};
use crate::oracle::OracleManager;
use crate::runtime::RuntimeConfig;

/// Displacement below which an actor counts as standing still.
const MOVEMENT_TOLERANCE: f32 = 0.01;

// ============================================================================
// Requests and reports
// ============================================================================

/// A client's request to begin a cast.
#[derive(Clone, Debug, PartialEq)]
pub struct CastRequest {
    pub source: EntityId,
    pub action: ActionId,
    pub target: Option<EntityId>,
    /// Ground position for placed area actions.
    pub pos: Option<Position>,
    pub auto_attack: bool,
}

impl CastRequest {
    pub fn new(source: EntityId, action: ActionId) -> Self {
        Self {
            source,
            action,
            target: None,
            pos: None,
            auto_attack: false,
        }
    }

    /// An auto-attack swing at `target`.
    pub fn auto_attack(source: EntityId, target: EntityId) -> Self {
        Self {
            auto_attack: true,
            target: Some(target),
            ..Self::new(source, ActionId::default())
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn at(mut self, pos: Position) -> Self {
        self.pos = Some(pos);
        self
    }
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub now: u64,
    /// Casters whose cast executed, in resolution order.
    pub executed: Vec<EntityId>,
    /// Casters whose cast was interrupted, with the cause.
    pub interrupted: Vec<(EntityId, InterruptType)>,
    /// Casters whose cast failed at execution.
    pub failed: Vec<EntityId>,
    pub committed: CommitReport,
}

struct PendingCast {
    action: Action,
    /// Caster position when the cast bar began.
    anchor: Position,
}

// ============================================================================
// Zone
// ============================================================================

pub struct Zone {
    world: World,
    pending: BTreeMap<EntityId, PendingCast>,
    oracles: OracleManager,
    bus: EventBus,
    config: RuntimeConfig,
    next_sequence: u16,
    now: u64,
}

impl Zone {
    pub fn new(world: World, oracles: OracleManager, bus: EventBus, config: RuntimeConfig) -> Self {
        info!(
            actors = world.len(),
            cost_timing = %config.combat.cost_timing,
            "Zone initialized"
        );
        Self {
            world,
            pending: BTreeMap::new(),
            oracles,
            bus,
            config,
            next_sequence: 1,
            now: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.world.actor(id)
    }

    /// Current zone time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The pending cast of `actor`, if it has one.
    pub fn pending_cast(&self, actor: EntityId) -> Option<&Action> {
        self.pending.get(&actor).map(|p| &p.action)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Adds or replaces an actor.
    pub fn spawn(&mut self, actor: ActorState) {
        debug!(actor = %actor.id, position = %actor.position, "Actor spawned");
        self.world.insert(actor);
    }

    fn next_sequence(&mut self) -> u16 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1).max(1);
        sequence
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Begins a cast.
    ///
    /// Instant casts execute and commit immediately; casts with a cast bar
    /// stay pending until a tick reaches their completion time.
    ///
    /// # Errors
    ///
    /// `ActorNotFound` for an unknown caster, `CastInProgress` while the
    /// caster already has a pending cast, or `CastRejected` carrying the
    /// cast error (catalog miss, failed pre-check, unpaid costs).
    pub fn submit_cast(&mut self, request: CastRequest) -> Result<CastPhase> {
        let source = request.source;
        if !self.world.contains(source) {
            return Err(RuntimeError::ActorNotFound(source));
        }
        if self.pending.contains_key(&source) {
            return Err(RuntimeError::CastInProgress { actor: source });
        }

        let sequence = self.next_sequence();
        let mut action = match (request.auto_attack, request.target) {
            (true, Some(target)) => Action::auto_attack(source, target, sequence),
            (_, target) => {
                let action = Action::new(request.action, source, sequence);
                match target {
                    Some(target) => action.with_target(target),
                    None => action,
                }
            }
        };
        if let Some(pos) = request.pos {
            action.set_pos(pos);
        }

        let now = self.now;
        let env = self.oracles.as_combat_env(&self.bus, &self.config.combat);
        let started = action
            .init(&env)
            .and_then(|()| action.pre_check(&self.world, &env, now))
            .and_then(|()| action.start(&mut self.world, &env, now));

        let phase = match started {
            Ok(phase) => phase,
            Err(error) => {
                debug!(
                    target: "runtime::zone",
                    actor = %source,
                    action = %action.id(),
                    phase = %action.phase(),
                    error = %error,
                    "Cast rejected"
                );
                self.bus.publish(Event::Cast(CastEvent::rejected(
                    source,
                    action.id(),
                    action.phase(),
                    &error,
                )));
                return Err(RuntimeError::CastRejected {
                    actor: source,
                    error,
                });
            }
        };

        match phase {
            CastPhase::Executed => {
                debug!(
                    target: "runtime::zone",
                    actor = %source,
                    action = %action.id(),
                    hits = action.hit_actors().len(),
                    "Instant cast executed"
                );
                let batches: Vec<EffectBatch> = action.effects().cloned().into_iter().collect();
                let mut report = TickReport {
                    now,
                    executed: vec![source],
                    ..TickReport::default()
                };
                self.commit(&batches, &mut report);
            }
            _ => {
                debug!(
                    target: "runtime::zone",
                    actor = %source,
                    action = %action.id(),
                    cast_time_ms = action.cast_time_ms(),
                    "Cast bar started"
                );
                let anchor = self
                    .world
                    .actor(source)
                    .map(|a| a.position)
                    .unwrap_or_default();
                self.pending.insert(source, PendingCast { action, anchor });
            }
        }

        Ok(phase)
    }

    /// Interrupts the pending cast of `actor`.
    ///
    /// Returns false if the actor has nothing to interrupt.
    pub fn interrupt(&mut self, actor: EntityId, cause: InterruptType) -> bool {
        let Some(mut pending) = self.pending.remove(&actor) else {
            return false;
        };
        if !pending.action.interrupt(cause) {
            return false;
        }

        info!(
            target: "runtime::zone",
            actor = %actor,
            action = %pending.action.id(),
            cause = %cause,
            "Cast interrupted"
        );
        self.bus.publish(Event::Cast(CastEvent::Interrupted {
            source: actor,
            action: pending.action.id(),
            sequence: pending.action.sequence(),
            cause,
            at: self.now,
        }));
        true
    }

    /// Moves an actor. Pending casts notice at the next tick.
    pub fn move_actor(&mut self, actor: EntityId, position: Position) -> Result<()> {
        let state = self
            .world
            .actor_mut(actor)
            .ok_or(RuntimeError::ActorNotFound(actor))?;
        state.position = position;

        trace!(target: "runtime::zone", actor = %actor, position = %position, "Actor moved");
        self.bus.publish(Event::Combat(CombatEvent::Moved { actor, position }));
        Ok(())
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances the zone to `now` and resolves every cast that completes.
    ///
    /// Time never runs backwards; an earlier `now` is treated as the current
    /// time.
    pub fn tick(&mut self, now: u64) -> TickReport {
        self.now = self.now.max(now);
        let now = self.now;
        let mut report = TickReport {
            now,
            ..TickReport::default()
        };

        let casters: Vec<EntityId> = self.pending.keys().copied().collect();
        let mut batches = Vec::new();

        for caster in casters {
            if let Some(cause) = self.cancellation(caster) {
                if self.interrupt(caster, cause) {
                    report.interrupted.push((caster, cause));
                }
                continue;
            }

            let ready = self
                .pending
                .get(&caster)
                .is_some_and(|p| p.action.update(now) == CastProgress::Ready);
            if !ready {
                continue;
            }
            let Some(mut pending) = self.pending.remove(&caster) else {
                continue;
            };

            let env = self.oracles.as_combat_env(&self.bus, &self.config.combat);
            match pending.action.execute(&mut self.world, &env, now) {
                Ok(()) => {
                    debug!(
                        target: "runtime::zone",
                        actor = %caster,
                        action = %pending.action.id(),
                        hits = pending.action.hit_actors().len(),
                        "Cast executed"
                    );
                    report.executed.push(caster);
                    if let Some(batch) = pending.action.effects() {
                        batches.push(batch.clone());
                    }
                }
                Err(error) => {
                    warn!(
                        target: "runtime::zone",
                        actor = %caster,
                        action = %pending.action.id(),
                        error = %error,
                        "Cast failed at execution"
                    );
                    report.failed.push(caster);
                    self.bus.publish(Event::Cast(CastEvent::rejected(
                        caster,
                        pending.action.id(),
                        pending.action.phase(),
                        &error,
                    )));
                }
            }
        }

        self.commit(&batches, &mut report);
        report
    }

    /// Why the pending cast of `caster` must stop, if it must.
    fn cancellation(&self, caster: EntityId) -> Option<InterruptType> {
        let pending = self.pending.get(&caster)?;
        let Some(actor) = self.world.actor(caster) else {
            return Some(InterruptType::Death);
        };
        if actor.is_dead() {
            return Some(InterruptType::Death);
        }
        if self.config.interrupt_on_movement
            && actor.position.distance(&pending.anchor) > MOVEMENT_TOLERANCE
        {
            return Some(InterruptType::Movement);
        }

        let category = pending.action.category();
        match category.blocked_by(actor.conditions) {
            Some(PreCheckReason::Silenced) if category == ActionCategory::Spell => {
                Some(InterruptType::Silenced)
            }
            Some(_) => Some(InterruptType::RegularInterrupt),
            None => None,
        }
    }

    /// Applies batches in order, then interrupts casts of damaged or killed
    /// actors.
    fn commit(&mut self, batches: &[EffectBatch], report: &mut TickReport) {
        let now = self.now;

        for batch in batches {
            let committed = batch.commit(&mut self.world);
            trace!(
                target: "runtime::zone",
                action = %batch.action,
                source = %batch.source,
                records = batch.record_count(),
                "Effects committed"
            );
            self.bus
                .publish(Event::Combat(CombatEvent::EffectsCommitted {
                    source: batch.source,
                    action: batch.action,
                    sequence: batch.sequence,
                    damage: batch.total_damage(),
                    healing: batch.total_healing(),
                    at: now,
                }));
            for &actor in &committed.killed {
                info!(target: "runtime::zone", actor = %actor, killer = %batch.source, "Actor died");
                self.bus
                    .publish(Event::Combat(CombatEvent::Died { actor, at: now }));
            }
            report.committed.merge(committed);
        }

        let killed = report.committed.killed.clone();
        for actor in killed {
            if self.interrupt(actor, InterruptType::Death) {
                report.interrupted.push((actor, InterruptType::Death));
            }
        }

        if self.config.interrupt_on_damage {
            let damaged = report.committed.damaged.clone();
            for actor in damaged {
                if self.interrupt(actor, InterruptType::DamageTaken) {
                    report.interrupted.push((actor, InterruptType::DamageTaken));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{
        ActionEntry, ActionError, ActorConditions, AttackType, CastType, Faction, ResourceCost,
        ResourceKind, StaticCatalog, TargetFlags,
    };

    const PLAYER: EntityId = EntityId(1);
    const GOBLIN: EntityId = EntityId(10);
    const SLASH: ActionId = ActionId(1);
    const BOLT: ActionId = ActionId(2);
    const WARD: ActionId = ActionId(3);

    fn zone(config: RuntimeConfig) -> Zone {
        let catalog: StaticCatalog = [
            ActionEntry {
                potency: 20_000,
                ..ActionEntry::new(SLASH, "Slash")
            },
            ActionEntry {
                category: ActionCategory::Spell,
                attack_type: AttackType::Magic,
                cast_time_ms: 2_000,
                range: 25.0,
                potency: 10_000,
                primary_cost: Some(ResourceCost::new(ResourceKind::Mp, 100)),
                ..ActionEntry::new(BOLT, "Bolt")
            },
            ActionEntry {
                category: ActionCategory::Ability,
                cast_type: CastType::PlacedCircle,
                range: 30.0,
                effect_range: 4.0,
                targets: TargetFlags::SELF | TargetFlags::FRIENDLY,
                heal_potency: 5_000,
                ..ActionEntry::new(WARD, "Ward")
            },
        ]
        .into_iter()
        .collect();
        let world: World = [
            ActorState::new(PLAYER, Position::ORIGIN).with_faction(Faction::Ally),
            ActorState::new(GOBLIN, Position::planar(2.0, 0.0)).with_faction(Faction::Enemy),
        ]
        .into_iter()
        .collect();
        Zone::new(
            world,
            OracleManager::from_catalog(catalog),
            EventBus::new(),
            config,
        )
    }

    #[test]
    fn sequences_are_never_zero() {
        let mut zone = zone(RuntimeConfig::default());
        zone.next_sequence = u16::MAX;
        assert_eq!(zone.next_sequence(), u16::MAX);
        assert_eq!(zone.next_sequence(), 1);
    }

    #[test]
    fn second_cast_while_pending_is_refused() {
        let mut zone = zone(RuntimeConfig::default());
        let bolt = CastRequest::new(PLAYER, BOLT).with_target(GOBLIN);

        assert_eq!(zone.submit_cast(bolt.clone()).unwrap(), CastPhase::Started);
        assert!(matches!(
            zone.submit_cast(bolt),
            Err(RuntimeError::CastInProgress { actor: PLAYER })
        ));
    }

    #[test]
    fn instant_casts_commit_on_submit() {
        let mut zone = zone(RuntimeConfig::default());
        let phase = zone
            .submit_cast(CastRequest::new(PLAYER, SLASH).with_target(GOBLIN))
            .unwrap();

        assert_eq!(phase, CastPhase::Executed);
        assert_eq!(zone.pending_count(), 0);
        assert!(zone.actor(GOBLIN).unwrap().resources.hp < 1_000);
    }

    #[test]
    fn movement_interrupts_when_enabled() {
        let mut zone = zone(RuntimeConfig::default());
        zone.submit_cast(CastRequest::new(PLAYER, BOLT).with_target(GOBLIN))
            .unwrap();
        zone.move_actor(PLAYER, Position::planar(0.0, 1.0)).unwrap();

        let report = zone.tick(500);
        assert_eq!(report.interrupted, vec![(PLAYER, InterruptType::Movement)]);
        assert!(zone.pending_cast(PLAYER).is_none());
    }

    #[test]
    fn movement_is_ignored_when_disabled() {
        let mut zone = zone(RuntimeConfig {
            interrupt_on_movement: false,
            ..RuntimeConfig::default()
        });
        zone.submit_cast(CastRequest::new(PLAYER, BOLT).with_target(GOBLIN))
            .unwrap();
        zone.move_actor(PLAYER, Position::planar(0.0, 1.0)).unwrap();

        let report = zone.tick(2_000);
        assert_eq!(report.executed, vec![PLAYER]);
    }

    #[test]
    fn silence_cancels_a_pending_spell() {
        let mut zone = zone(RuntimeConfig::default());
        zone.submit_cast(CastRequest::new(PLAYER, BOLT).with_target(GOBLIN))
            .unwrap();
        zone.world.actor_mut(PLAYER).unwrap().conditions = ActorConditions::SILENCED;

        let report = zone.tick(500);
        assert_eq!(report.interrupted, vec![(PLAYER, InterruptType::Silenced)]);
        assert!(report.executed.is_empty());
        assert!(zone.pending_cast(PLAYER).is_none());
        assert_eq!(zone.actor(GOBLIN).unwrap().resources.hp, 1_000);
    }

    #[test]
    fn stun_cancels_with_a_regular_interrupt() {
        let mut zone = zone(RuntimeConfig::default());
        zone.submit_cast(CastRequest::new(PLAYER, BOLT).with_target(GOBLIN))
            .unwrap();
        zone.world.actor_mut(PLAYER).unwrap().conditions = ActorConditions::STUNNED;

        let report = zone.tick(500);
        assert_eq!(
            report.interrupted,
            vec![(PLAYER, InterruptType::RegularInterrupt)]
        );
        assert!(zone.pending_cast(PLAYER).is_none());
    }

    #[test]
    fn placed_cast_needs_a_position() {
        let mut zone = zone(RuntimeConfig::default());

        let err = zone.submit_cast(CastRequest::new(PLAYER, WARD)).unwrap_err();
        match err {
            RuntimeError::CastRejected { actor, error } => {
                assert_eq!(actor, PLAYER);
                assert_eq!(
                    error,
                    ActionError::pre_check(PreCheckReason::TargetNotFound)
                );
            }
            other => panic!("unexpected error: {other}"),
        }

        let phase = zone
            .submit_cast(CastRequest::new(PLAYER, WARD).at(Position::planar(1.0, 0.0)))
            .unwrap();
        assert_eq!(phase, CastPhase::Executed);
    }

    #[test]
    fn time_does_not_run_backwards() {
        let mut zone = zone(RuntimeConfig::default());
        zone.tick(1_000);
        assert_eq!(zone.tick(400).now, 1_000);
    }
}
