//! The per-cast state machine.
//!
//! ```text
//! Created ─init─▶ Initialized ─pre_check✗─▶ PreCheckFailed
//!                      │
//!                    start ──(instant)──▶ execute ─▶ Executed | Failed
//!                      ▼
//!                   Started ─update: Ready─▶ execute ─▶ Executed | Failed
//!                      │
//!                  interrupt ─▶ Interrupted
//! ```
//!
//! An [`Action`] holds ids, never references, into the zone's [`World`]. It
//! reads no clock of its own: every time-dependent operation takes the
//! caller's `now` in milliseconds.

use crate::action::builder::{EffectBatch, EffectBuilder};
use crate::action::cost::CostModel;
use crate::action::execute;
use crate::action::outcome::{DamageProfile, OutcomeCalculator};
use crate::action::targeting::ActorFilter;
use crate::action::{
    ActionCategory, ActionEntry, ActionError, ActionId, Aspect, AttackType, CastType,
    InterruptType, ResourceCost, TargetFlags,
};
use crate::config::{CombatConfig, CostTiming};
use crate::env::{CombatEnv, RngOracle};
use crate::state::{ActorState, EntityId, Position, ResourceKind, World};

/// Lifecycle phase of a cast.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CastPhase {
    #[default]
    Created,
    Initialized,
    PreCheckFailed,
    Started,
    Interrupted,
    Executed,
    /// Costs could not be paid (or the caster vanished) when charged.
    Failed,
}

impl CastPhase {
    /// Returns true once the owner should discard the cast.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::PreCheckFailed | Self::Interrupted | Self::Executed | Self::Failed
        )
    }
}

/// Result of polling a cast once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CastProgress {
    /// Not started, or already terminal; nothing to drive.
    Inactive,
    /// The cast bar is still running.
    Pending,
    /// The cast time has elapsed; the owner should call `execute`.
    Ready,
}

/// One cast attempt by one actor.
#[derive(Clone, Debug)]
pub struct Action {
    id: ActionId,
    sequence: u16,
    source: EntityId,
    target_id: u64,
    /// Ground position for placed casts; never defaulted.
    pos: Option<Position>,

    entry: ActionEntry,
    auto_attack: bool,
    is_gcd: bool,
    animation_lock_ms: u32,

    phase: CastPhase,
    interrupt_type: Option<InterruptType>,
    started: bool,
    start_time: Option<u64>,
    costs_paid: bool,
    additional_data: u32,

    filters: Vec<ActorFilter>,
    hit_actors: Vec<EntityId>,
    builder: EffectBuilder,
}

impl Action {
    /// Creates a cast targeting its own caster until a target is set.
    pub fn new(id: ActionId, source: EntityId, sequence: u16) -> Self {
        Self {
            id,
            sequence,
            source,
            target_id: u64::from(source.0),
            pos: None,
            entry: ActionEntry::new(id, String::new()),
            auto_attack: false,
            is_gcd: false,
            animation_lock_ms: CombatConfig::DEFAULT_ANIMATION_LOCK_MS,
            phase: CastPhase::Created,
            interrupt_type: None,
            started: false,
            start_time: None,
            costs_paid: false,
            additional_data: 0,
            filters: Vec::new(),
            hit_actors: Vec::new(),
            builder: EffectBuilder::new(),
        }
    }

    /// Creates an auto-attack against `target`.
    pub fn auto_attack(source: EntityId, target: EntityId, sequence: u16) -> Self {
        let mut action = Self::new(ActionId::default(), source, sequence).with_target(target);
        action.set_auto_attack(true);
        action
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target_id = u64::from(target.0);
        self
    }

    #[must_use]
    pub fn with_pos(mut self, pos: Position) -> Self {
        self.pos = Some(pos);
        self
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Copies the catalog entry into the cast and seeds its default filters.
    ///
    /// Auto-attacks do not consult the catalog; their parameters come from
    /// the combat config.
    ///
    /// # Errors
    ///
    /// `DataNotFound` on a catalog miss, in which case the cast is unchanged
    /// and should be discarded.
    pub fn init(&mut self, env: &CombatEnv<'_>) -> Result<(), ActionError> {
        if self.phase != CastPhase::Created {
            return Err(self.invalid_phase("init"));
        }
        let config = env.config();

        let entry = if self.auto_attack {
            auto_attack_entry(config)
        } else {
            env.catalog()?
                .lookup(self.id)
                .ok_or(ActionError::DataNotFound { action_id: self.id })?
        };

        self.is_gcd = entry.cooldown_group != 0 && entry.cooldown_group == config.gcd_group;
        self.animation_lock_ms = entry
            .animation_lock_ms
            .unwrap_or(config.default_animation_lock_ms);
        self.filters = default_filters(&entry);
        self.entry = entry;
        self.phase = CastPhase::Initialized;
        Ok(())
    }

    /// Pure readiness check; see [`execute::pre_check`] for the order of checks.
    ///
    /// A failure moves the cast to `PreCheckFailed`. The world is never
    /// touched.
    ///
    /// # Errors
    ///
    /// The first failing check.
    pub fn pre_check(
        &mut self,
        world: &World,
        env: &CombatEnv<'_>,
        now: u64,
    ) -> Result<(), ActionError> {
        if self.phase != CastPhase::Initialized {
            return Err(self.invalid_phase("pre_check"));
        }
        let result = execute::pre_check(self, world, env, now);
        if result.is_err() {
            self.phase = CastPhase::PreCheckFailed;
        }
        result
    }

    /// Starts the cast and returns the phase it ends up in.
    ///
    /// Instant casts execute immediately. Casts with a cast bar record `now`
    /// and notify the observer. Under [`CostTiming::OnStart`] costs are
    /// charged here and are not refunded if the cast is later interrupted.
    ///
    /// # Errors
    ///
    /// `InsufficientResources` when costs charged at start cannot be paid, or
    /// any error from an immediate `execute`.
    pub fn start(
        &mut self,
        world: &mut World,
        env: &CombatEnv<'_>,
        now: u64,
    ) -> Result<CastPhase, ActionError> {
        if self.phase != CastPhase::Initialized {
            return Err(self.invalid_phase("start"));
        }

        self.started = true;
        self.start_time = Some(now);

        if env.config().cost_timing == CostTiming::OnStart {
            self.charge(world)?;
        }
        self.phase = CastPhase::Started;

        if !self.has_cast_time() {
            self.execute(world, env, now)?;
            return Ok(self.phase);
        }

        if let Some(observer) = env.observer() {
            observer.notify_cast_start(self);
        }
        Ok(self.phase)
    }

    /// Polls a started cast. Has no side effects.
    pub fn update(&self, now: u64) -> CastProgress {
        match (self.phase, self.start_time) {
            (CastPhase::Started, Some(start)) => {
                let finish = start.saturating_add(u64::from(self.entry.cast_time_ms));
                if now >= finish {
                    CastProgress::Ready
                } else {
                    CastProgress::Pending
                }
            }
            _ => CastProgress::Inactive,
        }
    }

    /// Milliseconds left on the cast bar, or zero once elapsed or not started.
    pub fn remaining_ms(&self, now: u64) -> u64 {
        match (self.phase, self.start_time) {
            (CastPhase::Started, Some(start)) => start
                .saturating_add(u64::from(self.entry.cast_time_ms))
                .saturating_sub(now),
            _ => 0,
        }
    }

    /// Interrupts a non-terminal cast.
    ///
    /// Returns true if this call recorded the interruption. The first cause
    /// wins; later calls and calls on terminal casts change nothing.
    pub fn interrupt(&mut self, cause: InterruptType) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.interrupt_type = Some(cause);
        self.phase = CastPhase::Interrupted;
        true
    }

    /// Resolves the cast.
    ///
    /// Charges costs (unless already charged at start), resolves targets,
    /// stages outcomes, records the hit list, triggers the recast and
    /// finalizes the effect batch. Only the caster's own state (resources,
    /// cooldowns, combo) is mutated here; effects on targets wait for the
    /// owner to commit [`Self::effects`].
    ///
    /// Calling it again after success is a no-op.
    ///
    /// # Errors
    ///
    /// `Interrupted` if the cast was interrupted, `InsufficientResources`
    /// (the cast becomes `Failed`) when costs cannot be paid, or an oracle
    /// error if the spatial or rng oracle is missing.
    pub fn execute(
        &mut self,
        world: &mut World,
        env: &CombatEnv<'_>,
        now: u64,
    ) -> Result<(), ActionError> {
        match self.phase {
            CastPhase::Executed => return Ok(()),
            CastPhase::Interrupted => {
                return Err(ActionError::interrupted(
                    self.interrupt_type.unwrap_or_default(),
                ));
            }
            CastPhase::Started => {}
            _ => return Err(self.invalid_phase("execute")),
        }

        let spatial = env.spatial()?;
        let rng = env.rng()?;
        let config = env.config();

        self.charge(world)?;

        let Some(caster) = world.actor(self.source) else {
            self.phase = CastPhase::Failed;
            return Err(ActionError::ActorNotFound(self.source));
        };
        let targets = execute::resolve_targets(self, caster, world, spatial);
        let combo = self.is_correct_combo(caster);
        self.stage_outcomes(caster, world, &targets, combo, config, rng);
        self.hit_actors = targets;

        if let Some(caster) = world.actor_mut(self.source) {
            if self.entry.category.has_requirements() {
                caster.cooldowns.trigger(
                    self.entry.cooldown_group,
                    now.saturating_add(u64::from(self.entry.recast_ms)),
                );
            }
            if self.entry.category.starts_combo() {
                caster.combo = Some(self.id);
            }
        }

        self.builder.build_effects(self.id, self.source, self.sequence);
        self.phase = CastPhase::Executed;

        if let Some(observer) = env.observer()
            && let Some(batch) = self.builder.batch()
        {
            observer.notify_cast_result(self, batch);
        }
        Ok(())
    }

    /// Pays both costs once, atomically.
    fn charge(&mut self, world: &mut World) -> Result<(), ActionError> {
        if self.costs_paid {
            return Ok(());
        }
        let Some(caster) = world.actor_mut(self.source) else {
            self.phase = CastPhase::Failed;
            return Err(ActionError::ActorNotFound(self.source));
        };
        if let Err(err) = self.cost().consume_resources(caster) {
            self.phase = CastPhase::Failed;
            return Err(err);
        }
        self.costs_paid = true;
        Ok(())
    }

    fn stage_outcomes(
        &mut self,
        caster: &ActorState,
        world: &World,
        targets: &[EntityId],
        combo: bool,
        config: &CombatConfig,
        rng: &dyn RngOracle,
    ) {
        let entry = &self.entry;
        let builder = &mut self.builder;
        let profile = DamageProfile::new(entry.attack_type, entry.aspect);
        let potency = if combo && entry.combo_potency > 0 {
            entry.combo_potency
        } else {
            entry.potency
        };

        for &id in targets {
            let Some(target) = world.actor(id) else {
                continue;
            };
            let calc = OutcomeCalculator::new(
                caster,
                target,
                profile,
                config,
                rng,
                u64::from(self.sequence),
            );

            if potency > 0 {
                let (amount, severity) = calc.calc_damage(potency);
                builder.deal_damage(id, amount, severity, entry.aspect);
            }
            if entry.heal_potency > 0 {
                let (amount, severity) = calc.calc_healing(entry.heal_potency);
                builder.heal(id, amount, severity);
            }
            if let Some(status) = entry.status
                && !status.on_caster
            {
                builder.apply_status(id, status.status_id, status.duration_ms);
            }
        }

        if let Some(restore) = entry.restore {
            builder.restore_resource(self.source, restore.resource, restore.amount);
        }
        if let Some(status) = entry.status
            && status.on_caster
        {
            builder.apply_status(self.source, status.status_id, status.duration_ms);
        }
        if combo {
            builder.combo_succeeded(self.source);
        }
    }

    fn invalid_phase(&self, operation: &'static str) -> ActionError {
        ActionError::InvalidPhase {
            phase: self.phase,
            operation,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    pub fn source(&self) -> EntityId {
        self.source
    }

    /// Raw target identifier; may name a non-actor resident.
    pub fn target_id(&self) -> u64 {
        self.target_id
    }

    pub fn set_target_id(&mut self, target_id: u64) {
        self.target_id = target_id;
    }

    /// Actor the cast is anchored on, if any.
    ///
    /// Caster-centred casts anchor on the caster; placed circles anchor on a
    /// position instead of an actor.
    pub fn target_actor(&self) -> Option<EntityId> {
        match self.entry.cast_type {
            cast_type if cast_type.is_caster_centred() => Some(self.source),
            CastType::PlacedCircle => None,
            _ => u32::try_from(self.target_id).ok().map(EntityId),
        }
    }

    /// Returns true if the target is a client-side position, not an actor.
    pub fn has_clientside_target(&self) -> bool {
        self.entry.cast_type == CastType::PlacedCircle
    }

    pub fn pos(&self) -> Option<Position> {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Position) {
        self.pos = Some(pos);
    }

    pub fn additional_data(&self) -> u32 {
        self.additional_data
    }

    pub fn set_additional_data(&mut self, data: u32) {
        self.additional_data = data;
    }

    pub fn phase(&self) -> CastPhase {
        self.phase
    }

    pub fn interrupt_type(&self) -> Option<InterruptType> {
        self.interrupt_type
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt_type.is_some()
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    pub fn costs_paid(&self) -> bool {
        self.costs_paid
    }

    /// Catalog parameters copied at `init`.
    pub fn entry(&self) -> &ActionEntry {
        &self.entry
    }

    pub fn category(&self) -> ActionCategory {
        self.entry.category
    }

    pub fn cast_type(&self) -> CastType {
        self.entry.cast_type
    }

    pub fn attack_type(&self) -> AttackType {
        self.entry.attack_type
    }

    pub fn aspect(&self) -> Aspect {
        self.entry.aspect
    }

    pub fn is_physical(&self) -> bool {
        self.entry.attack_type.is_physical()
    }

    pub fn is_magical(&self) -> bool {
        self.entry.attack_type.is_magical()
    }

    pub fn cast_time_ms(&self) -> u32 {
        self.entry.cast_time_ms
    }

    /// Overrides the cast time. Shortening a running cast takes effect on the
    /// next `update`; lengthening it is ignored once started.
    pub fn set_cast_time(&mut self, cast_time_ms: u32) {
        if self.started && cast_time_ms > self.entry.cast_time_ms {
            return;
        }
        self.entry.cast_time_ms = cast_time_ms;
    }

    pub fn has_cast_time(&self) -> bool {
        self.entry.cast_time_ms > 0
    }

    pub fn recast_ms(&self) -> u32 {
        self.entry.recast_ms
    }

    pub fn cooldown_group(&self) -> u8 {
        self.entry.cooldown_group
    }

    /// Returns true if the action shares the global cooldown.
    pub fn is_gcd(&self) -> bool {
        self.is_gcd
    }

    pub fn animation_lock_ms(&self) -> u32 {
        self.animation_lock_ms
    }

    pub fn range(&self) -> f32 {
        self.entry.range
    }

    pub fn effect_range(&self) -> f32 {
        self.entry.effect_range
    }

    pub fn targets(&self) -> TargetFlags {
        self.entry.targets
    }

    pub fn level(&self) -> u8 {
        self.entry.level
    }

    pub fn class_job(&self) -> Option<u8> {
        self.entry.class_job
    }

    /// Costs this cast pays; free for categories that never pay.
    pub fn cost(&self) -> CostModel {
        if self.entry.category.pays_costs() {
            CostModel::new(self.entry.primary_cost, self.entry.secondary_cost)
        } else {
            CostModel::free()
        }
    }

    pub fn set_primary_cost(&mut self, resource: ResourceKind, amount: u32) {
        self.entry.primary_cost = Some(ResourceCost::new(resource, amount));
    }

    pub fn is_auto_attack(&self) -> bool {
        self.auto_attack
    }

    /// Switches auto-attack mode. Only meaningful before `init`.
    pub fn set_auto_attack(&mut self, auto_attack: bool) {
        self.auto_attack = auto_attack;
    }

    pub fn is_combo_action(&self) -> bool {
        self.entry.is_combo_action()
    }

    /// Returns true if `caster`'s last combo step is this action's prerequisite.
    pub fn is_correct_combo(&self, caster: &ActorState) -> bool {
        self.entry.combo_from.is_some() && caster.combo == self.entry.combo_from
    }

    pub fn requires_combo(&self) -> bool {
        self.entry.requires_combo
    }

    pub fn filters(&self) -> &[ActorFilter] {
        &self.filters
    }

    /// Replaces the filters seeded at `init`.
    pub fn set_filters(&mut self, filters: Vec<ActorFilter>) {
        self.filters = filters;
    }

    pub fn add_filter(&mut self, filter: ActorFilter) {
        self.filters.push(filter);
    }

    /// Actors affected by the cast; empty until it executes.
    pub fn hit_actors(&self) -> &[EntityId] {
        &self.hit_actors
    }

    pub fn first_hit(&self) -> Option<EntityId> {
        self.hit_actors.first().copied()
    }

    /// Finalized effects; `None` until the cast executes.
    pub fn effects(&self) -> Option<&EffectBatch> {
        self.builder.batch()
    }
}

fn auto_attack_entry(config: &CombatConfig) -> ActionEntry {
    ActionEntry {
        name: "Attack".to_owned(),
        category: ActionCategory::AutoAttack,
        cast_type: CastType::SingleTarget,
        range: config.auto_attack_range,
        targets: TargetFlags::HOSTILE,
        potency: config.auto_attack_potency,
        ..ActionEntry::default()
    }
}

/// Filters implied by an entry's cast type and target flags.
pub fn default_filters(entry: &ActionEntry) -> Vec<ActorFilter> {
    let relation = ActorFilter::Relation(entry.targets - TargetFlags::DEAD);
    let liveness = if entry.targets.contains(TargetFlags::DEAD) {
        ActorFilter::DeadOnly
    } else {
        ActorFilter::Alive
    };
    let radius = entry.effect_range;

    let shape = match entry.cast_type {
        CastType::SelfOnly => return vec![ActorFilter::SelfOnly],
        CastType::SingleTarget => vec![ActorFilter::Target],
        CastType::CircleAroundCaster | CastType::CircleAroundTarget | CastType::PlacedCircle => {
            vec![ActorFilter::Circle { radius }]
        }
        CastType::Cone => vec![ActorFilter::Cone {
            radius,
            angle_deg: entry.x_axis_modifier,
        }],
        CastType::Line => vec![ActorFilter::Line {
            length: radius,
            width: entry.x_axis_modifier,
        }],
        CastType::Chain => vec![
            ActorFilter::Circle { radius },
            ActorFilter::Nearest {
                count: usize::from(entry.chain_targets.max(1)),
            },
        ],
    };

    let mut filters = vec![relation, liveness];
    filters.extend(shape);
    filters
}
