//! Staged cast outcomes and their deferred commit.
//!
//! `execute` never mutates other actors. Computed outcomes are staged in the
//! cast's [`EffectBuilder`] and frozen into an [`EffectBatch`] by
//! `build_effects`. The zone then commits batches from every cast resolved in
//! a tick in one step, so no cast observes another's half-applied damage.

use crate::action::{ActionId, Aspect, HitSeverity};
use crate::state::{AppliedStatus, EntityId, ResourceKind, World};

// ============================================================================
// Records
// ============================================================================

/// What a staged record does to its actor when committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Damage,
    Heal,
    RestoreResource(ResourceKind),
    ApplyStatus { status_id: u16, duration_ms: u32 },
    /// The cast continued a combo; informational for clients.
    ComboSucceeded,
}

/// One staged outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRecord {
    pub kind: EffectKind,
    pub amount: u32,
    pub severity: HitSeverity,
    pub aspect: Aspect,
}

impl EffectRecord {
    pub const fn new(kind: EffectKind, amount: u32) -> Self {
        Self {
            kind,
            amount,
            severity: HitSeverity::Normal,
            aspect: Aspect::None,
        }
    }
}

/// All records staged for one affected actor, in staging order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetEffects {
    pub target: EntityId,
    pub records: Vec<EffectRecord>,
}

// ============================================================================
// Builder
// ============================================================================

/// Per-cast staging buffer.
///
/// Records are grouped by actor in first-staged order. Once
/// [`build_effects`](Self::build_effects) has run, further staging is ignored.
#[derive(Clone, Debug, Default)]
pub struct EffectBuilder {
    staged: Vec<TargetEffects>,
    built: Option<EffectBatch>,
}

impl EffectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deal_damage(
        &mut self,
        target: EntityId,
        amount: u32,
        severity: HitSeverity,
        aspect: Aspect,
    ) {
        self.stage(
            target,
            EffectRecord {
                kind: EffectKind::Damage,
                amount,
                severity,
                aspect,
            },
        );
    }

    pub fn heal(&mut self, target: EntityId, amount: u32, severity: HitSeverity) {
        self.stage(
            target,
            EffectRecord {
                severity,
                ..EffectRecord::new(EffectKind::Heal, amount)
            },
        );
    }

    pub fn restore_resource(&mut self, target: EntityId, resource: ResourceKind, amount: u32) {
        self.stage(
            target,
            EffectRecord::new(EffectKind::RestoreResource(resource), amount),
        );
    }

    pub fn apply_status(&mut self, target: EntityId, status_id: u16, duration_ms: u32) {
        self.stage(
            target,
            EffectRecord::new(
                EffectKind::ApplyStatus {
                    status_id,
                    duration_ms,
                },
                0,
            ),
        );
    }

    pub fn combo_succeeded(&mut self, caster: EntityId) {
        self.stage(caster, EffectRecord::new(EffectKind::ComboSucceeded, 0));
    }

    fn stage(&mut self, target: EntityId, record: EffectRecord) {
        if self.built.is_some() {
            return;
        }
        match self.staged.iter_mut().find(|entry| entry.target == target) {
            Some(entry) => entry.records.push(record),
            None => self.staged.push(TargetEffects {
                target,
                records: vec![record],
            }),
        }
    }

    /// Freezes staged records into a batch.
    ///
    /// Returns false (and changes nothing) if the batch was already built.
    pub fn build_effects(&mut self, action: ActionId, source: EntityId, sequence: u16) -> bool {
        if self.built.is_some() {
            return false;
        }
        self.built = Some(EffectBatch {
            action,
            source,
            sequence,
            targets: std::mem::take(&mut self.staged),
        });
        true
    }

    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    pub fn batch(&self) -> Option<&EffectBatch> {
        self.built.as_ref()
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }
}

// ============================================================================
// Batch
// ============================================================================

/// Frozen outcomes of one executed cast.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectBatch {
    pub action: ActionId,
    pub source: EntityId,
    pub sequence: u16,
    pub targets: Vec<TargetEffects>,
}

/// Actors changed by a commit, used to drive follow-up interrupts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Actors that lost health, in commit order, without duplicates.
    pub damaged: Vec<EntityId>,
    /// Actors whose health reached zero during this commit.
    pub killed: Vec<EntityId>,
}

impl CommitReport {
    pub fn merge(&mut self, other: CommitReport) {
        for id in other.damaged {
            if !self.damaged.contains(&id) {
                self.damaged.push(id);
            }
        }
        for id in other.killed {
            if !self.killed.contains(&id) {
                self.killed.push(id);
            }
        }
    }
}

impl EffectBatch {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of staged records across all actors.
    pub fn record_count(&self) -> usize {
        self.targets.iter().map(|t| t.records.len()).sum()
    }

    pub fn effects_for(&self, target: EntityId) -> Option<&[EffectRecord]> {
        self.targets
            .iter()
            .find(|t| t.target == target)
            .map(|t| t.records.as_slice())
    }

    pub fn total_damage(&self) -> u64 {
        self.total(EffectKind::Damage)
    }

    pub fn total_healing(&self) -> u64 {
        self.total(EffectKind::Heal)
    }

    fn total(&self, kind: EffectKind) -> u64 {
        self.targets
            .iter()
            .flat_map(|t| &t.records)
            .filter(|r| r.kind == kind)
            .map(|r| u64::from(r.amount))
            .sum()
    }

    /// Applies every record to the world.
    ///
    /// Actors that have left the zone are skipped. Dead actors take no damage
    /// and receive no healing; raising them is the job of a dedicated effect.
    pub fn commit(&self, world: &mut World) -> CommitReport {
        let mut report = CommitReport::default();

        for entry in &self.targets {
            let Some(actor) = world.actor_mut(entry.target) else {
                continue;
            };

            for record in &entry.records {
                match record.kind {
                    EffectKind::Damage => {
                        if actor.is_dead() {
                            continue;
                        }
                        let dealt = actor.resources.drain(ResourceKind::Hp, record.amount);
                        if dealt > 0 && !report.damaged.contains(&actor.id) {
                            report.damaged.push(actor.id);
                        }
                        if actor.is_dead() {
                            report.killed.push(actor.id);
                        }
                    }
                    EffectKind::Heal => {
                        if actor.is_alive() {
                            actor.resources.restore(ResourceKind::Hp, record.amount);
                        }
                    }
                    EffectKind::RestoreResource(kind) => {
                        actor.resources.restore(kind, record.amount);
                    }
                    EffectKind::ApplyStatus {
                        status_id,
                        duration_ms,
                    } => {
                        let source = self.source;
                        actor
                            .statuses
                            .retain(|s| !(s.status_id == status_id && s.source == source));
                        actor.statuses.push(AppliedStatus {
                            status_id,
                            source,
                            duration_ms,
                        });
                    }
                    EffectKind::ComboSucceeded => {}
                }
            }
        }

        report
    }
}
