//! Action domain: one cast attempt from validation to staged effects.
//!
//! # Module Structure
//!
//! - `catalog`: static per-action parameters ([`ActionEntry`]) and their enums
//! - `kind`: action categories and the rules that differ between them
//! - `cost`: all-or-nothing primary/secondary resource costs
//! - `targeting`: actor filters threaded by the target pipeline
//! - `execute`: pre-check and target resolution
//! - `outcome`: damage/healing magnitude and severity
//! - `builder`: staged effects and their deferred commit
//! - `cast`: the [`Action`] state machine tying the above together
//! - `error`: cast errors, pre-check reasons and interrupt causes

mod builder;
mod cast;
mod catalog;
mod cost;
mod error;
pub mod execute;
mod kind;
mod outcome;
mod targeting;

pub use builder::{CommitReport, EffectBatch, EffectBuilder, EffectKind, EffectRecord, TargetEffects};
pub use cast::{Action, CastPhase, CastProgress, default_filters};
pub use catalog::{
    ActionEntry, ActionId, Aspect, AttackType, CastType, ResourceCost, StatusApplication,
    TargetFlags,
};
pub use cost::CostModel;
pub use error::{ActionError, InterruptType, PreCheckReason};
pub use kind::ActionCategory;
pub use outcome::{DamageProfile, HitSeverity, OutcomeCalculator};
pub use targeting::{ActorFilter, Candidate, FilterContext};
