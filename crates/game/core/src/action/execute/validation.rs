//! Pre-cast readiness checks.
//!
//! Checks run in a fixed order and stop at the first failure:
//! caster present and alive, blocking conditions, level and class gates,
//! cooldown group, combo prerequisite, target validity, range and line of
//! sight, then resource sufficiency. Nothing here mutates the world.

use crate::action::targeting::relation_matches;
use crate::action::{Action, ActionError, CastType, PreCheckReason, TargetFlags};
use crate::env::CombatEnv;
use crate::state::{ActorState, World};

fn reject(reason: PreCheckReason) -> ActionError {
    ActionError::pre_check(reason)
}

/// Pure readiness check for an initialized cast.
///
/// # Errors
///
/// `PreCheckFailed` with the first failing reason, `InsufficientResources`
/// when the costs cannot be paid, or an oracle error if line of sight must be
/// checked without a spatial oracle.
pub fn pre_check(
    action: &Action,
    world: &World,
    env: &CombatEnv<'_>,
    now: u64,
) -> Result<(), ActionError> {
    let caster = world
        .actor(action.source())
        .ok_or_else(|| reject(PreCheckReason::CasterNotFound))?;
    if caster.is_dead() {
        return Err(reject(PreCheckReason::CasterDead));
    }

    let category = action.category();
    if let Some(reason) = category.blocked_by(caster.conditions) {
        return Err(reject(reason));
    }

    if category.has_requirements() {
        if caster.level < action.level() {
            return Err(reject(PreCheckReason::LevelTooLow));
        }
        if let Some(class_job) = action.class_job()
            && caster.class_job != class_job
        {
            return Err(reject(PreCheckReason::WrongClass));
        }
        if !caster.cooldowns.is_ready(action.cooldown_group(), now) {
            return Err(reject(PreCheckReason::OnCooldown));
        }
    }

    if action.requires_combo() && !action.is_correct_combo(caster) {
        return Err(reject(PreCheckReason::MissingCombo));
    }

    check_target(action, caster, world, env)?;

    if category.pays_costs() && !action.cost().has_resources(caster) {
        return Err(ActionError::InsufficientResources);
    }

    Ok(())
}

fn check_target(
    action: &Action,
    caster: &ActorState,
    world: &World,
    env: &CombatEnv<'_>,
) -> Result<(), ActionError> {
    let destination = match action.cast_type() {
        cast_type if cast_type.needs_target_actor() => {
            let target = action
                .target_actor()
                .and_then(|id| world.actor(id))
                .ok_or_else(|| reject(PreCheckReason::TargetNotFound))?;
            if !target_is_valid(action.targets(), caster, target) {
                return Err(reject(PreCheckReason::InvalidTarget));
            }
            target.position
        }
        CastType::PlacedCircle => action
            .pos()
            .ok_or_else(|| reject(PreCheckReason::TargetNotFound))?,
        _ => return Ok(()),
    };

    if caster.position.distance(&destination) > action.range() {
        return Err(reject(PreCheckReason::OutOfRange));
    }
    if !env
        .spatial()?
        .line_of_sight(world, caster.position, destination)
    {
        return Err(reject(PreCheckReason::NoLineOfSight));
    }
    Ok(())
}

/// Returns true if `target` may be selected by a caster with these flags.
///
/// With `DEAD` only dead actors qualify; without it only living ones do.
pub fn target_is_valid(flags: TargetFlags, caster: &ActorState, target: &ActorState) -> bool {
    let alive_ok = if flags.contains(TargetFlags::DEAD) {
        target.is_dead()
    } else {
        target.is_alive()
    };
    target.is_character() && alive_ok && relation_matches(caster, target, flags)
}
