//! Free functions behind the [`Action`](crate::action::Action) lifecycle.
//!
//! - **Validation**: the pure readiness check run before a cast starts.
//! - **Pipeline**: target resolution through the cast's ordered actor filters.
//!
//! Both only read the world; every mutation a cast performs happens in
//! `Action::start`/`Action::execute` or in the caller's commit.

mod pipeline;
mod validation;

pub use pipeline::{gather_radius, resolve_targets};
pub use validation::{pre_check, target_is_valid};
