//! Public runtime API surface.
//!
//! Re-exports the error types and the zone handle that downstream crates use
//! to drive a running zone.
mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::ZoneHandle;
