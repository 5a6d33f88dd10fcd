//! Topic-based event bus for zone events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. The bus doubles as the combat core's cast observer.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CastEvent, CombatEvent};
