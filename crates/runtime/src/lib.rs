//! Zone runtime for the combat action core.
//!
//! This crate wires the pure `combat-core` cast state machine into a running
//! zone: a worker task owns the actor arena and pending casts, a clock drives
//! cast bars to completion, and effect batches are committed once per tick.
//! Consumers embed [`Runtime`] and interact with the zone through
//! [`ZoneHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`zone`] is the synchronous zone simulation driven by the worker
//! - [`oracle`] bundles the combat-core oracles for the zone
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;
pub mod zone;

mod workers;

pub use api::{Result, RuntimeError, ZoneHandle};
pub use events::{CastEvent, CombatEvent, Event, EventBus, Topic};
pub use oracle::OracleManager;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use zone::{CastRequest, TickReport, Zone};
