//! Zone worker that owns the authoritative [`Zone`].
//!
//! Receives commands from [`ZoneHandle`](crate::ZoneHandle), drives the zone
//! clock, and lets the zone publish events to the EventBus.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};

use combat_core::{ActorState, CastPhase, EntityId, InterruptType, Position};

use crate::api::Result;
use crate::zone::{CastRequest, TickReport, Zone};

/// Commands that can be sent to the zone worker
pub enum Command {
    /// Begin a cast at the current zone time.
    Cast {
        request: CastRequest,
        reply: oneshot::Sender<Result<CastPhase>>,
    },
    /// Interrupt an actor's pending cast.
    Interrupt {
        actor: EntityId,
        cause: InterruptType,
        reply: oneshot::Sender<bool>,
    },
    /// Reposition an actor.
    Move {
        actor: EntityId,
        position: Position,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Add or replace an actor.
    Spawn {
        actor: Box<ActorState>,
        reply: oneshot::Sender<()>,
    },
    /// Advance the zone clock by `ms` and tick once.
    Advance {
        ms: u64,
        reply: oneshot::Sender<TickReport>,
    },
    /// Query an actor (read-only snapshot).
    QueryActor {
        actor: EntityId,
        reply: oneshot::Sender<Option<ActorState>>,
    },
    /// Stop the worker after replying.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task that processes zone commands.
///
/// With a non-zero tick interval the worker also advances the zone clock by
/// that interval on every timer tick. With an interval of zero the clock only
/// moves on [`Command::Advance`], which keeps tests deterministic.
pub struct ZoneWorker {
    zone: Zone,
    command_rx: mpsc::Receiver<Command>,
    tick_interval_ms: u64,
}

impl ZoneWorker {
    /// Creates a new zone worker.
    pub fn new(zone: Zone, command_rx: mpsc::Receiver<Command>, tick_interval_ms: u64) -> Self {
        info!(
            actors = zone.world().len(),
            tick_interval_ms, "ZoneWorker initialized"
        );

        Self {
            zone,
            command_rx,
            tick_interval_ms,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let auto_tick = self.tick_interval_ms > 0;
        let mut interval = tokio::time::interval(Duration::from_millis(self.tick_interval_ms.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately.
        interval.tick().await;

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(cmd) => {
                            if !self.handle_command(cmd) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = interval.tick(), if auto_tick => {
                    let now = self.zone.now() + self.tick_interval_ms;
                    let report = self.zone.tick(now);
                    trace!(
                        now,
                        executed = report.executed.len(),
                        interrupted = report.interrupted.len(),
                        "Zone ticked"
                    );
                }
            }
        }

        info!(now = self.zone.now(), "ZoneWorker stopped");
    }

    /// Handles one command; returns false when the worker should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Cast { request, reply } => {
                let result = self.zone.submit_cast(request);
                if reply.send(result).is_err() {
                    debug!("Cast reply channel closed (caller dropped)");
                }
            }
            Command::Interrupt {
                actor,
                cause,
                reply,
            } => {
                let interrupted = self.zone.interrupt(actor, cause);
                if reply.send(interrupted).is_err() {
                    debug!("Interrupt reply channel closed (caller dropped)");
                }
            }
            Command::Move {
                actor,
                position,
                reply,
            } => {
                let result = self.zone.move_actor(actor, position);
                if reply.send(result).is_err() {
                    debug!("Move reply channel closed (caller dropped)");
                }
            }
            Command::Spawn { actor, reply } => {
                self.zone.spawn(*actor);
                if reply.send(()).is_err() {
                    debug!("Spawn reply channel closed (caller dropped)");
                }
            }
            Command::Advance { ms, reply } => {
                let now = self.zone.now().saturating_add(ms);
                let report = self.zone.tick(now);
                if reply.send(report).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::QueryActor { actor, reply } => {
                if reply.send(self.zone.actor(actor).cloned()).is_err() {
                    debug!("QueryActor reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => {
                let _ = reply.send(());
                return false;
            }
        }
        true
    }
}
