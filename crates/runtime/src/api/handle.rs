//! Cloneable façade for issuing commands to the zone.
//!
//! [`ZoneHandle`] hides channel plumbing and offers async helpers for casting,
//! stepping the zone clock or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{ActorState, CastPhase, EntityId, InterruptType, Position};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;
use crate::zone::{CastRequest, TickReport};

/// Client-facing handle to interact with a running zone
#[derive(Clone)]
pub struct ZoneHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl ZoneHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Begin a cast and return the phase it reached.
    pub async fn cast(&self, request: CastRequest) -> Result<CastPhase> {
        self.request(|reply| Command::Cast { request, reply })
            .await?
    }

    /// Interrupt an actor's pending cast; false if it had none.
    pub async fn interrupt(&self, actor: EntityId, cause: InterruptType) -> Result<bool> {
        self.request(|reply| Command::Interrupt {
            actor,
            cause,
            reply,
        })
        .await
    }

    /// Move an actor to `position`.
    pub async fn move_actor(&self, actor: EntityId, position: Position) -> Result<()> {
        self.request(|reply| Command::Move {
            actor,
            position,
            reply,
        })
        .await?
    }

    /// Add or replace an actor.
    pub async fn spawn(&self, actor: ActorState) -> Result<()> {
        self.request(|reply| Command::Spawn {
            actor: Box::new(actor),
            reply,
        })
        .await
    }

    /// Advance the zone clock by `ms` and resolve whatever completes.
    pub async fn advance(&self, ms: u64) -> Result<TickReport> {
        self.request(|reply| Command::Advance { ms, reply }).await
    }

    /// Query an actor (read-only snapshot).
    pub async fn query_actor(&self, actor: EntityId) -> Result<Option<ActorState>> {
        self.request(|reply| Command::QueryActor { actor, reply })
            .await
    }

    /// Ask the worker to stop once queued commands are handled.
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Cast` - Cast bars, results, interrupts and rejections
    /// - `Topic::Combat` - Committed effects and deaths
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
