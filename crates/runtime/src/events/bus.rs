//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use combat_core::{Action, CastObserver, EffectBatch};

use super::types::{CastEvent, CombatEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Cast bars, results, interrupts and rejections
    Cast,
    /// Committed damage, healing and deaths
    Combat,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Cast(CastEvent),
    Combat(CombatEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Cast(_) => Topic::Cast,
            Event::Combat(_) => Topic::Combat,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    cast: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            cast: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Cast => &self.cast,
            Topic::Combat => &self.combat,
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Events are best-effort: publishing without subscribers drops them.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CastObserver for EventBus {
    fn notify_cast_start(&self, action: &Action) {
        self.publish(Event::Cast(CastEvent::Started {
            source: action.source(),
            action: action.id(),
            sequence: action.sequence(),
            target_id: action.target_id(),
            cast_time_ms: action.cast_time_ms(),
            at: action.start_time().unwrap_or_default(),
        }));
    }

    fn notify_cast_result(&self, action: &Action, effects: &EffectBatch) {
        self.publish(Event::Cast(CastEvent::Completed {
            source: action.source(),
            action: action.id(),
            sequence: action.sequence(),
            hits: action.hit_actors().to_vec(),
            effects: effects.clone(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ActionId, EntityId};

    #[test]
    fn events_route_to_their_topic_only() {
        let bus = EventBus::with_capacity(8);
        let mut cast_rx = bus.subscribe(Topic::Cast);
        let mut combat_rx = bus.subscribe(Topic::Combat);

        bus.publish(Event::Combat(CombatEvent::Died {
            actor: EntityId(3),
            at: 10,
        }));

        assert!(cast_rx.try_recv().is_err());
        assert_eq!(
            combat_rx.try_recv().unwrap(),
            Event::Combat(CombatEvent::Died {
                actor: EntityId(3),
                at: 10
            })
        );
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(Event::Cast(CastEvent::Interrupted {
            source: EntityId(1),
            action: ActionId(2),
            sequence: 1,
            cause: combat_core::InterruptType::Cancelled,
            at: 0,
        }));
    }

    #[test]
    fn events_serialize_to_json() {
        let event = Event::Combat(CombatEvent::Died {
            actor: EntityId(7),
            at: 1_500,
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
