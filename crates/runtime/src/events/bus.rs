//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{BossEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Queue admissions, drops and phase changes
    Turn,
    /// Boss state and published target changes
    Boss,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Turn(TurnEvent),
    Boss(BossEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Turn(_) => Topic::Turn,
            Event::Boss(_) => Topic::Boss,
        }
    }
}

impl From<TurnEvent> for Event {
    fn from(event: TurnEvent) -> Self {
        Event::Turn(event)
    }
}

impl From<BossEvent> for Event {
    fn from(event: BossEvent) -> Self {
        Event::Boss(event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events are best-effort.
#[derive(Debug, Clone)]
pub struct EventBus {
    turn: broadcast::Sender<Event>,
    boss: broadcast::Sender<Event>,
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
            turn: broadcast::channel(capacity).0,
            boss: broadcast::channel(capacity).0,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Boss => &self.boss,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use shaft_core::{InputTag, Phase};

    use super::*;

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut turn = bus.subscribe(Topic::Turn);
        let mut boss = bus.subscribe(Topic::Boss);

        bus.publish(TurnEvent::Dropped {
            input: InputTag::Touch,
            phase: Phase::Computing,
        });
        bus.publish(BossEvent::TargetsChanged(vec![]));

        assert_eq!(turn.try_recv().map(|e| e.topic()), Ok(Topic::Turn));
        assert!(turn.try_recv().is_err());
        assert_eq!(
            boss.try_recv(),
            Ok(Event::Boss(BossEvent::TargetsChanged(vec![])))
        );
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(0);
        bus.publish(BossEvent::AttacksChanged(vec![]));
    }
}
