//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use gacha_core::BattleEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{NoticeEvent, RosterEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battle state changes (phases, strikes, swaps, outcome)
    Battle,
    /// Gold and persistence changes
    Roster,
    /// Player-facing messages
    Notice,
}

impl Topic {
    /// Every topic, in a fixed order.
    pub const ALL: [Topic; 3] = [Topic::Battle, Topic::Roster, Topic::Notice];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Battle(BattleEvent),
    Roster(RosterEvent),
    Notice(NoticeEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Battle(_) => Topic::Battle,
            Event::Roster(_) => Topic::Roster,
            Event::Notice(_) => Topic::Notice,
        }
    }
}

impl From<BattleEvent> for Event {
    /// Battle notices are routed to the notice topic.
    fn from(event: BattleEvent) -> Self {
        match event {
            BattleEvent::Notice { message } => Event::Notice(NoticeEvent { message }),
            other => Event::Battle(other),
        }
    }
}

struct Channels {
    battle: broadcast::Sender<Event>,
    roster: broadcast::Sender<Event>,
    notice: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Roster => &self.roster,
            Topic::Notice => &self.notice,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                battle: broadcast::channel(capacity).0,
                roster: broadcast::channel(capacity).0,
                notice: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
