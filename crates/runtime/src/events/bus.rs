//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::MatchEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn and round boundaries, forfeits
    Turn,
    /// Executed, substituted, and undone actions
    Action,
    /// Match outcome
    Match,
}

impl MatchEvent {
    pub fn topic(&self) -> Topic {
        match self {
            MatchEvent::TurnStarted { .. }
            | MatchEvent::TurnForfeited { .. }
            | MatchEvent::RoundCompleted { .. } => Topic::Turn,
            MatchEvent::ActionExecuted { .. }
            | MatchEvent::FallbackApplied { .. }
            | MatchEvent::ActionUndone { .. } => Topic::Action,
            MatchEvent::GameOver { .. } => Topic::Match,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Clones share the same channels.
#[derive(Clone)]
pub struct EventBus {
    turn: broadcast::Sender<MatchEvent>,
    action: broadcast::Sender<MatchEvent>,
    outcome: broadcast::Sender<MatchEvent>,
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
            action: broadcast::channel(capacity).0,
            outcome: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<MatchEvent> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Action => &self.action,
            Topic::Match => &self.outcome,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: MatchEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<MatchEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<MatchEvent>)> {
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

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("turn_subscribers", &self.turn.receiver_count())
            .field("action_subscribers", &self.action.receiver_count())
            .field("match_subscribers", &self.outcome.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::new().publish(MatchEvent::RoundCompleted { round: 1 });
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut turns = bus.subscribe(Topic::Turn);
        let mut actions = bus.subscribe(Topic::Action);

        bus.publish(MatchEvent::RoundCompleted { round: 3 });

        assert!(matches!(
            turns.recv().await.unwrap(),
            MatchEvent::RoundCompleted { round: 3 }
        ));
        assert!(actions.try_recv().is_err());
    }
}
