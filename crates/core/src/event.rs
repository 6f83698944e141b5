//! Step events — observation without decision authority.
//!
//! The dispatcher publishes one event per step. Consumers (CLI, log sinks)
//! subscribe and render; nothing downstream of the bus can influence the run.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::message::Message;

/// One step of a dispatcher run, as seen from the outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEvent {
    /// A message was appended to the conversation.
    Message { message: Message },

    /// The supervisor chose the next agent.
    Decision { next: String },

    /// The run reached a terminal state.
    End,
}

/// A broadcast-based bus for step events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub. Publishing with
/// no subscribers is fine; events are observation only.
pub struct EventBus {
    sender: broadcast::Sender<Arc<StepEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: StepEvent) {
        // Ignore send errors (no subscribers = that's fine)
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<StepEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(StepEvent::Decision {
            next: "FinancialAgent".into(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            StepEvent::Decision { next } => assert_eq!(next, "FinancialAgent"),
            _ => panic!("Expected Decision event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        bus.publish(StepEvent::End);
    }

    #[test]
    fn step_event_serialization() {
        let event = StepEvent::Message {
            message: Message::agent("The price is $150", "FinancialAgent"),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("message"));
        assert!(json.contains("FinancialAgent"));
    }
}
