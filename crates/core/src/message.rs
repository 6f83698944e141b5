//! Message and ConversationState domain types.
//!
//! These are the value objects the dispatcher threads through a run:
//! a human question comes in → the supervisor routes it → specialist
//! agents append replies → terminal state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The originating human
    Human,
    /// A specialist agent reply
    Agent,
}

/// A single message in a conversation.
///
/// Immutable once appended. Identity is positional within the conversation,
/// not content-based — two messages may carry identical content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Which agent produced this message, if any.
    ///
    /// Absence is a first-class state: human messages never carry one, and
    /// agent messages without attribution are excluded from loop analysis
    /// but retained in the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new human message.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Human,
            content: content.into(),
            producer: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an agent message attributed to a named producer.
    pub fn agent(content: impl Into<String>, producer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Agent,
            content: content.into(),
            producer: Some(producer.into()),
            timestamp: Utc::now(),
        }
    }

    /// Create an agent message with no producer attribution.
    pub fn agent_unattributed(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Agent,
            content: content.into(),
            producer: None,
            timestamp: Utc::now(),
        }
    }

    /// The producer name, if this is an attributed agent message.
    pub fn producer(&self) -> Option<&str> {
        self.producer.as_deref()
    }

    /// Whether this message qualifies for loop analysis: agent-origin with
    /// a non-empty producer identifier.
    pub fn is_attributed_agent(&self) -> bool {
        self.role == Role::Agent && self.producer.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// The supervisor's pending routing choice, or the terminal marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    /// The named agent runs next.
    Agent(String),
    /// No further agent invocation.
    Finish,
}

/// An ordered, append-only sequence of messages plus the routing choice.
///
/// Owned exclusively by the dispatcher for the duration of one run. Adapters
/// receive a read view and return only the message to append, never the full
/// state. Length is monotonically non-decreasing within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    /// Ordered messages, insertion order, never reordered
    pub messages: Vec<Message>,

    /// The agent chosen to run next, or the terminal marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NextStep>,
}

impl ConversationState {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next: None,
        }
    }

    /// Create a conversation holding only the originating human message.
    pub fn from_question(question: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::human(question)],
            next: None,
        }
    }

    /// Append a message. Past messages are never mutated.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_human_message() {
        let msg = Message::human("What was the last closing price of AAPL?");
        assert_eq!(msg.role, Role::Human);
        assert!(msg.producer.is_none());
        assert!(!msg.is_attributed_agent());
    }

    #[test]
    fn agent_message_carries_producer() {
        let msg = Message::agent("The price is $150", "FinancialAgent");
        assert_eq!(msg.role, Role::Agent);
        assert_eq!(msg.producer(), Some("FinancialAgent"));
        assert!(msg.is_attributed_agent());
    }

    #[test]
    fn unattributed_agent_message_does_not_qualify() {
        let msg = Message::agent_unattributed("The price is $150");
        assert_eq!(msg.role, Role::Agent);
        assert!(!msg.is_attributed_agent());
    }

    #[test]
    fn empty_producer_does_not_qualify() {
        let msg = Message::agent("content", "");
        assert!(!msg.is_attributed_agent());
    }

    #[test]
    fn conversation_is_append_only() {
        let mut state = ConversationState::from_question("hello");
        let before = state.messages.len();
        state.push(Message::agent("hi", "Greeter"));
        assert_eq!(state.messages.len(), before + 1);
        assert_eq!(state.messages[0].content, "hello");
        assert_eq!(state.last().unwrap().producer(), Some("Greeter"));
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::agent("Test message", "FinancialAgent");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Test message");
        assert_eq!(deserialized.producer(), Some("FinancialAgent"));
    }

    #[test]
    fn human_message_serializes_without_producer_field() {
        let json = serde_json::to_string(&Message::human("hi")).unwrap();
        assert!(!json.contains("producer"));
    }
}
