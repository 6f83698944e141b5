//! Agent and routing trait boundaries.
//!
//! An `AgentHandle` is an opaque specialist: it accepts the conversation so
//! far and returns the message(s) it wants to contribute, or fails. Its
//! internal reasoning, tool use, and model calls are its own business — the
//! dispatcher never inspects its state.
//!
//! A `Router` is the decision source the dispatcher consults each turn. It
//! may itself be backed by an LLM, but its output is a routing decision, not
//! conversation content, so it gets its own boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::message::{ConversationState, Message};

/// The opaque specialist agent capability.
///
/// One operation: take an ordered list of messages, return an ordered list
/// of messages (or fail). The node adapter handles everything else —
/// validation, sanitization, failure containment.
#[async_trait]
pub trait AgentHandle: Send + Sync {
    async fn invoke(&self, messages: &[Message]) -> Result<Vec<Message>, AgentError>;
}

/// A routing decision from the supervisor's decision source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// Run the named agent next.
    Next(String),
    /// The conversation is complete.
    Finish,
}

/// The decision-source boundary consumed by the dispatcher.
#[async_trait]
pub trait Router: Send + Sync {
    /// Given the full conversation state, pick the next agent or finish.
    async fn route(&self, state: &ConversationState) -> Result<RouteDecision, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoAgent;

    #[async_trait]
    impl AgentHandle for EchoAgent {
        async fn invoke(&self, messages: &[Message]) -> Result<Vec<Message>, AgentError> {
            let last = messages.last().ok_or(AgentError::InvalidState)?;
            Ok(vec![Message::agent_unattributed(format!(
                "echo: {}",
                last.content
            ))])
        }
    }

    #[tokio::test]
    async fn agent_handle_is_object_safe() {
        let agent: Box<dyn AgentHandle> = Box::new(EchoAgent);
        let reply = agent.invoke(&[Message::human("ping")]).await.unwrap();
        assert_eq!(reply.len(), 1);
        assert_eq!(reply[0].content, "echo: ping");
    }

    #[test]
    fn route_decision_serialization() {
        let json = serde_json::to_string(&RouteDecision::Next("FinancialAgent".into())).unwrap();
        assert!(json.contains("FinancialAgent"));
        let json = serde_json::to_string(&RouteDecision::Finish).unwrap();
        assert!(json.contains("finish"));
    }
}
