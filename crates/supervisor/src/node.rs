//! Agent node adapter — wraps one specialist agent behind a uniform contract.
//!
//! Whatever the wrapped agent does — succeed, return nothing, or fail — the
//! node emits exactly one message attributed to its name. The dispatcher can
//! then append success and failure identically, and the conversation log
//! stays self-describing.

use std::sync::Arc;
use switchboard_core::{AgentHandle, ConversationState, Message};
use tracing::{debug, warn};

/// One specialist agent, wrapped for dispatch.
pub struct AgentNode {
    /// Name this node's output is attributed to.
    name: String,
    /// The opaque specialist.
    agent: Arc<dyn AgentHandle>,
}

impl AgentNode {
    /// Wrap an agent under the given attribution name.
    pub fn new(name: impl Into<String>, agent: Arc<dyn AgentHandle>) -> Self {
        Self {
            name: name.into(),
            agent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the wrapped agent against a read view of the conversation.
    ///
    /// Guarantees, in order:
    /// - absent state or empty message list: synthetic invalid-state message,
    ///   the agent is never invoked;
    /// - agent failure: synthetic error message embedding the description;
    /// - empty reply list: synthetic empty-response message;
    /// - reply with empty content: synthetic no-content notice;
    /// - otherwise the last reply's content, passed through the normalizer.
    ///
    /// Always exactly one message, always attributed to this node's name.
    pub async fn run(&self, state: Option<&ConversationState>) -> Message {
        let Some(state) = state.filter(|s| !s.messages.is_empty()) else {
            warn!(node = %self.name, "invalid conversation state, agent not invoked");
            return Message::agent(
                format!("{} received an invalid conversation state.", self.name),
                &self.name,
            );
        };

        match self.agent.invoke(&state.messages).await {
            Ok(replies) => {
                let Some(reply) = replies.last() else {
                    warn!(node = %self.name, "agent returned no messages");
                    return Message::agent(
                        format!("{} returned an empty or invalid response.", self.name),
                        &self.name,
                    );
                };

                if reply.content.is_empty() {
                    debug!(node = %self.name, "agent reply had empty content");
                    return Message::agent(
                        format!("{} completed but returned no content.", self.name),
                        &self.name,
                    );
                }

                debug!(node = %self.name, chars = reply.content.len(), "agent replied");
                Message::agent(switchboard_textnorm::normalize(&reply.content), &self.name)
            }
            Err(e) => {
                warn!(node = %self.name, error = %e, "agent invocation failed");
                Message::agent(
                    format!("{} encountered an error: {e}", self.name),
                    &self.name,
                )
            }
        }
    }
}
