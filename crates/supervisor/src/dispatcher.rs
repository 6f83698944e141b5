//! Supervisor dispatcher — the per-run state machine.
//!
//! One logical thread of control per conversation: route, invoke, append,
//! check for loops, repeat. The router proposes; the dispatcher disposes.
//! Two overrides outrank any routing decision: the agent-turn cap and the
//! loop detector. Every terminal state is permanent — once the run stops, no
//! further agent is invoked.

use std::collections::HashMap;
use std::sync::Arc;
use switchboard_core::{
    ConversationState, EventBus, Message, NextStep, RouteDecision, Router, StepEvent,
};
use tracing::{debug, info, warn};

use crate::loop_detect::{LoopDetector, LoopPolicy};
use crate::node::AgentNode;

/// Attribution used for synthetic messages the dispatcher itself appends.
const SUPERVISOR_NAME: &str = "Supervisor";

/// Default hard cap on agent turns per run.
pub const DEFAULT_MAX_TURNS: usize = 20;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The router signalled completion — the only success-path terminal.
    Finished,
    /// The loop detector fired; the repeating agent is not invoked again.
    LoopBroken,
    /// The agent-turn cap was reached before the router finished.
    MaxTurnsReached,
}

/// The outcome of one dispatcher run.
#[derive(Debug)]
pub struct RunReport {
    /// Final conversation state (append-only record of the whole run).
    pub state: ConversationState,
    /// Terminal status.
    pub status: RunStatus,
    /// Agent turns consumed.
    pub turns: usize,
}

/// The supervisor dispatcher.
///
/// Owns the conversation state exclusively for the duration of a run; agent
/// nodes see a read view and contribute exactly one message per turn.
pub struct Dispatcher {
    router: Arc<dyn Router>,
    nodes: HashMap<String, AgentNode>,
    detector: LoopDetector,
    max_turns: usize,
    event_bus: Arc<EventBus>,
}

impl Dispatcher {
    pub fn new(router: Arc<dyn Router>, event_bus: Arc<EventBus>) -> Self {
        Self {
            router,
            nodes: HashMap::new(),
            detector: LoopDetector::default(),
            max_turns: DEFAULT_MAX_TURNS,
            event_bus,
        }
    }

    /// Register a specialist agent node under its attribution name.
    pub fn add_node(mut self, node: AgentNode) -> Self {
        self.nodes.insert(node.name().to_string(), node);
        self
    }

    /// Override the agent-turn cap.
    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    /// Override the loop-detection policy.
    pub fn with_loop_policy(mut self, policy: LoopPolicy) -> Self {
        self.detector = LoopDetector::new(policy);
        self
    }

    /// Run a conversation to a terminal state, starting from the originating
    /// human question.
    ///
    /// Never fails: agent and router failures are contained as conversation
    /// messages, and policy stops surface as distinguished terminal statuses.
    pub async fn run(&self, question: impl Into<String>) -> RunReport {
        let mut state = ConversationState::from_question(question);
        let mut turns = 0usize;

        info!(agents = self.nodes.len(), "dispatcher: starting run");

        let status = loop {
            let decision = match self.router.route(&state).await {
                Ok(decision) => decision,
                Err(e) => {
                    // A broken decision source ends the run cleanly; the
                    // failure is recorded in the conversation itself.
                    warn!(error = %e, "router failed, finishing run");
                    let notice = Message::agent(
                        format!("{SUPERVISOR_NAME} could not obtain a routing decision: {e}"),
                        SUPERVISOR_NAME,
                    );
                    self.publish_message(&notice);
                    state.push(notice);
                    break RunStatus::Finished;
                }
            };

            match decision {
                RouteDecision::Finish => {
                    debug!(turns, "router signalled completion");
                    break RunStatus::Finished;
                }
                RouteDecision::Next(name) => {
                    // Cap check comes before acting on the choice, whatever
                    // the router requested.
                    if turns >= self.max_turns {
                        warn!(turns, cap = self.max_turns, "agent-turn cap reached");
                        break RunStatus::MaxTurnsReached;
                    }

                    state.next = Some(NextStep::Agent(name.clone()));
                    self.event_bus.publish(StepEvent::Decision { next: name.clone() });

                    let reply = match self.nodes.get(&name) {
                        Some(node) => node.run(Some(&state)).await,
                        None => {
                            warn!(agent = %name, "router chose an unregistered agent");
                            Message::agent(
                                format!("No agent named {name} is registered."),
                                SUPERVISOR_NAME,
                            )
                        }
                    };

                    // Unknown-agent turns count against the cap too, so a
                    // router stuck on a missing name still terminates.
                    turns += 1;

                    self.publish_message(&reply);
                    state.push(reply);

                    if self.detector.is_loop(&state.messages) {
                        info!(turns, "loop detected, breaking run");
                        break RunStatus::LoopBroken;
                    }
                }
            }
        };

        state.next = Some(NextStep::Finish);
        self.event_bus.publish(StepEvent::End);

        info!(?status, turns, messages = state.messages.len(), "dispatcher: run complete");

        RunReport {
            state,
            status,
            turns,
        }
    }

    fn publish_message(&self, message: &Message) {
        self.event_bus.publish(StepEvent::Message {
            message: message.clone(),
        });
    }
}
