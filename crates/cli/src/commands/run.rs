//! `switchboard run` — drive a conversation through the dispatcher.
//!
//! The specialist agents here are scripted stand-ins (no network, no model
//! calls): each pops the next canned reply off a queue. The dispatch path —
//! routing, normalization, loop detection, rendering — is the real thing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use switchboard_config::AppConfig;
use switchboard_core::{
    AgentError, AgentHandle, ConversationState, EventBus, Message, RouteDecision, Router,
};
use switchboard_supervisor::{AgentNode, Dispatcher, LoopPolicy, render};
use tracing::info;

/// An agent that replays a queue of canned replies.
///
/// When the queue runs dry it repeats the last reply, which demonstrates the
/// dispatcher's loop breaking if the router keeps coming back.
struct ScriptedAgent {
    replies: Mutex<Vec<String>>,
    last: Mutex<Option<String>>,
}

impl ScriptedAgent {
    fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(String::from).collect()),
            last: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AgentHandle for ScriptedAgent {
    async fn invoke(&self, _messages: &[Message]) -> Result<Vec<Message>, AgentError> {
        let mut replies = self.replies.lock().unwrap();
        let mut last = self.last.lock().unwrap();

        let content = if replies.is_empty() {
            last.clone()
                .ok_or_else(|| AgentError::Invocation("script exhausted".into()))?
        } else {
            let next = replies.remove(0);
            *last = Some(next.clone());
            next
        };

        Ok(vec![Message::agent_unattributed(content)])
    }
}

/// A router that walks a fixed plan, then finishes.
struct PlannedRouter {
    plan: Mutex<Vec<RouteDecision>>,
}

#[async_trait]
impl Router for PlannedRouter {
    async fn route(&self, _state: &ConversationState) -> Result<RouteDecision, AgentError> {
        let mut plan = self.plan.lock().unwrap();
        if plan.is_empty() {
            Ok(RouteDecision::Finish)
        } else {
            Ok(plan.remove(0))
        }
    }
}

pub async fn run(
    message: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => AppConfig::load_from(&path)?,
        None => AppConfig::default(),
    };

    let question = message
        .unwrap_or_else(|| "What was the last closing stock price of AAPL?".to_string());

    // Scripted specialists. The financial agent's raw reply carries narrow
    // no-break spaces and an ISO date, so the normalizer has work to do.
    let financial = Arc::new(ScriptedAgent::new(vec![
        "The most recent closing price for **AAPL** was **$278.28** on 2025-12-12.",
    ]));
    let research = Arc::new(ScriptedAgent::new(vec![
        "Recent coverage notes steady demand heading into\u{202f}2026.",
    ]));

    let router = Arc::new(PlannedRouter {
        plan: Mutex::new(vec![
            RouteDecision::Next("FinancialAgent".into()),
            RouteDecision::Next("ResearchAgent".into()),
            RouteDecision::Finish,
        ]),
    });

    let bus = Arc::new(EventBus::default());
    let mut events = bus.subscribe();

    // Print every step as it happens; the printer task holds no authority
    // over the run.
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let Some(text) = render(Some(event.as_ref())) {
                println!("{text}");
            }
        }
    });

    let dispatcher = Dispatcher::new(router, bus.clone())
        .add_node(AgentNode::new("FinancialAgent", financial))
        .add_node(AgentNode::new("ResearchAgent", research))
        .with_max_turns(config.supervisor.max_turns)
        .with_loop_policy(LoopPolicy::from(&config.loop_detection));

    let report = dispatcher.run(question).await;

    // The printer exits once every sender handle on the bus is gone.
    drop(dispatcher);
    drop(bus);
    let _ = printer.await;

    info!(
        status = ?report.status,
        turns = report.turns,
        messages = report.state.messages.len(),
        "run complete"
    );

    Ok(())
}
