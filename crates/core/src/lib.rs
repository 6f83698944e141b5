//! # Switchboard Core
//!
//! Domain types, traits, and error definitions for the Switchboard agent
//! dispatcher. This crate defines the model that all other crates implement
//! against: conversation state, the opaque agent and router boundaries, and
//! the step-event bus.
//!
//! ## Design Philosophy
//!
//! Specialist agents and the routing decision source are traits here;
//! implementations live outside the core. This keeps the dispatch loop
//! testable with scripted agents and the dependency graph pointing inward.

pub mod error;
pub mod event;
pub mod handle;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use error::{AgentError, Error, Result};
pub use event::{EventBus, StepEvent};
pub use handle::{AgentHandle, RouteDecision, Router};
pub use message::{ConversationState, Message, NextStep, Role};
