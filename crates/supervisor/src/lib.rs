//! # Switchboard Supervisor
//!
//! The dispatch core: a supervisor state machine that routes turns between
//! specialist agents, contains their failures, detects repetitive stalls,
//! and terminates safely.
//!
//! # Architecture
//!
//! ```text
//! Human question
//!       │
//!       ▼
//! ┌────────────┐   route    ┌────────┐
//! │ Dispatcher  │ ◀───────── │ Router │
//! └──┬──────────┘            └────────┘
//!    │ invoke (one turn)
//!    ▼
//! ┌────────────┐  normalize  ┌──────────┐
//! │ AgentNode   │ ──────────▶ │ textnorm │
//! └──┬──────────┘             └──────────┘
//!    │ exactly one attributed message
//!    ▼
//! append → loop check → next turn, or terminal state
//! ```

pub mod dispatcher;
pub mod loop_detect;
pub mod node;
pub mod render;

pub use dispatcher::{DEFAULT_MAX_TURNS, Dispatcher, RunReport, RunStatus};
pub use loop_detect::{LoopDetector, LoopPolicy};
pub use node::AgentNode;
pub use render::{END_MARKER, render};
