//! Error types for the Switchboard domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Adapter-level agent
//! failures are recovered locally and converted into conversation messages;
//! these types exist so that conversion step is explicit and typed.

use thiserror::Error;

/// The top-level error type for all Switchboard operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Agent boundary errors ---
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures at the agent/router boundary.
///
/// All four conditions are contained by the node adapter or the dispatcher —
/// they surface in the conversation log as synthetic messages, never as a
/// crash. Loop and iteration-cap stops are not errors; they are terminal
/// states on the dispatcher's `RunStatus`.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("received an invalid conversation state")]
    InvalidState,

    #[error("returned an empty or invalid response")]
    EmptyResponse,

    #[error("invocation failed: {0}")]
    Invocation(String),

    #[error("routing decision failed: {0}")]
    Routing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_error_displays_correctly() {
        let err = Error::Agent(AgentError::Invocation("connection reset".into()));
        assert!(err.to_string().contains("connection reset"));
        assert!(err.to_string().contains("Agent error"));
    }

    #[test]
    fn config_error_displays_correctly() {
        let err = Error::Config {
            message: "max_turns must be at least 1".into(),
        };
        assert!(err.to_string().contains("max_turns"));
    }
}
