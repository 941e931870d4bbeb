//! Error types surfaced by the remote conversation agent.
use std::{fmt, time::Duration};

/// Failure categories for a remote-agent call. All of them render the same
/// fallback line to the player; a stale response is not an error value but
/// a poll outcome the connection discards silently.
#[derive(Debug, Clone)]
pub enum AgentError {
    Network { message: String },
    Timeout { elapsed: Duration },
    MalformedResponse { message: String },
}

impl AgentError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { message } => write!(f, "network failure: {}", message),
            Self::Timeout { elapsed } => {
                write!(f, "timed out after {:.1}s", elapsed.as_secs_f32())
            }
            Self::MalformedResponse { message } => {
                write!(f, "malformed response: {}", message)
            }
        }
    }
}

impl std::error::Error for AgentError {}

/// Literal line rendered in place of a reply when a request fails.
pub fn fallback_line(npc_name: &str) -> String {
    format!("{npc_name} seems distracted and doesn't respond.")
}
