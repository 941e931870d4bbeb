//! Conversation agent abstraction: live HTTP backend or canned fallback.
pub mod config;
pub mod http;

pub use config::{AgentConfig, AgentConfigError};
pub use http::HttpConversationAgent;

use serde::{Deserialize, Serialize};

use super::errors::AgentError;

/// Request sent to the remote conversation service. `player_message` is
/// absent on session open and carries the continue signal afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AgentRequest {
    pub npc_id: String,
    pub player_message: Option<String>,
    pub turn: u32,
}

/// Successful reply payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentReply {
    pub reply_text: String,
}

/// Blocking conversation backend. Always driven from a worker thread so the
/// frame loop never waits on it.
pub trait ConversationAgent: Send + Sync + 'static {
    fn converse(&self, request: &AgentRequest) -> Result<AgentReply, AgentError>;
}

const CANNED_OPENERS: [&str; 3] = [
    "Hey there! Always good to meet someone new around here.",
    "Oh, hello! I was just taking a stroll. What brings you over?",
    "Welcome! Not many people stop to chat these days.",
];

const CANNED_FOLLOW_UPS: [&str; 4] = [
    "Ha, that's one way to put it. Life here keeps me on my toes.",
    "You know, the plaza looks different every single day.",
    "I could talk about this for hours, but I'll spare you.",
    "Anyway, don't let me keep you from your walk.",
];

/// Deterministic local agent used when no remote endpoint is configured.
#[derive(Debug, Default)]
pub struct CannedConversationAgent;

impl ConversationAgent for CannedConversationAgent {
    fn converse(&self, request: &AgentRequest) -> Result<AgentReply, AgentError> {
        let line = if request.turn <= 1 {
            CANNED_OPENERS[request.npc_id.len() % CANNED_OPENERS.len()]
        } else {
            CANNED_FOLLOW_UPS[(request.turn as usize - 2) % CANNED_FOLLOW_UPS.len()]
        };
        Ok(AgentReply {
            reply_text: line.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(npc_id: &str, turn: u32) -> AgentRequest {
        AgentRequest {
            npc_id: npc_id.to_string(),
            player_message: (turn > 1).then(|| "continue".to_string()),
            turn,
        }
    }

    #[test]
    fn canned_agent_is_deterministic_per_npc_and_turn() {
        let agent = CannedConversationAgent;
        let first = agent.converse(&request("cr7", 1)).expect("canned reply");
        let again = agent.converse(&request("cr7", 1)).expect("canned reply");
        assert_eq!(first.reply_text, again.reply_text);

        let follow_up = agent.converse(&request("cr7", 2)).expect("canned reply");
        assert_ne!(first.reply_text, follow_up.reply_text);
    }

    #[test]
    fn request_serializes_null_player_message_on_open() {
        let json = serde_json::to_value(request("cr7", 1)).expect("serialize");
        assert_eq!(json["npc_id"], "cr7");
        assert_eq!(json["turn"], 1);
        assert!(json["player_message"].is_null());
    }
}
