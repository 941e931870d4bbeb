//! Dialogue plugin wiring the session, agent connection, and transcript.
use std::sync::Arc;

use bevy::prelude::*;

use crate::interaction::coordinator::drive_interactions;

use super::{
    agent::{
        AgentConfig, AgentConfigError, CannedConversationAgent, ConversationAgent,
        HttpConversationAgent,
    },
    connection::AgentConnection,
    events::ConversationTurn,
    session::DialogueSession,
    systems::{advance_text_reveal, poll_agent_replies},
    transcript::{record_conversation_turns, ConversationTranscript},
};

/// Backend mode for the active conversation agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentMode {
    Live,
    Canned,
}

impl AgentMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Canned => "canned",
        }
    }
}

/// Resource describing the backend the plugin selected at startup.
#[derive(Resource, Debug, Clone)]
pub struct AgentStatus {
    pub mode: AgentMode,
    pub endpoint: Option<String>,
}

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        let (agent, status) = select_agent();

        app.init_resource::<DialogueSession>()
            .init_resource::<ConversationTranscript>()
            .insert_resource(AgentConnection::new(agent))
            .insert_resource(status)
            .add_message::<ConversationTurn>()
            .add_systems(Startup, log_agent_mode)
            .add_systems(
                Update,
                (
                    poll_agent_replies.after(drive_interactions),
                    advance_text_reveal.after(poll_agent_replies),
                    record_conversation_turns.after(poll_agent_replies),
                ),
            );
    }
}

fn select_agent() -> (Arc<dyn ConversationAgent>, AgentStatus) {
    match AgentConfig::from_env() {
        Ok(config) => {
            let endpoint = config.chat_url();
            match HttpConversationAgent::new(config) {
                Ok(agent) => (
                    Arc::new(agent),
                    AgentStatus {
                        mode: AgentMode::Live,
                        endpoint: Some(endpoint),
                    },
                ),
                Err(err) => {
                    warn!("Failed to build conversation HTTP client ({err}); using canned replies.");
                    canned_agent()
                }
            }
        }
        Err(AgentConfigError::MissingBaseUrl) => {
            warn!("AGENT_BASE_URL not set; dialogue running with canned replies.");
            canned_agent()
        }
        Err(err) => {
            warn!("Conversation agent configuration failed ({err}); using canned replies.");
            canned_agent()
        }
    }
}

fn canned_agent() -> (Arc<dyn ConversationAgent>, AgentStatus) {
    (
        Arc::new(CannedConversationAgent),
        AgentStatus {
            mode: AgentMode::Canned,
            endpoint: None,
        },
    )
}

fn log_agent_mode(status: Res<AgentStatus>) {
    match &status.endpoint {
        Some(endpoint) => info!(
            "DialoguePlugin initialised ({} agent at {})",
            status.mode.label(),
            endpoint
        ),
        None => info!("DialoguePlugin initialised ({} agent)", status.mode.label()),
    }
}
