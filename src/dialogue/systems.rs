//! Systems applying resolved agent results and pacing the text reveal.
use bevy::prelude::*;

use super::{
    connection::{AgentConnection, AgentPoll},
    errors::fallback_line,
    events::{ConversationTurn, Speaker},
    session::{DialogueSession, SessionPhase},
};

/// Applies a resolved remote result at the tick boundary. Stale results
/// drain here and are dropped with no UI effect.
pub fn poll_agent_replies(
    mut session: ResMut<DialogueSession>,
    mut connection: ResMut<AgentConnection>,
    mut turns: MessageWriter<ConversationTurn>,
) {
    match connection.poll(session.generation()) {
        AgentPoll::Idle | AgentPoll::Pending => {}
        AgentPoll::Stale => {
            debug!(target: "dialogue", "Discarded stale agent response");
        }
        AgentPoll::Ready(result) => {
            if session.phase() != SessionPhase::Requesting {
                debug!(target: "dialogue", "Dropped agent response outside an open request");
                return;
            }
            let Some(npc) = session.npc().cloned() else {
                return;
            };
            match result {
                Ok(reply) => {
                    turns.write(ConversationTurn {
                        npc_id: npc.id,
                        npc_name: npc.display_name,
                        speaker: Speaker::Npc,
                        text: reply.reply_text.clone(),
                        turn: session.turn(),
                    });
                    session.commit_reply(reply.reply_text);
                }
                Err(error) => {
                    warn!(
                        target: "dialogue",
                        "Agent request for {} failed: {}", npc.id, error
                    );
                    session.fail(fallback_line(&npc.display_name));
                }
            }
        }
    }
}

/// Advances the typewriter reveal while the session is revealing.
pub fn advance_text_reveal(time: Res<Time>, mut session: ResMut<DialogueSession>) {
    session.advance_reveal(time.delta_secs());
}
