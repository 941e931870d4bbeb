//! Buffered messages describing committed conversation lines.
use bevy::prelude::{Event, Message};

use crate::npc::components::NpcId;

/// Who produced a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Player,
    Npc,
}

/// One committed exchange line, emitted in creation order.
#[derive(Event, Message, Debug, Clone)]
pub struct ConversationTurn {
    pub npc_id: NpcId,
    pub npc_name: String,
    pub speaker: Speaker,
    pub text: String,
    pub turn: u32,
}
