//! Rolling in-memory transcript of conversation turns.
//!
//! Debug/UI aid only; transcripts are deliberately not persisted — the
//! remote agent owns long-term conversation memory.
use std::collections::VecDeque;

use bevy::prelude::*;

use super::events::{ConversationTurn, Speaker};

const DEFAULT_TRANSCRIPT_CAPACITY: usize = 64;

/// Capacity-bounded log of recent conversation lines.
#[derive(Resource, Debug)]
pub struct ConversationTranscript {
    capacity: usize,
    records: VecDeque<ConversationTurn>,
}

impl ConversationTranscript {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::new(),
        }
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(turn);
    }

    pub fn records(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ConversationTranscript {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSCRIPT_CAPACITY)
    }
}

/// Records committed turns and mirrors them to the debug log.
pub fn record_conversation_turns(
    mut transcript: ResMut<ConversationTranscript>,
    mut turns: MessageReader<ConversationTurn>,
) {
    for turn in turns.read() {
        let speaker = match turn.speaker {
            Speaker::Player => "player",
            Speaker::Npc => turn.npc_name.as_str(),
        };
        debug!(target: "dialogue", "[turn {}] {}: {}", turn.turn, speaker, turn.text);
        transcript.push(turn.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npc::components::NpcId;

    fn turn(index: u32) -> ConversationTurn {
        ConversationTurn {
            npc_id: NpcId::new("cr7"),
            npc_name: "Cristiano Ronaldo".to_string(),
            speaker: Speaker::Npc,
            text: format!("line {index}"),
            turn: index,
        }
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let mut transcript = ConversationTranscript::new(2);
        transcript.push(turn(1));
        transcript.push(turn(2));
        transcript.push(turn(3));

        assert_eq!(transcript.len(), 2);
        let texts: Vec<_> = transcript.records().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["line 2", "line 3"]);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut transcript = ConversationTranscript::new(0);
        transcript.push(turn(1));
        assert_eq!(transcript.len(), 1);
    }
}
