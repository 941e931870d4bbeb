//! The dialogue session state machine: one conversation, scene-wide.
use bevy::prelude::*;

use crate::npc::components::NpcId;

/// Characters revealed per second by the typewriter effect.
pub const REVEAL_CHARS_PER_SECOND: f32 = 40.0;

/// Phase of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Closed,
    Requesting,
    Revealing,
    AwaitingAdvance,
}

/// The NPC a session is bound to.
#[derive(Debug, Clone)]
pub struct BoundNpc {
    pub entity: Entity,
    pub id: NpcId,
    pub display_name: String,
}

/// Scene-wide dialogue session. Being the only instance of its kind, this
/// resource structurally enforces the one-open-session invariant.
///
/// The generation counter tags every request issued by the session; it is
/// bumped on open, advance, and close, so a response resolving after its
/// session moved on identifies itself as stale by carrying an old tag.
#[derive(Resource, Debug)]
pub struct DialogueSession {
    phase: SessionPhase,
    npc: Option<BoundNpc>,
    turn: u32,
    buffer: String,
    reveal_cursor: usize, // chars, not bytes
    reveal_budget: f32,
    generation: u64,
}

impl Default for DialogueSession {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Closed,
            npc: None,
            turn: 0,
            buffer: String::new(),
            reveal_cursor: 0,
            reveal_budget: 0.0,
            generation: 0,
        }
    }
}

impl DialogueSession {
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn npc(&self) -> Option<&BoundNpc> {
        self.npc.as_ref()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_open(&self) -> bool {
        self.phase != SessionPhase::Closed
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn revealed_chars(&self) -> usize {
        self.reveal_cursor
    }

    /// The slice of the buffered reply currently visible.
    pub fn visible_text(&self) -> &str {
        match self.buffer.char_indices().nth(self.reveal_cursor) {
            Some((byte_index, _)) => &self.buffer[..byte_index],
            None => &self.buffer,
        }
    }

    /// Binds `npc` and enters `Requesting` for turn 1. Returns the
    /// generation tag the request must carry. Only legal from `Closed`.
    pub fn open(&mut self, npc: BoundNpc) -> Option<u64> {
        if self.phase != SessionPhase::Closed {
            return None;
        }
        self.phase = SessionPhase::Requesting;
        self.npc = Some(npc);
        self.turn = 1;
        self.reset_reveal();
        self.generation += 1;
        Some(self.generation)
    }

    /// Re-enters `Requesting` for the next turn. Only legal from
    /// `AwaitingAdvance`.
    pub fn advance(&mut self) -> Option<u64> {
        if self.phase != SessionPhase::AwaitingAdvance {
            return None;
        }
        self.phase = SessionPhase::Requesting;
        self.turn += 1;
        self.reset_reveal();
        self.generation += 1;
        Some(self.generation)
    }

    /// Buffers a successful reply and starts the reveal.
    pub fn commit_reply(&mut self, text: impl Into<String>) {
        if self.phase != SessionPhase::Requesting {
            return;
        }
        self.buffer = text.into();
        self.reveal_cursor = 0;
        self.reveal_budget = 0.0;
        self.phase = if self.buffer.is_empty() {
            SessionPhase::AwaitingAdvance
        } else {
            SessionPhase::Revealing
        };
    }

    /// Renders `fallback_line` fully revealed and waits for the next
    /// confirm press. The conversation stays resumable.
    pub fn fail(&mut self, fallback_line: impl Into<String>) {
        if self.phase != SessionPhase::Requesting {
            return;
        }
        self.buffer = fallback_line.into();
        self.reveal_cursor = self.buffer.chars().count();
        self.reveal_budget = 0.0;
        self.phase = SessionPhase::AwaitingAdvance;
    }

    /// Advances the reveal cursor at the fixed pacing rate.
    pub fn advance_reveal(&mut self, delta_seconds: f32) {
        if self.phase != SessionPhase::Revealing {
            return;
        }
        self.reveal_budget += REVEAL_CHARS_PER_SECOND * delta_seconds.max(0.0);
        let step = self.reveal_budget as usize;
        if step == 0 {
            return;
        }
        self.reveal_budget -= step as f32;

        let total = self.buffer.chars().count();
        self.reveal_cursor = (self.reveal_cursor + step).min(total);
        if self.reveal_cursor == total {
            self.phase = SessionPhase::AwaitingAdvance;
        }
    }

    /// Completes the reveal in a single step.
    pub fn skip_reveal(&mut self) {
        if self.phase != SessionPhase::Revealing {
            return;
        }
        self.reveal_cursor = self.buffer.chars().count();
        self.phase = SessionPhase::AwaitingAdvance;
    }

    /// Closes the session, returning the NPC it was bound to so the caller
    /// can unfreeze it. Idempotent and always legal.
    pub fn close(&mut self) -> Option<BoundNpc> {
        let npc = self.npc.take();
        if self.phase != SessionPhase::Closed {
            self.generation += 1;
        }
        self.phase = SessionPhase::Closed;
        self.turn = 0;
        self.reset_reveal();
        npc
    }

    fn reset_reveal(&mut self) {
        self.buffer.clear();
        self.reveal_cursor = 0;
        self.reveal_budget = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound_npc() -> BoundNpc {
        let mut world = World::new();
        BoundNpc {
            entity: world.spawn_empty().id(),
            id: NpcId::new("cr7"),
            display_name: "Cristiano Ronaldo".to_string(),
        }
    }

    #[test]
    fn full_conversation_round_trip() {
        let mut session = DialogueSession::default();
        assert_eq!(session.phase(), SessionPhase::Closed);

        let generation = session.open(bound_npc()).expect("open from Closed");
        assert_eq!(session.phase(), SessionPhase::Requesting);
        assert_eq!(session.turn(), 1);
        assert_eq!(generation, session.generation());

        session.commit_reply("Hello!");
        assert_eq!(session.phase(), SessionPhase::Revealing);
        assert_eq!(session.visible_text(), "");

        // 6 chars at 40 chars/sec resolve in 0.15s of reveal ticks.
        session.advance_reveal(0.1);
        assert!(session.revealed_chars() >= 4);
        session.advance_reveal(0.1);
        assert_eq!(session.revealed_chars(), 6);
        assert_eq!(session.visible_text(), "Hello!");
        assert_eq!(session.phase(), SessionPhase::AwaitingAdvance);

        let next = session.advance().expect("advance re-requests");
        assert_eq!(session.phase(), SessionPhase::Requesting);
        assert_eq!(session.turn(), 2);
        assert!(next > generation);
    }

    #[test]
    fn skip_completes_reveal_in_one_step() {
        let mut session = DialogueSession::default();
        session.open(bound_npc());
        session.commit_reply("A long-winded line of dialogue.");
        session.advance_reveal(0.05);
        assert_eq!(session.phase(), SessionPhase::Revealing);

        session.skip_reveal();
        assert_eq!(session.phase(), SessionPhase::AwaitingAdvance);
        assert_eq!(session.visible_text(), session.buffer());
    }

    #[test]
    fn reveal_cursor_counts_chars_not_bytes() {
        let mut session = DialogueSession::default();
        session.open(bound_npc());
        session.commit_reply("héllo");
        session.advance_reveal(0.05); // 2 chars
        assert_eq!(session.visible_text(), "hé");
    }

    #[test]
    fn failure_lands_in_awaiting_advance_fully_revealed() {
        let mut session = DialogueSession::default();
        session.open(bound_npc());
        session.fail("Cristiano Ronaldo seems distracted and doesn't respond.");
        assert_eq!(session.phase(), SessionPhase::AwaitingAdvance);
        assert_eq!(session.visible_text(), session.buffer());
        assert!(session.advance().is_some());
    }

    #[test]
    fn close_is_idempotent_and_clears_state() {
        let mut session = DialogueSession::default();
        session.open(bound_npc());
        session.commit_reply("Hi.");

        let generation_before = session.generation();
        assert!(session.close().is_some());
        assert!(session.generation() > generation_before);
        assert_eq!(session.phase(), SessionPhase::Closed);
        assert_eq!(session.turn(), 0);
        assert!(session.buffer().is_empty());
        assert!(session.npc().is_none());

        let generation_after = session.generation();
        assert!(session.close().is_none());
        assert_eq!(session.generation(), generation_after);
    }

    #[test]
    fn confirm_style_calls_are_ignored_in_wrong_phases() {
        let mut session = DialogueSession::default();
        assert!(session.advance().is_none());
        session.skip_reveal();
        assert_eq!(session.phase(), SessionPhase::Closed);

        session.open(bound_npc());
        // A second open while one is live is forbidden.
        assert!(session.open(bound_npc()).is_none());
        // Advancing while a request is in flight is ignored.
        assert!(session.advance().is_none());
    }
}
