//! Non-blocking bridge between the frame loop and the blocking agent call.
//!
//! Each request runs on a detached worker thread and reports back through a
//! channel the connection polls once per tick, so results only ever apply
//! at a tick boundary.
use std::{
    sync::{
        mpsc::{self, Receiver, TryRecvError},
        Arc, Mutex,
    },
    thread,
};

use bevy::prelude::*;

use super::{
    agent::{AgentReply, AgentRequest, ConversationAgent},
    errors::AgentError,
};

/// Outcome of polling the connection.
#[derive(Debug)]
pub enum AgentPoll {
    /// Nothing in flight.
    Idle,
    /// Still waiting on the worker.
    Pending,
    /// Result for the current session generation.
    Ready(Result<AgentReply, AgentError>),
    /// Result for a generation that was closed or reassigned; discard.
    Stale,
}

struct InFlight {
    generation: u64,
    receiver: Mutex<Receiver<Result<AgentReply, AgentError>>>,
}

/// Resource owning the agent backend and at most one in-flight request.
#[derive(Resource)]
pub struct AgentConnection {
    agent: Arc<dyn ConversationAgent>,
    in_flight: Option<InFlight>,
}

impl AgentConnection {
    pub fn new(agent: Arc<dyn ConversationAgent>) -> Self {
        Self {
            agent,
            in_flight: None,
        }
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Spawns a worker for `request`, tagged with the session generation
    /// that issued it. A previous unresolved request is abandoned; its
    /// eventual result would poll as stale anyway.
    pub fn dispatch(&mut self, generation: u64, request: AgentRequest) {
        let (sender, receiver) = mpsc::channel();
        let agent = Arc::clone(&self.agent);
        thread::spawn(move || {
            let result = agent.converse(&request);
            // The receiver is gone if the connection moved on; fine either way.
            let _ = sender.send(result);
        });
        self.in_flight = Some(InFlight {
            generation,
            receiver: Mutex::new(receiver),
        });
    }

    /// Non-blocking poll, called once per tick. `current_generation` is the
    /// session's live generation; mismatched results are reported as stale
    /// so the caller can drop them without touching the session.
    pub fn poll(&mut self, current_generation: u64) -> AgentPoll {
        let Some(in_flight) = self.in_flight.as_ref() else {
            return AgentPoll::Idle;
        };

        let received = match in_flight.receiver.lock() {
            Ok(receiver) => receiver.try_recv(),
            Err(_) => Err(TryRecvError::Disconnected),
        };

        match received {
            Ok(result) => {
                let generation = in_flight.generation;
                self.in_flight = None;
                if generation == current_generation {
                    AgentPoll::Ready(result)
                } else {
                    AgentPoll::Stale
                }
            }
            Err(TryRecvError::Empty) => AgentPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                let generation = in_flight.generation;
                self.in_flight = None;
                if generation == current_generation {
                    AgentPoll::Ready(Err(AgentError::network(
                        "agent worker exited without a result",
                    )))
                } else {
                    AgentPoll::Stale
                }
            }
        }
    }
}
