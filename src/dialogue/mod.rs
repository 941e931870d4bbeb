//! Dialogue module: session state machine, remote agent client, and the
//! non-blocking connection between them.
pub mod agent;
pub mod connection;
pub mod errors;
pub mod events;
pub mod plugin;
pub mod session;
pub mod systems;
pub mod transcript;

pub use plugin::DialoguePlugin;
