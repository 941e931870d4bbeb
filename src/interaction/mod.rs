//! Interaction module: proximity checks and the confirm-driven
//! conversation coordinator.
pub mod coordinator;
pub mod plugin;
pub mod proximity;

pub use plugin::InteractionPlugin;
