//! NPC module: identity data, roster config, and autonomous roaming.
pub mod components;
pub mod config;
pub mod plugin;
pub mod roam;
pub mod systems;

pub use plugin::NpcPlugin;
