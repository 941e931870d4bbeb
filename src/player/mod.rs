//! Player module: the controllable avatar and its movement lock.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
