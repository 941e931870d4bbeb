//! World module: scene setup and camera.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
