//! Conversation text box anchored at the bottom of the screen.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::TextBoxPlugin;
