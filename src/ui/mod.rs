// src/ui/mod.rs
//
// UI module providing screen-space elements for the conversation flow.
//
// Current features:
// - Conversation text box (bottom-center typewriter display)

pub mod text_box;

pub use text_box::TextBoxPlugin as UiPlugin;
