//! Components and settings for the conversation text box.
use bevy::prelude::*;

/// Marker for the text box root node.
#[derive(Component, Debug)]
pub struct DialogueTextBox;

/// Marker for the text entity inside the box.
#[derive(Component, Debug)]
pub struct DialogueTextContent;

/// Visual settings for the text box.
#[derive(Resource, Debug, Clone)]
pub struct TextBoxSettings {
    pub panel_width: f32,
    pub bottom_offset: f32,
    pub padding: f32,
    pub border_width: f32,
    pub font_size: f32,
}

impl Default for TextBoxSettings {
    fn default() -> Self {
        Self {
            panel_width: 620.0,
            bottom_offset: 28.0,
            padding: 14.0,
            border_width: 2.0,
            font_size: 18.0,
        }
    }
}
