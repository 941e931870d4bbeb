//! Text box plugin.
use bevy::prelude::*;

use super::{
    components::TextBoxSettings,
    systems::{setup_text_box, sync_text_box},
};

pub struct TextBoxPlugin;

impl Plugin for TextBoxPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TextBoxSettings>()
            .add_systems(Startup, setup_text_box)
            .add_systems(
                Update,
                sync_text_box.after(crate::dialogue::systems::advance_text_reveal),
            );
    }
}
