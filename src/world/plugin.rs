//! World plugin wiring scene setup and the follow camera.
use bevy::prelude::*;

use crate::world::systems::{follow_player, spawn_scene};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene).add_systems(
            Update,
            follow_player.after(crate::player::systems::move_player),
        );
    }
}
