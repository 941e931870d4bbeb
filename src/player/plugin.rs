//! Player plugin wiring avatar spawn and movement.
use bevy::prelude::*;

use crate::player::{
    components::PlayerMovementLock,
    systems::{move_player, spawn_player},
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerMovementLock>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                move_player.after(crate::interaction::coordinator::drive_interactions),
            );
    }
}
