//! NPC plugin wiring the roster, roaming, and facing systems.
use bevy::prelude::*;

use crate::npc::{
    components::NpcRegistry,
    config::NpcRoster,
    systems::{apply_facing, spawn_npcs, tick_roaming_agents},
};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(NpcRoster::load_or_default())
            .init_resource::<NpcRegistry>()
            .add_systems(Startup, spawn_npcs.after(crate::world::systems::spawn_scene))
            .add_systems(
                Update,
                (
                    tick_roaming_agents,
                    apply_facing.after(crate::interaction::coordinator::drive_interactions),
                ),
            );
    }
}
