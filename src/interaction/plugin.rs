//! Interaction plugin: proximity detection and session coordination.
use bevy::prelude::*;

use super::coordinator::{detect_nearby_npc, drive_interactions, NearbyNpc};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NearbyNpc>().add_systems(
            Update,
            (
                detect_nearby_npc.after(crate::npc::systems::tick_roaming_agents),
                drive_interactions.after(detect_nearby_npc),
            ),
        );
    }
}
