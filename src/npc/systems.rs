//! Systems spawning the roster and advancing roaming agents.
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use bevy::{math::primitives::Capsule3d, prelude::*};

use super::{
    components::{Facing, Identity, NpcId, NpcRegistry, SpawnPoint},
    config::NpcRoster,
    roam::RoamingAgent,
};

const NPC_COLORS: [(u8, u8, u8); 4] = [
    (200, 90, 90),
    (90, 150, 210),
    (140, 200, 120),
    (210, 170, 90),
];

/// Spawns every roster NPC as a capsule avatar and records spawn order in
/// the registry.
pub fn spawn_npcs(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    roster: Res<NpcRoster>,
    mut registry: ResMut<NpcRegistry>,
) {
    for (index, definition) in roster.npcs.iter().enumerate() {
        let (r, g, b) = NPC_COLORS[index % NPC_COLORS.len()];
        let entity = commands
            .spawn((
                Mesh3d(meshes.add(Mesh::from(Capsule3d::new(0.3, 1.0)))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb_u8(r, g, b),
                    ..default()
                })),
                Transform::from_translation(definition.spawn),
                Identity::new(
                    NpcId::new(definition.id.clone()),
                    definition.display_name.clone(),
                ),
                SpawnPoint(definition.spawn),
                Facing(definition.facing),
                RoamingAgent::new(definition.tuning.clone(), roam_seed(&definition.id)),
                Name::new(format!("{} ({})", definition.display_name, definition.id)),
            ))
            .id();
        registry.register(entity);
    }

    info!("Spawned {} NPCs from roster", roster.npcs.len());
}

/// Ticks each NPC's roaming state machine and records the walk direction.
pub fn tick_roaming_agents(
    time: Res<Time>,
    mut query: Query<(&mut RoamingAgent, &SpawnPoint, &mut Transform, &mut Facing)>,
) {
    let delta_seconds = time.delta_secs();
    for (mut agent, spawn, mut transform, mut facing) in query.iter_mut() {
        if let Some(direction) = agent.tick(delta_seconds, &mut transform.translation, spawn.0) {
            facing.0 = direction;
        }
    }
}

/// Rotates avatars to their facing direction once roaming and interaction
/// updates for the tick are in.
pub fn apply_facing(mut query: Query<(&Facing, &mut Transform), Changed<Facing>>) {
    for (facing, mut transform) in query.iter_mut() {
        transform.rotation = Quat::from_rotation_y(facing.yaw());
    }
}

fn roam_seed(id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}
