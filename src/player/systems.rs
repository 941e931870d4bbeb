//! Systems spawning and moving the player avatar.
use bevy::prelude::*;

use crate::player::components::{Player, PlayerMovementLock};

const PLAYER_START_POS: Vec3 = Vec3::new(0.0, 1.0, 8.0);
const PLAYER_MOVE_SPEED: f32 = 4.0;

/// Spawns the player avatar capsule.
pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Capsule3d::new(0.4, 1.2)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(70, 110, 190),
            perceptual_roughness: 0.7,
            ..default()
        })),
        Transform::from_translation(PLAYER_START_POS),
        Player,
        Name::new("Player"),
    ));
}

/// Moves the player on the ground plane with WASD, unless movement is
/// locked by an open conversation.
pub fn move_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    lock: Res<PlayerMovementLock>,
    time: Res<Time>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    if lock.0 {
        return;
    }

    let Ok(mut transform) = query.single_mut() else {
        return;
    };

    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction += Vec3::NEG_Z;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction += Vec3::Z;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction += Vec3::NEG_X;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += Vec3::X;
    }

    if direction.length_squared() > 0.0 {
        transform.translation += direction.normalize() * PLAYER_MOVE_SPEED * time.delta_secs();
    }
}
