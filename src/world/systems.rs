//! Systems for the world module.
use bevy::{math::primitives::Plane3d, prelude::*};

use crate::{
    player::components::Player,
    world::components::{FollowCamera, PrimarySun},
};

const GROUND_SCALE: f32 = 100.0;

/// Spawns the initial scene: ground plane, light, and the follow camera.
pub fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(90, 140, 90),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 20_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(16.0, 32.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
        PrimarySun,
    ));

    let follow = FollowCamera::default();
    let mut camera_transform = Transform::from_translation(follow.offset);
    camera_transform.look_at(Vec3::ZERO, Vec3::Y);
    commands.spawn((Camera3d::default(), camera_transform, follow));
}

/// Keeps the camera trailing the player.
pub fn follow_player(
    player_query: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut camera_query: Query<(&FollowCamera, &mut Transform), Without<Player>>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let Ok((follow, mut camera_transform)) = camera_query.single_mut() else {
        return;
    };

    camera_transform.translation = player_transform.translation + follow.offset;
    camera_transform.look_at(player_transform.translation, Vec3::Y);
}
