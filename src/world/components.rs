//! Components for the world module.
use bevy::prelude::*;

/// Third-person camera that trails the player at a fixed offset.
#[derive(Component, Debug)]
pub struct FollowCamera {
    pub offset: Vec3,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 9.0, 11.0),
        }
    }
}

/// Marker for the main directional light.
#[derive(Component, Debug)]
pub struct PrimarySun;
