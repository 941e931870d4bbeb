//! Components and resources for the player avatar.
use bevy::prelude::*;

/// Marker component identifying the player entity.
#[derive(Component, Debug)]
pub struct Player;

/// Resource gating player movement. Set while a conversation is open so
/// the avatar stays put in front of the NPC.
#[derive(Resource, Default, Debug)]
pub struct PlayerMovementLock(pub bool);
