//! NPC identity components and the spawn-order registry.
use std::fmt;

use bevy::prelude::*;

/// Stable string identifier an NPC is known by, both in the scene and to
/// the remote conversation service (e.g. `"cr7"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NpcId(String);

impl NpcId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity data attached to every NPC entity.
#[derive(Component, Debug, Clone)]
pub struct Identity {
    pub id: NpcId,
    pub display_name: String,
}

impl Identity {
    pub fn new(id: NpcId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Fixed point an NPC roams around. Never mutated after spawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec3);

/// Direction the NPC currently faces on the ground plane (x, z).
#[derive(Component, Debug, Clone, Copy)]
pub struct Facing(pub Vec2);

impl Facing {
    /// Yaw angle rotating the avatar to match the facing direction.
    pub fn yaw(&self) -> f32 {
        self.0.x.atan2(self.0.y)
    }
}

/// Marker present while a dialogue session with this NPC is open.
#[derive(Component, Debug, Default)]
pub struct InConversation;

/// NPC entities in spawn order. Interaction tie-breaks resolve by this
/// order: when several NPCs are in range, the first registered wins.
#[derive(Resource, Debug, Default)]
pub struct NpcRegistry {
    entities: Vec<Entity>,
}

impl NpcRegistry {
    pub fn register(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
