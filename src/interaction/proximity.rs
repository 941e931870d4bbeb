//! Player/NPC interaction range check.
use bevy::prelude::*;

/// Maximum distance (world units) at which the player can address an NPC.
/// One constant for every NPC.
pub const INTERACTION_RANGE: f32 = 3.0;

/// Whether `npc_position` is close enough to `player_position` to interact.
pub fn in_range(player_position: Vec3, npc_position: Vec3) -> bool {
    player_position.distance(npc_position) <= INTERACTION_RANGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check_is_an_inclusive_euclidean_threshold() {
        let player = Vec3::new(0.0, 1.0, 0.0);
        assert!(in_range(player, Vec3::new(1.0, 1.0, 1.0)));
        assert!(in_range(player, Vec3::new(INTERACTION_RANGE, 1.0, 0.0)));
        assert!(!in_range(player, Vec3::new(INTERACTION_RANGE + 0.01, 1.0, 0.0)));
        assert!(!in_range(player, Vec3::new(3.0, 1.0, 3.0)));
    }
}
