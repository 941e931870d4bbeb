//! NPC roster configuration loaded from `config/npcs.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::roam::RoamTuning;

const CONFIG_PATH: &str = "config/npcs.toml";

/// Height at which capsule avatars rest on the ground plane.
const AVATAR_Y: f32 = 1.0;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawRoster {
    #[serde(default)]
    npcs: Vec<RawNpcEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawNpcEntry {
    id: String,
    name: String,
    spawn: [f32; 2],
    facing: [f32; 2],
    roam_radius: f32,
    move_speed: f32,
    pause_chance: f32,
    direction_change_chance: f32,
}

impl Default for RawNpcEntry {
    fn default() -> Self {
        let tuning = RoamTuning::default();
        Self {
            id: String::new(),
            name: String::new(),
            spawn: [0.0, 0.0],
            facing: [0.0, 1.0],
            roam_radius: tuning.roam_radius,
            move_speed: tuning.move_speed,
            pause_chance: tuning.pause_chance,
            direction_change_chance: tuning.direction_change_chance,
        }
    }
}

/// One spawnable NPC description.
#[derive(Debug, Clone)]
pub struct NpcDefinition {
    pub id: String,
    pub display_name: String,
    pub spawn: Vec3,
    pub facing: Vec2,
    pub tuning: RoamTuning,
}

impl NpcDefinition {
    fn from_raw(raw: RawNpcEntry) -> Self {
        Self {
            id: raw.id,
            display_name: raw.name,
            spawn: Vec3::new(raw.spawn[0], AVATAR_Y, raw.spawn[1]),
            facing: Vec2::new(raw.facing[0], raw.facing[1]).normalize_or_zero(),
            tuning: RoamTuning {
                roam_radius: raw.roam_radius,
                move_speed: raw.move_speed,
                pause_chance: raw.pause_chance,
                direction_change_chance: raw.direction_change_chance,
            },
        }
    }
}

/// Full roster, consumed once at scene setup.
#[derive(Resource, Debug, Clone)]
pub struct NpcRoster {
    pub npcs: Vec<NpcDefinition>,
}

impl NpcRoster {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml(&contents) {
                Some(roster) => roster,
                None => {
                    warn!(
                        "Could not use {}; falling back to the built-in roster.",
                        path.display()
                    );
                    Self::built_in()
                }
            },
            Err(_) => Self::built_in(),
        }
    }

    /// Parses roster TOML. Returns `None` when the document is invalid or
    /// holds no usable entries.
    fn from_toml(contents: &str) -> Option<Self> {
        let raw: RawRoster = match toml::from_str(contents) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Roster config parse error: {}", err);
                return None;
            }
        };

        let npcs: Vec<NpcDefinition> = raw
            .npcs
            .into_iter()
            .filter(|entry| {
                let usable = !entry.id.trim().is_empty() && !entry.name.trim().is_empty();
                if !usable {
                    warn!("Skipping roster entry with missing id or name");
                }
                usable
            })
            .map(NpcDefinition::from_raw)
            .collect();

        if npcs.is_empty() {
            None
        } else {
            Some(Self { npcs })
        }
    }

    fn built_in() -> Self {
        let entries = [
            ("cr7", "Cristiano Ronaldo", [4.0, 2.0], [0.0, 1.0]),
            ("bill_gates", "Bill Gates", [-3.5, 6.0], [1.0, 0.0]),
            ("srk", "Shah Rukh Khan", [1.0, -5.0], [0.0, -1.0]),
        ];

        let npcs = entries
            .into_iter()
            .map(|(id, name, spawn, facing)| {
                NpcDefinition::from_raw(RawNpcEntry {
                    id: id.to_string(),
                    name: name.to_string(),
                    spawn,
                    facing,
                    ..Default::default()
                })
            })
            .collect();

        Self { npcs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roster_with_defaults_for_omitted_keys() {
        let roster = NpcRoster::from_toml(
            r#"
            [[npcs]]
            id = "cr7"
            name = "Cristiano Ronaldo"
            spawn = [4.0, 2.0]
            move_speed = 1.6
            "#,
        )
        .expect("roster should parse");

        assert_eq!(roster.npcs.len(), 1);
        let npc = &roster.npcs[0];
        assert_eq!(npc.id, "cr7");
        assert_eq!(npc.spawn, Vec3::new(4.0, 1.0, 2.0));
        assert_eq!(npc.tuning.move_speed, 1.6);
        assert_eq!(npc.tuning.roam_radius, RoamTuning::default().roam_radius);
    }

    #[test]
    fn rejects_empty_and_nameless_rosters() {
        assert!(NpcRoster::from_toml("").is_none());
        assert!(NpcRoster::from_toml("npcs = []").is_none());
        assert!(NpcRoster::from_toml(
            r#"
            [[npcs]]
            id = ""
            name = ""
            "#
        )
        .is_none());
        assert!(NpcRoster::from_toml("not toml at all [").is_none());
    }

    #[test]
    fn built_in_roster_has_distinct_ids() {
        let roster = NpcRoster::built_in();
        assert!(!roster.npcs.is_empty());
        for (index, npc) in roster.npcs.iter().enumerate() {
            for other in &roster.npcs[index + 1..] {
                assert_ne!(npc.id, other.id);
            }
        }
    }
}
