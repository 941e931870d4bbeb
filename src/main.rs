use std::path::Path;

use bevy::prelude::*;

mod dialogue;
mod interaction;
mod npc;
mod player;
mod ui;
mod world;

use crate::{
    dialogue::DialoguePlugin, interaction::InteractionPlugin, npc::NpcPlugin, player::PlayerPlugin,
    ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    load_secrets_env();

    App::new()
        .add_plugins((
            DefaultPlugins,
            WorldPlugin,
            PlayerPlugin,
            NpcPlugin,
            InteractionPlugin,
            DialoguePlugin,
            UiPlugin, // After DialoguePlugin so the box reads a settled session
        ))
        .run();
}

fn load_secrets_env() {
    const SECRETS_FILE: &str = "secrets.env";

    let path = Path::new(SECRETS_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", SECRETS_FILE, err);
    }
}
