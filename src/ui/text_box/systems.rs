//! Systems spawning and refreshing the conversation text box.
use bevy::prelude::*;

use crate::dialogue::session::{DialogueSession, SessionPhase};

use super::components::{DialogueTextBox, DialogueTextContent, TextBoxSettings};

const BACKGROUND_COLOR: Color = Color::srgba(0.08, 0.08, 0.1, 0.92);
const BORDER_COLOR: Color = Color::srgb(0.3, 0.3, 0.32);
const TEXT_COLOR: Color = Color::WHITE;

/// Waiting indicator shown while a reply is in flight.
const PENDING_TEXT: &str = "...";

/// Spawns the text box hidden; it stays in the tree for the whole run.
pub fn setup_text_box(mut commands: Commands, settings: Res<TextBoxSettings>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(settings.bottom_offset),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-settings.panel_width / 2.0)),
                width: Val::Px(settings.panel_width),
                padding: UiRect::all(Val::Px(settings.padding)),
                border: UiRect::all(Val::Px(settings.border_width)),
                flex_direction: FlexDirection::Column,
                display: Display::None,
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            BorderColor::from(BORDER_COLOR),
            DialogueTextBox,
            Name::new("Dialogue Text Box"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                DialogueTextContent,
            ));
        });
}

/// Mirrors the session into the text box each tick: hidden when closed,
/// a waiting indicator while the request is in flight, and the revealed
/// slice of the reply otherwise.
pub fn sync_text_box(
    session: Res<DialogueSession>,
    mut box_query: Query<&mut Node, With<DialogueTextBox>>,
    mut text_query: Query<&mut Text, With<DialogueTextContent>>,
) {
    let Ok(mut node) = box_query.single_mut() else {
        return;
    };

    let Some(npc) = session.npc() else {
        node.display = Display::None;
        return;
    };
    node.display = Display::Flex;

    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    let body = match session.phase() {
        SessionPhase::Requesting => PENDING_TEXT.to_string(),
        _ => session.visible_text().to_string(),
    };
    let rendered = format!("{}:\n{}", npc.display_name, body);
    if text.0 != rendered {
        text.0 = rendered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::session::BoundNpc;
    use crate::npc::components::NpcId;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<DialogueSession>()
            .init_resource::<TextBoxSettings>()
            .add_systems(Startup, setup_text_box)
            .add_systems(Update, sync_text_box);
        app
    }

    fn box_display(app: &mut App) -> Display {
        let mut query = app
            .world_mut()
            .query_filtered::<&Node, With<DialogueTextBox>>();
        query.single(app.world()).expect("text box node").display
    }

    fn box_text(app: &mut App) -> String {
        let mut query = app
            .world_mut()
            .query_filtered::<&Text, With<DialogueTextContent>>();
        query.single(app.world()).expect("text content").0.clone()
    }

    fn bind_session(app: &mut App) {
        let entity = app.world_mut().spawn_empty().id();
        let mut session = app.world_mut().resource_mut::<DialogueSession>();
        session.open(BoundNpc {
            entity,
            id: NpcId::new("cr7"),
            display_name: "Cristiano Ronaldo".to_string(),
        });
    }

    #[test]
    fn box_stays_hidden_while_no_session_is_open() {
        let mut app = test_app();
        app.update();
        assert_eq!(box_display(&mut app), Display::None);
    }

    #[test]
    fn pending_request_shows_waiting_indicator() {
        let mut app = test_app();
        app.update();
        bind_session(&mut app);
        app.update();

        assert_eq!(box_display(&mut app), Display::Flex);
        assert_eq!(box_text(&mut app), "Cristiano Ronaldo:\n...");
    }

    #[test]
    fn revealed_slice_tracks_the_session() {
        let mut app = test_app();
        app.update();
        bind_session(&mut app);

        {
            let mut session = app.world_mut().resource_mut::<DialogueSession>();
            session.commit_reply("Hello there".to_string());
            session.advance_reveal(5.0 / 40.0);
        }
        app.update();
        assert_eq!(box_text(&mut app), "Cristiano Ronaldo:\nHello");

        {
            let mut session = app.world_mut().resource_mut::<DialogueSession>();
            session.skip_reveal();
        }
        app.update();
        assert_eq!(box_text(&mut app), "Cristiano Ronaldo:\nHello there");

        {
            let mut session = app.world_mut().resource_mut::<DialogueSession>();
            session.close();
        }
        app.update();
        assert_eq!(box_display(&mut app), Display::None);
    }
}
