//! Per-tick coordination of proximity, confirm input, and the session.
//!
//! This is the sole writer of session transitions driven by external
//! events (proximity and input); resolved network results are applied
//! separately in `dialogue::systems`.
use bevy::prelude::*;

use crate::{
    dialogue::{
        agent::AgentRequest,
        connection::AgentConnection,
        events::{ConversationTurn, Speaker},
        session::{BoundNpc, DialogueSession, SessionPhase},
    },
    npc::{
        components::{Facing, Identity, InConversation, NpcRegistry},
        roam::RoamingAgent,
    },
    player::components::{Player, PlayerMovementLock},
};

use super::proximity::in_range;

/// Confirm key: opens, skips, and advances conversations.
pub const CONFIRM_KEY: KeyCode = KeyCode::KeyE;

/// Literal continue signal carried as the player's message on advance.
const CONTINUE_SIGNAL: &str = "continue";

/// The NPC currently eligible for interaction, if any.
#[derive(Resource, Debug, Default)]
pub struct NearbyNpc(pub Option<Entity>);

/// Scans registered NPCs in spawn order for the first one in range.
pub fn detect_nearby_npc(
    registry: Res<NpcRegistry>,
    player_query: Query<&Transform, With<Player>>,
    npc_query: Query<&Transform, With<Identity>>,
    mut nearby: ResMut<NearbyNpc>,
) {
    let Ok(player_transform) = player_query.single() else {
        nearby.0 = None;
        return;
    };
    let player_position = player_transform.translation;

    nearby.0 = registry.iter().find(|&entity| {
        npc_query
            .get(entity)
            .is_ok_and(|transform| in_range(player_position, transform.translation))
    });
}

/// Drives the session each tick, in order: close on walk-away, then apply
/// the confirm press (open / skip / advance), then keep the bound NPC
/// facing the player, then gate player movement.
#[allow(clippy::type_complexity)]
pub fn drive_interactions(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    nearby: Res<NearbyNpc>,
    mut session: ResMut<DialogueSession>,
    mut connection: ResMut<AgentConnection>,
    mut movement_lock: ResMut<PlayerMovementLock>,
    player_query: Query<&Transform, With<Player>>,
    mut npc_query: Query<(&Transform, &Identity, &mut RoamingAgent, &mut Facing)>,
    mut turns: MessageWriter<ConversationTurn>,
) {
    let confirm = keyboard.just_pressed(CONFIRM_KEY);

    // Walk-away closes the session regardless of phase; a response still
    // in flight will poll as stale and be dropped.
    let bound_entity = session.npc().map(|bound| bound.entity);
    if let Some(entity) = bound_entity {
        if nearby.0 != Some(entity) {
            close_session(&mut commands, &mut session, &mut npc_query);
        }
    }

    if session.is_open() {
        if confirm {
            match session.phase() {
                // Ignored while a request is in flight: prevents duplicates.
                SessionPhase::Requesting => {}
                SessionPhase::Revealing => session.skip_reveal(),
                SessionPhase::AwaitingAdvance => {
                    if let Some(bound) = session.npc().cloned() {
                        if let Some(generation) = session.advance() {
                            turns.write(ConversationTurn {
                                npc_id: bound.id.clone(),
                                npc_name: bound.display_name.clone(),
                                speaker: Speaker::Player,
                                text: CONTINUE_SIGNAL.to_string(),
                                turn: session.turn(),
                            });
                            connection.dispatch(
                                generation,
                                AgentRequest {
                                    npc_id: bound.id.as_str().to_string(),
                                    player_message: Some(CONTINUE_SIGNAL.to_string()),
                                    turn: session.turn(),
                                },
                            );
                        }
                    }
                }
                SessionPhase::Closed => {}
            }
        }
    } else if confirm {
        if let Some(entity) = nearby.0 {
            let identity = npc_query
                .get(entity)
                .ok()
                .map(|(_, identity, _, _)| identity.clone());
            if let Some(identity) = identity {
                open_session(
                    &mut commands,
                    &mut session,
                    &mut connection,
                    &mut npc_query,
                    entity,
                    identity,
                );
            }
        }
    }

    // The bound NPC keeps facing the player for the whole conversation.
    if let (Some(entity), Ok(player_transform)) = (
        session.npc().map(|bound| bound.entity),
        player_query.single(),
    ) {
        if let Ok((npc_transform, _, _, mut facing)) = npc_query.get_mut(entity) {
            let to_player = player_transform.translation - npc_transform.translation;
            let flat = Vec2::new(to_player.x, to_player.z);
            if flat.length_squared() > f32::EPSILON {
                facing.0 = flat.normalize();
            }
        }
    }

    movement_lock.0 = session.is_open();
}

#[allow(clippy::type_complexity)]
fn open_session(
    commands: &mut Commands,
    session: &mut DialogueSession,
    connection: &mut AgentConnection,
    npc_query: &mut Query<(&Transform, &Identity, &mut RoamingAgent, &mut Facing)>,
    entity: Entity,
    identity: Identity,
) {
    let bound = BoundNpc {
        entity,
        id: identity.id.clone(),
        display_name: identity.display_name.clone(),
    };
    let Some(generation) = session.open(bound) else {
        return;
    };

    connection.dispatch(
        generation,
        AgentRequest {
            npc_id: identity.id.as_str().to_string(),
            player_message: None,
            turn: session.turn(),
        },
    );

    if let Ok((_, _, mut roaming, _)) = npc_query.get_mut(entity) {
        roaming.freeze();
    }
    commands.entity(entity).insert(InConversation);

    info!(
        target: "dialogue",
        "Opened conversation with {}", identity.display_name
    );
}

#[allow(clippy::type_complexity)]
fn close_session(
    commands: &mut Commands,
    session: &mut DialogueSession,
    npc_query: &mut Query<(&Transform, &Identity, &mut RoamingAgent, &mut Facing)>,
) {
    if let Some(bound) = session.close() {
        if let Ok((_, _, mut roaming, _)) = npc_query.get_mut(bound.entity) {
            roaming.unfreeze();
        }
        commands.entity(bound.entity).remove::<InConversation>();
        info!(
            target: "dialogue",
            "Closed conversation with {}", bound.display_name
        );
    }
}
