//! Player plugin - spawning, controls and pickups.

use bevy::prelude::*;

use super::controls;
use super::pickups;
use crate::combat::CombatSet;
use crate::core::{begin_session, GameState, PlayState};

/// Player plugin - handles player spawning, movement and firing.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::InGame),
            controls::spawn_player.after(begin_session),
        )
        .add_systems(OnEnter(PlayState::Paused), controls::release_triggers)
        .add_systems(
            Update,
            (controls::player_movement, controls::player_fire)
                .chain()
                .before(CombatSet::Motion)
                .run_if(in_state(GameState::InGame))
                .run_if(in_state(PlayState::Running)),
        )
        .add_systems(
            Update,
            (pickups::collect_life_bonus, pickups::despawn_missed_bonuses)
                .after(CombatSet::Collision)
                .run_if(in_state(GameState::InGame))
                .run_if(in_state(PlayState::Running)),
        );
    }
}
