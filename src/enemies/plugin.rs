//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::data::{load_enemy_definitions, EnemyRegistry};
use super::lifecycle;
use super::movement;
use crate::combat::CombatSet;
use crate::core::{GameState, PlayState};

/// Enemy plugin - handles enemy movement, shooting, defeat and cleanup.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .add_systems(OnEnter(GameState::Loading), load_enemy_definitions)
            // Movement and guns run before collisions are resolved
            .add_systems(
                Update,
                (
                    movement::move_falling,
                    movement::move_drifting,
                    movement::move_bosses,
                    movement::handle_out_of_bounds,
                    lifecycle::enemy_shoot,
                )
                    .chain()
                    .before(CombatSet::Collision)
                    .run_if(in_state(GameState::InGame))
                    .run_if(in_state(PlayState::Running)),
            )
            // Defeat handling follows damage
            .add_systems(
                Update,
                (lifecycle::handle_enemy_defeat, lifecycle::despawn_dead_enemies)
                    .chain()
                    .after(CombatSet::Damage)
                    .run_if(in_state(GameState::InGame))
                    .run_if(in_state(PlayState::Running)),
            );
    }
}
