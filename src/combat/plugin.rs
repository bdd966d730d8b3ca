//! Combat plugin - projectiles, weapons, collisions and damage.

use bevy::prelude::*;

use super::data::{load_combat_definitions, ProjectileRegistry, WeaponRegistry};
use super::systems;
use crate::core::GameState;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProjectileRegistry>()
            .init_resource::<WeaponRegistry>()
            .add_systems(OnEnter(GameState::Loading), load_combat_definitions);

        // Setup combat systems
        systems::setup_combat_systems(app);
    }
}
