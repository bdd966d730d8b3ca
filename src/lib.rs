//! Skyfire - A vertical arcade shooter in Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, session (score) and data loading
//! - **World**: Camera, playfield bounds, gameplay entity cleanup
//! - **Player**: Plane movement, firing input, life bonus pickups
//! - **Combat**: Weapons, projectiles, collisions, damage
//! - **Enemies**: Enemy data, movement, shooting, defeat bookkeeping
//! - **Spawning**: The wave director - score-scaled wave scheduling
//! - **Upgrades**: Score-threshold awards and timed upgrade stacking
//! - **Campaign**: Missions, briefings, bosses and victory screens
//! - **Audio**: Music per state and sound effects
//! - **UI**: Menus, HUD, overlays

pub mod audio;
pub mod campaign;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod spawning;
pub mod ui;
pub mod upgrades;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SkyfirePlugin;

impl Plugin for SkyfirePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Camera and playfield
            .add_plugins(world::WorldPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Wave scheduling
            .add_plugins(spawning::SpawningPlugin)

            // Upgrades
            .add_plugins(upgrades::UpgradePlugin)

            // Missions
            .add_plugins(campaign::CampaignPlugin)

            // Music and sound effects
            .add_plugins(audio::GameAudioPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
