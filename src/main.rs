//! Skyfire - Entry Point
//!
//! A vertical arcade shooter: survive escalating enemy waves, collect
//! upgrades and take down mission bosses.
//!
//! Controls:
//! - Arrows / WASD: Move
//! - Space: Primary fire
//! - Shift: Secondary fire
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Skyfire".to_string(),
                resolution: (600.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(48.0))

        // Our game plugin
        .add_plugins(skyfire::SkyfirePlugin)

        .run();
}
