//! World plugin - camera, playfield bounds and gameplay cleanup.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::core::{GameConfig, GameState};

use super::bounds::PlayfieldBounds;

/// Marker for everything spawned during a session (planes, projectiles,
/// pickups). Despawned when leaving `GameState::InGame`.
#[derive(Component)]
pub struct GameplayEntity;

/// Marker for the single 2D camera.
#[derive(Component)]
pub struct MainCamera;

/// Background colour used when a mission does not tint the sky.
pub const DEFAULT_SKY: Color = Color::srgb(0.32, 0.55, 0.78);

/// World plugin - handles the camera and playfield.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayfieldBounds>()
            .insert_resource(ClearColor(DEFAULT_SKY))
            .add_systems(Startup, spawn_camera)
            .add_systems(
                OnExit(GameState::Loading),
                compute_bounds_from_window,
            )
            .add_systems(Update, recompute_bounds_on_resize)
            .add_systems(OnExit(GameState::InGame), cleanup_gameplay);
    }
}

/// Spawn the camera shared by gameplay and menus.
fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Initial bounds, once the config is known.
fn compute_bounds_from_window(
    window_query: Query<&Window, With<PrimaryWindow>>,
    config: Res<GameConfig>,
    mut bounds: ResMut<PlayfieldBounds>,
) {
    let Ok(window) = window_query.get_single() else {
        warn!("No primary window found, keeping default playfield bounds");
        return;
    };

    *bounds = PlayfieldBounds::from_extent(
        window.width(),
        window.height(),
        config.horizontal_padding,
        config.vertical_padding,
    );
    info!(
        "Boundaries calculated: x {} to {}, y {} to {}",
        bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y
    );
}

/// Keep bounds in sync with the window size.
fn recompute_bounds_on_resize(
    mut resize_events: EventReader<WindowResized>,
    config: Res<GameConfig>,
    mut bounds: ResMut<PlayfieldBounds>,
) {
    let Some(event) = resize_events.read().last() else {
        return;
    };

    *bounds = PlayfieldBounds::from_extent(
        event.width,
        event.height,
        config.horizontal_padding,
        config.vertical_padding,
    );
}

/// Clean up session entities when leaving InGame state.
fn cleanup_gameplay(
    mut commands: Commands,
    query: Query<Entity, With<GameplayEntity>>,
    mut clear_color: ResMut<ClearColor>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    clear_color.0 = DEFAULT_SKY;
}
