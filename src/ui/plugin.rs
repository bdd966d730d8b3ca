//! UI plugin - title screen, pause overlay and game over screen.

use bevy::prelude::*;

use super::hud;
use crate::campaign::{start_campaign, CurrentMission, MissionRegistry};
use crate::core::{GameConfig, GameMode, GameSession, GameState, PlayState, SelectedDifficulty};

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.2, 0.3);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.3, 0.42);
const BUTTON_PRESSED: Color = Color::srgb(0.35, 0.4, 0.55);

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app
            // Main menu
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(Update, main_menu_input.run_if(in_state(GameState::MainMenu)))
            .add_systems(OnExit(GameState::MainMenu), despawn_ui::<MainMenuUi>)

            // Pause overlay
            .add_systems(OnEnter(PlayState::Paused), setup_pause_menu)
            .add_systems(Update, pause_menu_input.run_if(in_state(PlayState::Paused)))
            .add_systems(OnExit(PlayState::Paused), despawn_ui::<PauseMenuUi>)

            // Game over
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(Update, game_over_input.run_if(in_state(GameState::GameOver)))
            .add_systems(OnExit(GameState::GameOver), despawn_ui::<GameOverUi>)

            .add_systems(Update, highlight_buttons);
    }
}

#[derive(Component)]
struct MainMenuUi;

#[derive(Component)]
struct PauseMenuUi;

#[derive(Component)]
struct GameOverUi;

/// What a menu button does when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MenuButton {
    /// Start an arcade session at this difficulty level
    Arcade(u32),
    Campaign,
    Quit,
    Resume,
    MainMenu,
    Retry,
}

/// Full-screen column that centres its children.
fn overlay(background: Color) -> impl Bundle {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(background),
    )
}

fn spawn_heading(parent: &mut ChildBuilder, text: &str, font_size: f32, color: Color, gap: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(gap)),
            ..default()
        },
    ));
}

fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.9)),
            ));
        });
}

fn setup_main_menu(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn((overlay(Color::srgb(0.04, 0.07, 0.12)), MainMenuUi))
        .with_children(|parent| {
            spawn_heading(parent, "SKYFIRE", 80.0, Color::srgb(0.95, 0.75, 0.35), 20.0);
            spawn_heading(parent, "Hold the skies", 22.0, Color::srgb(0.55, 0.6, 0.7), 50.0);

            for preset in &config.difficulties {
                spawn_menu_button(parent, &preset.label, MenuButton::Arcade(preset.level));
            }
            if config.first_mission.is_some() {
                spawn_menu_button(parent, "Campaign", MenuButton::Campaign);
            }
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

#[allow(clippy::too_many_arguments)]
fn main_menu_input(
    query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    config: Res<GameConfig>,
    missions: Res<MissionRegistry>,
    mut mission: ResMut<CurrentMission>,
    mut difficulty: ResMut<SelectedDifficulty>,
    mut mode: ResMut<GameMode>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button) in query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match *button {
            MenuButton::Arcade(level) => {
                difficulty.0 = level;
                *mode = GameMode::Arcade;
                mission.clear();
                next_state.set(GameState::InGame);
            }
            MenuButton::Campaign => match start_campaign(&mut mission, &missions, &config) {
                Ok(()) => {
                    difficulty.0 = 1;
                    *mode = GameMode::Campaign;
                    next_state.set(GameState::Briefing);
                }
                Err(e) => error!("Cannot start campaign: {}", e),
            },
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
            _ => {}
        }
    }
}

fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((overlay(Color::srgba(0.0, 0.0, 0.0, 0.7)), PauseMenuUi))
        .with_children(|parent| {
            spawn_heading(parent, "PAUSED", 48.0, Color::srgb(0.85, 0.85, 0.9), 40.0);
            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

fn pause_menu_input(
    query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut next_play_state: ResMut<NextState<PlayState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, button) in query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match button {
            MenuButton::Resume => next_play_state.set(PlayState::Running),
            MenuButton::MainMenu => next_state.set(GameState::MainMenu),
            _ => {}
        }
    }
}

fn setup_game_over(mut commands: Commands, session: Res<GameSession>) {
    commands
        .spawn((overlay(Color::srgba(0.12, 0.02, 0.02, 0.9)), GameOverUi))
        .with_children(|parent| {
            spawn_heading(parent, "SHOT DOWN", 72.0, Color::srgb(0.85, 0.25, 0.2), 20.0);
            spawn_heading(
                parent,
                &format!("Score: {}", session.score()),
                28.0,
                Color::srgb(0.85, 0.85, 0.9),
                50.0,
            );
            spawn_menu_button(parent, "Retry", MenuButton::Retry);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

/// Retry replays the same mode, difficulty and mission.
fn game_over_input(
    query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, button) in query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match button {
            MenuButton::Retry => next_state.set(GameState::InGame),
            MenuButton::MainMenu => next_state.set(GameState::MainMenu),
            _ => {}
        }
    }
}

fn highlight_buttons(
    mut query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in query.iter_mut() {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        };
    }
}

fn despawn_ui<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
