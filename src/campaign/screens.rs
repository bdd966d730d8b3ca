//! Briefing and victory screens.

use bevy::prelude::*;

use super::data::{MissionRegistry, StoryScreen};
use super::mission::{CurrentMission, Typewriter};
use crate::core::GameState;

/// Characters revealed per second on story screens.
const TYPEWRITER_SPEED: f32 = 40.0;

/// Marker for story screen UI entities.
#[derive(Component)]
pub struct StoryUi;

/// Marker for the story body text.
#[derive(Component)]
pub struct StoryText;

fn spawn_story_screen(commands: &mut Commands, screen: &StoryScreen) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(40.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.04, 0.1, 0.95)),
            StoryUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(screen.title.clone()),
                TextFont {
                    font_size: 44.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.85, 0.5)),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.9)),
                Node {
                    max_width: Val::Px(480.0),
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
                Typewriter::new(&screen.text, TYPEWRITER_SPEED),
                StoryText,
            ));

            parent.spawn((
                Text::new("Press Space to continue"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.5, 0.6)),
            ));
        });
}

fn despawn_story_ui(commands: &mut Commands, query: &Query<Entity, With<StoryUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Current page for the active story state.
fn current_screen(mission: &CurrentMission, state: GameState) -> Option<StoryScreen> {
    match state {
        GameState::Briefing => mission.intro_screen().cloned(),
        GameState::Victory => mission.victory_screen().cloned(),
        _ => None,
    }
}

/// Where to go once every page of `state` has been shown.
fn leave_story(
    state: GameState,
    mission: &mut CurrentMission,
    registry: &MissionRegistry,
    next_state: &mut NextState<GameState>,
) {
    match state {
        GameState::Briefing => next_state.set(GameState::InGame),
        GameState::Victory => {
            if mission.advance_to_next(registry) {
                info!("Next mission: {:?}", mission.id());
                next_state.set(GameState::Briefing);
            } else {
                info!("Campaign complete");
                mission.clear();
                next_state.set(GameState::MainMenu);
            }
        }
        _ => {}
    }
}

/// Show the first page, or skip straight on when there is none.
pub fn open_story(
    mut commands: Commands,
    state: Res<State<GameState>>,
    mut mission: ResMut<CurrentMission>,
    registry: Res<MissionRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    mission.screen_index = 0;

    match current_screen(&mission, *state.get()) {
        Some(screen) => spawn_story_screen(&mut commands, &screen),
        None => leave_story(*state.get(), &mut mission, &registry, &mut next_state),
    }
}

pub fn type_story_text(time: Res<Time>, mut query: Query<(&mut Typewriter, &mut Text), With<StoryText>>) {
    for (mut typewriter, mut text) in query.iter_mut() {
        typewriter.advance(time.delta_secs());
        text.0 = typewriter.visible_text();
    }
}

/// Space, Enter or a click completes the text, then turns the page.
#[allow(clippy::too_many_arguments)]
pub fn advance_story(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    state: Res<State<GameState>>,
    mut mission: ResMut<CurrentMission>,
    registry: Res<MissionRegistry>,
    mut typewriters: Query<&mut Typewriter, With<StoryText>>,
    story_ui: Query<Entity, With<StoryUi>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let pressed = keyboard.any_just_pressed([KeyCode::Space, KeyCode::Enter])
        || mouse.just_pressed(MouseButton::Left);
    if !pressed {
        return;
    }

    if let Ok(mut typewriter) = typewriters.get_single_mut() {
        if !typewriter.is_finished() {
            typewriter.finish();
            return;
        }
    }

    despawn_story_ui(&mut commands, &story_ui);
    mission.screen_index += 1;

    match current_screen(&mission, *state.get()) {
        Some(screen) => spawn_story_screen(&mut commands, &screen),
        None => leave_story(*state.get(), &mut mission, &registry, &mut next_state),
    }
}

pub fn close_story(mut commands: Commands, story_ui: Query<Entity, With<StoryUi>>) {
    despawn_story_ui(&mut commands, &story_ui);
}
