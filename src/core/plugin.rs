//! Core plugin that sets up game states, events, and the session flow.

use bevy::prelude::*;

use super::config::{load_game_config, GameConfig};
use super::events::*;
use super::session::{GameSession, SelectedDifficulty};
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, etc.)
/// - Global events (ScoreChanged, EnemyDefeated, etc.)
/// - The game session lifecycle
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Session resources
            .init_resource::<GameConfig>()
            .init_resource::<GameSession>()
            .init_resource::<SelectedDifficulty>()
            .init_resource::<GameMode>()

            // Register global events
            .add_event::<ScoreChanged>()
            .add_event::<DamageEvent>()
            .add_event::<EnemyDefeated>()
            .add_event::<EnemyEscaped>()
            .add_event::<PlayerDefeated>()
            .add_event::<BossDefeated>()
            .add_event::<UpgradeAwarded>()
            .add_event::<SoundEffect>()

            // Every plugin registers its loader on OnEnter(Loading); all of
            // them have run by the time the transition is applied
            .add_systems(
                OnEnter(GameState::Loading),
                (load_game_config, transition_to_main_menu).chain(),
            )

            .add_systems(OnEnter(GameState::MainMenu), reset_session)
            .add_systems(OnEnter(GameState::InGame), begin_session)

            // The game clock stops while paused
            .add_systems(OnEnter(PlayState::Paused), pause_game_clock)
            .add_systems(OnExit(PlayState::Paused), resume_game_clock)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame)),
            )

            .add_systems(
                Update,
                handle_player_defeat.run_if(in_state(GameState::InGame)),
            );
    }
}

/// Leave the loading state once the data files have been read.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Start scoring for a new session.
///
/// Public so that other `OnEnter(InGame)` systems can order themselves
/// after it.
pub fn begin_session(
    mut session: ResMut<GameSession>,
    difficulty: Res<SelectedDifficulty>,
    mode: Res<GameMode>,
) {
    session.start(difficulty.0);
    info!(
        "Session started: {:?} mode, difficulty {}",
        *mode,
        session.difficulty()
    );
}

/// Returning to the title screen clears the previous session.
fn reset_session(mut session: ResMut<GameSession>) {
    session.reset();
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Running => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Running),
        }
    }
}

fn pause_game_clock(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_game_clock(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

/// End the session when the player plane goes down.
fn handle_player_defeat(
    mut defeat_events: EventReader<PlayerDefeated>,
    mut session: ResMut<GameSession>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for _ in defeat_events.read() {
        if session.end() {
            info!("Player defeated with score {}. Game over.", session.score());
            next_state.set(GameState::GameOver);
        }
    }
}
