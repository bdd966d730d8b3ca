//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! the wave director only ticks while a session is running, while menu
//! systems only run in the MainMenu state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read the data files
/// - Move to `MainMenu` (title screen) when loading completes
/// - Campaign missions pass through `Briefing` before `InGame`
/// - `GameOver` when the player plane is destroyed
/// - `Victory` when a campaign mission is won
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Title screen with difficulty selection
    MainMenu,
    /// Mission intro screens
    Briefing,
    /// Active gameplay
    InGame,
    /// Player has been shot down
    GameOver,
    /// Mission victory screens
    Victory,
}

/// Sub-states for gameplay - only active when GameState::InGame.
///
/// Pausing is a sub-state so that resuming does not re-run the
/// `OnEnter(GameState::InGame)` session setup.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay
    #[default]
    Running,
    /// Gameplay frozen behind the pause overlay
    Paused,
}

/// Which flavour of game the session is playing.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Endless score attack.
    #[default]
    Arcade,
    /// Scripted missions ending in a boss fight.
    Campaign,
}
