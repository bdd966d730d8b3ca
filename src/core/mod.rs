//! Core game module - states, events, session and data loading.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod error;
mod events;
pub mod loading;
mod plugin;
mod session;
mod states;

pub use config::{DifficultyPreset, GameConfig, LifeBonusTuning, PlayerTuning};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::{begin_session, CorePlugin};
pub use session::{award_points, GameSession, SelectedDifficulty};
pub use states::*;
