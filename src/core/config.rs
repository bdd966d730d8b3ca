//! Global tuning loaded from `assets/data/game.ron`.

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

use super::loading::{load_ron_file, DATA_DIR};

/// A difficulty button on the title screen.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DifficultyPreset {
    pub label: String,
    pub level: u32,
}

/// Player plane tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal speed in pixels per second
    pub horizontal_speed: f32,
    /// Vertical speed in pixels per second
    pub vertical_speed: f32,
    pub size: (f32, f32),
    pub color: (f32, f32, f32),
    /// Weapon id from weapons.ron
    pub primary_weapon: String,
    pub secondary_weapon: Option<String>,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            horizontal_speed: 300.0,
            vertical_speed: 200.0,
            size: (44.0, 40.0),
            color: (0.85, 0.85, 0.9),
            primary_weapon: "twin_guns".to_string(),
            secondary_weapon: Some("bomb_bay".to_string()),
        }
    }
}

/// Life bonus pickup tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifeBonusTuning {
    pub health_to_restore: u32,
    pub fall_speed: f32,
    pub size: f32,
}

impl Default for LifeBonusTuning {
    fn default() -> Self {
        Self {
            health_to_restore: 1,
            fall_speed: 90.0,
            size: 18.0,
        }
    }
}

/// Top-level game configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player plane health at the start of a session
    pub initial_lives: u32,
    pub difficulties: Vec<DifficultyPreset>,
    /// Wave id used in arcade mode
    pub arcade_wave: String,
    /// First mission of the campaign
    pub first_mission: Option<String>,
    /// Inset of the padded bounds from the screen sides, in pixels
    pub horizontal_padding: f32,
    /// Distance of the spawn line above (and despawn line below) the screen
    pub vertical_padding: f32,
    pub player: PlayerTuning,
    pub life_bonus: LifeBonusTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            difficulties: vec![
                DifficultyPreset {
                    label: "Easy".to_string(),
                    level: 1,
                },
                DifficultyPreset {
                    label: "Medium".to_string(),
                    level: 2,
                },
            ],
            arcade_wave: "arcade".to_string(),
            first_mission: Some("mission_01".to_string()),
            horizontal_padding: 24.0,
            vertical_padding: 120.0,
            player: PlayerTuning::default(),
            life_bonus: LifeBonusTuning::default(),
        }
    }
}

/// Load `game.ron`, keeping defaults when it is missing or broken.
pub fn load_game_config(mut commands: Commands) {
    let path = Path::new(DATA_DIR).join("game.ron");

    let config = match load_ron_file::<GameConfig>(&path) {
        Ok(config) => {
            info!("Loaded game config from {:?}", path);
            config
        }
        Err(e) => {
            warn!("{} - using default game config", e);
            GameConfig::default()
        }
    };

    commands.insert_resource(config);
}
