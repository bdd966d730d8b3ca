//! Player-related components.

use bevy::prelude::*;

use crate::core::PlayerTuning;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Movement speeds in pixels per second.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerSpeed {
    pub horizontal: f32,
    pub vertical: f32,
}

impl From<&PlayerTuning> for PlayerSpeed {
    fn from(tuning: &PlayerTuning) -> Self {
        Self {
            horizontal: tuning.horizontal_speed,
            vertical: tuning.vertical_speed,
        }
    }
}

/// A falling pickup that restores player health.
#[derive(Component, Debug, Clone, Copy)]
pub struct LifeBonus {
    pub health_to_restore: u32,
}
