//! Hit feedback: damage-stage tinting and hit flashes.

use bevy::prelude::*;

use super::components::Health;

/// A damage state, active once health drops to `activation_percent`.
#[derive(Debug, Clone)]
pub struct DamageStage {
    pub activation_percent: f32,
    pub tint: Color,
}

/// Sprite colouring driven by health.
///
/// Stages are ordered from full health to nearly destroyed; the first
/// stage is the undamaged look.
#[derive(Component, Debug, Clone)]
pub struct PlaneVisuals {
    pub base: Color,
    pub stages: Vec<DamageStage>,
    pub flash_color: Color,
    pub flash: Timer,
}

impl PlaneVisuals {
    pub fn new(base: Color, stages: Vec<DamageStage>, flash_color: Color) -> Self {
        let mut flash = Timer::from_seconds(0.1, TimerMode::Once);
        flash.tick(flash.duration());
        Self {
            base,
            stages,
            flash_color,
            flash,
        }
    }

    pub fn trigger_flash(&mut self) {
        self.flash.reset();
    }

    /// Colour for the given health, ignoring any flash.
    pub fn stage_color(&self, health: &Health) -> Color {
        if health.current >= health.maximum || self.stages.is_empty() {
            return self.base;
        }
        let index = select_damage_stage(&self.stages, health.percentage() * 100.0);
        self.stages[index].tint
    }
}

/// Index of the deepest stage whose threshold the health percentage has
/// reached. Scans forward while the next stage's threshold is at or above
/// the current percentage.
pub fn select_damage_stage(stages: &[DamageStage], health_percent: f32) -> usize {
    let mut index = 0;
    while index + 1 < stages.len() && stages[index + 1].activation_percent >= health_percent {
        index += 1;
    }
    index
}

/// Apply stage tints and flashes to sprites.
pub fn update_plane_visuals(
    time: Res<Time>,
    mut query: Query<(&mut PlaneVisuals, &Health, &mut Sprite)>,
) {
    for (mut visuals, health, mut sprite) in query.iter_mut() {
        visuals.flash.tick(time.delta());

        sprite.color = if visuals.flash.finished() {
            visuals.stage_color(health)
        } else {
            visuals.flash_color
        };
    }
}
