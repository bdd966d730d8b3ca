//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::combat::DamageStage;
use crate::core::loading::{load_ron_dir, DATA_DIR};

/// How an enemy type moves.
#[derive(Deserialize, Clone, Debug)]
pub enum MovementDefinition {
    /// Straight down at a constant speed.
    Falling { speed: f32 },
    /// Down while sliding sideways at a speed re-rolled every
    /// `change_interval` seconds (0 = never).
    Drifting {
        fall_speed: f32,
        min_speed: f32,
        max_speed: f32,
        change_interval: f32,
    },
    /// Descend to a fixed height, then patrol left and right.
    Boss {
        /// Height to stop at, as a percentage of the playfield from the bottom
        vertical_position_percent: f32,
        vertical_speed: f32,
        horizontal_speed: f32,
        /// Patrol inset from each side, as a percentage of the playfield width
        padding_percent: f32,
        change_direction_delay: (f32, f32),
    },
}

/// Optional gun on an enemy plane.
#[derive(Deserialize, Clone, Debug)]
pub struct ShooterDefinition {
    /// Seconds between shots
    pub fire_interval: f32,
    pub projectile: String,
}

/// Damage tint from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct DamageStageDefinition {
    pub activation_percent: f32,
    pub color: (f32, f32, f32),
}

fn default_group_size() -> u32 {
    1
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    /// Score awarded on defeat
    pub points: u32,
    pub size: (f32, f32),
    pub color: (f32, f32, f32),
    /// Planes spawned together per spawn tick
    #[serde(default = "default_group_size")]
    pub group_size: u32,
    /// Horizontal gap between group members, in pixels
    #[serde(default)]
    pub formation_spacing: f32,
    pub movement: MovementDefinition,
    #[serde(default)]
    pub shooter: Option<ShooterDefinition>,
    /// Chance (0-100) to drop a life bonus when defeated
    #[serde(default)]
    pub drop_chance: f32,
    #[serde(default)]
    pub damage_stages: Vec<DamageStageDefinition>,
    #[serde(default)]
    pub is_boss: bool,
}

impl EnemyDefinition {
    pub fn base_color(&self) -> Color {
        let (r, g, b) = self.color;
        Color::srgb(r, g, b)
    }

    /// Damage stages in the form the hit feedback expects.
    pub fn to_damage_stages(&self) -> Vec<DamageStage> {
        self.damage_stages
            .iter()
            .map(|stage| {
                let (r, g, b) = stage.color;
                DamageStage {
                    activation_percent: stage.activation_percent,
                    tint: Color::srgb(r, g, b),
                }
            })
            .collect()
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(
            "scout".to_string(),
            EnemyDefinition {
                name: "Scout".to_string(),
                max_health: 1.0,
                points: 10,
                size: (36.0, 30.0),
                color: (0.6, 0.7, 0.3),
                group_size: 1,
                formation_spacing: 0.0,
                movement: MovementDefinition::Drifting {
                    fall_speed: 110.0,
                    min_speed: -40.0,
                    max_speed: 40.0,
                    change_interval: 3.0,
                },
                shooter: None,
                drop_chance: 3.0,
                damage_stages: Vec::new(),
                is_boss: false,
            },
        );
        Self { definitions }
    }
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(DATA_DIR).join("enemies");

    match load_ron_dir::<EnemyDefinition>(&enemies_dir) {
        Ok(definitions) => {
            for (enemy_type, definition) in definitions {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.definitions.insert(enemy_type, definition);
            }
        }
        Err(e) => warn!("{}", e),
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loading::parse_ron;

    #[test]
    fn built_in_scout_is_available_without_data() {
        let registry = EnemyRegistry::default();
        let scout = registry.get("scout").unwrap();
        assert!(!scout.is_boss);
        assert!(scout.points > 0);
    }

    #[test]
    fn drifting_enemy_parses_with_defaults() {
        let source = r#"(
            name: "Scout",
            max_health: 1.0,
            points: 10,
            size: (36.0, 30.0),
            color: (0.6, 0.7, 0.3),
            movement: Drifting(
                fall_speed: 90.0,
                min_speed: -40.0,
                max_speed: 40.0,
                change_interval: 5.0,
            ),
        )"#;

        let definition: EnemyDefinition = parse_ron(source, Path::new("scout.ron")).unwrap();
        assert_eq!(definition.group_size, 1);
        assert!(definition.shooter.is_none());
        assert!(!definition.is_boss);
        assert!(matches!(
            definition.movement,
            MovementDefinition::Drifting { change_interval, .. } if change_interval == 5.0
        ));
    }

    #[test]
    fn damage_stages_convert_in_order() {
        let source = r#"(
            name: "Bomber",
            max_health: 3.0,
            points: 30,
            size: (50.0, 40.0),
            color: (0.4, 0.4, 0.5),
            movement: Falling(speed: 60.0),
            damage_stages: [
                (activation_percent: 66.0, color: (0.6, 0.3, 0.3)),
                (activation_percent: 33.0, color: (0.8, 0.2, 0.2)),
            ],
        )"#;

        let definition: EnemyDefinition = parse_ron(source, Path::new("bomber.ron")).unwrap();
        let stages = definition.to_damage_stages();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[1].activation_percent, 33.0);
    }
}
