//! Projectile and weapon definitions loaded from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::loading::{load_ron_file, DATA_DIR};

/// Projectile definition from `projectiles.ron`.
#[derive(Deserialize, Clone, Debug)]
pub struct ProjectileDefinition {
    /// Pixels per second
    pub speed: f32,
    /// Seconds before despawning
    pub lifetime: f32,
    pub damage: f32,
    pub size: (f32, f32),
    pub color: (f32, f32, f32),
    #[serde(default)]
    pub blast_radius: Option<f32>,
}

/// Weapon definition from `weapons.ron`.
#[derive(Deserialize, Clone, Debug)]
pub struct WeaponDefinition {
    pub projectile: String,
    pub rounds_per_minute: f32,
    /// `None` means unlimited ammo
    #[serde(default)]
    pub max_ammo: Option<u32>,
    /// Muzzle offsets relative to the plane centre
    pub fire_points: Vec<(f32, f32)>,
    /// Fire one point at a time, cycling, instead of all at once
    #[serde(default)]
    pub sequential: bool,
    /// Total fan angle in degrees spread across the fire points
    #[serde(default)]
    pub firing_arc: f32,
}

/// Resource holding all loaded projectile definitions.
#[derive(Resource, Debug)]
pub struct ProjectileRegistry {
    pub definitions: HashMap<String, ProjectileDefinition>,
}

impl ProjectileRegistry {
    pub fn get(&self, id: &str) -> Option<&ProjectileDefinition> {
        self.definitions.get(id)
    }
}

impl Default for ProjectileRegistry {
    fn default() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(
            "bullet".to_string(),
            ProjectileDefinition {
                speed: 650.0,
                lifetime: 2.0,
                damage: 1.0,
                size: (4.0, 12.0),
                color: (1.0, 0.9, 0.3),
                blast_radius: None,
            },
        );
        definitions.insert(
            "enemy_bullet".to_string(),
            ProjectileDefinition {
                speed: 260.0,
                lifetime: 5.0,
                damage: 1.0,
                size: (6.0, 6.0),
                color: (1.0, 0.35, 0.2),
                blast_radius: None,
            },
        );
        definitions.insert(
            "bomb".to_string(),
            ProjectileDefinition {
                speed: 300.0,
                lifetime: 3.0,
                damage: 3.0,
                size: (10.0, 14.0),
                color: (0.2, 0.2, 0.2),
                blast_radius: Some(110.0),
            },
        );
        Self { definitions }
    }
}

/// Resource holding all loaded weapon definitions.
#[derive(Resource, Debug)]
pub struct WeaponRegistry {
    pub definitions: HashMap<String, WeaponDefinition>,
}

impl WeaponRegistry {
    pub fn get(&self, id: &str) -> Option<&WeaponDefinition> {
        self.definitions.get(id)
    }
}

impl Default for WeaponRegistry {
    fn default() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(
            "twin_guns".to_string(),
            WeaponDefinition {
                projectile: "bullet".to_string(),
                rounds_per_minute: 480.0,
                max_ammo: None,
                fire_points: vec![(-12.0, 18.0), (12.0, 18.0)],
                sequential: true,
                firing_arc: 0.0,
            },
        );
        definitions.insert(
            "bomb_bay".to_string(),
            WeaponDefinition {
                projectile: "bomb".to_string(),
                rounds_per_minute: 60.0,
                max_ammo: Some(3),
                fire_points: vec![(0.0, 10.0)],
                sequential: false,
                firing_arc: 0.0,
            },
        );
        Self { definitions }
    }
}

/// Load `projectiles.ron` and `weapons.ron`, keeping built-ins on failure.
pub fn load_combat_definitions(
    mut projectiles: ResMut<ProjectileRegistry>,
    mut weapons: ResMut<WeaponRegistry>,
) {
    let data_dir = Path::new(DATA_DIR);

    match load_ron_file::<HashMap<String, ProjectileDefinition>>(&data_dir.join("projectiles.ron")) {
        Ok(definitions) => {
            info!("Loaded {} projectile definitions", definitions.len());
            projectiles.definitions.extend(definitions);
        }
        Err(e) => warn!("{} - using built-in projectiles", e),
    }

    match load_ron_file::<HashMap<String, WeaponDefinition>>(&data_dir.join("weapons.ron")) {
        Ok(definitions) => {
            info!("Loaded {} weapon definitions", definitions.len());
            weapons.definitions.extend(definitions);
        }
        Err(e) => warn!("{} - using built-in weapons", e),
    }

    for (id, weapon) in weapons.definitions.iter() {
        if projectiles.get(&weapon.projectile).is_none() {
            warn!("Weapon '{}' fires unknown projectile '{}'", id, weapon.projectile);
        }
    }
}
