//! Wave definitions loaded from `assets/data/waves/`.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::loading::{load_ron_dir, DATA_DIR};

/// Rules for one stream of enemy waves.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WaveDefinition {
    /// Enemy ids picked at random for each spawned group
    pub enemy_pool: Vec<String>,
    pub initial_wave_size: u32,
    pub max_wave_size: u32,
    /// Points per extra enemy in a wave
    pub score_step_for_wave_increase: u32,
    /// Seconds between waves at difficulty 1 and score 0
    pub initial_wave_interval: f32,
    pub minimum_wave_interval: f32,
    pub interval_reduction_per_step: f32,
    /// Points per wave interval reduction
    pub score_step_for_speed_up: u32,
    /// Seconds between group spawns inside a wave
    pub spawn_interval: f32,
    /// Random +/- variation applied to `spawn_interval`
    pub spawn_jitter: f32,
    pub first_wave_delay: f32,
}

impl Default for WaveDefinition {
    fn default() -> Self {
        Self {
            enemy_pool: Vec::new(),
            initial_wave_size: 2,
            max_wave_size: 15,
            score_step_for_wave_increase: 100,
            initial_wave_interval: 3.0,
            minimum_wave_interval: 1.0,
            interval_reduction_per_step: 0.1,
            score_step_for_speed_up: 100,
            spawn_interval: 0.5,
            spawn_jitter: 0.25,
            first_wave_delay: 2.0,
        }
    }
}

impl WaveDefinition {
    /// Number of planes the next wave should contain at `score`.
    pub fn target_wave_size(&self, score: u32) -> u32 {
        let growth = score
            .checked_div(self.score_step_for_wave_increase)
            .unwrap_or(0);
        let max = self.max_wave_size.max(self.initial_wave_size);
        self.initial_wave_size.saturating_add(growth).min(max)
    }

    /// Seconds to wait between waves at `score` and `difficulty`.
    pub fn wave_interval(&self, score: u32, difficulty: u32) -> f32 {
        let steps = score.checked_div(self.score_step_for_speed_up).unwrap_or(0);
        let base = self.initial_wave_interval / difficulty.max(1) as f32;
        (base - steps as f32 * self.interval_reduction_per_step).max(self.minimum_wave_interval)
    }
}

/// Resource holding all loaded wave definitions.
#[derive(Resource, Debug)]
pub struct WaveRegistry {
    pub definitions: HashMap<String, WaveDefinition>,
}

impl Default for WaveRegistry {
    fn default() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(
            "arcade".to_string(),
            WaveDefinition {
                enemy_pool: vec!["scout".to_string()],
                ..WaveDefinition::default()
            },
        );
        Self { definitions }
    }
}

impl WaveRegistry {
    pub fn get(&self, id: &str) -> Option<&WaveDefinition> {
        self.definitions.get(id)
    }
}

pub fn load_wave_definitions(mut registry: ResMut<WaveRegistry>) {
    let waves_dir = Path::new(DATA_DIR).join("waves");

    match load_ron_dir::<WaveDefinition>(&waves_dir) {
        Ok(definitions) => {
            for (id, definition) in definitions {
                info!("Loaded wave definition '{}' ({} enemy types)", id, definition.enemy_pool.len());
                registry.definitions.insert(id, definition);
            }
        }
        Err(e) => warn!("{}", e),
    }
}
