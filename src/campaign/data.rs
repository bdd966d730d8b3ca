//! Mission definitions loaded from `assets/data/missions/`.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::loading::{load_ron_dir, DATA_DIR};
use crate::spawning::WavePlan;

/// One page of briefing or debriefing text.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct StoryScreen {
    pub title: String,
    pub text: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct MissionDefinition {
    pub name: String,
    #[serde(default)]
    pub intro_screens: Vec<StoryScreen>,
    #[serde(default)]
    pub victory_screens: Vec<StoryScreen>,
    /// Wave definition id
    pub wave: String,
    /// Waves to clear before the boss appears (or the mission is won)
    pub waves_before_boss: u32,
    /// Enemy id of the boss
    #[serde(default)]
    pub boss: Option<String>,
    /// Music file under `assets/audio/`, replacing the in-game track
    #[serde(default)]
    pub music: Option<String>,
    /// RGBA overlay tint for the whole playfield
    #[serde(default)]
    pub ambient_tint: Option<(f32, f32, f32, f32)>,
    /// Mission id that follows this one
    #[serde(default)]
    pub next_mission: Option<String>,
}

impl From<&MissionDefinition> for WavePlan {
    fn from(mission: &MissionDefinition) -> Self {
        Self {
            wave: mission.wave.clone(),
            boss: mission.boss.clone(),
            boss_after: Some(mission.waves_before_boss),
        }
    }
}

#[derive(Resource, Default, Debug)]
pub struct MissionRegistry {
    pub definitions: HashMap<String, MissionDefinition>,
}

impl MissionRegistry {
    pub fn get(&self, id: &str) -> Option<&MissionDefinition> {
        self.definitions.get(id)
    }
}

pub fn load_mission_definitions(mut registry: ResMut<MissionRegistry>) {
    let missions_dir = Path::new(DATA_DIR).join("missions");

    match load_ron_dir::<MissionDefinition>(&missions_dir) {
        Ok(definitions) => {
            for (id, definition) in definitions {
                info!("Loaded mission: {} ({})", definition.name, id);
                registry.definitions.insert(id, definition);
            }
        }
        Err(e) => warn!("{} - campaign unavailable", e),
    }

    for (id, mission) in registry.definitions.iter() {
        if let Some(next) = &mission.next_mission {
            if !registry.definitions.contains_key(next) {
                warn!("Mission '{}' continues to unknown mission '{}'", id, next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loading::parse_ron;

    #[test]
    fn mission_maps_to_wave_plan() {
        let mission: MissionDefinition = parse_ron(
            r#"(
                name: "Dawn Patrol",
                intro_screens: [(title: "Briefing", text: "Hold the coast.")],
                wave: "coastal",
                waves_before_boss: 3,
                boss: Some("zeppelin"),
            )"#,
            Path::new("mission_01.ron"),
        )
        .unwrap();

        let plan = WavePlan::from(&mission);
        assert_eq!(plan.wave, "coastal");
        assert_eq!(plan.boss.as_deref(), Some("zeppelin"));
        assert_eq!(plan.boss_after, Some(3));
        assert!(mission.victory_screens.is_empty());
        assert!(mission.next_mission.is_none());
    }
}
