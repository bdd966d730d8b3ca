//! The mission being played and the typewriter used by story screens.

use bevy::prelude::*;

use super::data::{MissionDefinition, MissionRegistry, StoryScreen};
use crate::core::DataLoadError;

/// The selected campaign mission and the story page being shown.
#[derive(Resource, Debug, Default)]
pub struct CurrentMission {
    id: Option<String>,
    definition: Option<MissionDefinition>,
    pub screen_index: usize,
}

impl CurrentMission {
    pub fn select(&mut self, id: &str, registry: &MissionRegistry) -> Result<(), DataLoadError> {
        let definition = registry.get(id).ok_or_else(|| DataLoadError::UnknownReference {
            kind: "mission",
            name: id.to_string(),
        })?;

        self.id = Some(id.to_string());
        self.definition = Some(definition.clone());
        self.screen_index = 0;
        Ok(())
    }

    /// Move on to the mission that follows this one. Returns false at the
    /// end of the chain.
    pub fn advance_to_next(&mut self, registry: &MissionRegistry) -> bool {
        let Some(next) = self.definition.as_ref().and_then(|d| d.next_mission.clone()) else {
            return false;
        };

        match self.select(&next, registry) {
            Ok(()) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn definition(&self) -> Option<&MissionDefinition> {
        self.definition.as_ref()
    }

    pub fn intro_screen(&self) -> Option<&StoryScreen> {
        self.definition.as_ref()?.intro_screens.get(self.screen_index)
    }

    pub fn victory_screen(&self) -> Option<&StoryScreen> {
        self.definition.as_ref()?.victory_screens.get(self.screen_index)
    }
}

/// Reveals text a few characters at a time.
#[derive(Component, Debug, Clone)]
pub struct Typewriter {
    text: String,
    chars_per_second: f32,
    elapsed: f32,
}

impl Typewriter {
    pub fn new(text: &str, chars_per_second: f32) -> Self {
        Self {
            text: text.to_string(),
            chars_per_second: chars_per_second.max(1.0),
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    fn visible_chars(&self) -> usize {
        ((self.chars_per_second * self.elapsed).round() as usize).min(self.text.chars().count())
    }

    pub fn visible_text(&self) -> String {
        self.text.chars().take(self.visible_chars()).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.visible_chars() >= self.text.chars().count()
    }

    /// Show everything at once.
    pub fn finish(&mut self) {
        self.elapsed = self.text.chars().count() as f32 / self.chars_per_second + 1.0;
    }
}
