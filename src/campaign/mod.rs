//! Campaign module - missions, story screens and mission completion.

mod data;
mod mission;
mod plugin;
mod screens;

pub use data::{MissionDefinition, MissionRegistry, StoryScreen};
pub use mission::{CurrentMission, Typewriter};
pub use plugin::{start_campaign, CampaignPlugin};
