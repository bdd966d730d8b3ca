//! World module - camera, playfield bounds and session cleanup.

mod bounds;
mod plugin;

pub use bounds::PlayfieldBounds;
pub use plugin::{GameplayEntity, MainCamera, WorldPlugin, DEFAULT_SKY};
