//! Spawning module - enemy waves and their scheduling.

mod data;
mod director;
mod plugin;

pub use data::{WaveDefinition, WaveRegistry};
pub use director::{DirectorCommand, WaveDirector, WavePhase};
pub use plugin::{select_cull, FinalWaveCleared, SpawningPlugin, WaveCleared, WavePlan};
