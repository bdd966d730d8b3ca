//! Audio module - looping music per game state and one-shot sound effects.

mod plugin;

pub use plugin::{music_for, GameAudioPlugin, MusicChannel, SoundLibrary};
