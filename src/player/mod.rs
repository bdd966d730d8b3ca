//! Player module - the player's plane, controls and pickups.

mod components;
mod controls;
mod pickups;
mod plugin;

pub use components::*;
pub use controls::{build_loadout, spawn_player};
pub use pickups::spawn_life_bonus;
pub use plugin::PlayerPlugin;
