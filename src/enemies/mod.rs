//! Enemies module - enemy planes, movement, guns and defeat handling.

mod components;
pub mod data;
mod lifecycle;
mod movement;
mod plugin;
mod spawning;

pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry, MovementDefinition};
pub use movement::{check_bounds, BoundsCheck};
pub use plugin::EnemyPlugin;
pub use spawning::{formation_offsets, spawn_boss, spawn_enemy, spawn_enemy_group};
