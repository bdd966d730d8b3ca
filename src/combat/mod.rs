//! Combat module - projectiles, weapons, hit detection and damage.

mod components;
mod data;
mod feedback;
mod plugin;
mod systems;
mod weapon;

pub use components::*;
pub use data::{ProjectileDefinition, ProjectileRegistry, WeaponDefinition, WeaponRegistry};
pub use feedback::{DamageStage, PlaneVisuals};
pub use plugin::CombatPlugin;
pub use systems::{spawn_projectile, CombatSet, PLAYER_HIT_DAMAGE};
pub use weapon::{Loadout, Muzzle, Weapon, WeaponSlot};
