//! Upgrades module - score-threshold awards and timed weapon upgrades.

mod active;
mod data;
mod plugin;

pub use active::{ActiveUpgrade, ActiveUpgrades};
pub use data::{ScoreUpgrades, UpgradeDefinition, UpgradeEffect, UpgradeTable, UpgradeTier};
pub use plugin::UpgradePlugin;
