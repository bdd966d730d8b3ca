//! Upgrade definitions and score tiers from `upgrades.ron`.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::loading::{load_ron_file, DATA_DIR};
use crate::core::DataLoadError;

/// What an upgrade does to the player's weapons.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub enum UpgradeEffect {
    /// Multiply the primary weapon's rounds per minute.
    FireRate { multiplier: f32 },
    /// Fire a different projectile from the primary weapon.
    ProjectileSwap { projectile: String },
    /// Replace the primary weapon.
    WeaponSwap { weapon: String },
    /// Refill (or drain) the first weapon with limited ammo.
    AddAmmo { amount: i32 },
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct UpgradeDefinition {
    pub name: String,
    pub effect: UpgradeEffect,
    /// Seconds the upgrade lasts; zero or less is permanent
    #[serde(default)]
    pub duration: f32,
}

impl UpgradeDefinition {
    pub fn is_timed(&self) -> bool {
        self.duration > 0.0
    }
}

/// One score threshold in `upgrades.ron`.
#[derive(Deserialize, Clone, Debug)]
pub struct UpgradeTierDefinition {
    pub score_threshold: u32,
    /// Key into `upgrades`
    pub upgrade: String,
}

/// Contents of `upgrades.ron`.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct UpgradeTable {
    pub upgrades: HashMap<String, UpgradeDefinition>,
    pub tiers: Vec<UpgradeTierDefinition>,
}

impl UpgradeTable {
    pub fn load() -> Result<Self, DataLoadError> {
        load_ron_file(&Path::new(DATA_DIR).join("upgrades.ron"))
    }
}

/// A score tier with its resolved upgrade.
#[derive(Debug, Clone)]
pub struct UpgradeTier {
    pub score_threshold: u32,
    pub upgrade: UpgradeDefinition,
    pub awarded: bool,
}

/// Score-threshold upgrades for the session.
#[derive(Resource, Debug, Default)]
pub struct ScoreUpgrades {
    tiers: Vec<UpgradeTier>,
}

impl ScoreUpgrades {
    /// Resolve tiers against the upgrade table, in threshold order.
    /// Tiers naming an unknown upgrade are skipped.
    pub fn from_table(table: &UpgradeTable) -> Self {
        let mut tiers: Vec<UpgradeTier> = table
            .tiers
            .iter()
            .filter_map(|tier| match table.upgrades.get(&tier.upgrade) {
                Some(upgrade) => Some(UpgradeTier {
                    score_threshold: tier.score_threshold,
                    upgrade: upgrade.clone(),
                    awarded: false,
                }),
                None => {
                    warn!("Upgrade tier at {} names unknown upgrade '{}'", tier.score_threshold, tier.upgrade);
                    None
                }
            })
            .collect();
        tiers.sort_by_key(|tier| tier.score_threshold);
        Self { tiers }
    }

    /// Award every tier reached by `score` that has not been awarded yet.
    pub fn check(&mut self, score: u32) -> Vec<UpgradeDefinition> {
        self.tiers
            .iter_mut()
            .filter(|tier| !tier.awarded && score >= tier.score_threshold)
            .map(|tier| {
                tier.awarded = true;
                tier.upgrade.clone()
            })
            .collect()
    }

    /// Threshold of the next tier still to be awarded.
    pub fn next_upgrade_score(&self) -> Option<u32> {
        self.tiers
            .iter()
            .find(|tier| !tier.awarded)
            .map(|tier| tier.score_threshold)
    }

    pub fn reset(&mut self) {
        for tier in self.tiers.iter_mut() {
            tier.awarded = false;
        }
    }
}

pub fn load_score_upgrades(mut commands: Commands) {
    let table = match UpgradeTable::load() {
        Ok(table) => {
            info!("Loaded {} upgrades in {} tiers", table.upgrades.len(), table.tiers.len());
            table
        }
        Err(e) => {
            warn!("{} - no score upgrades this session", e);
            UpgradeTable::default()
        }
    };
    commands.insert_resource(ScoreUpgrades::from_table(&table));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loading::parse_ron;

    const TABLE: &str = r#"(
        upgrades: {
            "rapid_fire": (name: "Rapid Fire", effect: FireRate(multiplier: 1.5), duration: 10.0),
            "bombs": (name: "Bomb Crate", effect: AddAmmo(amount: 2)),
        },
        tiers: [
            (score_threshold: 300, upgrade: "bombs"),
            (score_threshold: 100, upgrade: "rapid_fire"),
            (score_threshold: 500, upgrade: "missing"),
        ],
    )"#;

    fn upgrades() -> ScoreUpgrades {
        let table: UpgradeTable = parse_ron(TABLE, Path::new("upgrades.ron")).unwrap();
        ScoreUpgrades::from_table(&table)
    }

    #[test]
    fn tiers_are_sorted_and_unknown_skipped() {
        let upgrades = upgrades();
        assert_eq!(upgrades.tiers.len(), 2);
        assert_eq!(upgrades.next_upgrade_score(), Some(100));
    }

    #[test]
    fn each_tier_awards_once() {
        let mut upgrades = upgrades();

        let first = upgrades.check(150);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name, "Rapid Fire");
        assert!(upgrades.check(150).is_empty());
        assert_eq!(upgrades.next_upgrade_score(), Some(300));
    }

    #[test]
    fn score_jump_awards_several_tiers() {
        let mut upgrades = upgrades();
        assert_eq!(upgrades.check(1000).len(), 2);
        assert_eq!(upgrades.next_upgrade_score(), None);
    }

    #[test]
    fn reset_rearms_tiers() {
        let mut upgrades = upgrades();
        upgrades.check(1000);
        upgrades.reset();
        assert_eq!(upgrades.next_upgrade_score(), Some(100));
    }

    #[test]
    fn duration_defaults_to_permanent() {
        let table: UpgradeTable = parse_ron(TABLE, Path::new("upgrades.ron")).unwrap();
        assert!(!table.upgrades["bombs"].is_timed());
        assert!(table.upgrades["rapid_fire"].is_timed());
    }
}
