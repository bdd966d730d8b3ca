//! Upgrades currently affecting the player's weapons.

use bevy::prelude::*;

use super::data::{UpgradeDefinition, UpgradeEffect};
use crate::combat::{Loadout, Weapon, WeaponRegistry};

#[derive(Debug, Clone)]
pub struct ActiveUpgrade {
    pub definition: UpgradeDefinition,
    /// `None` for permanent upgrades
    pub time_left: Option<f32>,
}

/// Upgrades applied to the player, in the order they were awarded.
///
/// Timed upgrades stack. When one expires the primary weapon is rebuilt
/// from its definition and every remaining upgrade is applied again, so
/// reverting one effect never disturbs the others.
#[derive(Component, Debug, Default)]
pub struct ActiveUpgrades {
    upgrades: Vec<ActiveUpgrade>,
}

impl ActiveUpgrades {
    /// Apply `definition` now and keep track of it.
    pub fn add(&mut self, definition: UpgradeDefinition, loadout: &mut Loadout, weapons: &WeaponRegistry) {
        if let UpgradeEffect::AddAmmo { amount } = definition.effect {
            // Instant, nothing to revert
            add_ammo(loadout, amount);
            return;
        }

        let is_swap = matches!(definition.effect, UpgradeEffect::WeaponSwap { .. });
        if !is_swap {
            apply_effect(&definition.effect, &mut loadout.primary);
        }

        self.upgrades.push(ActiveUpgrade {
            time_left: definition.is_timed().then_some(definition.duration),
            definition,
        });

        // A new weapon needs every other upgrade applied to it
        if is_swap {
            self.rebuild(loadout, weapons);
        }
    }

    /// Count down timed upgrades. Returns the names of those that expired.
    pub fn tick(&mut self, dt: f32, loadout: &mut Loadout, weapons: &WeaponRegistry) -> Vec<String> {
        let mut expired = Vec::new();

        self.upgrades.retain_mut(|upgrade| {
            let Some(time_left) = upgrade.time_left.as_mut() else {
                return true;
            };
            *time_left -= dt;
            if *time_left > 0.0 {
                return true;
            }
            expired.push(upgrade.definition.name.clone());
            false
        });

        if !expired.is_empty() {
            self.rebuild(loadout, weapons);
        }
        expired
    }

    /// Rebuild the primary weapon from scratch and re-apply every upgrade.
    pub fn rebuild(&self, loadout: &mut Loadout, weapons: &WeaponRegistry) {
        let weapon_id = self
            .upgrades
            .iter()
            .rev()
            .find_map(|upgrade| match &upgrade.definition.effect {
                UpgradeEffect::WeaponSwap { weapon } if weapons.get(weapon).is_some() => {
                    Some(weapon.as_str())
                }
                _ => None,
            })
            .unwrap_or(loadout.default_primary.as_str());

        let Some(definition) = weapons.get(weapon_id) else {
            warn!("Cannot rebuild unknown weapon '{}'", weapon_id);
            return;
        };

        let mut weapon = Weapon::from_definition(weapon_id, definition);
        if weapon.id == loadout.primary.id {
            if let Some(ammo) = loadout.primary.current_ammo() {
                weapon.set_ammo(ammo);
            }
        }

        for upgrade in &self.upgrades {
            apply_effect(&upgrade.definition.effect, &mut weapon);
        }

        loadout.primary = weapon;
    }

    /// Longest remaining timer, zero when nothing timed is active.
    pub fn max_time_left(&self) -> f32 {
        self.upgrades
            .iter()
            .filter_map(|upgrade| upgrade.time_left)
            .fold(0.0, f32::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveUpgrade> {
        self.upgrades.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }
}

/// Apply an effect that modifies a single weapon in place. Weapon swaps
/// and ammo are handled by the caller.
fn apply_effect(effect: &UpgradeEffect, weapon: &mut Weapon) {
    match effect {
        UpgradeEffect::FireRate { multiplier } => weapon.multiply_fire_rate(*multiplier),
        UpgradeEffect::ProjectileSwap { projectile } => weapon.change_projectile(projectile),
        UpgradeEffect::WeaponSwap { .. } | UpgradeEffect::AddAmmo { .. } => {}
    }
}

fn add_ammo(loadout: &mut Loadout, amount: i32) {
    let target = std::iter::once(&mut loadout.primary)
        .chain(loadout.secondary.as_mut())
        .find(|weapon| weapon.max_ammo().is_some());

    match target {
        Some(weapon) => weapon.add_ammo(amount),
        None => debug!("Ammo upgrade ignored - no weapon uses ammo"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::WeaponDefinition;

    fn registry() -> WeaponRegistry {
        let mut weapons = WeaponRegistry::default();
        weapons.definitions.insert(
            "spread".to_string(),
            WeaponDefinition {
                projectile: "bullet".to_string(),
                rounds_per_minute: 200.0,
                max_ammo: None,
                fire_points: vec![(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)],
                sequential: false,
                firing_arc: 30.0,
            },
        );
        weapons
    }

    fn loadout(weapons: &WeaponRegistry) -> Loadout {
        let twin = weapons.get("twin_guns").unwrap();
        let bombs = weapons.get("bomb_bay").unwrap();
        Loadout {
            primary: Weapon::from_definition("twin_guns", twin),
            secondary: Some(Weapon::from_definition("bomb_bay", bombs)),
            default_primary: "twin_guns".to_string(),
        }
    }

    fn upgrade(name: &str, effect: UpgradeEffect, duration: f32) -> UpgradeDefinition {
        UpgradeDefinition {
            name: name.to_string(),
            effect,
            duration,
        }
    }

    #[test]
    fn fire_rate_upgrades_compound_and_revert_independently() {
        let weapons = registry();
        let mut loadout = loadout(&weapons);
        let mut active = ActiveUpgrades::default();

        active.add(upgrade("a", UpgradeEffect::FireRate { multiplier: 2.0 }, 5.0), &mut loadout, &weapons);
        active.add(upgrade("b", UpgradeEffect::FireRate { multiplier: 1.5 }, 10.0), &mut loadout, &weapons);
        assert_eq!(loadout.primary.rounds_per_minute, 480.0 * 3.0);

        let expired = active.tick(6.0, &mut loadout, &weapons);
        assert_eq!(expired, vec!["a".to_string()]);
        assert_eq!(loadout.primary.rounds_per_minute, 720.0);

        active.tick(5.0, &mut loadout, &weapons);
        assert_eq!(loadout.primary.rounds_per_minute, 480.0);
        assert!(active.is_empty());
    }

    #[test]
    fn weapon_swap_keeps_other_upgrades_and_reverts_to_default() {
        let weapons = registry();
        let mut loadout = loadout(&weapons);
        let mut active = ActiveUpgrades::default();

        active.add(upgrade("rapid", UpgradeEffect::FireRate { multiplier: 2.0 }, 20.0), &mut loadout, &weapons);
        active.add(
            upgrade("spread", UpgradeEffect::WeaponSwap { weapon: "spread".to_string() }, 5.0),
            &mut loadout,
            &weapons,
        );
        assert_eq!(loadout.primary.id, "spread");
        assert_eq!(loadout.primary.rounds_per_minute, 400.0);

        active.tick(5.0, &mut loadout, &weapons);
        assert_eq!(loadout.primary.id, "twin_guns");
        assert_eq!(loadout.primary.rounds_per_minute, 960.0);
    }

    #[test]
    fn projectile_swap_reverts_on_expiry() {
        let weapons = registry();
        let mut loadout = loadout(&weapons);
        let mut active = ActiveUpgrades::default();

        active.add(
            upgrade("laser", UpgradeEffect::ProjectileSwap { projectile: "laser".to_string() }, 3.0),
            &mut loadout,
            &weapons,
        );
        assert_eq!(loadout.primary.projectile, "laser");

        active.tick(3.0, &mut loadout, &weapons);
        assert_eq!(loadout.primary.projectile, "bullet");
    }

    #[test]
    fn permanent_upgrades_survive_rebuilds() {
        let weapons = registry();
        let mut loadout = loadout(&weapons);
        let mut active = ActiveUpgrades::default();

        active.add(upgrade("forever", UpgradeEffect::FireRate { multiplier: 2.0 }, 0.0), &mut loadout, &weapons);
        active.add(upgrade("brief", UpgradeEffect::FireRate { multiplier: 2.0 }, 1.0), &mut loadout, &weapons);
        active.tick(2.0, &mut loadout, &weapons);

        assert_eq!(loadout.primary.rounds_per_minute, 960.0);
        assert_eq!(active.max_time_left(), 0.0);
    }

    #[test]
    fn ammo_goes_to_limited_weapon() {
        let weapons = registry();
        let mut loadout = loadout(&weapons);
        let mut active = ActiveUpgrades::default();
        loadout.secondary.as_mut().unwrap().set_ammo(0);

        active.add(upgrade("crate", UpgradeEffect::AddAmmo { amount: 2 }, 0.0), &mut loadout, &weapons);

        assert_eq!(loadout.secondary.as_ref().unwrap().current_ammo(), Some(2));
        assert!(active.is_empty());
    }

    #[test]
    fn max_time_left_reports_longest_timer() {
        let weapons = registry();
        let mut loadout = loadout(&weapons);
        let mut active = ActiveUpgrades::default();

        active.add(upgrade("a", UpgradeEffect::FireRate { multiplier: 1.1 }, 4.0), &mut loadout, &weapons);
        active.add(upgrade("b", UpgradeEffect::FireRate { multiplier: 1.1 }, 9.0), &mut loadout, &weapons);
        active.tick(1.0, &mut loadout, &weapons);

        assert_eq!(active.max_time_left(), 8.0);
    }
}
