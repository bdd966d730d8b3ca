//! Weapons: burst fire timing, ammo and muzzle selection.

use bevy::prelude::*;

use super::data::WeaponDefinition;

/// One projectile launch point for a single trigger pull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Muzzle {
    /// Offset from the firing plane's centre
    pub offset: Vec2,
    /// Rotation away from straight ahead, in radians
    pub angle: f32,
}

/// A mounted weapon.
///
/// Fire rate is enforced per burst: while the trigger stays held the
/// weapon may fire as many shots as `rounds_per_minute` allows since the
/// burst began, so frame hitches do not lower the sustained rate.
#[derive(Debug, Clone)]
pub struct Weapon {
    /// Weapon id in the weapon registry
    pub id: String,
    pub projectile: String,
    original_projectile: String,
    pub rounds_per_minute: f32,
    ammo: Option<(u32, u32)>,
    fire_points: Vec<Vec2>,
    sequential: bool,
    firing_arc: f32,
    firing: bool,
    burst_start: f32,
    shots_this_burst: u32,
    last_shot: Option<f32>,
    next_fire_point: usize,
}

impl Weapon {
    pub fn from_definition(id: &str, definition: &WeaponDefinition) -> Self {
        Self {
            id: id.to_string(),
            projectile: definition.projectile.clone(),
            original_projectile: definition.projectile.clone(),
            rounds_per_minute: definition.rounds_per_minute.max(1.0),
            ammo: definition.max_ammo.map(|max| (max, max)),
            fire_points: definition
                .fire_points
                .iter()
                .map(|&(x, y)| Vec2::new(x, y))
                .collect(),
            sequential: definition.sequential,
            firing_arc: definition.firing_arc,
            firing: false,
            burst_start: 0.0,
            shots_this_burst: 0,
            last_shot: None,
            next_fire_point: 0,
        }
    }

    /// Try to fire at time `now` (seconds). Returns true if a shot fired.
    pub fn pull_trigger(&mut self, now: f32) -> bool {
        if matches!(self.ammo, Some((0, _))) {
            return false;
        }

        let period = 60.0 / self.rounds_per_minute;
        let ready = if self.firing {
            (self.shots_this_burst as f32) < (now - self.burst_start) / period
        } else {
            self.last_shot.map_or(true, |last| now - last > period)
        };

        if !ready {
            return false;
        }

        self.last_shot = Some(now);
        if let Some((current, _)) = self.ammo.as_mut() {
            *current -= 1;
        }

        if self.firing {
            self.shots_this_burst += 1;
        } else {
            self.firing = true;
            self.burst_start = now;
            self.shots_this_burst = 1;
        }

        true
    }

    /// End the current burst; the next trigger pull starts a new one.
    pub fn cease_fire(&mut self) {
        self.firing = false;
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    /// Scale the fire rate. The burst is reset so the weapon does not try
    /// to catch up on shots "owed" at the new rate.
    pub fn multiply_fire_rate(&mut self, multiplier: f32) {
        self.rounds_per_minute = (self.rounds_per_minute * multiplier).max(1.0);
        self.cease_fire();
    }

    pub fn change_projectile(&mut self, projectile: &str) {
        self.projectile = projectile.to_string();
    }

    pub fn revert_projectile(&mut self) {
        self.projectile = self.original_projectile.clone();
    }

    /// Remaining ammo, `None` when unlimited.
    pub fn current_ammo(&self) -> Option<u32> {
        self.ammo.map(|(current, _)| current)
    }

    /// Magazine size, `None` when unlimited.
    pub fn max_ammo(&self) -> Option<u32> {
        self.ammo.map(|(_, max)| max)
    }

    pub fn add_ammo(&mut self, amount: i32) {
        if let Some((current, max)) = self.ammo.as_mut() {
            *current = (*current as i64 + amount as i64).clamp(0, *max as i64) as u32;
        }
    }

    /// Carry ammo over from a previous instance of the same weapon.
    pub fn set_ammo(&mut self, amount: u32) {
        if let Some((current, max)) = self.ammo.as_mut() {
            *current = amount.min(*max);
        }
    }

    /// Muzzles for the shot that just fired. Advances the sequential cursor.
    pub fn muzzles(&mut self) -> Vec<Muzzle> {
        if self.fire_points.is_empty() {
            return vec![Muzzle {
                offset: Vec2::ZERO,
                angle: 0.0,
            }];
        }

        if self.sequential {
            if self.next_fire_point >= self.fire_points.len() {
                self.next_fire_point = 0;
            }
            let index = self.next_fire_point;
            self.next_fire_point += 1;
            vec![self.muzzle_at(index)]
        } else {
            (0..self.fire_points.len())
                .map(|index| self.muzzle_at(index))
                .collect()
        }
    }

    fn muzzle_at(&self, index: usize) -> Muzzle {
        let count = self.fire_points.len();
        let angle = if count > 1 && self.firing_arc != 0.0 {
            let step = self.firing_arc / (count - 1) as f32;
            (-self.firing_arc / 2.0 + step * index as f32).to_radians()
        } else {
            0.0
        };

        Muzzle {
            offset: self.fire_points[index],
            angle,
        }
    }
}

/// Which of the player's weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponSlot {
    Primary,
    Secondary,
}

/// The player's mounted weapons.
#[derive(Component, Debug, Clone)]
pub struct Loadout {
    pub primary: Weapon,
    pub secondary: Option<Weapon>,
    /// Weapon id the primary slot returns to when swaps expire
    pub default_primary: String,
}

impl Loadout {
    pub fn weapon_mut(&mut self, slot: WeaponSlot) -> Option<&mut Weapon> {
        match slot {
            WeaponSlot::Primary => Some(&mut self.primary),
            WeaponSlot::Secondary => self.secondary.as_mut(),
        }
    }

    /// Release both triggers.
    pub fn cease_fire(&mut self) {
        self.primary.cease_fire();
        if let Some(secondary) = self.secondary.as_mut() {
            secondary.cease_fire();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(rpm: f32, max_ammo: Option<u32>, points: Vec<(f32, f32)>) -> WeaponDefinition {
        WeaponDefinition {
            projectile: "bullet".to_string(),
            rounds_per_minute: rpm,
            max_ammo,
            fire_points: points,
            sequential: false,
            firing_arc: 0.0,
        }
    }

    #[test]
    fn first_pull_fires_then_waits_for_period() {
        // 600 rpm = one shot every 0.1s
        let mut weapon = Weapon::from_definition("gun", &definition(600.0, None, vec![(0.0, 0.0)]));

        assert!(weapon.pull_trigger(0.0));
        assert!(!weapon.pull_trigger(0.05));
        assert!(weapon.pull_trigger(0.11));
    }

    #[test]
    fn held_trigger_sustains_rate_across_uneven_frames() {
        let mut weapon = Weapon::from_definition("gun", &definition(600.0, None, vec![(0.0, 0.0)]));

        let mut shots = 0;
        // Frames of uneven length over exactly one second
        let mut t = 0.0;
        for dt in [0.016, 0.25, 0.016, 0.3, 0.05, 0.368].iter().cycle().take(60) {
            if t > 1.0 {
                break;
            }
            if weapon.pull_trigger(t) {
                shots += 1;
            }
            t += dt;
        }
        assert!(shots <= 11, "fired {shots} shots in one second at 600rpm");
    }

    #[test]
    fn released_burst_owes_no_shots_after_a_gap() {
        // 480 rpm = one shot every 0.125s
        let mut weapon = Weapon::from_definition("gun", &definition(480.0, None, vec![(0.0, 0.0)]));
        let mut t = 0.0;
        while t <= 1.0 {
            weapon.pull_trigger(t);
            t += 0.016;
        }
        weapon.cease_fire();

        let fired = (0..6)
            .filter(|frame| weapon.pull_trigger(11.0 + *frame as f32 * 0.016))
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn cease_fire_starts_a_new_burst() {
        let mut weapon = Weapon::from_definition("gun", &definition(600.0, None, vec![(0.0, 0.0)]));
        assert!(weapon.pull_trigger(0.0));
        weapon.cease_fire();
        assert!(!weapon.is_firing());
        assert!(!weapon.pull_trigger(0.05));
        assert!(weapon.pull_trigger(0.2));
        assert!(weapon.is_firing());
    }

    #[test]
    fn limited_ammo_runs_dry_and_clamps_refills() {
        let mut weapon = Weapon::from_definition("bombs", &definition(6000.0, Some(2), vec![(0.0, 0.0)]));

        assert!(weapon.pull_trigger(0.0));
        assert!(weapon.pull_trigger(1.0));
        assert!(!weapon.pull_trigger(2.0));
        assert_eq!(weapon.current_ammo(), Some(0));

        weapon.add_ammo(5);
        assert_eq!(weapon.current_ammo(), Some(2));
        weapon.add_ammo(-9);
        assert_eq!(weapon.current_ammo(), Some(0));
    }

    #[test]
    fn unlimited_weapon_reports_no_ammo() {
        let weapon = Weapon::from_definition("gun", &definition(600.0, None, vec![]));
        assert_eq!(weapon.current_ammo(), None);
        assert_eq!(weapon.max_ammo(), None);
    }

    #[test]
    fn sequential_weapon_cycles_fire_points() {
        let mut def = definition(600.0, None, vec![(-1.0, 0.0), (1.0, 0.0)]);
        def.sequential = true;
        let mut weapon = Weapon::from_definition("gun", &def);

        let offsets: Vec<f32> = (0..3).map(|_| weapon.muzzles()[0].offset.x).collect();
        assert_eq!(offsets, vec![-1.0, 1.0, -1.0]);
    }

    #[test]
    fn firing_arc_fans_shots_symmetrically() {
        let mut def = definition(600.0, None, vec![(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);
        def.firing_arc = 30.0;
        let mut weapon = Weapon::from_definition("spread", &def);

        let angles: Vec<f32> = weapon.muzzles().iter().map(|m| m.angle.to_degrees()).collect();
        assert!((angles[0] + 15.0).abs() < 1e-4);
        assert!(angles[1].abs() < 1e-4);
        assert!((angles[2] - 15.0).abs() < 1e-4);
    }

    #[test]
    fn projectile_swap_reverts_to_original() {
        let mut weapon = Weapon::from_definition("gun", &definition(600.0, None, vec![]));
        weapon.change_projectile("laser");
        assert_eq!(weapon.projectile, "laser");
        weapon.revert_projectile();
        assert_eq!(weapon.projectile, "bullet");
    }

    #[test]
    fn multiplying_fire_rate_resets_burst() {
        let mut weapon = Weapon::from_definition("gun", &definition(600.0, None, vec![]));
        weapon.pull_trigger(0.0);
        weapon.multiply_fire_rate(1.5);
        assert_eq!(weapon.rounds_per_minute, 900.0);
        assert!(!weapon.is_firing());
    }
}
