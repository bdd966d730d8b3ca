//! Enemy-related components.

use bevy::prelude::*;
use rand::Rng;

use crate::world::PlayfieldBounds;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Marker for mission bosses.
#[derive(Component)]
pub struct Boss;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Score awarded when this enemy is shot down.
#[derive(Component, Clone, Copy, Debug)]
pub struct Points(pub u32);

/// Chance (0-100) to drop a life bonus.
#[derive(Component, Clone, Copy, Debug)]
pub struct DropChance(pub f32);

/// Which wave spawned this enemy, and in what order.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveMember {
    pub wave: u32,
    pub order: u32,
}

/// Straight-down movement.
#[derive(Component, Clone, Copy, Debug)]
pub struct Falling {
    pub speed: f32,
}

/// Falling with a randomly changing sideways speed.
#[derive(Component, Debug)]
pub struct Drifting {
    pub fall_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub current_speed: f32,
    /// `None` when the speed never changes
    pub change_timer: Option<Timer>,
}

impl Drifting {
    pub fn new(
        fall_speed: f32,
        min_speed: f32,
        max_speed: f32,
        change_interval: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut drifting = Self {
            fall_speed,
            min_speed: min_speed.min(max_speed),
            max_speed: max_speed.max(min_speed),
            current_speed: 0.0,
            change_timer: (change_interval > 0.0)
                .then(|| Timer::from_seconds(change_interval, TimerMode::Repeating)),
        };
        drifting.reroll(rng);
        drifting
    }

    /// Pick a new sideways speed.
    pub fn reroll(&mut self, rng: &mut impl Rng) {
        self.current_speed = if self.max_speed > self.min_speed {
            rng.gen_range(self.min_speed..self.max_speed)
        } else {
            self.min_speed
        };
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.current_speed, -self.fall_speed)
    }
}

/// Descend-then-patrol movement for bosses.
#[derive(Component, Debug)]
pub struct BossPatrol {
    pub hold_y: f32,
    pub vertical_speed: f32,
    pub horizontal_speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    /// +1 or -1
    pub direction: f32,
    pub swap_delay: (f32, f32),
    pub swap_timer: Timer,
}

impl BossPatrol {
    pub fn new(
        bounds: &PlayfieldBounds,
        vertical_position_percent: f32,
        vertical_speed: f32,
        horizontal_speed: f32,
        padding_percent: f32,
        swap_delay: (f32, f32),
        rng: &mut impl Rng,
    ) -> Self {
        let mut patrol = Self {
            hold_y: bounds.y_at_percent(vertical_position_percent),
            vertical_speed,
            horizontal_speed,
            min_x: bounds.x_at_percent(padding_percent),
            max_x: bounds.x_at_percent(100.0 - padding_percent),
            direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            swap_delay,
            swap_timer: Timer::from_seconds(1.0, TimerMode::Once),
        };
        patrol.restart_swap_timer(rng);
        patrol
    }

    fn restart_swap_timer(&mut self, rng: &mut impl Rng) {
        let (low, high) = self.swap_delay;
        let delay = if high > low { rng.gen_range(low..high) } else { low };
        self.swap_timer = Timer::from_seconds(delay.max(0.1), TimerMode::Once);
    }

    pub fn swap_direction(&mut self, rng: &mut impl Rng) {
        self.direction = -self.direction;
        self.restart_swap_timer(rng);
    }

    /// Advance by `dt` seconds from `position`, returning the new position.
    pub fn step(&mut self, position: Vec2, dt: f32, rng: &mut impl Rng) -> Vec2 {
        let mut next = position;

        if next.y > self.hold_y {
            next.y = (next.y - self.vertical_speed * dt).max(self.hold_y);
        } else {
            next.y = self.hold_y;
        }

        next.x += self.direction * self.horizontal_speed * dt;

        self.swap_timer.tick(std::time::Duration::from_secs_f32(dt));
        let past_right = next.x > self.max_x && self.direction > 0.0;
        let past_left = next.x < self.min_x && self.direction < 0.0;
        if past_right || past_left || self.swap_timer.finished() {
            self.swap_direction(rng);
        }

        next
    }
}

/// Enemy gun.
#[derive(Component, Debug)]
pub struct Shooter {
    pub projectile: String,
    pub fire_interval: f32,
    pub timer: Timer,
}

impl Shooter {
    /// The first shot comes after a random delay so planes spawned
    /// together do not fire in unison.
    pub fn new(projectile: &str, fire_interval: f32, rng: &mut impl Rng) -> Self {
        let fire_interval = fire_interval.max(0.05);
        let first_delay = rng.gen_range(0.0..fire_interval);
        Self {
            projectile: projectile.to_string(),
            fire_interval,
            timer: Timer::from_seconds(first_delay, TimerMode::Once),
        }
    }

    /// Tick the gun. Returns true when a shot is due.
    pub fn tick(&mut self, delta: std::time::Duration) -> bool {
        self.timer.tick(delta);
        if !self.timer.finished() {
            return false;
        }
        self.timer = Timer::from_seconds(self.fire_interval, TimerMode::Once);
        true
    }
}

/// Timer for the destruction effect before despawn.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl Default for DeathTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(0.5, TimerMode::Once))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn drifting_speed_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut drifting = Drifting::new(80.0, -40.0, 40.0, 2.0, &mut rng);
        for _ in 0..50 {
            drifting.reroll(&mut rng);
            assert!((-40.0..40.0).contains(&drifting.current_speed));
        }
        assert_eq!(drifting.velocity().y, -80.0);
    }

    #[test]
    fn zero_interval_never_changes() {
        let mut rng = StdRng::seed_from_u64(7);
        let drifting = Drifting::new(80.0, -40.0, 40.0, 0.0, &mut rng);
        assert!(drifting.change_timer.is_none());
    }

    #[test]
    fn boss_descends_then_holds_height() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = PlayfieldBounds::from_extent(600.0, 900.0, 24.0, 120.0);
        let mut patrol = BossPatrol::new(&bounds, 80.0, 100.0, 0.0, 25.0, (3.0, 6.0), &mut rng);
        assert_eq!(patrol.hold_y, 270.0);

        let mut position = Vec2::new(0.0, 570.0);
        for _ in 0..10 {
            position = patrol.step(position, 1.0, &mut rng);
        }
        assert_eq!(position.y, 270.0);
    }

    #[test]
    fn boss_turns_around_at_patrol_edge() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = PlayfieldBounds::from_extent(600.0, 900.0, 24.0, 120.0);
        let mut patrol = BossPatrol::new(&bounds, 80.0, 100.0, 50.0, 25.0, (30.0, 60.0), &mut rng);
        patrol.direction = 1.0;

        let position = Vec2::new(patrol.max_x - 1.0, patrol.hold_y);
        patrol.step(position, 0.1, &mut rng);
        assert_eq!(patrol.direction, -1.0);
    }

    #[test]
    fn shooter_fires_on_interval_after_first_shot() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut shooter = Shooter::new("enemy_bullet", 1.0, &mut rng);

        // The first shot lands within one interval
        assert!(shooter.tick(Duration::from_secs_f32(1.0)));
        assert!(!shooter.tick(Duration::from_secs_f32(0.5)));
        assert!(shooter.tick(Duration::from_secs_f32(0.5)));
    }
}
