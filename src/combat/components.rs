//! Combat-related components.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::DamageEvent;

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.maximum - self.current).max(0.0);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        self.current / self.maximum
    }
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Direction projectiles of this side travel before any arc rotation.
    pub fn forward(&self) -> Vec2 {
        match self {
            Side::Player => Vec2::Y,
            Side::Enemy => Vec2::NEG_Y,
        }
    }
}

/// A live projectile.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub side: Side,
    pub damage: f32,
    /// Bombs damage every enemy within this radius on impact
    pub blast_radius: Option<f32>,
}

/// Linear motion in pixels per second.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vec2);

/// Despawn after the timer finishes.
#[derive(Component)]
pub struct Lifetime(pub Timer);

impl Lifetime {
    pub fn from_seconds(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

/// Marker component for planes that have been destroyed (prevents
/// double scoring and double bookkeeping).
#[derive(Component)]
pub struct Defeated;

/// Collision role of an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hitbox {
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
    Pickup,
}

impl Hitbox {
    /// Player shots and pickups are sensors; everything else is a solid
    /// kinematic body so that sensor-vs-solid pairs always report.
    pub fn is_sensor(&self) -> bool {
        matches!(self, Hitbox::PlayerProjectile | Hitbox::Pickup)
    }
}

/// Attach a collider for `hitbox` to an entity being spawned.
pub fn insert_hitbox(entity: &mut EntityCommands, hitbox: Hitbox, size: Vec2) {
    entity.insert((
        hitbox,
        RigidBody::KinematicPositionBased,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
    ));
    if hitbox.is_sensor() {
        entity.insert(Sensor);
    }
}

/// What a collision between two hitboxes means for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    ProjectileHitEnemy { projectile: Entity, enemy: Entity },
    ProjectileHitPlayer { projectile: Entity, player: Entity },
    EnemyRammedPlayer { enemy: Entity, player: Entity },
    ProjectilesClashed { player_shot: Entity, enemy_shot: Entity },
    PickupCollected { pickup: Entity, player: Entity },
}

/// Classify a collision pair. Pairs with no gameplay meaning (enemy vs
/// enemy, shot vs its own side) return `None`.
pub fn classify_contact(a: (Entity, Hitbox), b: (Entity, Hitbox)) -> Option<Contact> {
    use Hitbox::*;

    let contact = |first: (Entity, Hitbox), second: (Entity, Hitbox)| match (first.1, second.1) {
        (PlayerProjectile, Enemy) => Some(Contact::ProjectileHitEnemy {
            projectile: first.0,
            enemy: second.0,
        }),
        (EnemyProjectile, Player) => Some(Contact::ProjectileHitPlayer {
            projectile: first.0,
            player: second.0,
        }),
        (Enemy, Player) => Some(Contact::EnemyRammedPlayer {
            enemy: first.0,
            player: second.0,
        }),
        (PlayerProjectile, EnemyProjectile) => Some(Contact::ProjectilesClashed {
            player_shot: first.0,
            enemy_shot: second.0,
        }),
        (Pickup, Player) => Some(Contact::PickupCollected {
            pickup: first.0,
            player: second.0,
        }),
        _ => None,
    };

    contact(a, b).or_else(|| contact(b, a))
}

/// Sent when the player touches a pickup.
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupContact {
    pub pickup: Entity,
    pub player: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities() -> (Entity, Entity) {
        (Entity::from_raw(1), Entity::from_raw(2))
    }

    #[test]
    fn health_clamps_damage_and_healing() {
        let mut health = Health::new(3.0);
        assert_eq!(health.take_damage(5.0), 3.0);
        assert!(health.is_dead());
        assert_eq!(health.heal(10.0), 3.0);
        assert_eq!(health.current, 3.0);
        assert_eq!(health.heal(1.0), 0.0);
    }

    #[test]
    fn classification_is_order_independent() {
        let (a, b) = entities();
        let forward = classify_contact((a, Hitbox::PlayerProjectile), (b, Hitbox::Enemy));
        let reverse = classify_contact((b, Hitbox::Enemy), (a, Hitbox::PlayerProjectile));

        assert_eq!(forward, reverse);
        assert_eq!(
            forward,
            Some(Contact::ProjectileHitEnemy {
                projectile: a,
                enemy: b
            })
        );
    }

    #[test]
    fn friendly_pairs_are_ignored() {
        let (a, b) = entities();
        assert_eq!(classify_contact((a, Hitbox::Enemy), (b, Hitbox::Enemy)), None);
        assert_eq!(
            classify_contact((a, Hitbox::EnemyProjectile), (b, Hitbox::Enemy)),
            None
        );
        assert_eq!(
            classify_contact((a, Hitbox::PlayerProjectile), (b, Hitbox::Player)),
            None
        );
    }

    #[test]
    fn opposing_projectiles_clash() {
        let (a, b) = entities();
        assert_eq!(
            classify_contact((a, Hitbox::EnemyProjectile), (b, Hitbox::PlayerProjectile)),
            Some(Contact::ProjectilesClashed {
                player_shot: b,
                enemy_shot: a
            })
        );
    }
}
