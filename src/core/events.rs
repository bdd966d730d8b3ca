//! Global events used for cross-system communication.
//!
//! Events keep the scoring, spawning and upgrade systems decoupled: the
//! session announces score changes, the enemy systems announce defeats
//! and escapes, and each listener keeps its own bookkeeping.

use bevy::prelude::*;

/// Sent after every accepted change to the session score.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged {
    pub score: u32,
}

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage (projectile or plane), if still known
    pub source: Option<Entity>,
    /// Damage amount
    pub amount: f32,
}

/// Sent once when an enemy is destroyed (shot down or rammed).
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDefeated {
    pub entity: Entity,
    pub position: Vec2,
}

/// Sent when an enemy leaves the playfield without being destroyed.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyEscaped {
    pub entity: Entity,
}

/// Sent when the player's plane runs out of health.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlayerDefeated;

/// Sent when a mission boss is destroyed.
#[derive(Event, Debug, Clone, Copy)]
pub struct BossDefeated {
    pub entity: Entity,
}

/// Sent when a score-threshold upgrade is awarded.
#[derive(Event, Debug, Clone)]
pub struct UpgradeAwarded {
    pub name: String,
    pub score: u32,
}

/// One-shot sound effects.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Shot,
    EnemyDestroyed,
    PlayerHit,
    Upgrade,
    Pickup,
    Explosion,
}
