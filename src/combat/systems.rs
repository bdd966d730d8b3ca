//! Combat systems - projectile motion, collision routing, damage handling.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

use super::components::*;
use super::components::Velocity;
use super::data::ProjectileDefinition;
use super::feedback::{update_plane_visuals, PlaneVisuals};
use crate::core::{EnemyDefeated, GameSession, GameState, PlayState, PlayerDefeated, SoundEffect};
use crate::enemies::{Boss, Enemy};
use crate::player::Player;
use crate::world::{GameplayEntity, PlayfieldBounds};

/// Damage the player takes from any single hit.
pub const PLAYER_HIT_DAMAGE: f32 = 1.0;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Motion,
    Collision,
    Damage,
    Feedback,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Events
        .add_event::<PickupContact>()

        // System ordering
        .configure_sets(
            Update,
            (
                CombatSet::Motion,
                CombatSet::Collision,
                CombatSet::Damage,
                CombatSet::Feedback,
            )
                .chain()
                .run_if(in_state(GameState::InGame))
                .run_if(in_state(PlayState::Running)),
        )

        .add_systems(
            Update,
            (apply_velocity, tick_lifetimes, despawn_stray_projectiles).in_set(CombatSet::Motion),
        )
        .add_systems(Update, route_collisions.in_set(CombatSet::Collision))
        .add_systems(Update, apply_damage.in_set(CombatSet::Damage))
        .add_systems(Update, update_plane_visuals.in_set(CombatSet::Feedback));
}

/// Spawn a projectile travelling forward for `side`, rotated by `angle`.
pub fn spawn_projectile(
    commands: &mut Commands,
    definition: &ProjectileDefinition,
    origin: Vec2,
    angle: f32,
    side: Side,
) {
    let direction = Vec2::from_angle(angle).rotate(side.forward());
    let size = Vec2::new(definition.size.0, definition.size.1);
    let (r, g, b) = definition.color;

    let hitbox = match side {
        Side::Player => Hitbox::PlayerProjectile,
        Side::Enemy => Hitbox::EnemyProjectile,
    };

    let mut entity = commands.spawn((
        Projectile {
            side,
            damage: definition.damage,
            blast_radius: definition.blast_radius,
        },
        Velocity(direction * definition.speed),
        Lifetime::from_seconds(definition.lifetime),
        Sprite::from_color(Color::srgb(r, g, b), size),
        Transform::from_translation(origin.extend(2.0)).with_rotation(Quat::from_rotation_z(angle)),
        GameplayEntity,
    ));
    insert_hitbox(&mut entity, hitbox, size);
}

/// Short-lived blast marker for bombs.
fn spawn_explosion(commands: &mut Commands, position: Vec2, radius: f32) {
    commands.spawn((
        Sprite::from_color(Color::srgba(1.0, 0.6, 0.2, 0.5), Vec2::splat(radius * 2.0)),
        Transform::from_translation(position.extend(3.0)),
        Lifetime::from_seconds(0.25),
        GameplayEntity,
    ));
}

/// Move everything with a velocity.
fn apply_velocity(time: Res<Time>, mut query: Query<(&mut Transform, &Velocity)>) {
    let dt = time.delta_secs();
    for (mut transform, velocity) in query.iter_mut() {
        transform.translation += (velocity.0 * dt).extend(0.0);
    }
}

/// Despawn entities whose lifetime ran out.
fn tick_lifetimes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Lifetime)>,
) {
    for (entity, mut lifetime) in query.iter_mut() {
        lifetime.0.tick(time.delta());
        if lifetime.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Projectiles that leave the padded playfield are gone for good.
fn despawn_stray_projectiles(
    mut commands: Commands,
    bounds: Res<PlayfieldBounds>,
    query: Query<(Entity, &Transform), With<Projectile>>,
) {
    for (entity, transform) in query.iter() {
        if bounds.is_outside_padded(transform.translation.truncate()) {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Turn physics contacts into gameplay events.
#[allow(clippy::too_many_arguments)]
fn route_collisions(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    hitboxes: Query<&Hitbox>,
    projectiles: Query<(&Projectile, &Transform)>,
    live_enemies: Query<(Entity, &Transform, Has<Boss>), (With<Enemy>, Without<Defeated>)>,
    mut damage_events: EventWriter<DamageEvent>,
    mut pickup_events: EventWriter<PickupContact>,
    mut sounds: EventWriter<SoundEffect>,
) {
    // A projectile or pickup can touch several colliders in one step
    let mut consumed = HashSet::new();

    for event in collision_events.read() {
        let (a, b) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b),
            CollisionEvent::Stopped(..) => continue,
        };

        let (Ok(hitbox_a), Ok(hitbox_b)) = (hitboxes.get(a), hitboxes.get(b)) else {
            continue;
        };

        let Some(contact) = classify_contact((a, *hitbox_a), (b, *hitbox_b)) else {
            continue;
        };

        match contact {
            Contact::ProjectileHitEnemy { projectile, enemy } => {
                if consumed.contains(&projectile) || live_enemies.get(enemy).is_err() {
                    continue;
                }
                let Ok((shot, shot_transform)) = projectiles.get(projectile) else {
                    continue;
                };
                consumed.insert(projectile);
                commands.entity(projectile).despawn_recursive();

                if let Some(radius) = shot.blast_radius {
                    let center = shot_transform.translation.truncate();
                    for (target, transform, _) in live_enemies.iter() {
                        if transform.translation.truncate().distance(center) <= radius {
                            damage_events.send(DamageEvent {
                                target,
                                source: Some(projectile),
                                amount: shot.damage,
                            });
                        }
                    }
                    spawn_explosion(&mut commands, center, radius);
                    sounds.send(SoundEffect::Explosion);
                } else {
                    damage_events.send(DamageEvent {
                        target: enemy,
                        source: Some(projectile),
                        amount: shot.damage,
                    });
                }
            }
            Contact::ProjectileHitPlayer { projectile, player } => {
                if !consumed.insert(projectile) {
                    continue;
                }
                commands.entity(projectile).despawn_recursive();
                damage_events.send(DamageEvent {
                    target: player,
                    source: Some(projectile),
                    amount: PLAYER_HIT_DAMAGE,
                });
            }
            Contact::EnemyRammedPlayer { enemy, player } => {
                let Ok((_, _, is_boss)) = live_enemies.get(enemy) else {
                    continue;
                };
                if !consumed.insert(enemy) {
                    continue;
                }
                damage_events.send(DamageEvent {
                    target: player,
                    source: Some(enemy),
                    amount: PLAYER_HIT_DAMAGE,
                });
                // Regular planes break apart on impact; bosses shrug it off
                if !is_boss {
                    damage_events.send(DamageEvent {
                        target: enemy,
                        source: Some(player),
                        amount: f32::INFINITY,
                    });
                }
            }
            Contact::ProjectilesClashed { player_shot, enemy_shot } => {
                if consumed.contains(&player_shot) || consumed.contains(&enemy_shot) {
                    continue;
                }
                consumed.insert(player_shot);
                consumed.insert(enemy_shot);
                commands.entity(player_shot).despawn_recursive();
                commands.entity(enemy_shot).despawn_recursive();
            }
            Contact::PickupCollected { pickup, player } => {
                if consumed.insert(pickup) {
                    pickup_events.send(PickupContact { pickup, player });
                }
            }
        }
    }
}

/// Apply damage to planes and announce defeats.
#[allow(clippy::type_complexity)]
#[allow(clippy::too_many_arguments)]
fn apply_damage(
    mut commands: Commands,
    session: Res<GameSession>,
    mut damage_events: EventReader<DamageEvent>,
    mut targets: Query<
        (&mut Health, &Transform, Option<&mut PlaneVisuals>, Has<Player>, Has<Enemy>),
        Without<Defeated>,
    >,
    mut enemy_defeated: EventWriter<EnemyDefeated>,
    mut player_defeated: EventWriter<PlayerDefeated>,
    mut sounds: EventWriter<SoundEffect>,
) {
    if !session.is_active() {
        damage_events.clear();
        return;
    }

    // Track entities that died this frame to avoid duplicate defeat events
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, transform, visuals, is_player, is_enemy)) = targets.get_mut(event.target)
        else {
            continue;
        };

        health.take_damage(event.amount);
        if let Some(mut visuals) = visuals {
            visuals.trigger_flash();
        }
        if is_player {
            sounds.send(SoundEffect::PlayerHit);
        }

        if !health.is_dead() {
            continue;
        }

        died_this_frame.insert(event.target);
        commands.entity(event.target).insert(Defeated);

        if is_player {
            player_defeated.send(PlayerDefeated);
        } else if is_enemy {
            enemy_defeated.send(EnemyDefeated {
                entity: event.target,
                position: transform.translation.truncate(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DamageEvent, EnemyDefeated, PlayerDefeated, SoundEffect};
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn combat_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<CollisionEvent>()
            .add_event::<PickupContact>()
            .add_event::<DamageEvent>()
            .add_event::<EnemyDefeated>()
            .add_event::<PlayerDefeated>()
            .add_event::<SoundEffect>()
            .init_resource::<GameSession>();
        app.add_systems(Update, (route_collisions, apply_damage).chain());
        app.world_mut().resource_mut::<GameSession>().start(1);
        app
    }

    fn spawn_enemy(app: &mut App, health: f32, position: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Enemy,
                Hitbox::Enemy,
                Health::new(health),
                Transform::from_translation(position.extend(0.0)),
            ))
            .id()
    }

    fn spawn_shot(app: &mut App, damage: f32, blast_radius: Option<f32>, position: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Projectile {
                    side: Side::Player,
                    damage,
                    blast_radius,
                },
                Hitbox::PlayerProjectile,
                Transform::from_translation(position.extend(0.0)),
            ))
            .id()
    }

    fn collide(app: &mut App, a: Entity, b: Entity) {
        app.world_mut()
            .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
    }

    fn defeated_count(app: &mut App) -> usize {
        app.world()
            .resource::<Events<EnemyDefeated>>()
            .iter_current_update_events()
            .count()
    }

    #[test]
    fn shot_damages_enemy_and_is_consumed() {
        let mut app = combat_test_app();
        let enemy = spawn_enemy(&mut app, 2.0, Vec2::ZERO);
        let shot = spawn_shot(&mut app, 1.0, None, Vec2::ZERO);

        collide(&mut app, shot, enemy);
        app.update();

        assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 1.0);
        assert!(app.world().get::<Projectile>(shot).is_none());
        assert!(app.world().get::<Defeated>(enemy).is_none());
    }

    #[test]
    fn lethal_hits_defeat_enemy_once() {
        let mut app = combat_test_app();
        let enemy = spawn_enemy(&mut app, 1.0, Vec2::ZERO);
        let first = spawn_shot(&mut app, 1.0, None, Vec2::ZERO);
        let second = spawn_shot(&mut app, 1.0, None, Vec2::ZERO);

        collide(&mut app, first, enemy);
        collide(&mut app, second, enemy);
        app.update();

        assert!(app.world().get::<Defeated>(enemy).is_some());
        assert_eq!(defeated_count(&mut app), 1);
    }

    #[test]
    fn bomb_damages_everything_in_radius() {
        let mut app = combat_test_app();
        let hit = spawn_enemy(&mut app, 3.0, Vec2::ZERO);
        let near = spawn_enemy(&mut app, 3.0, Vec2::new(50.0, 0.0));
        let far = spawn_enemy(&mut app, 3.0, Vec2::new(400.0, 0.0));
        let bomb = spawn_shot(&mut app, 3.0, Some(100.0), Vec2::ZERO);

        collide(&mut app, bomb, hit);
        app.update();

        assert!(app.world().get::<Defeated>(hit).is_some());
        assert!(app.world().get::<Defeated>(near).is_some());
        assert!(app.world().get::<Defeated>(far).is_none());
    }

    #[test]
    fn damage_is_ignored_when_session_inactive() {
        let mut app = combat_test_app();
        app.world_mut().resource_mut::<GameSession>().end();
        let enemy = spawn_enemy(&mut app, 1.0, Vec2::ZERO);

        app.world_mut().send_event(DamageEvent {
            target: enemy,
            source: None,
            amount: 5.0,
        });
        app.update();

        assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 1.0);
    }

    #[test]
    fn ramming_hurts_player_and_destroys_regular_enemy() {
        let mut app = combat_test_app();
        let enemy = spawn_enemy(&mut app, 5.0, Vec2::ZERO);
        let player = app
            .world_mut()
            .spawn((Player, Hitbox::Player, Health::new(3.0), Transform::default()))
            .id();

        collide(&mut app, player, enemy);
        app.update();

        assert_eq!(app.world().get::<Health>(player).unwrap().current, 2.0);
        assert!(app.world().get::<Defeated>(enemy).is_some());
    }

    #[test]
    fn bosses_survive_ramming() {
        let mut app = combat_test_app();
        let boss = spawn_enemy(&mut app, 5.0, Vec2::ZERO);
        app.world_mut().entity_mut(boss).insert(Boss);
        let player = app
            .world_mut()
            .spawn((Player, Hitbox::Player, Health::new(3.0), Transform::default()))
            .id();

        collide(&mut app, boss, player);
        app.update();

        assert_eq!(app.world().get::<Health>(boss).unwrap().current, 5.0);
        assert_eq!(app.world().get::<Health>(player).unwrap().current, 2.0);
    }
}
