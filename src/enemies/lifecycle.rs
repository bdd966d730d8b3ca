//! Enemy shooting, defeat and cleanup.

use bevy::prelude::*;
use bevy_rapier2d::prelude::Collider;
use rand::Rng;

use super::components::*;
use crate::combat::{spawn_projectile, Defeated, ProjectileRegistry, Side};
use crate::core::{
    award_points, BossDefeated, EnemyDefeated, GameConfig, GameSession, ScoreChanged, SoundEffect,
};
use crate::player::spawn_life_bonus;

/// Fire enemy guns.
pub fn enemy_shoot(
    mut commands: Commands,
    time: Res<Time>,
    registry: Res<ProjectileRegistry>,
    mut query: Query<(&Transform, &mut Shooter, &Sprite), (With<Enemy>, Without<Defeated>)>,
) {
    for (transform, mut shooter, sprite) in query.iter_mut() {
        if !shooter.tick(time.delta()) {
            continue;
        }

        let Some(definition) = registry.get(&shooter.projectile) else {
            error!("Enemy fires unknown projectile '{}'", shooter.projectile);
            continue;
        };

        // Fire from the nose
        let nose = sprite.custom_size.map_or(0.0, |size| size.y / 2.0);
        let origin = transform.translation.truncate() - Vec2::new(0.0, nose);
        spawn_projectile(&mut commands, definition, origin, 0.0, Side::Enemy);
    }
}

/// Score, drops and teardown for every defeated enemy.
#[allow(clippy::too_many_arguments)]
pub fn handle_enemy_defeat(
    mut commands: Commands,
    mut defeated: EventReader<EnemyDefeated>,
    mut session: ResMut<GameSession>,
    config: Res<GameConfig>,
    mut query: Query<(&Points, &DropChance, Has<Boss>, &mut Visibility), With<Enemy>>,
    mut score_events: EventWriter<ScoreChanged>,
    mut boss_events: EventWriter<BossDefeated>,
    mut sounds: EventWriter<SoundEffect>,
) {
    let mut rng = rand::thread_rng();

    for event in defeated.read() {
        let Ok((points, drop_chance, is_boss, mut visibility)) = query.get_mut(event.entity) else {
            continue;
        };

        award_points(&mut session, points.0, &mut score_events);

        if drop_chance.0 > 0.0 && rng.gen_range(0.0..100.0) < drop_chance.0 {
            spawn_life_bonus(&mut commands, &config.life_bonus, event.position);
        }

        sounds.send(SoundEffect::EnemyDestroyed);
        *visibility = Visibility::Hidden;
        commands
            .entity(event.entity)
            .remove::<Collider>()
            .insert(DeathTimer::default());

        if is_boss {
            info!("Boss defeated");
            boss_events.send(BossDefeated { entity: event.entity });
        }
    }
}

/// Despawn enemies after the destruction effect completes.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer)>,
) {
    for (entity, mut death_timer) in query.iter_mut() {
        death_timer.0.tick(time.delta());

        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BossDefeated, EnemyDefeated, ScoreChanged, SoundEffect};

    fn lifecycle_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<EnemyDefeated>()
            .add_event::<ScoreChanged>()
            .add_event::<BossDefeated>()
            .add_event::<SoundEffect>()
            .init_resource::<GameSession>()
            .init_resource::<GameConfig>()
            .add_systems(Update, handle_enemy_defeat);
        app.world_mut().resource_mut::<GameSession>().start(1);
        app
    }

    fn spawn(app: &mut App, points: u32) -> Entity {
        app.world_mut()
            .spawn((Enemy, Points(points), DropChance(0.0), Visibility::default(), Defeated))
            .id()
    }

    #[test]
    fn defeat_awards_points_and_hides_plane() {
        let mut app = lifecycle_app();
        let enemy = spawn(&mut app, 25);

        app.world_mut().send_event(EnemyDefeated {
            entity: enemy,
            position: Vec2::ZERO,
        });
        app.update();

        assert_eq!(app.world().resource::<GameSession>().score(), 25);
        assert_eq!(app.world().get::<Visibility>(enemy), Some(&Visibility::Hidden));
        assert!(app.world().get::<DeathTimer>(enemy).is_some());
    }

    #[test]
    fn boss_defeat_is_announced() {
        let mut app = lifecycle_app();
        let boss = spawn(&mut app, 500);
        app.world_mut().entity_mut(boss).insert(Boss);

        app.world_mut().send_event(EnemyDefeated {
            entity: boss,
            position: Vec2::ZERO,
        });
        app.update();

        let announced = app
            .world()
            .resource::<Events<BossDefeated>>()
            .iter_current_update_events()
            .count();
        assert_eq!(announced, 1);
    }

    #[test]
    fn no_points_after_game_over() {
        let mut app = lifecycle_app();
        app.world_mut().resource_mut::<GameSession>().end();
        let enemy = spawn(&mut app, 25);

        app.world_mut().send_event(EnemyDefeated {
            entity: enemy,
            position: Vec2::ZERO,
        });
        app.update();

        assert_eq!(app.world().resource::<GameSession>().score(), 0);
    }
}
