//! Life bonus pickups dropped by enemies.

use bevy::prelude::*;

use super::components::{LifeBonus, Player};
use crate::combat::{insert_hitbox, Health, Hitbox, PickupContact, Velocity};
use crate::core::{LifeBonusTuning, SoundEffect};
use crate::world::{GameplayEntity, PlayfieldBounds};

/// Drop a life bonus at `position`. It falls until collected or lost.
pub fn spawn_life_bonus(commands: &mut Commands, tuning: &LifeBonusTuning, position: Vec2) {
    let size = Vec2::splat(tuning.size);
    let mut entity = commands.spawn((
        LifeBonus {
            health_to_restore: tuning.health_to_restore,
        },
        Velocity(Vec2::new(0.0, -tuning.fall_speed)),
        Sprite::from_color(Color::srgb(0.3, 0.9, 0.4), size),
        Transform::from_translation(position.extend(1.5)),
        GameplayEntity,
    ));
    insert_hitbox(&mut entity, Hitbox::Pickup, size);
}

/// Heal the player from collected bonuses.
pub fn collect_life_bonus(
    mut commands: Commands,
    mut contacts: EventReader<PickupContact>,
    bonuses: Query<&LifeBonus>,
    mut players: Query<&mut Health, With<Player>>,
    mut sounds: EventWriter<SoundEffect>,
) {
    for contact in contacts.read() {
        let Ok(bonus) = bonuses.get(contact.pickup) else {
            continue;
        };
        let Ok(mut health) = players.get_mut(contact.player) else {
            continue;
        };

        let restored = health.heal(bonus.health_to_restore as f32);
        info!("Life bonus collected (+{})", restored);
        sounds.send(SoundEffect::Pickup);
        commands.entity(contact.pickup).despawn_recursive();
    }
}

/// Bonuses that fall past the bottom are lost.
pub fn despawn_missed_bonuses(
    mut commands: Commands,
    bounds: Res<PlayfieldBounds>,
    query: Query<(Entity, &Transform), With<LifeBonus>>,
) {
    for (entity, transform) in query.iter() {
        if transform.translation.y < bounds.padded_min_y {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_heal_is_clamped_to_max() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<PickupContact>()
            .add_event::<SoundEffect>()
            .add_systems(Update, collect_life_bonus);

        let mut health = Health::new(3.0);
        health.take_damage(1.0);
        let player = app.world_mut().spawn((Player, health)).id();
        let pickup = app.world_mut().spawn(LifeBonus { health_to_restore: 2 }).id();

        app.world_mut().send_event(PickupContact { pickup, player });
        app.update();

        assert_eq!(app.world().get::<Health>(player).unwrap().current, 3.0);
        assert!(app.world().get::<LifeBonus>(pickup).is_none());
    }
}
