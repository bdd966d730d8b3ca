//! Enemy spawning helpers used by the wave director.

use bevy::prelude::*;
use rand::Rng;

use super::components::*;
use super::data::{EnemyDefinition, MovementDefinition};
use crate::combat::{insert_hitbox, Health, Hitbox, PlaneVisuals};
use crate::world::{GameplayEntity, PlayfieldBounds};

/// Spawn one plane of `definition` at `position`.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec2,
    bounds: &PlayfieldBounds,
    wave_member: Option<WaveMember>,
    rng: &mut impl Rng,
) -> Entity {
    let size = Vec2::new(definition.size.0, definition.size.1);
    let base = definition.base_color();

    let mut entity = commands.spawn((
        Enemy,
        EnemyType(enemy_type.to_string()),
        Points(definition.points),
        DropChance(definition.drop_chance),
        Health::new(definition.max_health),
        PlaneVisuals::new(base, definition.to_damage_stages(), Color::WHITE),
        Sprite::from_color(base, size),
        Transform::from_translation(position.extend(1.0)),
        Visibility::default(),
        GameplayEntity,
    ));
    insert_hitbox(&mut entity, Hitbox::Enemy, size);

    match definition.movement {
        MovementDefinition::Falling { speed } => {
            entity.insert(Falling { speed });
        }
        MovementDefinition::Drifting {
            fall_speed,
            min_speed,
            max_speed,
            change_interval,
        } => {
            entity.insert(Drifting::new(fall_speed, min_speed, max_speed, change_interval, rng));
        }
        MovementDefinition::Boss {
            vertical_position_percent,
            vertical_speed,
            horizontal_speed,
            padding_percent,
            change_direction_delay,
        } => {
            entity.insert(BossPatrol::new(
                bounds,
                vertical_position_percent,
                vertical_speed,
                horizontal_speed,
                padding_percent,
                change_direction_delay,
                rng,
            ));
        }
    }

    if let Some(shooter) = &definition.shooter {
        entity.insert(Shooter::new(&shooter.projectile, shooter.fire_interval, rng));
    }
    if let Some(member) = wave_member {
        entity.insert(member);
    }
    if definition.is_boss {
        entity.insert(Boss);
    }

    entity.id()
}

/// Horizontal offsets of a formation of `count` planes centred on zero.
pub fn formation_offsets(count: u32, spacing: f32) -> Vec<f32> {
    let count = count.max(1);
    let half_span = spacing * (count - 1) as f32 / 2.0;
    (0..count).map(|i| i as f32 * spacing - half_span).collect()
}

/// Random centre x for a formation of `count` planes that keeps every
/// member inside the side bounds. Centres it when it is wider than the field.
pub fn formation_center_x(bounds: &PlayfieldBounds, count: u32, spacing: f32, rng: &mut impl Rng) -> f32 {
    let half_span = spacing.abs() * count.max(1).saturating_sub(1) as f32 / 2.0;
    let low = bounds.min_x + half_span;
    let high = bounds.max_x - half_span;
    if low >= high {
        return (bounds.min_x + bounds.max_x) / 2.0;
    }
    rng.gen_range(low..=high)
}

/// Spawn a group of planes above the top edge at a random x.
/// Members are numbered from `first_order`. Returns how many spawned.
pub fn spawn_enemy_group(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    bounds: &PlayfieldBounds,
    wave: u32,
    first_order: u32,
    rng: &mut impl Rng,
) -> u32 {
    let offsets = formation_offsets(definition.group_size, definition.formation_spacing);
    let x = formation_center_x(bounds, definition.group_size, definition.formation_spacing, rng);

    for (i, offset) in offsets.iter().enumerate() {
        let position = Vec2::new(x + offset, bounds.padded_max_y);
        let member = WaveMember {
            wave,
            order: first_order + i as u32,
        };
        spawn_enemy(commands, enemy_type, definition, position, bounds, Some(member), rng);
    }

    offsets.len() as u32
}

/// Spawn a boss at the top centre.
pub fn spawn_boss(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    bounds: &PlayfieldBounds,
    rng: &mut impl Rng,
) -> Entity {
    let position = Vec2::new((bounds.min_x + bounds.max_x) / 2.0, bounds.padded_max_y);
    let entity = spawn_enemy(commands, enemy_type, definition, position, bounds, None, rng);
    commands.entity(entity).insert(Boss);
    info!("Boss '{}' has appeared", definition.name);
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn formation_is_centred() {
        assert_eq!(formation_offsets(1, 40.0), vec![0.0]);
        assert_eq!(formation_offsets(3, 40.0), vec![-40.0, 0.0, 40.0]);
        assert_eq!(formation_offsets(0, 40.0), vec![0.0]);
    }

    #[test]
    fn formation_stays_inside_side_bounds() {
        let bounds = PlayfieldBounds::from_extent(600.0, 900.0, 24.0, 120.0);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let x = formation_center_x(&bounds, 3, 48.0, &mut rng);
            for offset in formation_offsets(3, 48.0) {
                let member = x + offset;
                assert!(member >= bounds.min_x && member <= bounds.max_x, "member at {member}");
            }
        }
    }

    #[test]
    fn oversized_formation_is_centred() {
        let bounds = PlayfieldBounds::from_extent(100.0, 900.0, 24.0, 120.0);
        let mut rng = StdRng::seed_from_u64(12);
        assert_eq!(formation_center_x(&bounds, 5, 48.0, &mut rng), 0.0);
    }
}
