//! Enemy movement and playfield wrap/escape handling.

use bevy::prelude::*;
use rand::Rng;

use super::components::*;
use crate::combat::Defeated;
use crate::core::EnemyEscaped;
use crate::world::PlayfieldBounds;

/// How far below the screen a plane may fall before wrapping to the top.
pub const WRAP_MARGIN: f32 = 96.0;
/// How far past a side edge a plane may drift before it has escaped.
pub const ESCAPE_MARGIN: f32 = 48.0;

/// Where an enemy is relative to the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsCheck {
    Inside,
    BelowBottom,
    OffSide,
}

pub fn check_bounds(bounds: &PlayfieldBounds, position: Vec2) -> BoundsCheck {
    if position.x < bounds.min_x - ESCAPE_MARGIN || position.x > bounds.max_x + ESCAPE_MARGIN {
        BoundsCheck::OffSide
    } else if position.y < bounds.min_y - WRAP_MARGIN {
        BoundsCheck::BelowBottom
    } else {
        BoundsCheck::Inside
    }
}

pub fn move_falling(time: Res<Time>, mut query: Query<(&mut Transform, &Falling)>) {
    let dt = time.delta_secs();
    for (mut transform, falling) in query.iter_mut() {
        transform.translation.y -= falling.speed * dt;
    }
}

pub fn move_drifting(time: Res<Time>, mut query: Query<(&mut Transform, &mut Drifting)>) {
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (mut transform, mut drifting) in query.iter_mut() {
        transform.translation += (drifting.velocity() * dt).extend(0.0);

        let due = drifting
            .change_timer
            .as_mut()
            .is_some_and(|timer| timer.tick(time.delta()).just_finished());
        if due {
            drifting.reroll(&mut rng);
        }
    }
}

pub fn move_bosses(time: Res<Time>, mut query: Query<(&mut Transform, &mut BossPatrol)>) {
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (mut transform, mut patrol) in query.iter_mut() {
        let next = patrol.step(transform.translation.truncate(), dt, &mut rng);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

/// Wrap planes that fell off the bottom; despawn planes that left the sides.
pub fn handle_out_of_bounds(
    mut commands: Commands,
    bounds: Res<PlayfieldBounds>,
    mut query: Query<(Entity, &mut Transform, Has<Defeated>), (With<Enemy>, Without<Boss>)>,
    mut escaped: EventWriter<EnemyEscaped>,
) {
    let mut rng = rand::thread_rng();

    for (entity, mut transform, defeated) in query.iter_mut() {
        match check_bounds(&bounds, transform.translation.truncate()) {
            BoundsCheck::Inside => {}
            BoundsCheck::BelowBottom => {
                transform.translation.x = rng.gen_range(bounds.min_x..=bounds.max_x);
                transform.translation.y = bounds.padded_max_y;
            }
            BoundsCheck::OffSide => {
                // Defeated planes were already counted
                if !defeated {
                    escaped.send(EnemyEscaped { entity });
                }
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}
