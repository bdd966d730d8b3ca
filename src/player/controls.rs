//! Player spawning, movement and trigger handling.

use bevy::prelude::*;

use super::components::*;
use crate::combat::{
    insert_hitbox, spawn_projectile, Health, Hitbox, Loadout, PlaneVisuals, ProjectileRegistry,
    Side, Weapon, WeaponRegistry, WeaponSlot,
};
use crate::core::{DataLoadError, GameConfig, PlayerTuning, SoundEffect};
use crate::upgrades::ActiveUpgrades;
use crate::world::{GameplayEntity, PlayfieldBounds};

/// Height of the spawn point, as a percentage of the playfield.
const SPAWN_HEIGHT_PERCENT: f32 = 12.0;

/// Build the player's weapons from the registry.
pub fn build_loadout(tuning: &PlayerTuning, registry: &WeaponRegistry) -> Result<Loadout, DataLoadError> {
    let unknown = |name: &str| DataLoadError::UnknownReference {
        kind: "weapon",
        name: name.to_string(),
    };

    let primary_definition = registry
        .get(&tuning.primary_weapon)
        .ok_or_else(|| unknown(&tuning.primary_weapon))?;

    let secondary = match &tuning.secondary_weapon {
        Some(id) => {
            let definition = registry.get(id).ok_or_else(|| unknown(id))?;
            Some(Weapon::from_definition(id, definition))
        }
        None => None,
    };

    Ok(Loadout {
        primary: Weapon::from_definition(&tuning.primary_weapon, primary_definition),
        secondary,
        default_primary: tuning.primary_weapon.clone(),
    })
}

/// Spawn the player plane at the bottom centre.
pub fn spawn_player(
    mut commands: Commands,
    config: Res<GameConfig>,
    bounds: Res<PlayfieldBounds>,
    weapons: Res<WeaponRegistry>,
) {
    let tuning = &config.player;
    let size = Vec2::new(tuning.size.0, tuning.size.1);
    let (r, g, b) = tuning.color;
    let color = Color::srgb(r, g, b);
    let position = Vec2::new(
        (bounds.min_x + bounds.max_x) / 2.0,
        bounds.y_at_percent(SPAWN_HEIGHT_PERCENT),
    );

    let mut entity = commands.spawn((
        Player,
        PlayerSpeed::from(tuning),
        Health::new(config.initial_lives.max(1) as f32),
        ActiveUpgrades::default(),
        PlaneVisuals::new(color, Vec::new(), Color::srgb(1.0, 0.3, 0.3)),
        Sprite::from_color(color, size),
        Transform::from_translation(position.extend(1.0)),
        GameplayEntity,
    ));
    insert_hitbox(&mut entity, Hitbox::Player, size);

    match build_loadout(tuning, &weapons) {
        Ok(loadout) => {
            entity.insert(loadout);
        }
        Err(e) => error!("Player spawned unarmed: {}", e),
    }

    info!("Player spawned with {} lives", config.initial_lives);
}

/// Arrows or WASD, clamped to the screen.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    bounds: Res<PlayfieldBounds>,
    mut query: Query<(&mut Transform, &PlayerSpeed), With<Player>>,
) {
    let Ok((mut transform, speed)) = query.get_single_mut() else {
        return;
    };

    let mut direction = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
        direction.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
        direction.x += 1.0;
    }
    if keyboard.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]) {
        direction.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]) {
        direction.y -= 1.0;
    }

    let dt = time.delta_secs();
    let moved = transform.translation.truncate()
        + Vec2::new(direction.x * speed.horizontal, direction.y * speed.vertical) * dt;
    let clamped = bounds.clamp(moved);
    transform.translation.x = clamped.x;
    transform.translation.y = clamped.y;
}

/// Triggers held when the game pauses are released, so the burst does not
/// resume with shots owed for the paused time.
pub fn release_triggers(mut query: Query<&mut Loadout, With<Player>>) {
    for mut loadout in query.iter_mut() {
        loadout.cease_fire();
    }
}

/// Space holds the primary trigger, Shift the secondary.
pub fn player_fire(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    projectiles: Res<ProjectileRegistry>,
    mut query: Query<(&Transform, &mut Loadout), With<Player>>,
    mut sounds: EventWriter<SoundEffect>,
) {
    let Ok((transform, mut loadout)) = query.get_single_mut() else {
        return;
    };

    let now = time.elapsed_secs();
    let origin = transform.translation.truncate();
    let triggers = [
        (WeaponSlot::Primary, keyboard.pressed(KeyCode::Space)),
        (
            WeaponSlot::Secondary,
            keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        ),
    ];

    for (slot, held) in triggers {
        let Some(weapon) = loadout.weapon_mut(slot) else {
            continue;
        };

        if !held {
            if weapon.is_firing() {
                weapon.cease_fire();
            }
            continue;
        }

        if !weapon.pull_trigger(now) {
            continue;
        }

        let Some(definition) = projectiles.get(&weapon.projectile) else {
            warn!("Weapon '{}' fires unknown projectile '{}'", weapon.id, weapon.projectile);
            continue;
        };

        for muzzle in weapon.muzzles() {
            spawn_projectile(
                &mut commands,
                definition,
                origin + muzzle.offset,
                muzzle.angle,
                Side::Player,
            );
        }
        sounds.send(SoundEffect::Shot);
    }
}
