//! In-game HUD - score, lives, wave and weapon status.

use bevy::prelude::*;

use crate::combat::{Health, Loadout, Weapon};
use crate::core::{GameSession, GameState};
use crate::player::Player;
use crate::spawning::WaveDirector;
use crate::upgrades::{ActiveUpgrades, ScoreUpgrades};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the lives bar fill.
#[derive(Component)]
pub struct LivesBar;

/// Which readout a HUD text line shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Score,
    Lives,
    Wave,
    NextUpgrade,
    UpgradeTime,
    FireRate,
    Ammo,
}

pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_hud_text, update_lives_bar).run_if(in_state(GameState::InGame)),
        );
}

fn spawn_hud(mut commands: Commands) {
    // Top-left readouts
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_line(parent, HudField::Score, 28.0);
            spawn_line(parent, HudField::Wave, 18.0);
            spawn_line(parent, HudField::NextUpgrade, 16.0);
            spawn_line(parent, HudField::UpgradeTime, 16.0);
        });

    // Bottom-left weapon and lives panel
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(16.0),
                left: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_line(parent, HudField::FireRate, 16.0);
            spawn_line(parent, HudField::Ammo, 16.0);

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    margin: UiRect::top(Val::Px(5.0)),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.8, 0.8)),
                        Node {
                            width: Val::Px(80.0),
                            ..default()
                        },
                        HudField::Lives,
                    ));

                    row.spawn((
                        Node {
                            width: Val::Px(150.0),
                            height: Val::Px(12.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                    ))
                    .with_children(|bg| {
                        bg.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                            LivesBar,
                        ));
                    });
                });
        });
}

fn spawn_line(parent: &mut ChildBuilder, field: HudField, font_size: f32) {
    parent.spawn((
        Text::new(""),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.95, 0.95)),
        field,
    ));
}

pub fn format_next_upgrade(next: Option<u32>) -> String {
    match next {
        Some(score) => format!("Next upgrade at {}", score),
        None => "All upgrades earned".to_string(),
    }
}

pub fn format_upgrade_time(seconds: f32) -> String {
    if seconds > 0.0 {
        format!("Upgrade {:.1}s", seconds)
    } else {
        String::new()
    }
}

pub fn format_ammo(weapon: Option<&Weapon>) -> String {
    match weapon.and_then(|w| w.current_ammo().zip(w.max_ammo())) {
        Some((current, max)) => format!("Bombs {}/{}", current, max),
        None => String::new(),
    }
}

fn update_hud_text(
    session: Res<GameSession>,
    director: Res<WaveDirector>,
    upgrades: Res<ScoreUpgrades>,
    player_query: Query<(&Health, &Loadout, &ActiveUpgrades), With<Player>>,
    mut text_query: Query<(&HudField, &mut Text)>,
) {
    let player = player_query.get_single().ok();

    for (field, mut text) in text_query.iter_mut() {
        let value = match field {
            HudField::Score => format!("{}", session.score()),
            HudField::Wave => format!("Wave {}", director.wave_number()),
            HudField::NextUpgrade => format_next_upgrade(upgrades.next_upgrade_score()),
            HudField::Lives => match player {
                Some((health, ..)) => format!("Lives {}", health.current.max(0.0) as u32),
                None => "Lives 0".to_string(),
            },
            HudField::UpgradeTime => {
                format_upgrade_time(player.map_or(0.0, |(_, _, active)| active.max_time_left()))
            }
            HudField::FireRate => match player {
                Some((_, loadout, _)) => format!("{:.0} rpm", loadout.primary.rounds_per_minute),
                None => String::new(),
            },
            HudField::Ammo => format_ammo(player.and_then(|(_, loadout, _)| loadout.secondary.as_ref())),
        };

        if text.0 != value {
            text.0 = value;
        }
    }
}

fn update_lives_bar(
    player_query: Query<&Health, With<Player>>,
    mut bar_query: Query<&mut Node, With<LivesBar>>,
) {
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };
    let fraction = player_query
        .get_single()
        .map_or(0.0, |health| health.percentage());

    bar.width = Val::Percent(fraction * 100.0);
}

fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readouts_hide_when_idle() {
        assert_eq!(format_upgrade_time(0.0), "");
        assert_eq!(format_upgrade_time(4.3), "Upgrade 4.3s");
        assert_eq!(format_next_upgrade(Some(500)), "Next upgrade at 500");
        assert_eq!(format_next_upgrade(None), "All upgrades earned");
        assert_eq!(format_ammo(None), "");
    }
}
