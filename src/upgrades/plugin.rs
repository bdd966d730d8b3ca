//! Upgrade plugin - score tiers and timed upgrade bookkeeping.

use bevy::prelude::*;

use super::active::ActiveUpgrades;
use super::data::{load_score_upgrades, ScoreUpgrades};
use crate::combat::{CombatSet, Loadout, WeaponRegistry};
use crate::core::{GameState, PlayState, ScoreChanged, SoundEffect, UpgradeAwarded};
use crate::player::Player;

pub struct UpgradePlugin;

impl Plugin for UpgradePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScoreUpgrades>()
            .add_systems(OnEnter(GameState::Loading), load_score_upgrades)
            .add_systems(OnEnter(GameState::InGame), reset_score_upgrades)
            .add_systems(
                Update,
                (award_score_upgrades, tick_active_upgrades)
                    .chain()
                    .after(CombatSet::Damage)
                    .run_if(in_state(GameState::InGame))
                    .run_if(in_state(PlayState::Running)),
            );
    }
}

fn reset_score_upgrades(mut upgrades: ResMut<ScoreUpgrades>) {
    upgrades.reset();
}

fn award_score_upgrades(
    mut score_events: EventReader<ScoreChanged>,
    mut upgrades: ResMut<ScoreUpgrades>,
    weapons: Res<WeaponRegistry>,
    mut players: Query<(&mut ActiveUpgrades, &mut Loadout), With<Player>>,
    mut awarded_events: EventWriter<UpgradeAwarded>,
    mut sounds: EventWriter<SoundEffect>,
) {
    let Some(score) = score_events.read().map(|event| event.score).max() else {
        return;
    };

    let awarded = upgrades.check(score);
    if awarded.is_empty() {
        return;
    }

    let Ok((mut active, mut loadout)) = players.get_single_mut() else {
        return;
    };

    for upgrade in awarded {
        info!("Upgrade awarded: {} at {} points", upgrade.name, score);
        awarded_events.send(UpgradeAwarded {
            name: upgrade.name.clone(),
            score,
        });
        active.add(upgrade, &mut loadout, &weapons);
    }
    sounds.send(SoundEffect::Upgrade);
}

fn tick_active_upgrades(
    time: Res<Time>,
    weapons: Res<WeaponRegistry>,
    mut players: Query<(&mut ActiveUpgrades, &mut Loadout), With<Player>>,
) {
    for (mut active, mut loadout) in players.iter_mut() {
        for name in active.tick(time.delta_secs(), &mut loadout, &weapons) {
            info!("Upgrade expired: {}", name);
        }
    }
}
