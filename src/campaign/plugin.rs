//! Campaign plugin - mission flow from briefing to victory.

use bevy::prelude::*;

use super::data::{load_mission_definitions, MissionRegistry};
use super::mission::CurrentMission;
use super::screens;
use crate::core::{BossDefeated, DataLoadError, GameConfig, GameMode, GameSession, GameState};
use crate::spawning::FinalWaveCleared;
use crate::world::{GameplayEntity, PlayfieldBounds};

pub struct CampaignPlugin;

impl Plugin for CampaignPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MissionRegistry>()
            .init_resource::<CurrentMission>()
            .add_systems(OnEnter(GameState::Loading), load_mission_definitions)
            .add_systems(OnEnter(GameState::InGame), apply_ambient_tint.run_if(is_campaign))
            .add_systems(
                Update,
                complete_mission
                    .run_if(in_state(GameState::InGame))
                    .run_if(is_campaign),
            );

        for state in [GameState::Briefing, GameState::Victory] {
            app.add_systems(OnEnter(state), screens::open_story)
                .add_systems(
                    Update,
                    (screens::type_story_text, screens::advance_story)
                        .chain()
                        .run_if(in_state(state)),
                )
                .add_systems(OnExit(state), screens::close_story);
        }
    }
}

fn is_campaign(mode: Res<GameMode>) -> bool {
    *mode == GameMode::Campaign
}

/// Select the first mission of the campaign.
pub fn start_campaign(
    mission: &mut CurrentMission,
    registry: &MissionRegistry,
    config: &GameConfig,
) -> Result<(), DataLoadError> {
    let first = config
        .first_mission
        .as_deref()
        .ok_or(DataLoadError::MissingSetting("first_mission"))?;
    mission.select(first, registry)
}

/// Tint the playfield for missions set at dusk, night and so on.
fn apply_ambient_tint(
    mut commands: Commands,
    mission: Res<CurrentMission>,
    bounds: Res<PlayfieldBounds>,
) {
    let Some((r, g, b, a)) = mission.definition().and_then(|m| m.ambient_tint) else {
        return;
    };

    commands.spawn((
        Sprite::from_color(
            Color::srgba(r, g, b, a),
            Vec2::new(bounds.width(), bounds.height()),
        ),
        Transform::from_xyz(0.0, 0.0, 10.0),
        GameplayEntity,
    ));
}

/// The boss going down (or the last wave of a boss-less mission) wins it.
fn complete_mission(
    mut boss_events: EventReader<BossDefeated>,
    mut finale_events: EventReader<FinalWaveCleared>,
    mut session: ResMut<GameSession>,
    mission: Res<CurrentMission>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let boss_down = boss_events.read().count() > 0;
    let waves_done = finale_events.read().count() > 0;
    if !(boss_down || waves_done) {
        return;
    }

    if session.end() {
        let name = mission.definition().map_or("unknown", |m| m.name.as_str());
        info!("Mission '{}' complete with {} points", name, session.score());
        next_state.set(GameState::Victory);
    }
}
