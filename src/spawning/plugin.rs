//! Spawning plugin - drives the wave director and applies its commands.

use bevy::prelude::*;

use super::data::{load_wave_definitions, WaveDefinition, WaveRegistry};
use super::director::{DirectorCommand, WaveDirector};
use crate::campaign::CurrentMission;
use crate::combat::{CombatSet, Defeated};
use crate::core::{
    begin_session, EnemyDefeated, EnemyEscaped, GameConfig, GameMode, GameSession, GameState,
    PlayState, ScoreChanged,
};
use crate::enemies::{spawn_boss, spawn_enemy_group, Boss, EnemyRegistry, WaveMember};
use crate::world::PlayfieldBounds;

/// What the director runs this session.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct WavePlan {
    /// Wave definition id
    pub wave: String,
    /// Enemy id of the finale boss
    pub boss: Option<String>,
    /// Waves to clear before the finale
    pub boss_after: Option<u32>,
}

impl WavePlan {
    /// Endless waves, no finale.
    pub fn arcade(config: &GameConfig) -> Self {
        Self {
            wave: config.arcade_wave.clone(),
            boss: None,
            boss_after: None,
        }
    }
}

/// Sent when a wave has been fully dealt with.
#[derive(Event, Debug, Clone, Copy)]
pub struct WaveCleared {
    pub wave: u32,
}

/// Sent when the finale is due but the plan has no boss to spawn.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct FinalWaveCleared;

/// Spawning plugin - wave scheduling for arcade and campaign.
pub struct SpawningPlugin;

impl Plugin for SpawningPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaveRegistry>()
            .init_resource::<WaveDirector>()
            .init_resource::<WavePlan>()
            .add_event::<WaveCleared>()
            .add_event::<FinalWaveCleared>()
            .add_systems(OnEnter(GameState::Loading), load_wave_definitions)
            .add_systems(OnEnter(GameState::InGame), begin_waves.after(begin_session))
            .add_systems(OnExit(GameState::InGame), stop_waves)
            .add_systems(
                Update,
                (track_score, track_removed_enemies, run_director)
                    .chain()
                    .after(CombatSet::Damage)
                    .run_if(in_state(GameState::InGame))
                    .run_if(in_state(PlayState::Running)),
            );
    }
}

/// Keep only pool entries the enemy registry knows.
pub fn resolve_pool(pool: &[String], enemies: &EnemyRegistry) -> Vec<String> {
    pool.iter()
        .filter(|id| {
            let known = enemies.get(id).is_some();
            if !known {
                warn!("Wave pool references unknown enemy '{}'", id);
            }
            known
        })
        .cloned()
        .collect()
}

/// The `count` newest planes of `wave`, newest first.
pub fn select_cull(members: &[(Entity, WaveMember)], wave: u32, count: u32) -> Vec<Entity> {
    let mut candidates: Vec<_> = members.iter().filter(|(_, m)| m.wave == wave).collect();
    candidates.sort_by(|a, b| b.1.order.cmp(&a.1.order));
    candidates
        .into_iter()
        .take(count as usize)
        .map(|(entity, _)| *entity)
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn begin_waves(
    mut commands: Commands,
    mut director: ResMut<WaveDirector>,
    session: Res<GameSession>,
    mode: Res<GameMode>,
    config: Res<GameConfig>,
    mission: Res<CurrentMission>,
    waves: Res<WaveRegistry>,
    enemies: Res<EnemyRegistry>,
) {
    let plan = match *mode {
        GameMode::Arcade => WavePlan::arcade(&config),
        GameMode::Campaign => match mission.definition() {
            Some(definition) => WavePlan::from(definition),
            None => {
                error!("Campaign started without a mission - falling back to arcade waves");
                WavePlan::arcade(&config)
            }
        },
    };

    commands.insert_resource(plan.clone());

    let Some(definition) = waves.get(&plan.wave) else {
        error!("Unknown wave definition '{}' - no enemies will spawn", plan.wave);
        director.stop();
        return;
    };

    let definition = WaveDefinition {
        enemy_pool: resolve_pool(&definition.enemy_pool, &enemies),
        ..definition.clone()
    };

    let started = director.begin(
        &plan.wave,
        definition,
        session.difficulty(),
        session.score(),
        plan.boss_after,
    );
    match started {
        Ok(()) => info!(
            "Waves '{}' started at difficulty {}",
            plan.wave,
            session.difficulty()
        ),
        Err(e) => error!("Waves '{}' not started: {}", plan.wave, e),
    }
}

fn stop_waves(mut director: ResMut<WaveDirector>) {
    director.stop();
}

fn track_score(mut director: ResMut<WaveDirector>, mut events: EventReader<ScoreChanged>) {
    if let Some(event) = events.read().last() {
        director.set_score(event.score);
    }
}

fn track_removed_enemies(
    mut director: ResMut<WaveDirector>,
    mut defeated: EventReader<EnemyDefeated>,
    mut escaped: EventReader<EnemyEscaped>,
    bosses: Query<(), With<Boss>>,
) {
    for event in defeated.read() {
        if bosses.get(event.entity).is_err() {
            director.enemy_removed();
        }
    }
    for _ in escaped.read() {
        director.enemy_removed();
    }
}

#[allow(clippy::too_many_arguments)]
fn run_director(
    mut commands: Commands,
    time: Res<Time>,
    mut director: ResMut<WaveDirector>,
    plan: Res<WavePlan>,
    enemies: Res<EnemyRegistry>,
    bounds: Res<PlayfieldBounds>,
    members: Query<(Entity, &WaveMember), Without<Defeated>>,
    mut cleared_events: EventWriter<WaveCleared>,
    mut finale_events: EventWriter<FinalWaveCleared>,
) {
    let mut rng = rand::thread_rng();

    for command in director.tick(time.delta_secs(), &mut rng) {
        match command {
            DirectorCommand::SpawnGroup { enemy } => {
                let Some(definition) = enemies.get(&enemy) else {
                    error!("Cannot spawn unknown enemy '{}'", enemy);
                    continue;
                };
                let spawned = spawn_enemy_group(
                    &mut commands,
                    &enemy,
                    definition,
                    &bounds,
                    director.wave_number(),
                    director.spawned_this_wave(),
                    &mut rng,
                );
                director.record_spawned(spawned);
            }
            DirectorCommand::Cull(count) => {
                let snapshot: Vec<_> = members.iter().map(|(e, m)| (e, *m)).collect();
                let culled = select_cull(&snapshot, director.wave_number(), count);
                for entity in &culled {
                    commands.entity(*entity).despawn_recursive();
                }
                debug!("Culled {} planes from wave {}", culled.len(), director.wave_number());
                director.record_culled(culled.len() as u32);
            }
            DirectorCommand::SpawnBoss => {
                let boss = plan
                    .boss
                    .as_ref()
                    .and_then(|id| enemies.get(id).map(|definition| (id, definition)));
                match boss {
                    Some((id, definition)) => {
                        spawn_boss(&mut commands, id, definition, &bounds, &mut rng);
                    }
                    None => {
                        if let Some(id) = &plan.boss {
                            error!("Unknown boss '{}' - ending mission without a boss", id);
                        }
                        finale_events.send(FinalWaveCleared);
                    }
                }
            }
            DirectorCommand::WaveCleared { wave } => {
                info!("Wave {} cleared", wave);
                cleared_events.send(WaveCleared { wave });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawning::WavePhase;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn counting_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<EnemyDefeated>()
            .add_event::<EnemyEscaped>()
            .init_resource::<WaveDirector>()
            .add_systems(Update, track_removed_enemies);
        app.world_mut().resource_mut::<WaveDirector>().record_spawned(3);
        app
    }

    fn remaining(app: &App) -> u32 {
        app.world().resource::<WaveDirector>().enemies_remaining()
    }

    #[test]
    fn defeated_and_escaped_planes_each_count_once() {
        let mut app = counting_app();
        let plane = app.world_mut().spawn(WaveMember { wave: 1, order: 0 }).id();
        let runaway = app.world_mut().spawn(WaveMember { wave: 1, order: 1 }).id();

        app.world_mut().send_event(EnemyDefeated {
            entity: plane,
            position: Vec2::ZERO,
        });
        app.world_mut().send_event(EnemyEscaped { entity: runaway });
        app.update();

        assert_eq!(remaining(&app), 1);
    }

    #[test]
    fn boss_defeat_leaves_wave_count_alone() {
        let mut app = counting_app();
        let boss = app.world_mut().spawn(Boss).id();

        app.world_mut().send_event(EnemyDefeated {
            entity: boss,
            position: Vec2::ZERO,
        });
        app.update();

        assert_eq!(remaining(&app), 3);
    }

    #[test]
    fn cull_removes_only_live_members_of_current_wave() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<WaveCleared>()
            .add_event::<FinalWaveCleared>()
            .init_resource::<WavePlan>()
            .init_resource::<EnemyRegistry>()
            .init_resource::<PlayfieldBounds>()
            .add_systems(Update, run_director);

        // Wave one starts with a target of two; a three-plane group went out
        let mut director = WaveDirector::default();
        let definition = WaveDefinition {
            enemy_pool: vec!["scout".to_string()],
            first_wave_delay: 0.0,
            spawn_jitter: 0.0,
            ..WaveDefinition::default()
        };
        director.begin("skies", definition, 1, 0, None).unwrap();
        director.tick(0.0, &mut StdRng::seed_from_u64(1));
        director.record_spawned(3);
        assert_eq!(director.target(), 2);
        app.insert_resource(director);

        let world = app.world_mut();
        let first = world.spawn(WaveMember { wave: 1, order: 0 }).id();
        let second = world.spawn(WaveMember { wave: 1, order: 1 }).id();
        let newest = world.spawn(WaveMember { wave: 1, order: 2 }).id();
        let already_down = world.spawn((WaveMember { wave: 1, order: 3 }, Defeated)).id();
        let veteran = world.spawn(WaveMember { wave: 0, order: 9 }).id();

        app.update();

        let world = app.world();
        assert!(world.get::<WaveMember>(newest).is_none());
        for kept in [first, second, already_down, veteran] {
            assert!(world.get::<WaveMember>(kept).is_some());
        }
        let director = world.resource::<WaveDirector>();
        assert_eq!(director.enemies_remaining(), 2);
        assert_eq!(director.phase(), WavePhase::Clearing);
    }

    fn session_start_app(config: GameConfig) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(config)
            .init_resource::<WaveDirector>()
            .init_resource::<GameSession>()
            .init_resource::<GameMode>()
            .init_resource::<CurrentMission>()
            .init_resource::<WaveRegistry>()
            .init_resource::<EnemyRegistry>()
            .add_systems(Update, begin_waves);
        app.world_mut().resource_mut::<GameSession>().start(1);
        app
    }

    #[test]
    fn arcade_session_starts_built_in_waves() {
        let mut app = session_start_app(GameConfig::default());
        app.update();

        let director = app.world().resource::<WaveDirector>();
        assert_eq!(director.phase(), WavePhase::Cooldown);
        assert_eq!(
            *app.world().resource::<WavePlan>(),
            WavePlan::arcade(&GameConfig::default())
        );
    }

    #[test]
    fn unknown_wave_leaves_director_idle() {
        let config = GameConfig {
            arcade_wave: "nowhere".to_string(),
            ..GameConfig::default()
        };
        let mut app = session_start_app(config);
        app.update();

        assert_eq!(app.world().resource::<WaveDirector>().phase(), WavePhase::Idle);
        assert_eq!(app.world().resource::<WavePlan>().wave, "nowhere");
    }

    #[test]
    fn cull_takes_newest_of_current_wave() {
        let e = |i| Entity::from_raw(i);
        let members = vec![
            (e(1), WaveMember { wave: 2, order: 0 }),
            (e(2), WaveMember { wave: 2, order: 2 }),
            (e(3), WaveMember { wave: 1, order: 9 }),
            (e(4), WaveMember { wave: 2, order: 1 }),
        ];

        assert_eq!(select_cull(&members, 2, 2), vec![e(2), e(4)]);
        assert_eq!(select_cull(&members, 2, 10).len(), 3);
        assert!(select_cull(&members, 3, 1).is_empty());
    }

    #[test]
    fn unknown_pool_entries_are_dropped() {
        let mut enemies = EnemyRegistry::default();
        enemies.definitions.insert(
            "scout".to_string(),
            crate::core::loading::parse_ron(
                r#"(name: "Scout", max_health: 1.0, points: 10, size: (30.0, 30.0),
                    color: (1.0, 1.0, 1.0), movement: Falling(speed: 80.0))"#,
                std::path::Path::new("scout.ron"),
            )
            .unwrap(),
        );

        let pool = vec!["scout".to_string(), "ghost".to_string()];
        assert_eq!(resolve_pool(&pool, &enemies), vec!["scout".to_string()]);
    }
}
