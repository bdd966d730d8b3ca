//! Audio plugin - looping music per game state and one-shot sound effects.

use bevy::prelude::*;
use bevy_kira_audio::{AudioApp, AudioChannel, AudioControl, AudioSource};

use crate::campaign::CurrentMission;
use crate::core::{GameMode, GameState, SoundEffect};

const TITLE_MUSIC: &str = "audio/music/title.ogg";
const IN_GAME_MUSIC: &str = "audio/music/in_game.ogg";
const GAME_OVER_MUSIC: &str = "audio/music/game_over.ogg";

/// Channel for the single looping music track.
#[derive(Resource)]
pub struct MusicChannel;

/// Channel for one-shot effects.
#[derive(Resource)]
struct EffectsChannel;

/// Preloaded sound effect handles.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    pub shot: Handle<AudioSource>,
    pub enemy_destroyed: Handle<AudioSource>,
    pub player_hit: Handle<AudioSource>,
    pub upgrade: Handle<AudioSource>,
    pub pickup: Handle<AudioSource>,
    pub explosion: Handle<AudioSource>,
}

impl SoundLibrary {
    fn handle(&self, effect: SoundEffect) -> Handle<AudioSource> {
        match effect {
            SoundEffect::Shot => self.shot.clone(),
            SoundEffect::EnemyDestroyed => self.enemy_destroyed.clone(),
            SoundEffect::PlayerHit => self.player_hit.clone(),
            SoundEffect::Upgrade => self.upgrade.clone(),
            SoundEffect::Pickup => self.pickup.clone(),
            SoundEffect::Explosion => self.explosion.clone(),
        }
    }
}

/// Path of the track currently looping on the music channel.
#[derive(Resource, Default)]
struct NowPlaying(Option<String>);

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_kira_audio::AudioPlugin)
            .add_audio_channel::<MusicChannel>()
            .add_audio_channel::<EffectsChannel>()
            .init_resource::<SoundLibrary>()
            .init_resource::<NowPlaying>()
            .add_systems(OnEnter(GameState::Loading), load_sounds)
            .add_systems(
                Update,
                (
                    switch_music.run_if(state_changed::<GameState>),
                    play_sound_effects,
                ),
            );
    }
}

/// The track for `state`. Campaign missions may bring their own in-game music.
pub fn music_for(state: GameState, mode: GameMode, mission_music: Option<&str>) -> Option<&str> {
    match state {
        GameState::Loading => None,
        GameState::MainMenu | GameState::Briefing | GameState::Victory => Some(TITLE_MUSIC),
        GameState::InGame => match (mode, mission_music) {
            (GameMode::Campaign, Some(track)) => Some(track),
            _ => Some(IN_GAME_MUSIC),
        },
        GameState::GameOver => Some(GAME_OVER_MUSIC),
    }
}

fn load_sounds(mut library: ResMut<SoundLibrary>, asset_server: Res<AssetServer>) {
    *library = SoundLibrary {
        shot: asset_server.load("audio/sfx/shot.ogg"),
        enemy_destroyed: asset_server.load("audio/sfx/enemy_destroyed.ogg"),
        player_hit: asset_server.load("audio/sfx/player_hit.ogg"),
        upgrade: asset_server.load("audio/sfx/upgrade.ogg"),
        pickup: asset_server.load("audio/sfx/pickup.ogg"),
        explosion: asset_server.load("audio/sfx/explosion.ogg"),
    };
}

fn switch_music(
    state: Res<State<GameState>>,
    mode: Res<GameMode>,
    mission: Res<CurrentMission>,
    asset_server: Res<AssetServer>,
    channel: Res<AudioChannel<MusicChannel>>,
    mut now_playing: ResMut<NowPlaying>,
) {
    let mission_music = mission.definition().and_then(|m| m.music.as_deref());
    let wanted = music_for(*state.get(), *mode, mission_music);

    if wanted == now_playing.0.as_deref() {
        return;
    }

    channel.stop();
    if let Some(track) = wanted {
        debug!("Playing music '{}'", track);
        channel.play(asset_server.load(track.to_string())).looped();
    }
    now_playing.0 = wanted.map(str::to_string);
}

fn play_sound_effects(
    mut events: EventReader<SoundEffect>,
    library: Res<SoundLibrary>,
    channel: Res<AudioChannel<EffectsChannel>>,
) {
    for effect in events.read() {
        channel.play(library.handle(*effect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menus_share_the_title_track() {
        let menu = music_for(GameState::MainMenu, GameMode::Arcade, None);
        assert_eq!(menu, Some(TITLE_MUSIC));
        assert_eq!(music_for(GameState::Briefing, GameMode::Campaign, None), menu);
        assert_eq!(music_for(GameState::Loading, GameMode::Arcade, None), None);
    }

    #[test]
    fn mission_music_only_overrides_campaign_play() {
        let custom = Some("audio/music/night_raid.ogg");
        assert_eq!(
            music_for(GameState::InGame, GameMode::Campaign, custom),
            custom
        );
        assert_eq!(
            music_for(GameState::InGame, GameMode::Arcade, custom),
            Some(IN_GAME_MUSIC)
        );
        assert_eq!(
            music_for(GameState::GameOver, GameMode::Campaign, custom),
            Some(GAME_OVER_MUSIC)
        );
    }
}
