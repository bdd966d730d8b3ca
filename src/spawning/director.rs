//! The wave director: a frame-driven state machine that decides when
//! waves start, how many planes they hold and when they are cleared.
//!
//! The director never touches the world. Each [`WaveDirector::tick`]
//! returns the commands for this frame and the caller reports back what
//! actually happened through the `record_*` methods.

use bevy::prelude::*;
use rand::Rng;

use super::data::WaveDefinition;
use crate::core::DataLoadError;

/// Shortest allowed gap between two group spawns.
pub const MIN_SPAWN_DELAY: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavePhase {
    /// Not running.
    #[default]
    Idle,
    /// Waiting for the next wave to start.
    Cooldown,
    /// Spawning groups until the wave target is reached.
    Spawning,
    /// Waiting for every spawned plane to be defeated or escape.
    Clearing,
    /// A boss is on the field; no further waves.
    Boss,
}

/// Work the caller must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorCommand {
    /// Spawn one group of the given enemy type.
    SpawnGroup { enemy: String },
    /// Remove the newest members of the current wave, unscored.
    Cull(u32),
    /// The finale is due.
    SpawnBoss,
    WaveCleared { wave: u32 },
}

#[derive(Resource, Debug, Default)]
pub struct WaveDirector {
    definition: WaveDefinition,
    phase: WavePhase,
    difficulty: u32,
    score: u32,
    boss_after: Option<u32>,
    wave_number: u32,
    waves_completed: u32,
    target: u32,
    spawned_this_wave: u32,
    enemies_remaining: u32,
    countdown: f32,
}

impl WaveDirector {
    /// Start directing waves from `definition`, known as `wave_id`. The
    /// first wave begins after `first_wave_delay`. With `boss_after`, the
    /// finale is requested once that many waves have been cleared.
    pub fn begin(
        &mut self,
        wave_id: &str,
        definition: WaveDefinition,
        difficulty: u32,
        score: u32,
        boss_after: Option<u32>,
    ) -> Result<(), DataLoadError> {
        self.stop();

        if definition.enemy_pool.is_empty() {
            return Err(DataLoadError::EmptyPool(wave_id.to_string()));
        }

        *self = Self {
            countdown: definition.first_wave_delay.max(0.0),
            definition,
            phase: WavePhase::Cooldown,
            difficulty: difficulty.max(1),
            score,
            boss_after,
            ..Self::default()
        };
        Ok(())
    }

    /// Stop issuing commands. Counters are kept for display.
    pub fn stop(&mut self) {
        self.phase = WavePhase::Idle;
    }

    /// The latest session score; affects the next size and interval computed.
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn record_spawned(&mut self, count: u32) {
        self.spawned_this_wave += count;
        self.enemies_remaining += count;
    }

    pub fn record_culled(&mut self, count: u32) {
        self.enemies_remaining = self.enemies_remaining.saturating_sub(count);
    }

    /// A wave member was defeated or escaped.
    pub fn enemy_removed(&mut self) {
        self.enemies_remaining = self.enemies_remaining.saturating_sub(1);
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn waves_completed(&self) -> u32 {
        self.waves_completed
    }

    pub fn spawned_this_wave(&self) -> u32 {
        self.spawned_this_wave
    }

    pub fn enemies_remaining(&self) -> u32 {
        self.enemies_remaining
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> Vec<DirectorCommand> {
        let mut commands = Vec::new();

        if self.phase == WavePhase::Cooldown {
            self.countdown -= dt;
            if self.countdown <= 0.0 {
                self.start_wave();
            }
        } else if self.phase == WavePhase::Spawning {
            self.countdown -= dt;
        }

        if self.phase == WavePhase::Spawning {
            if self.spawned_this_wave >= self.target {
                let overshoot = self.spawned_this_wave - self.target;
                if overshoot > 0 {
                    commands.push(DirectorCommand::Cull(overshoot));
                }
                self.phase = WavePhase::Clearing;
            } else if self.countdown <= 0.0 {
                let index = rng.gen_range(0..self.definition.enemy_pool.len());
                commands.push(DirectorCommand::SpawnGroup {
                    enemy: self.definition.enemy_pool[index].clone(),
                });
                self.countdown = self.next_spawn_delay(rng);
            }
        }

        if self.phase == WavePhase::Clearing && self.enemies_remaining == 0 {
            self.waves_completed += 1;
            commands.push(DirectorCommand::WaveCleared {
                wave: self.wave_number,
            });

            if self.boss_after.is_some_and(|waves| self.waves_completed >= waves) {
                commands.push(DirectorCommand::SpawnBoss);
                self.phase = WavePhase::Boss;
            } else {
                self.countdown = self.definition.wave_interval(self.score, self.difficulty);
                self.phase = WavePhase::Cooldown;
            }
        }

        commands
    }

    fn start_wave(&mut self) {
        self.wave_number += 1;
        self.target = self.definition.target_wave_size(self.score);
        self.spawned_this_wave = 0;
        self.countdown = 0.0;
        self.phase = WavePhase::Spawning;
        debug!("Wave {} starting with {} planes", self.wave_number, self.target);
    }

    fn next_spawn_delay(&self, rng: &mut impl Rng) -> f32 {
        let jitter = self.definition.spawn_jitter.abs();
        let delay = if jitter > 0.0 {
            self.definition.spawn_interval + rng.gen_range(-jitter..=jitter)
        } else {
            self.definition.spawn_interval
        };
        delay.max(MIN_SPAWN_DELAY)
    }
}
