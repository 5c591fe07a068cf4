#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave controller that tracks the level counter and paces enemy spawns.
//!
//! Starting a wave bumps the level, freezes the wave's stats and arms a
//! pending-spawn counter. Each advance accumulates time and releases one
//! enemy whenever a full spawn interval has elapsed, until the counter is
//! exhausted.

use log::debug;
use shadow_gate_core::{balance::SPAWN_INTERVAL_SECONDS, WaveStats};
use shadow_gate_system_wave_generation::WaveScaling;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: f32,
    scaling: WaveScaling,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and curves.
    #[must_use]
    pub const fn new(spawn_interval: f32, scaling: WaveScaling) -> Self {
        Self {
            spawn_interval,
            scaling,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL_SECONDS, WaveScaling::default())
    }
}

/// Stateful wave controller.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: f32,
    scaling: WaveScaling,
    level: u32,
    current: Option<WaveStats>,
    pending: u32,
    accumulator: f32,
}

impl Spawning {
    /// Creates a new wave controller at level zero with no wave armed.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            scaling: config.scaling,
            level: 0,
            current: None,
            pending: 0,
            accumulator: 0.0,
        }
    }

    /// Level of the most recently started wave; zero before the first wave.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Stats of the most recently started wave.
    #[must_use]
    pub const fn current_stats(&self) -> Option<WaveStats> {
        self.current
    }

    /// Enemies of the current wave that have not spawned yet.
    #[must_use]
    pub const fn pending(&self) -> u32 {
        self.pending
    }

    /// Stats the next call to [`Spawning::start_wave`] would produce.
    ///
    /// Pure projection; the controller is left untouched.
    #[must_use]
    pub fn next_wave_stats(&self) -> WaveStats {
        self.scaling.stats(self.level.saturating_add(1))
    }

    /// Reports whether the wave is still running given the number of enemies
    /// that are still active.
    #[must_use]
    pub const fn is_running(&self, active_enemies: usize) -> bool {
        active_enemies > 0 || self.pending > 0
    }

    /// Starts the next wave unless one is still running.
    ///
    /// Returns the stats of the new wave, or `None` when the request was
    /// ignored because enemies are still pending or alive.
    pub fn start_wave(&mut self, active_enemies: usize) -> Option<WaveStats> {
        if self.is_running(active_enemies) {
            return None;
        }

        self.level = self.level.saturating_add(1);
        let stats = self.scaling.stats(self.level);
        self.current = Some(stats);
        self.pending = stats.count;
        self.accumulator = 0.0;
        debug!(
            "wave {} armed: {} enemies, hp {}, speed {}",
            self.level, stats.count, stats.hp, stats.speed
        );
        Some(stats)
    }

    /// Accumulates `dt` and releases at most one enemy.
    ///
    /// Returns the stats the released enemy should spawn with.
    pub fn advance(&mut self, dt: f32) -> Option<WaveStats> {
        if self.pending == 0 {
            return None;
        }

        self.accumulator += dt;
        if self.accumulator < self.spawn_interval {
            return None;
        }

        self.accumulator = 0.0;
        self.pending -= 1;
        self.current
    }
}

impl Default for Spawning {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
