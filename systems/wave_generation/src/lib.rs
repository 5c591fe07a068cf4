#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave scaling curves.
//!
//! Every stat is a pure, monotonic function of the wave level:
//!
//! * health grows exponentially: `floor(base_hp * growth^level)`,
//! * speed grows linearly up to a cap: `min(cap, base_speed + level * step)`,
//! * the enemy count grows every other level: `base_count + level / 2`,
//! * the kill reward grows linearly: `base_reward + level * reward_step`.

use shadow_gate_core::{
    balance::{
        BASE_ENEMY_COUNT, BASE_ENEMY_HP, BASE_ENEMY_SPEED, BASE_KILL_REWARD, ENEMY_HP_GROWTH,
        ENEMY_SPEED_CAP, ENEMY_SPEED_STEP, KILL_REWARD_STEP,
    },
    WaveStats,
};

// Powers of the growth factor are not exact in binary floating point; a value
// that should land on an integer may come out one ulp short of it.
const FLOOR_TOLERANCE: f64 = 1e-12;

/// Parameters of the wave scaling curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveScaling {
    base_hp: f64,
    hp_growth: f64,
    base_speed: f32,
    speed_step: f32,
    speed_cap: f32,
    base_count: u32,
    base_reward: f32,
    reward_step: f32,
}

impl WaveScaling {
    /// Health of each enemy spawned at `level`.
    #[must_use]
    pub fn hp(&self, level: u32) -> f32 {
        let exponent = i32::try_from(level).unwrap_or(i32::MAX);
        let raw = self.base_hp * self.hp_growth.powi(exponent);
        let floored = (raw + raw.abs() * FLOOR_TOLERANCE).floor();
        floored.min(f64::from(f32::MAX)) as f32
    }

    /// Speed of each enemy spawned at `level`.
    #[must_use]
    pub fn speed(&self, level: u32) -> f32 {
        (self.base_speed + level as f32 * self.speed_step).min(self.speed_cap)
    }

    /// Number of enemies spawned by the wave at `level`.
    #[must_use]
    pub fn count(&self, level: u32) -> u32 {
        self.base_count.saturating_add(level / 2)
    }

    /// Mana credited for each enemy defeated at `level`.
    #[must_use]
    pub fn reward(&self, level: u32) -> f32 {
        self.base_reward + level as f32 * self.reward_step
    }

    /// Complete stat block for the wave at `level`.
    #[must_use]
    pub fn stats(&self, level: u32) -> WaveStats {
        WaveStats {
            hp: self.hp(level),
            speed: self.speed(level),
            count: self.count(level),
            reward: self.reward(level),
        }
    }
}

impl Default for WaveScaling {
    fn default() -> Self {
        Self {
            base_hp: BASE_ENEMY_HP,
            hp_growth: ENEMY_HP_GROWTH,
            base_speed: BASE_ENEMY_SPEED,
            speed_step: ENEMY_SPEED_STEP,
            speed_cap: ENEMY_SPEED_CAP,
            base_count: BASE_ENEMY_COUNT,
            base_reward: BASE_KILL_REWARD,
            reward_step: KILL_REWARD_STEP,
        }
    }
}
