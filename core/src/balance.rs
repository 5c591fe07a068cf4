//! Compile-time balance data shared by every system.
//!
//! Values are centralised here so systems never embed literals. Hosts cannot
//! change them at runtime.

use crate::DefenderKind;

/// Mana available when a session starts.
pub const STARTING_MANA: f32 = 100.0;

/// Lives available when a session starts.
pub const STARTING_LIVES: u32 = 20;

/// Mana gained per second while a wave is running.
pub const MANA_REGEN_PER_SECOND: f32 = 1.0;

/// Largest frame delta, in seconds, that the engine accepts.
pub const MAX_TICK_SECONDS: f32 = 0.1;

/// Seconds between two consecutive spawns of a wave.
pub const SPAWN_INTERVAL_SECONDS: f32 = 1.5;

/// Health of a level zero enemy before exponential growth.
pub const BASE_ENEMY_HP: f64 = 50.0;

/// Per-level multiplier applied to enemy health.
pub const ENEMY_HP_GROWTH: f64 = 1.2;

/// Speed of a level zero enemy in world units per second.
pub const BASE_ENEMY_SPEED: f32 = 80.0;

/// Speed added per level.
pub const ENEMY_SPEED_STEP: f32 = 5.0;

/// Upper bound on enemy speed regardless of level.
pub const ENEMY_SPEED_CAP: f32 = 200.0;

/// Enemies spawned by a level zero wave; one more is added every other level.
pub const BASE_ENEMY_COUNT: u32 = 10;

/// Mana credited for a level zero kill.
pub const BASE_KILL_REWARD: f32 = 10.0;

/// Mana added to the kill reward per level.
pub const KILL_REWARD_STEP: f32 = 2.0;

/// Distance below which an enemy counts as having reached a waypoint.
pub const WAYPOINT_ARRIVAL_RADIUS: f32 = 5.0;

/// Distance below which a projectile counts as having hit its target.
pub const PROJECTILE_HIT_RADIUS: f32 = 10.0;

/// Flight speed of projectiles in world units per second.
pub const PROJECTILE_SPEED: f32 = 400.0;

impl DefenderKind {
    /// Radius, in world units, within which the defender acquires targets.
    #[must_use]
    pub const fn range(self) -> f32 {
        match self {
            Self::Melee => 60.0,
            Self::Ranged => 250.0,
        }
    }

    /// Damage dealt by a single attack.
    #[must_use]
    pub const fn damage(self) -> f32 {
        match self {
            Self::Melee => 45.0,
            Self::Ranged => 20.0,
        }
    }

    /// Seconds the defender waits between attacks.
    #[must_use]
    pub const fn cooldown(self) -> f32 {
        match self {
            Self::Melee => 0.8,
            Self::Ranged => 1.2,
        }
    }

    /// Mana deducted when the defender is placed.
    #[must_use]
    pub const fn cost(self) -> f32 {
        match self {
            Self::Melee => 50.0,
            Self::Ranged => 100.0,
        }
    }

    /// Reports whether attacks travel as projectiles instead of landing instantly.
    #[must_use]
    pub const fn fires_projectiles(self) -> bool {
        matches!(self, Self::Ranged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn melee_parameters_stay_within_tuning_bands() {
        let kind = DefenderKind::Melee;
        assert!((60.0..=80.0).contains(&kind.range()));
        assert!((25.0..=45.0).contains(&kind.damage()));
        assert!((kind.cooldown() - 0.8).abs() < f32::EPSILON);
        assert!(!kind.fires_projectiles());
    }

    #[test]
    fn ranged_parameters_stay_within_tuning_bands() {
        let kind = DefenderKind::Ranged;
        assert!((250.0..=300.0).contains(&kind.range()));
        assert!((12.0..=25.0).contains(&kind.damage()));
        assert!((1.2..=1.5).contains(&kind.cooldown()));
        assert!(kind.fires_projectiles());
    }

    #[test]
    fn ranged_defenders_cost_twice_as_much() {
        assert_eq!(DefenderKind::Melee.cost(), 50.0);
        assert_eq!(DefenderKind::Ranged.cost(), 100.0);
    }
}
