#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that folds world events into a session report.

use std::fmt;

use serde::Serialize;
use shadow_gate_core::Event;

/// Aggregated counters describing a simulation session.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SessionReport {
    /// Ticks that advanced the simulation.
    pub ticks_simulated: u64,
    /// Ticks rejected by the frame delta sanity checks.
    pub ticks_skipped: u64,
    /// Sum of all accepted frame deltas.
    pub simulated_seconds: f64,
    /// Waves that started spawning.
    pub waves_started: u32,
    /// Waves whose enemies were all spawned and resolved.
    pub waves_cleared: u32,
    /// Highest level reached.
    pub highest_level: u32,
    /// Enemies that entered the path.
    pub enemies_spawned: u32,
    /// Enemies removed after being defeated.
    pub enemies_defeated: u32,
    /// Enemies that reached the end of the path.
    pub enemies_escaped: u32,
    /// Mana credited for kills.
    pub mana_earned: f32,
    /// Defenders placed successfully.
    pub defenders_placed: u32,
    /// Placement requests that were rejected.
    pub placements_rejected: u32,
    /// Melee attacks that landed.
    pub melee_strikes: u32,
    /// Projectiles released by ranged defenders.
    pub projectiles_launched: u32,
    /// Projectiles that reached their target.
    pub projectile_hits: u32,
    /// Projectiles that vanished because their target was gone.
    pub projectiles_expired: u32,
    /// Level at which the session ended, if it ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over_level: Option<u32>,
}

impl SessionReport {
    /// Enemies resolved either way.
    #[must_use]
    pub fn enemies_resolved(&self) -> u32 {
        self.enemies_defeated + self.enemies_escaped
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "simulated {:.1}s over {} ticks ({} skipped)",
            self.simulated_seconds, self.ticks_simulated, self.ticks_skipped
        )?;
        writeln!(
            f,
            "waves: {} started, {} cleared, highest level {}",
            self.waves_started, self.waves_cleared, self.highest_level
        )?;
        writeln!(
            f,
            "enemies: {} spawned, {} defeated, {} escaped",
            self.enemies_spawned, self.enemies_defeated, self.enemies_escaped
        )?;
        writeln!(
            f,
            "defenders: {} placed, {} rejected; {} strikes, {} of {} projectiles hit",
            self.defenders_placed,
            self.placements_rejected,
            self.melee_strikes,
            self.projectile_hits,
            self.projectiles_launched
        )?;
        write!(f, "mana earned from kills: {:.0}", self.mana_earned)?;
        if let Some(level) = self.game_over_level {
            write!(f, "\ngame over at level {level}")?;
        }
        Ok(())
    }
}

/// Pure analytics system that accumulates counters from world events.
#[derive(Debug, Default)]
pub struct Analytics {
    report: SessionReport,
}

impl Analytics {
    /// Creates a new analytics system with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counters accumulated so far.
    #[must_use]
    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// Consumes the system, yielding the final report.
    #[must_use]
    pub fn into_report(self) -> SessionReport {
        self.report
    }

    /// Folds a batch of world events into the counters.
    pub fn handle(&mut self, events: &[Event]) {
        let report = &mut self.report;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    report.ticks_simulated += 1;
                    report.simulated_seconds += f64::from(*dt);
                }
                Event::TickSkipped { .. } => report.ticks_skipped += 1,
                Event::WaveStarted { level, .. } => {
                    report.waves_started += 1;
                    report.highest_level = report.highest_level.max(*level);
                }
                Event::WaveStartRejected { .. } => {}
                Event::WaveCleared { .. } => report.waves_cleared += 1,
                Event::EnemySpawned { .. } => report.enemies_spawned += 1,
                Event::EnemyDefeated { reward, .. } => {
                    report.enemies_defeated += 1;
                    report.mana_earned += *reward;
                }
                Event::EnemyEscaped { .. } => report.enemies_escaped += 1,
                Event::DefenderPlaced { .. } => report.defenders_placed += 1,
                Event::DefenderPlacementRejected { .. } => report.placements_rejected += 1,
                Event::DefenderStruck { .. } => report.melee_strikes += 1,
                Event::ProjectileLaunched { .. } => report.projectiles_launched += 1,
                Event::ProjectileHit { .. } => report.projectile_hits += 1,
                Event::ProjectileExpired { .. } => report.projectiles_expired += 1,
                Event::GameOver { level } => report.game_over_level = Some(*level),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadow_gate_core::{EnemyId, WaveStats};

    #[test]
    fn kills_accumulate_rewards() {
        let mut analytics = Analytics::new();
        analytics.handle(&[
            Event::EnemyDefeated {
                enemy: EnemyId::new(0),
                reward: 12.0,
            },
            Event::EnemyDefeated {
                enemy: EnemyId::new(1),
                reward: 12.0,
            },
            Event::EnemyEscaped {
                enemy: EnemyId::new(2),
                lives_remaining: 19,
            },
        ]);

        let report = analytics.report();
        assert_eq!(report.enemies_defeated, 2);
        assert_eq!(report.enemies_escaped, 1);
        assert_eq!(report.enemies_resolved(), 3);
        assert_eq!(report.mana_earned, 24.0);
    }

    #[test]
    fn highest_level_tracks_wave_starts() {
        let stats = WaveStats {
            hp: 60.0,
            speed: 85.0,
            count: 10,
            reward: 12.0,
        };
        let mut analytics = Analytics::new();
        analytics.handle(&[
            Event::WaveStarted { level: 1, stats },
            Event::WaveStartRejected { level: 1 },
            Event::WaveStarted { level: 2, stats },
        ]);

        assert_eq!(analytics.report().waves_started, 2);
        assert_eq!(analytics.report().highest_level, 2);
    }

    #[test]
    fn display_mentions_game_over_only_when_it_happened() {
        let mut report = SessionReport::default();
        assert!(!report.to_string().contains("game over"));

        report.game_over_level = Some(4);
        assert!(report.to_string().ends_with("game over at level 4"));
    }
}
