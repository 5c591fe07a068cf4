#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns defender cooldowns and targets into attack intents.
//!
//! The system never touches enemies. It answers with an [`Attack`] value and
//! leaves resolution to the caller: strikes land immediately, launches spawn a
//! projectile that resolves later.

use shadow_gate_core::{DefenderKind, EnemyId};

/// Countdown separating two attacks of a defender.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CooldownTimer {
    duration: f32,
    remaining: f32,
}

impl CooldownTimer {
    /// Creates a timer that is ready to fire immediately.
    #[must_use]
    pub const fn ready(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
        }
    }

    /// Full length of the cooldown in seconds.
    #[must_use]
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds left before the next attack is allowed.
    #[must_use]
    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Reports whether the cooldown has elapsed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Counts the timer down by `dt`, flooring at zero.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Arms the timer for a full cooldown.
    pub fn restart(&mut self) {
        self.remaining = self.duration;
    }
}

/// Attack intent produced for a defender that found a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Attack {
    /// Damage lands on the target right away.
    Strike {
        /// Enemy receiving the damage.
        target: EnemyId,
        /// Damage dealt.
        damage: f32,
    },
    /// A projectile carrying the damage must be spawned toward the target.
    Launch {
        /// Enemy the projectile commits to.
        target: EnemyId,
        /// Damage carried by the projectile.
        damage: f32,
    },
}

impl Attack {
    /// Enemy the attack is aimed at.
    #[must_use]
    pub const fn target(&self) -> EnemyId {
        match self {
            Self::Strike { target, .. } | Self::Launch { target, .. } => *target,
        }
    }

    /// Damage the attack carries.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        match self {
            Self::Strike { damage, .. } | Self::Launch { damage, .. } => *damage,
        }
    }
}

/// Advances a defender's cooldown and, once ready, acquires a target.
///
/// `acquire` runs only when the cooldown has elapsed. Finding no target leaves
/// the timer at zero so the defender scans again on the next call; finding one
/// restarts the cooldown.
pub fn engage<F>(
    kind: DefenderKind,
    cooldown: &mut CooldownTimer,
    dt: f32,
    acquire: F,
) -> Option<Attack>
where
    F: FnOnce() -> Option<EnemyId>,
{
    cooldown.tick(dt);
    if !cooldown.is_ready() {
        return None;
    }

    let target = acquire()?;
    cooldown.restart();

    let damage = kind.damage();
    if kind.fires_projectiles() {
        Some(Attack::Launch { target, damage })
    } else {
        Some(Attack::Strike { target, damage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_floors_at_zero() {
        let mut timer = CooldownTimer::ready(0.8);
        timer.restart();
        timer.tick(5.0);
        assert_eq!(timer.remaining(), 0.0);
        assert!(timer.is_ready());
    }

    #[test]
    fn melee_defenders_strike() {
        let mut timer = CooldownTimer::ready(DefenderKind::Melee.cooldown());
        let attack = engage(DefenderKind::Melee, &mut timer, 0.016, || {
            Some(EnemyId::new(3))
        });

        assert_eq!(
            attack,
            Some(Attack::Strike {
                target: EnemyId::new(3),
                damage: DefenderKind::Melee.damage(),
            })
        );
        assert_eq!(timer.remaining(), DefenderKind::Melee.cooldown());
    }

    #[test]
    fn ranged_defenders_launch() {
        let mut timer = CooldownTimer::ready(DefenderKind::Ranged.cooldown());
        let attack = engage(DefenderKind::Ranged, &mut timer, 0.016, || {
            Some(EnemyId::new(8))
        });

        assert!(matches!(attack, Some(Attack::Launch { .. })));
        assert_eq!(attack.map(|attack| attack.target()), Some(EnemyId::new(8)));
    }

    #[test]
    fn cooling_defenders_do_not_scan() {
        let mut timer = CooldownTimer::ready(1.0);
        timer.restart();
        let mut scanned = false;

        let attack = engage(DefenderKind::Melee, &mut timer, 0.25, || {
            scanned = true;
            Some(EnemyId::new(1))
        });

        assert!(attack.is_none());
        assert!(!scanned);
        assert_eq!(timer.remaining(), 0.75);
    }

    #[test]
    fn missing_target_keeps_the_defender_ready() {
        let mut timer = CooldownTimer::ready(1.0);

        assert!(engage(DefenderKind::Ranged, &mut timer, 0.1, || None).is_none());
        assert!(timer.is_ready());

        let attack = engage(DefenderKind::Ranged, &mut timer, 0.1, || Some(EnemyId::new(2)));
        assert!(attack.is_some());
        assert_eq!(timer.remaining(), 1.0);
    }
}
