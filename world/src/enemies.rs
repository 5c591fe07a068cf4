//! Enemy state owned by the world.

use shadow_gate_core::{EnemyId, EnemySnapshot, EnemyStatus, Facing, Vec2, WaveStats};
use shadow_gate_system_movement::{Movement, PathProgress, PathStep};
use shadow_gate_system_tower_targeting::TargetCandidate;

/// Single enemy walking the path.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    id: EnemyId,
    progress: PathProgress,
    hp: f32,
    max_hp: f32,
    speed: f32,
    reward: f32,
    status: EnemyStatus,
    facing: Facing,
}

impl Enemy {
    /// Creates an active enemy at `position` using the wave's stats.
    pub(crate) fn spawn(id: EnemyId, position: Vec2, stats: WaveStats) -> Self {
        Self {
            id,
            progress: PathProgress::starting_at(position),
            hp: stats.hp,
            max_hp: stats.hp,
            speed: stats.speed,
            reward: stats.reward,
            status: EnemyStatus::Active,
            facing: Facing::Right,
        }
    }

    pub(crate) fn id(&self) -> EnemyId {
        self.id
    }

    pub(crate) fn status(&self) -> EnemyStatus {
        self.status
    }

    pub(crate) fn is_active(&self) -> bool {
        self.status == EnemyStatus::Active
    }

    /// Mana credited when the enemy is removed as defeated.
    pub(crate) fn reward(&self) -> f32 {
        self.reward
    }

    /// Advances the enemy along the path.
    ///
    /// An enemy whose health already dropped to zero is marked defeated and
    /// does not move on that tick.
    pub(crate) fn advance(&mut self, dt: f32, path: &[Vec2], movement: &Movement) {
        if !self.is_active() {
            return;
        }

        if self.hp <= 0.0 {
            self.status = EnemyStatus::Defeated;
            return;
        }

        match movement.advance(&mut self.progress, self.speed, dt, path) {
            PathStep::Moved { delta } => self.facing = Facing::from_delta(delta, self.facing),
            PathStep::Holding => {}
            PathStep::Completed => self.status = EnemyStatus::Escaped,
        }
    }

    /// Subtracts `damage` from the enemy's health.
    ///
    /// Health may go negative; the enemy is marked defeated as soon as it
    /// reaches zero so nothing else targets it during the same tick.
    pub(crate) fn take_damage(&mut self, damage: f32) {
        if !self.is_active() {
            return;
        }

        self.hp -= damage;
        if self.hp <= 0.0 {
            self.status = EnemyStatus::Defeated;
        }
    }

    pub(crate) fn candidate(&self) -> TargetCandidate {
        TargetCandidate {
            id: self.id,
            position: self.progress.position(),
            status: self.status,
        }
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.progress.position(),
            hp: self.hp,
            max_hp: self.max_hp,
            speed: self.speed,
            waypoint_index: self.progress.waypoint_index(),
            facing: self.facing,
        }
    }
}

/// Resolves a weak enemy reference against the live collection.
///
/// Identifiers are allocated monotonically and compaction preserves order, so
/// the collection is always sorted by identifier.
pub(crate) fn find(enemies: &[Enemy], id: EnemyId) -> Option<&Enemy> {
    enemies
        .binary_search_by_key(&id, Enemy::id)
        .ok()
        .map(|index| &enemies[index])
}

/// Mutable counterpart of [`find`].
pub(crate) fn find_mut(enemies: &mut [Enemy], id: EnemyId) -> Option<&mut Enemy> {
    enemies
        .binary_search_by_key(&id, Enemy::id)
        .ok()
        .map(move |index| &mut enemies[index])
}
