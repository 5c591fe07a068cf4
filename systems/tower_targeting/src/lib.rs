#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure target selection for defenders.
//!
//! Candidates are scanned in collection order and the first active enemy
//! inside the range wins. Ties are therefore broken by spawn order rather
//! than by distance, which keeps the choice reproducible.

use shadow_gate_core::{geometry, EnemyId, EnemyStatus, Vec2};

/// Minimal enemy description required to evaluate a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetCandidate {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Current location of the enemy.
    pub position: Vec2,
    /// Lifecycle state of the enemy.
    pub status: EnemyStatus,
}

impl TargetCandidate {
    /// Reports whether the candidate may be attacked from `origin`.
    #[must_use]
    pub fn is_engageable(&self, origin: Vec2, range: f32) -> bool {
        self.status == EnemyStatus::Active && geometry::within_range(origin, self.position, range)
    }
}

/// Returns the first engageable candidate in iteration order.
pub fn first_in_range<I>(origin: Vec2, range: f32, candidates: I) -> Option<EnemyId>
where
    I: IntoIterator<Item = TargetCandidate>,
{
    candidates
        .into_iter()
        .find(|candidate| candidate.is_engageable(origin, range))
        .map(|candidate| candidate.id)
}

/// Re-validates a remembered target against the live collection.
///
/// `lookup` resolves the weak reference; a missing, inactive or out of range
/// enemy yields `None`.
pub fn revalidate<F>(origin: Vec2, range: f32, target: Option<EnemyId>, lookup: F) -> Option<EnemyId>
where
    F: FnOnce(EnemyId) -> Option<TargetCandidate>,
{
    let id = target?;
    lookup(id)
        .filter(|candidate| candidate.is_engageable(origin, range))
        .map(|candidate| candidate.id)
}
