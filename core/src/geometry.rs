//! Planar helpers used by every moving entity.

use crate::Vec2;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(from: Vec2, to: Vec2) -> f32 {
    from.distance(to)
}

/// Unit vector pointing from `from` toward `to`.
///
/// Returns `None` when the points coincide or the result would not be
/// finite, so callers never divide by a zero length.
#[must_use]
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let offset = to - from;
    let length = offset.length();
    if length > 0.0 && length.is_finite() {
        Some(offset / length)
    } else {
        None
    }
}

/// Reports whether `point` lies inside the closed disc around `center`.
#[must_use]
pub fn within_range(center: Vec2, point: Vec2, range: f32) -> bool {
    distance(center, point) <= range
}

/// Moves `from` toward `to` by at most `max_travel`, never overshooting.
///
/// Returns the displacement that was applied; zero when the points coincide.
#[must_use]
pub fn step_toward(from: Vec2, to: Vec2, max_travel: f32) -> Vec2 {
    let Some(unit) = direction(from, to) else {
        return Vec2::ZERO;
    };
    let travel = max_travel.max(0.0).min(distance(from, to));
    unit * travel
}
