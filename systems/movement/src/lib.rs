#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks entities along a waypoint path.
//!
//! The path is a fixed, ordered list of points. A walker heads toward the
//! waypoint at its current index and switches to the next one once it comes
//! within the arrival radius. Passing the final waypoint completes the walk.

use shadow_gate_core::{balance::WAYPOINT_ARRIVAL_RADIUS, geometry, Vec2};

/// Position and route progress of a single walker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathProgress {
    position: Vec2,
    waypoint_index: usize,
}

impl PathProgress {
    /// Places a walker at `position`, heading for the first waypoint.
    #[must_use]
    pub const fn starting_at(position: Vec2) -> Self {
        Self {
            position,
            waypoint_index: 0,
        }
    }

    /// Current location of the walker.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Index of the waypoint the walker is heading toward.
    ///
    /// Never decreases; equals the path length once the walk completed.
    #[must_use]
    pub const fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }
}

/// Outcome of advancing a walker by one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathStep {
    /// The walker moved by the contained displacement.
    Moved {
        /// Displacement applied this step.
        delta: Vec2,
    },
    /// The walker stayed in place.
    Holding,
    /// The walker passed the final waypoint and left the path.
    Completed,
}

/// Pure system that advances walkers along a shared path.
#[derive(Clone, Copy, Debug)]
pub struct Movement {
    arrival_radius: f32,
}

impl Movement {
    /// Creates a movement system using the provided arrival radius.
    #[must_use]
    pub const fn new(arrival_radius: f32) -> Self {
        Self { arrival_radius }
    }

    /// Advances `progress` by `speed * dt` toward its current waypoint.
    ///
    /// Arrival is evaluated before moving: a walker within the arrival radius
    /// switches to the next waypoint and finishes this step toward the one it
    /// just reached. Travel is clamped to the remaining distance so a walker
    /// never overshoots and oscillates around a waypoint. A walker whose index
    /// is already past the path holds still.
    pub fn advance(
        &self,
        progress: &mut PathProgress,
        speed: f32,
        dt: f32,
        path: &[Vec2],
    ) -> PathStep {
        let Some(&waypoint) = path.get(progress.waypoint_index) else {
            return PathStep::Holding;
        };

        let remaining = geometry::distance(progress.position, waypoint);
        if remaining < self.arrival_radius {
            progress.waypoint_index += 1;
            if progress.waypoint_index >= path.len() {
                return PathStep::Completed;
            }
        }

        let delta = geometry::step_toward(progress.position, waypoint, speed * dt);
        if delta == Vec2::ZERO {
            return PathStep::Holding;
        }

        progress.position += delta;
        PathStep::Moved { delta }
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(WAYPOINT_ARRIVAL_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path() -> Vec<Vec2> {
        vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]
    }

    #[test]
    fn walker_on_first_waypoint_switches_target_without_moving() {
        let movement = Movement::default();
        let mut progress = PathProgress::starting_at(Vec2::ZERO);

        let step = movement.advance(&mut progress, 50.0, 0.1, &straight_path());

        assert_eq!(step, PathStep::Holding);
        assert_eq!(progress.waypoint_index(), 1);
        assert_eq!(progress.position(), Vec2::ZERO);
    }

    #[test]
    fn walker_moves_at_speed_toward_waypoint() {
        let movement = Movement::default();
        let mut progress = PathProgress {
            position: Vec2::new(10.0, 0.0),
            waypoint_index: 1,
        };

        let step = movement.advance(&mut progress, 50.0, 0.1, &straight_path());

        assert_eq!(
            step,
            PathStep::Moved {
                delta: Vec2::new(5.0, 0.0)
            }
        );
        assert_eq!(progress.position(), Vec2::new(15.0, 0.0));
    }

    #[test]
    fn reaching_last_waypoint_completes_without_moving() {
        let movement = Movement::default();
        let mut progress = PathProgress {
            position: Vec2::new(97.0, 0.0),
            waypoint_index: 1,
        };

        let step = movement.advance(&mut progress, 50.0, 0.1, &straight_path());

        assert_eq!(step, PathStep::Completed);
        assert_eq!(progress.position(), Vec2::new(97.0, 0.0));
        assert_eq!(progress.waypoint_index(), 2);
    }

    #[test]
    fn out_of_range_index_is_a_no_op() {
        let movement = Movement::default();
        let mut progress = PathProgress {
            position: Vec2::new(3.0, 4.0),
            waypoint_index: 7,
        };

        let step = movement.advance(&mut progress, 50.0, 0.1, &straight_path());

        assert_eq!(step, PathStep::Holding);
        assert_eq!(progress.waypoint_index(), 7);
    }

    #[test]
    fn empty_path_holds_walker() {
        let movement = Movement::default();
        let mut progress = PathProgress::starting_at(Vec2::ZERO);
        assert_eq!(movement.advance(&mut progress, 10.0, 0.1, &[]), PathStep::Holding);
    }
}
