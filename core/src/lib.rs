#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Shadow Gate engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing the
//! outcome. Hosts observe the simulation exclusively through the owned
//! snapshot views declared here, so a renderer never borrows live state.

pub mod balance;
pub mod geometry;

pub use glam::Vec2;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Describes the lifecycle phase of a simulation session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the simulation normally.
    Running,
    /// Lives ran out; the session is frozen but remains queryable.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by a host-supplied frame delta.
    Tick {
        /// Wall-clock seconds elapsed since the previous frame.
        dt: f32,
    },
    /// Requests that the next wave begins spawning.
    StartWave,
    /// Requests placement of a defender on a pre-configured slot.
    PlaceDefender {
        /// Slot that should host the defender.
        slot: SlotId,
        /// Kind of defender to construct.
        kind: DefenderKind,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Seconds of simulated time applied by the tick.
        dt: f32,
    },
    /// Reports that a frame delta was rejected and no simulation occurred.
    TickSkipped {
        /// Delta that failed the sanity checks.
        dt: f32,
    },
    /// Confirms that a new wave started spawning.
    WaveStarted {
        /// Level reached by starting the wave.
        level: u32,
        /// Stats every enemy of the wave spawns with.
        stats: WaveStats,
    },
    /// Reports that a wave start request was ignored.
    WaveStartRejected {
        /// Level that was current when the request arrived.
        level: u32,
    },
    /// Announces that the current wave has no pending or active enemies left.
    WaveCleared {
        /// Level of the wave that finished.
        level: u32,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Spawn location, always the first waypoint.
        position: Vec2,
    },
    /// Confirms that a defeated enemy was removed and its reward credited.
    EnemyDefeated {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// Mana credited for the kill.
        reward: f32,
    },
    /// Confirms that an enemy reached the end of the path.
    EnemyEscaped {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// Lives left after the penalty was applied.
        lives_remaining: u32,
    },
    /// Confirms that a defender was placed into the world.
    DefenderPlaced {
        /// Identifier assigned to the defender.
        defender: DefenderId,
        /// Slot the defender occupies.
        slot: SlotId,
        /// Kind of defender that was placed.
        kind: DefenderKind,
    },
    /// Reports that a defender placement request was rejected.
    DefenderPlacementRejected {
        /// Slot provided in the request.
        slot: SlotId,
        /// Kind provided in the request.
        kind: DefenderKind,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a melee defender struck its target.
    DefenderStruck {
        /// Defender that attacked.
        defender: DefenderId,
        /// Enemy that received the damage.
        enemy: EnemyId,
        /// Damage applied.
        damage: f32,
    },
    /// Confirms that a ranged defender released a projectile.
    ProjectileLaunched {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Defender that fired.
        defender: DefenderId,
        /// Enemy the projectile is committed to.
        enemy: EnemyId,
    },
    /// Confirms that a projectile reached its target and applied damage.
    ProjectileHit {
        /// Projectile that connected.
        projectile: ProjectileId,
        /// Enemy that received the damage.
        enemy: EnemyId,
        /// Damage applied.
        damage: f32,
    },
    /// Reports that a projectile lost its target and vanished harmlessly.
    ProjectileExpired {
        /// Projectile that was discarded.
        projectile: ProjectileId,
    },
    /// Announces that the last life was lost.
    GameOver {
        /// Level that was being played when the session ended.
        level: u32,
    },
}

/// Lifecycle state of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyStatus {
    /// Walking the path and eligible for targeting.
    Active,
    /// Health dropped to zero or below.
    Defeated,
    /// Walked past the final waypoint.
    Escaped,
}

/// Horizontal orientation hint derived from the latest movement delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Last horizontal movement decreased `x`.
    Left,
    /// Last horizontal movement increased `x`, or no movement happened yet.
    Right,
}

impl Facing {
    /// Derives the facing from a movement delta, keeping `current` when the
    /// delta has no horizontal component.
    #[must_use]
    pub fn from_delta(delta: Vec2, current: Facing) -> Self {
        if delta.x > 0.0 {
            Facing::Right
        } else if delta.x < 0.0 {
            Facing::Left
        } else {
            current
        }
    }
}

/// Types of defenders that can be placed on slots.
///
/// Both kinds share the same behaviour; they only differ in the constant
/// parameters exposed by the [`balance`] table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefenderKind {
    /// Short range defender that damages its target immediately.
    Melee,
    /// Long range defender that fires homing projectiles.
    Ranged,
}

/// Stats applied to every enemy spawned during a wave.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveStats {
    /// Starting health of each enemy.
    pub hp: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Number of enemies the wave spawns.
    pub count: u32,
    /// Mana credited for each defeated enemy.
    pub reward: f32,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Index of a placement slot within the configured layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u32);

impl SlotId {
    /// Creates a new slot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Fixed battlefield geometry: the enemy route and the defender slots.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    path: Vec<Vec2>,
    slots: Vec<Vec2>,
}

impl Layout {
    /// Validates and captures a layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::PathTooShort`] when fewer than two waypoints are
    /// provided and [`LayoutError::NonFinite`] when any coordinate is NaN or
    /// infinite.
    pub fn new(path: Vec<Vec2>, slots: Vec<Vec2>) -> Result<Self, LayoutError> {
        if path.len() < 2 {
            return Err(LayoutError::PathTooShort { len: path.len() });
        }

        if path.iter().chain(slots.iter()).any(|point| !point.is_finite()) {
            return Err(LayoutError::NonFinite);
        }

        Ok(Self { path, slots })
    }

    /// Ordered waypoints enemies traverse.
    #[must_use]
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Positions of the placement slots, indexed by [`SlotId`].
    #[must_use]
    pub fn slots(&self) -> &[Vec2] {
        &self.slots
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            path: vec![
                Vec2::new(0.0, 200.0),
                Vec2::new(300.0, 200.0),
                Vec2::new(300.0, 400.0),
                Vec2::new(800.0, 400.0),
            ],
            slots: vec![Vec2::new(150.0, 150.0), Vec2::new(400.0, 300.0)],
        }
    }
}

/// Reasons a layout may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The path does not contain a start and an end point.
    #[error("path needs at least two waypoints, got {len}")]
    PathTooShort {
        /// Number of waypoints supplied.
        len: usize,
    },
    /// A waypoint or slot coordinate is NaN or infinite.
    #[error("layout coordinates must be finite")]
    NonFinite,
}

/// Reasons a defender placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The slot index does not exist in the layout.
    #[error("no placement slot with that index")]
    UnknownSlot,
    /// The slot already hosts a defender.
    #[error("placement slot is already occupied")]
    Occupied,
    /// Current mana is below the defender's cost.
    #[error("not enough mana for this defender")]
    InsufficientMana,
    /// The session ended; the battlefield is frozen.
    #[error("the session is over")]
    SessionOver,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current location in world units.
    pub position: Vec2,
    /// Remaining health.
    pub hp: f32,
    /// Health at spawn time.
    pub max_hp: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Index of the waypoint the enemy is heading toward.
    pub waypoint_index: usize,
    /// Orientation hint for presentation.
    pub facing: Facing,
}

/// Read-only snapshot describing all live enemies in collection order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single defender's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Identifier allocated to the defender by the world.
    pub id: DefenderId,
    /// Kind of defender that was placed.
    pub kind: DefenderKind,
    /// Slot hosting the defender.
    pub slot: SlotId,
    /// Location of the defender, identical to its slot position.
    pub position: Vec2,
    /// Seconds left before the defender may attack again.
    pub cooldown_remaining: f32,
    /// Enemy attacked most recently, if it is still a valid target.
    pub target: Option<EnemyId>,
}

/// Read-only snapshot describing all placed defenders.
#[derive(Clone, Debug, Default)]
pub struct DefenderView {
    snapshots: Vec<DefenderSnapshot>,
}

impl DefenderView {
    /// Creates a new defender view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<DefenderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured defender snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &DefenderSnapshot> {
        self.snapshots.iter()
    }

    /// Number of defenders captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no defenders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<DefenderSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Current location in world units.
    pub position: Vec2,
    /// Enemy the projectile is homing on.
    pub target: EnemyId,
    /// Damage carried by the projectile.
    pub damage: f32,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of projectiles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no projectiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a placement slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotSnapshot {
    /// Index of the slot within the layout.
    pub id: SlotId,
    /// Location of the slot in world units.
    pub position: Vec2,
    /// Indicates whether a defender already stands on the slot.
    pub occupied: bool,
}

/// Read-only snapshot describing every placement slot.
#[derive(Clone, Debug, Default)]
pub struct SlotView {
    snapshots: Vec<SlotSnapshot>,
}

impl SlotView {
    /// Creates a new slot view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<SlotSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured slot snapshots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &SlotSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a slot by identifier.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&SlotSnapshot> {
        self.snapshots
            .binary_search_by_key(&slot, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }
}

#[cfg(test)]
mod tests {
    use super::{DefenderKind, Facing, Layout, LayoutError, SlotId, SlotSnapshot, SlotView, Vec2};

    #[test]
    fn default_layout_is_valid() {
        let layout = Layout::default();
        let rebuilt = Layout::new(layout.path().to_vec(), layout.slots().to_vec());
        assert_eq!(rebuilt, Ok(layout));
    }

    #[test]
    fn layout_rejects_single_waypoint() {
        let result = Layout::new(vec![Vec2::ZERO], Vec::new());
        assert_eq!(result, Err(LayoutError::PathTooShort { len: 1 }));
    }

    #[test]
    fn layout_rejects_non_finite_slots() {
        let result = Layout::new(
            vec![Vec2::ZERO, Vec2::new(10.0, 0.0)],
            vec![Vec2::new(f32::NAN, 0.0)],
        );
        assert_eq!(result, Err(LayoutError::NonFinite));
    }

    #[test]
    fn facing_keeps_orientation_on_vertical_moves() {
        let facing = Facing::from_delta(Vec2::new(-1.0, 0.0), Facing::Right);
        assert_eq!(facing, Facing::Left);
        assert_eq!(Facing::from_delta(Vec2::new(0.0, 3.0), facing), Facing::Left);
        assert_eq!(Facing::from_delta(Vec2::new(0.5, 0.0), facing), Facing::Right);
    }

    #[test]
    fn slot_view_resolves_by_identifier() {
        let view = SlotView::from_snapshots(vec![
            SlotSnapshot {
                id: SlotId::new(1),
                position: Vec2::new(4.0, 4.0),
                occupied: true,
            },
            SlotSnapshot {
                id: SlotId::new(0),
                position: Vec2::new(1.0, 1.0),
                occupied: false,
            },
        ]);

        assert_eq!(view.get(SlotId::new(1)).map(|slot| slot.occupied), Some(true));
        assert!(view.get(SlotId::new(2)).is_none());
    }

    #[test]
    fn defender_kind_parses_from_lowercase_names() {
        use serde::de::{value::Error, value::StrDeserializer, Deserialize, IntoDeserializer};

        let deserializer: StrDeserializer<'_, Error> = "ranged".into_deserializer();
        let kind = DefenderKind::deserialize(deserializer).expect("known kind");
        assert_eq!(kind, DefenderKind::Ranged);
    }
}
