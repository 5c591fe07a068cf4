//! Authoritative defender and placement slot state.

use shadow_gate_core::{
    DefenderId, DefenderKind, DefenderSnapshot, EnemyId, PlacementError, SlotId, SlotSnapshot,
    Vec2,
};
use shadow_gate_system_tower_combat::{engage, Attack, CooldownTimer};
use shadow_gate_system_tower_targeting::{first_in_range, revalidate};

use crate::enemies::{self, Enemy};

/// Stationary defender placed on a slot.
#[derive(Clone, Debug)]
pub(crate) struct Defender {
    id: DefenderId,
    kind: DefenderKind,
    slot: SlotId,
    position: Vec2,
    cooldown: CooldownTimer,
    target: Option<EnemyId>,
}

impl Defender {
    fn new(id: DefenderId, kind: DefenderKind, slot: SlotId, position: Vec2) -> Self {
        Self {
            id,
            kind,
            slot,
            position,
            cooldown: CooldownTimer::ready(kind.cooldown()),
            target: None,
        }
    }

    pub(crate) fn id(&self) -> DefenderId {
        self.id
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    /// Runs one combat step against the live enemy collection.
    ///
    /// The remembered target is a weak reference and is re-validated first;
    /// selection itself always rescans in collection order.
    pub(crate) fn advance(&mut self, dt: f32, enemies: &[Enemy]) -> Option<Attack> {
        let origin = self.position;
        let range = self.kind.range();

        self.target = revalidate(origin, range, self.target, |id| {
            enemies::find(enemies, id).map(Enemy::candidate)
        });

        let attack = engage(self.kind, &mut self.cooldown, dt, || {
            first_in_range(origin, range, enemies.iter().map(Enemy::candidate))
        })?;

        self.target = Some(attack.target());
        Some(attack)
    }

    pub(crate) fn snapshot(&self) -> DefenderSnapshot {
        DefenderSnapshot {
            id: self.id,
            kind: self.kind,
            slot: self.slot,
            position: self.position,
            cooldown_remaining: self.cooldown.remaining(),
            target: self.target,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    position: Vec2,
    occupied: bool,
}

/// Registry that stores slots and defenders and allocates identifiers.
#[derive(Debug)]
pub(crate) struct DefenderRegistry {
    slots: Vec<Slot>,
    defenders: Vec<Defender>,
    next_defender_id: DefenderId,
}

impl DefenderRegistry {
    /// Creates an empty registry over the provided slot positions.
    pub(crate) fn new(slots: &[Vec2]) -> Self {
        Self {
            slots: slots
                .iter()
                .map(|&position| Slot {
                    position,
                    occupied: false,
                })
                .collect(),
            defenders: Vec::new(),
            next_defender_id: DefenderId::new(0),
        }
    }

    /// Returns the position of `slot` when it exists and is free.
    pub(crate) fn vacant_slot(&self, slot: SlotId) -> Result<Vec2, PlacementError> {
        let entry = usize::try_from(slot.get())
            .ok()
            .and_then(|index| self.slots.get(index))
            .ok_or(PlacementError::UnknownSlot)?;

        if entry.occupied {
            return Err(PlacementError::Occupied);
        }

        Ok(entry.position)
    }

    /// Marks `slot` occupied and creates a defender on it.
    pub(crate) fn insert(
        &mut self,
        slot: SlotId,
        kind: DefenderKind,
    ) -> Result<DefenderId, PlacementError> {
        let entry = usize::try_from(slot.get())
            .ok()
            .and_then(|index| self.slots.get_mut(index))
            .ok_or(PlacementError::UnknownSlot)?;

        if entry.occupied {
            return Err(PlacementError::Occupied);
        }
        entry.occupied = true;

        let id = self.next_defender_id;
        self.next_defender_id = DefenderId::new(id.get().saturating_add(1));
        self.defenders.push(Defender::new(id, kind, slot, entry.position));
        Ok(id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Defender> {
        self.defenders.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Defender> {
        self.defenders.iter_mut()
    }

    pub(crate) fn slot_snapshots(&self) -> Vec<SlotSnapshot> {
        self.slots
            .iter()
            .zip(0_u32..)
            .map(|(slot, index)| SlotSnapshot {
                id: SlotId::new(index),
                position: slot.position,
                occupied: slot.occupied,
            })
            .collect()
    }
}
