// Per-team roster slot capacity tracking and greedy slot assignment.

use serde::{Deserialize, Serialize};

use crate::pool::{Player, Slot};

/// Remaining slot capacity for one team.
///
/// Mutated only by successful pick assignment; a capacity never goes
/// negative. Assignment is greedy over the player's eligible slots in
/// most-restrictive-first order (dedicated position, then flex, then
/// bench), so a multi-eligible player burns the scarcest slot they fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterState {
    capacity: [usize; Slot::COUNT],
}

impl RosterState {
    pub fn new(capacity: [usize; Slot::COUNT]) -> Self {
        RosterState { capacity }
    }

    /// Remaining capacity for a slot.
    pub fn remaining(&self, slot: Slot) -> usize {
        self.capacity[slot.index()]
    }

    /// Total remaining capacity across all slots.
    pub fn total_remaining(&self) -> usize {
        self.capacity.iter().sum()
    }

    /// Whether any eligible slot still has capacity for this player.
    pub fn can_add(&self, player: &Player) -> bool {
        player
            .eligible_slots()
            .into_iter()
            .any(|slot| self.capacity[slot.index()] > 0)
    }

    /// Assign the player to the first eligible slot with capacity and
    /// decrement it. Returns the assigned slot, or None when nothing fits.
    pub fn add_player(&mut self, player: &Player) -> Option<Slot> {
        for slot in player.eligible_slots() {
            if self.capacity[slot.index()] > 0 {
                self.capacity[slot.index()] -= 1;
                return Some(slot);
            }
        }
        None
    }

    /// Whether the player would fill a non-bench slot.
    pub fn has_starting_need(&self, player: &Player) -> bool {
        player
            .eligible_slots()
            .into_iter()
            .any(|slot| slot != Slot::Bench && self.capacity[slot.index()] > 0)
    }

    /// Continuous roster-fit signal: 1/remaining-capacity of the
    /// most-constrained starting-eligible slot, 0.0 when only the bench
    /// would take this player.
    pub fn slot_scarcity(&self, player: &Player) -> f64 {
        let mut min_remaining: Option<usize> = None;
        for slot in player.eligible_slots() {
            if slot == Slot::Bench {
                continue;
            }
            let remaining = self.capacity[slot.index()];
            if remaining > 0 {
                min_remaining = Some(match min_remaining {
                    Some(m) => m.min(remaining),
                    None => remaining,
                });
            }
        }
        match min_remaining {
            Some(m) => 1.0 / m as f64,
            None => 0.0,
        }
    }
}
