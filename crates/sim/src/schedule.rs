//! Scheduled delayed transitions.

use serde::{Deserialize, Serialize};
use voxelvolt_core::{BlockPos, SimTick};

/// Priority for pulse expiries (button and observer deactivation).
pub const PRIORITY_PULSE: u8 = 0;
/// Priority for repeater output application.
pub const PRIORITY_REPEATER: u8 = 1;
/// Priority for generic recomputation requests.
pub const PRIORITY_RECALC: u8 = 2;

/// A delayed transition waiting for its trigger tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledUpdate {
    /// Position the update applies to.
    pub pos: BlockPos,
    /// Tick at (or past) which the update fires.
    pub trigger_tick: SimTick,
    /// Execution order within one tick; lower fires first.
    pub priority: u8,
}

/// Queue of scheduled updates, drained once per tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateQueue {
    entries: Vec<ScheduledUpdate>,
}

impl UpdateQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an update.
    pub fn push(&mut self, pos: BlockPos, trigger_tick: SimTick, priority: u8) {
        self.entries.push(ScheduledUpdate {
            pos,
            trigger_tick,
            priority,
        });
    }

    /// Drop every pending entry for a position (e.g. a re-pressed button or a
    /// repeater whose input settled back before its delay elapsed).
    pub fn cancel(&mut self, pos: BlockPos) {
        self.entries.retain(|entry| entry.pos != pos);
    }

    /// Check whether any entry is pending for a position.
    pub fn has_pending(&self, pos: BlockPos) -> bool {
        self.entries.iter().any(|entry| entry.pos == pos)
    }

    /// Remove and return every entry due at `now`, in ascending
    /// (priority, position) order.
    pub fn take_due(&mut self, now: SimTick) -> Vec<ScheduledUpdate> {
        let mut due: Vec<ScheduledUpdate> = self
            .entries
            .iter()
            .copied()
            .filter(|entry| entry.trigger_tick <= now)
            .collect();
        self.entries.retain(|entry| entry.trigger_tick > now);
        due.sort_by_key(|entry| (entry.priority, entry.pos));
        due
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
