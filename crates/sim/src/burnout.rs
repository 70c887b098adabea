//! Torch burnout protection.
//!
//! A torch that flips too often in a short window is suppressed, emulating
//! the vanilla safeguard against self-oscillating torch circuits.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use voxelvolt_core::{BlockPos, SimTick};

/// Trailing window, in game ticks, over which toggles are counted.
pub const BURNOUT_WINDOW_TICKS: u64 = 100;

/// Toggle count within the window at which a torch burns out.
pub const BURNOUT_THRESHOLD: usize = 8;

/// Sliding-window toggle history per torch position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BurnoutTracker {
    toggles: BTreeMap<BlockPos, VecDeque<SimTick>>,
}

impl BurnoutTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an actual output transition at `now`.
    pub fn record_toggle(&mut self, pos: BlockPos, now: SimTick) {
        let history = self.toggles.entry(pos).or_default();
        Self::prune(history, now);
        history.push_back(now);
    }

    /// Check whether the torch at `pos` is currently burned out.
    ///
    /// Toggles older than the window are discarded before counting, so a
    /// burned-out torch recovers once enough time passes without flipping.
    pub fn is_burned_out(&mut self, pos: BlockPos, now: SimTick) -> bool {
        match self.toggles.get_mut(&pos) {
            Some(history) => {
                Self::prune(history, now);
                history.len() >= BURNOUT_THRESHOLD
            }
            None => false,
        }
    }

    /// Toggles currently inside the window for `pos`.
    pub fn recent_toggles(&mut self, pos: BlockPos, now: SimTick) -> usize {
        match self.toggles.get_mut(&pos) {
            Some(history) => {
                Self::prune(history, now);
                history.len()
            }
            None => 0,
        }
    }

    /// Forget the history for a position (block removed).
    pub fn remove(&mut self, pos: BlockPos) {
        self.toggles.remove(&pos);
    }

    /// Forget every history.
    pub fn clear(&mut self) {
        self.toggles.clear();
    }

    fn prune(history: &mut VecDeque<SimTick>, now: SimTick) {
        while let Some(&front) = history.front() {
            if now.since(front) >= BURNOUT_WINDOW_TICKS {
                history.pop_front();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_burned_out_below_threshold() {
        let mut tracker = BurnoutTracker::new();
        let pos = BlockPos::new(0, 1, 0);
        for tick in 0..(BURNOUT_THRESHOLD as u64 - 1) {
            tracker.record_toggle(pos, SimTick(tick));
        }
        assert!(!tracker.is_burned_out(pos, SimTick(10)));
    }

    #[test]
    fn test_burns_out_at_threshold() {
        let mut tracker = BurnoutTracker::new();
        let pos = BlockPos::new(0, 1, 0);
        for tick in 0..BURNOUT_THRESHOLD as u64 {
            tracker.record_toggle(pos, SimTick(tick));
        }
        assert!(tracker.is_burned_out(pos, SimTick(8)));
    }

    #[test]
    fn test_recovers_after_window() {
        let mut tracker = BurnoutTracker::new();
        let pos = BlockPos::new(0, 1, 0);
        for tick in 0..BURNOUT_THRESHOLD as u64 {
            tracker.record_toggle(pos, SimTick(tick));
        }
        assert!(tracker.is_burned_out(pos, SimTick(8)));

        // All eight toggles age out of the window.
        let later = SimTick(8 + BURNOUT_WINDOW_TICKS);
        assert!(!tracker.is_burned_out(pos, later));
        assert_eq!(tracker.recent_toggles(pos, later), 0);
    }

    #[test]
    fn test_remove_forgets_history() {
        let mut tracker = BurnoutTracker::new();
        let pos = BlockPos::new(0, 1, 0);
        for tick in 0..BURNOUT_THRESHOLD as u64 {
            tracker.record_toggle(pos, SimTick(tick));
        }
        tracker.remove(pos);
        assert!(!tracker.is_burned_out(pos, SimTick(8)));
    }
}
