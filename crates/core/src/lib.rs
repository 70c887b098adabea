#![warn(missing_docs)]
//! Core primitives shared across the workspace.

mod block;
mod pos;
mod world;

use serde::{Deserialize, Serialize};

pub use block::{BlockKind, PlateWeight, PowerCategory, TorchMount};
pub use pos::{BlockPos, Facing};
pub use world::{GridWorld, WorldQuery};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }

    /// Ticks elapsed since `earlier`, saturating at zero.
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Maximum redstone power level.
pub const MAX_POWER: u8 = 15;

/// One redstone tick in game ticks (repeater delay granularity).
pub const REDSTONE_TICK: u64 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_tick_advance() {
        let tick = SimTick::ZERO.advance(5);
        assert_eq!(tick, SimTick(5));
        assert_eq!(tick.advance(3).0, 8);
    }

    #[test]
    fn test_sim_tick_since_saturates() {
        assert_eq!(SimTick(10).since(SimTick(4)), 6);
        assert_eq!(SimTick(4).since(SimTick(10)), 0);
    }
}
