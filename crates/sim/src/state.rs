//! Per-position component metadata.

use serde::{Deserialize, Serialize};

/// Operating mode of a comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparatorMode {
    /// Output the back signal when it is at least the side signal, else 0.
    Compare,
    /// Output the back signal minus the side signal, floored at 0.
    Subtract,
}

impl ComparatorMode {
    /// Flip between compare and subtract.
    pub fn toggled(self) -> Self {
        match self {
            ComparatorMode::Compare => ComparatorMode::Subtract,
            ComparatorMode::Subtract => ComparatorMode::Compare,
        }
    }
}

/// Metadata for an interactive or active component at one position.
///
/// Created lazily on first interaction or first recomputation, destroyed by
/// `remove_state` when the owning block is broken. `strong_power` is only
/// ever set for direct sources (lever, button, plate, repeater, redstone
/// block, observer), never for wires or comparators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentState {
    /// Current output power, 0-15.
    pub power: u8,
    /// Whether this component emits strong power (can extend a wire run).
    pub strong_power: bool,
    /// Whether this component emits weak power.
    pub weak_power: bool,
    /// Repeater propagation delay in redstone ticks, 1-4.
    pub delay: u8,
    /// Comparator operating mode.
    pub mode: ComparatorMode,
    /// Whether a repeater is currently locked by a side repeater.
    pub locked: bool,
}

impl Default for ComponentState {
    fn default() -> Self {
        Self {
            power: 0,
            strong_power: false,
            weak_power: false,
            delay: 1,
            mode: ComparatorMode::Compare,
            locked: false,
        }
    }
}
