//! Block kinds and power-behavior categories.
//!
//! The simulation never branches on raw block ids; every block the engine can
//! encounter is one of these tagged kinds, and the kind-to-behavior mapping
//! lives in a single `category()` match.

use crate::pos::Facing;
use serde::{Deserialize, Serialize};

/// Weight class of a pressure plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlateWeight {
    /// Binary plate: any occupancy emits full power.
    Simple,
    /// Light weighted plate: power equals the entity count.
    Light,
    /// Heavy weighted plate: power is the entity count divided by ten,
    /// rounded up.
    Heavy,
}

impl PlateWeight {
    /// Power emitted for `entity_count` occupants, clamped to 0-15.
    pub fn power_for(self, entity_count: u32) -> u8 {
        const MAX: u32 = crate::MAX_POWER as u32;
        match self {
            PlateWeight::Simple => crate::MAX_POWER,
            PlateWeight::Light => entity_count.min(MAX) as u8,
            PlateWeight::Heavy => {
                // Ceiling division: one power level per ten entities.
                (entity_count.saturating_add(9) / 10).min(MAX) as u8
            }
        }
    }
}

/// How a torch is attached to its mount block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TorchMount {
    /// Standing on the block below.
    Floor,
    /// Attached to a wall; the torch points in the given facing, so its mount
    /// block sits in the opposite direction.
    Wall(Facing),
}

/// Every block kind the redstone engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Empty space.
    Air,
    /// Opaque full cube with no redstone behavior of its own.
    Solid,
    /// Redstone wire; transmits power with one level of decay per block.
    Wire,
    /// Lever; toggled power source.
    Lever,
    /// Button; momentary power source.
    Button {
        /// Wooden buttons hold their pulse longer than stone ones.
        wooden: bool,
    },
    /// Pressure plate; powered while occupied.
    PressurePlate {
        /// Weight class deciding how occupancy maps to power.
        weight: PlateWeight,
    },
    /// Redstone torch; inverts the power state of its mount block.
    Torch {
        /// Attachment of the torch to its mount block.
        mount: TorchMount,
    },
    /// Repeater; refreshes a signal to full strength after a configured delay.
    Repeater {
        /// Output direction.
        facing: Facing,
    },
    /// Comparator; compares or subtracts its side signal from its back signal.
    Comparator {
        /// Output direction.
        facing: Facing,
    },
    /// Observer; emits a short pulse when triggered.
    Observer {
        /// Output direction.
        facing: Facing,
    },
    /// Block of redstone; constant full-strength source.
    RedstoneBlock,
    /// Redstone lamp; lights up when powered.
    Lamp,
    /// Door; opens when powered.
    Door,
    /// Piston base; extends when powered.
    Piston,
    /// Dispenser; fires when powered.
    Dispenser,
}

/// Power behavior category of a block kind.
///
/// Recomputation dispatches on this once, instead of scattering kind
/// predicates through the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerCategory {
    /// No redstone behavior (air, plain solids).
    Inert,
    /// Interactive source whose power is whatever the interaction API last
    /// wrote (lever, button, plate, observer).
    Source,
    /// Redstone wire.
    Wire,
    /// Redstone torch.
    Torch,
    /// Repeater.
    Repeater,
    /// Comparator.
    Comparator,
    /// Constant full-strength emitter.
    Emitter,
    /// Redstone-activatable consumer (lamp, door, piston, dispenser).
    Consumer,
}

impl BlockKind {
    /// Map this kind to its power-behavior category.
    pub fn category(self) -> PowerCategory {
        match self {
            BlockKind::Air | BlockKind::Solid => PowerCategory::Inert,
            BlockKind::Lever
            | BlockKind::Button { .. }
            | BlockKind::PressurePlate { .. }
            | BlockKind::Observer { .. } => PowerCategory::Source,
            BlockKind::Wire => PowerCategory::Wire,
            BlockKind::Torch { .. } => PowerCategory::Torch,
            BlockKind::Repeater { .. } => PowerCategory::Repeater,
            BlockKind::Comparator { .. } => PowerCategory::Comparator,
            BlockKind::RedstoneBlock => PowerCategory::Emitter,
            BlockKind::Lamp | BlockKind::Door | BlockKind::Piston | BlockKind::Dispenser => {
                PowerCategory::Consumer
            }
        }
    }

    /// Check if this kind occupies a full opaque cube (blocks diagonal wire
    /// connections).
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            BlockKind::Solid | BlockKind::Lamp | BlockKind::Piston | BlockKind::Dispenser
        )
    }

    /// Check if this kind participates in redstone at all.
    pub fn is_redstone_relevant(self) -> bool {
        !matches!(self.category(), PowerCategory::Inert)
    }
}
