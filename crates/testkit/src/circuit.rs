//! Circuit-building helpers over the in-memory grid world.

use voxelvolt_core::{BlockKind, BlockPos, Facing, GridWorld, PlateWeight, TorchMount};

/// Builder for small test circuits.
///
/// Convenience wrapper over [`GridWorld`] that places components with their
/// supporting blocks, so tests read as circuit descriptions rather than block
/// lists.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    world: GridWorld,
}

impl CircuitBuilder {
    /// Start an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an arbitrary block kind.
    pub fn block(mut self, pos: BlockPos, kind: BlockKind) -> Self {
        self.world.set(pos, kind);
        self
    }

    /// Place a solid block.
    pub fn solid(self, pos: BlockPos) -> Self {
        self.block(pos, BlockKind::Solid)
    }

    /// Place a lever.
    pub fn lever(self, pos: BlockPos) -> Self {
        self.block(pos, BlockKind::Lever)
    }

    /// Place a stone or wooden button.
    pub fn button(self, pos: BlockPos, wooden: bool) -> Self {
        self.block(pos, BlockKind::Button { wooden })
    }

    /// Place a pressure plate of the given weight class.
    pub fn plate(self, pos: BlockPos, weight: PlateWeight) -> Self {
        self.block(pos, BlockKind::PressurePlate { weight })
    }

    /// Place a block of redstone.
    pub fn redstone_block(self, pos: BlockPos) -> Self {
        self.block(pos, BlockKind::RedstoneBlock)
    }

    /// Place a floor torch together with its solid mount block below.
    pub fn floor_torch(self, pos: BlockPos) -> Self {
        self.solid(pos.down()).block(
            pos,
            BlockKind::Torch {
                mount: TorchMount::Floor,
            },
        )
    }

    /// Place a wall torch pointing in `facing`, with its mount block behind.
    pub fn wall_torch(self, pos: BlockPos, facing: Facing) -> Self {
        self.solid(pos.offset(facing.opposite())).block(
            pos,
            BlockKind::Torch {
                mount: TorchMount::Wall(facing),
            },
        )
    }

    /// Place a repeater outputting in `facing`.
    pub fn repeater(self, pos: BlockPos, facing: Facing) -> Self {
        self.block(pos, BlockKind::Repeater { facing })
    }

    /// Place a comparator outputting in `facing`.
    pub fn comparator(self, pos: BlockPos, facing: Facing) -> Self {
        self.block(pos, BlockKind::Comparator { facing })
    }

    /// Place an observer outputting in `facing`.
    pub fn observer(self, pos: BlockPos, facing: Facing) -> Self {
        self.block(pos, BlockKind::Observer { facing })
    }

    /// Place a lamp.
    pub fn lamp(self, pos: BlockPos) -> Self {
        self.block(pos, BlockKind::Lamp)
    }

    /// Lay a straight wire run of `length` blocks starting at `start`,
    /// stepping in `facing`. Returns the builder; positions are
    /// `start.offset(facing) * i` for `i in 0..length`.
    pub fn wire_run(mut self, start: BlockPos, facing: Facing, length: usize) -> Self {
        let mut cursor = start;
        for _ in 0..length {
            self.world.set(cursor, BlockKind::Wire);
            cursor = cursor.offset(facing);
        }
        self
    }

    /// Finish building and take the world.
    pub fn build(self) -> GridWorld {
        self.world
    }
}

/// Positions of a straight run laid by [`CircuitBuilder::wire_run`].
pub fn run_positions(start: BlockPos, facing: Facing, length: usize) -> Vec<BlockPos> {
    let mut positions = Vec::with_capacity(length);
    let mut cursor = start;
    for _ in 0..length {
        positions.push(cursor);
        cursor = cursor.offset(facing);
    }
    positions
}
