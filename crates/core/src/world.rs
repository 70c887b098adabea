//! Read-only world access for the simulation.

use crate::block::BlockKind;
use crate::pos::BlockPos;
use std::collections::BTreeMap;

/// Read-only block lookup supplied by the voxel storage collaborator.
///
/// Called on the recomputation hot path, often several times per position;
/// implementations must be side-effect-free and cheap.
pub trait WorldQuery {
    /// Get the block kind at a world position. Unloaded or out-of-range
    /// positions report [`BlockKind::Air`].
    fn block(&self, pos: BlockPos) -> BlockKind;
}

/// Sparse in-memory world backed by a position-keyed map.
///
/// Every unset position is air. Used by headless tests and the demo CLI;
/// production worlds implement [`WorldQuery`] over their own chunk storage.
#[derive(Debug, Clone, Default)]
pub struct GridWorld {
    blocks: BTreeMap<BlockPos, BlockKind>,
}

impl GridWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block, replacing whatever was there.
    pub fn set(&mut self, pos: BlockPos, kind: BlockKind) {
        if kind == BlockKind::Air {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, kind);
        }
    }

    /// Remove a block (back to air).
    pub fn remove(&mut self, pos: BlockPos) {
        self.blocks.remove(&pos);
    }

    /// Number of non-air blocks placed.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check whether no blocks are placed.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate placed blocks in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&BlockPos, &BlockKind)> {
        self.blocks.iter()
    }
}

impl WorldQuery for GridWorld {
    fn block(&self, pos: BlockPos) -> BlockKind {
        self.blocks.get(&pos).copied().unwrap_or(BlockKind::Air)
    }
}
