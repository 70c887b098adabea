//! World positions and horizontal facings.

use serde::{Deserialize, Serialize};

/// World position keyed by every per-voxel map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// East/west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North/south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a position from world coordinates.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Get adjacent positions (6 neighbors).
    pub fn neighbors(&self) -> [BlockPos; 6] {
        [
            BlockPos::new(self.x - 1, self.y, self.z),
            BlockPos::new(self.x + 1, self.y, self.z),
            BlockPos::new(self.x, self.y - 1, self.z),
            BlockPos::new(self.x, self.y + 1, self.z),
            BlockPos::new(self.x, self.y, self.z - 1),
            BlockPos::new(self.x, self.y, self.z + 1),
        ]
    }

    /// Get the four horizontally adjacent positions.
    pub fn horizontal_neighbors(&self) -> [BlockPos; 4] {
        [
            self.offset(Facing::North),
            self.offset(Facing::South),
            self.offset(Facing::East),
            self.offset(Facing::West),
        ]
    }

    /// Position one block above.
    pub fn up(&self) -> BlockPos {
        BlockPos::new(self.x, self.y + 1, self.z)
    }

    /// Position one block below.
    pub fn down(&self) -> BlockPos {
        BlockPos::new(self.x, self.y - 1, self.z)
    }

    /// Horizontally offset position in the given facing.
    pub fn offset(&self, facing: Facing) -> BlockPos {
        let (dx, dz) = facing.offset();
        BlockPos::new(self.x + dx, self.y, self.z + dz)
    }
}

/// Facing direction for directional components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Negative Z.
    North,
    /// Positive Z.
    South,
    /// Positive X.
    East,
    /// Negative X.
    West,
}

impl Facing {
    /// All four horizontal facings.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::South, Facing::East, Facing::West];

    /// Get the opposite facing.
    pub fn opposite(self) -> Self {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::East => Facing::West,
            Facing::West => Facing::East,
        }
    }

    /// The two facings perpendicular to this one.
    pub fn perpendicular(self) -> [Facing; 2] {
        match self {
            Facing::North | Facing::South => [Facing::East, Facing::West],
            Facing::East | Facing::West => [Facing::North, Facing::South],
        }
    }

    /// Get the offset vector for this facing.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::South => (0, 1),
            Facing::East => (1, 0),
            Facing::West => (-1, 0),
        }
    }
}
