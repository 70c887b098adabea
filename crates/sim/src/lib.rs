//! Redstone signal simulation: power propagation, delayed transitions, and
//! component behavior over a read-only voxel world.

mod burnout;
mod engine;
mod schedule;
mod snapshot;
mod state;

pub use burnout::*;
pub use engine::*;
pub use schedule::*;
pub use snapshot::*;
pub use state::*;
