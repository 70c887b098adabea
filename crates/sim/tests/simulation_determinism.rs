//! Simulation determinism scenario.
//!
//! Two engines driven through the same world and interaction sequence must
//! land on identical power levels and identical clocks, including across an
//! oscillating circuit where iteration order could otherwise leak in.

use voxelvolt_core::{BlockKind, BlockPos, Facing, GridWorld, WorldQuery};
use voxelvolt_sim::RedstoneEngine;
use voxelvolt_testkit::CircuitBuilder;

fn feedback_world() -> GridWorld {
    // Torch oscillator plus an independent lever branch.
    CircuitBuilder::new()
        .floor_torch(BlockPos::new(0, 2, 0))
        .block(BlockPos::new(1, 2, 0), BlockKind::Wire)
        .block(BlockPos::new(2, 1, 0), BlockKind::Wire)
        .block(BlockPos::new(1, 0, 0), BlockKind::Wire)
        .block(BlockPos::new(0, 0, 0), BlockKind::Wire)
        .lever(BlockPos::new(5, 1, 0))
        .wire_run(BlockPos::new(6, 1, 0), Facing::East, 4)
        .build()
}

fn drive(world: &GridWorld) -> RedstoneEngine {
    let mut engine = RedstoneEngine::new();
    engine.update_block(BlockPos::new(0, 2, 0), world);
    for tick in 0..120u64 {
        if tick == 10 || tick == 55 {
            engine.toggle_lever(BlockPos::new(5, 1, 0), world);
        }
        engine.tick(world);
    }
    engine
}

#[test]
fn identical_runs_produce_identical_state() {
    let world = feedback_world();
    let mut a = drive(&world);
    let mut b = drive(&world);

    assert_eq!(a.current_tick(), b.current_tick());
    assert_eq!(a.pending_count(), b.pending_count());
    assert_eq!(a.scheduled_count(), b.scheduled_count());

    for (&pos, _) in world.iter() {
        assert_eq!(
            a.power_level(pos),
            b.power_level(pos),
            "power diverged at {pos:?}"
        );
    }

    let events_a = a.take_activation_events();
    let events_b = b.take_activation_events();
    assert_eq!(events_a, events_b);
}

#[test]
fn world_iteration_is_position_ordered() {
    let world = feedback_world();
    let positions: Vec<BlockPos> = world.iter().map(|(&pos, _)| pos).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
    assert_ne!(world.block(BlockPos::new(5, 1, 0)), BlockKind::Air);
}
