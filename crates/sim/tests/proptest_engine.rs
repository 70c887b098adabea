//! Property-based tests for the redstone engine.
//!
//! Invariants exercised:
//! - Power levels never leave the range [0, 15]
//! - Wire power is non-increasing along a straight run from its source
//! - Arbitrary interaction sequences keep the engine consistent and settle
//!   without leftover work

use proptest::prelude::*;
use voxelvolt_core::{BlockPos, Facing, GridWorld, PlateWeight, MAX_POWER};
use voxelvolt_sim::RedstoneEngine;
use voxelvolt_testkit::{run_positions, CircuitBuilder};

fn settle(engine: &mut RedstoneEngine, world: &GridWorld, max_ticks: usize) {
    for _ in 0..max_ticks {
        engine.tick(world);
        if engine.pending_count() == 0 && engine.scheduled_count() == 0 {
            break;
        }
    }
}

proptest! {
    /// A straight wire run from a lever decays one level per block and never
    /// goes below zero, whatever its length.
    #[test]
    fn wire_run_decay_profile(length in 1usize..=24) {
        let lever = BlockPos::new(0, 1, 0);
        let start = BlockPos::new(1, 1, 0);
        let world = CircuitBuilder::new()
            .lever(lever)
            .wire_run(start, Facing::East, length)
            .build();

        let mut engine = RedstoneEngine::new();
        engine.toggle_lever(lever, &world);
        settle(&mut engine, &world, 40);

        for (i, pos) in run_positions(start, Facing::East, length).into_iter().enumerate() {
            let expected = MAX_POWER.saturating_sub(i as u8);
            prop_assert_eq!(
                engine.power_level(pos),
                expected,
                "wire {} blocks out",
                i + 1
            );
        }
    }

    /// Any interleaving of lever flips, button presses and ticks keeps every
    /// power level in range and leaves the engine settled afterwards.
    #[test]
    fn power_levels_stay_in_range(actions in prop::collection::vec(0u8..3, 1..40)) {
        let lever = BlockPos::new(0, 1, 0);
        let button = BlockPos::new(0, 1, 2);
        let world = CircuitBuilder::new()
            .lever(lever)
            .wire_run(BlockPos::new(1, 1, 0), Facing::East, 5)
            .button(button, true)
            .wire_run(BlockPos::new(1, 1, 2), Facing::East, 5)
            .repeater(BlockPos::new(6, 1, 0), Facing::East)
            .build();

        let mut engine = RedstoneEngine::new();
        for action in actions {
            match action {
                0 => {
                    engine.toggle_lever(lever, &world);
                }
                1 => engine.press_button(button, &world),
                _ => engine.tick(&world),
            }
            for (&pos, _) in world.iter() {
                prop_assert!(
                    engine.power_level(pos) <= MAX_POWER,
                    "power out of range at {:?}",
                    pos
                );
            }
        }

        settle(&mut engine, &world, 60);
        prop_assert_eq!(engine.pending_count(), 0);
        prop_assert_eq!(engine.scheduled_count(), 0);
    }

    /// Plate output respects its weight class for any entity count.
    #[test]
    fn plate_power_bounded_by_weight(count in 0u32..10_000) {
        prop_assert_eq!(PlateWeight::Simple.power_for(count), MAX_POWER);
        prop_assert!(PlateWeight::Light.power_for(count) <= MAX_POWER);
        prop_assert!(PlateWeight::Heavy.power_for(count) <= MAX_POWER);
        if count >= 15 {
            prop_assert_eq!(PlateWeight::Light.power_for(count), MAX_POWER);
        } else {
            prop_assert_eq!(PlateWeight::Light.power_for(count), count as u8);
        }
    }
}
