//! Snapshot persistence round-trip scenario.
//!
//! Saves a mid-flight engine (settled power plus a pending button pulse),
//! reloads it, and verifies the restored engine carries on identically to the
//! original. Also exercises the corruption checks on load.

use std::fs;
use voxelvolt_core::{BlockPos, Facing, GridWorld};
use voxelvolt_sim::{load_snapshot, save_snapshot, RedstoneEngine};
use voxelvolt_testkit::CircuitBuilder;

fn button_circuit() -> GridWorld {
    CircuitBuilder::new()
        .lever(BlockPos::new(0, 1, 0))
        .wire_run(BlockPos::new(1, 1, 0), Facing::East, 3)
        .button(BlockPos::new(0, 1, 2), false)
        .wire_run(BlockPos::new(1, 1, 2), Facing::East, 2)
        .build()
}

fn mid_flight_engine(world: &GridWorld) -> RedstoneEngine {
    let mut engine = RedstoneEngine::new();
    engine.toggle_lever(BlockPos::new(0, 1, 0), world);
    for _ in 0..3 {
        engine.tick(world);
    }
    // Leave a pulse expiry in the scheduled queue.
    engine.press_button(BlockPos::new(0, 1, 2), world);
    engine.tick(world);
    engine
}

#[test]
fn snapshot_roundtrip_resumes_identically() {
    let world = button_circuit();
    let mut original = mid_flight_engine(&world);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("engine.vvrs");
    save_snapshot(&original, &path).expect("save");

    let mut restored = load_snapshot(&path).expect("load");
    assert_eq!(restored.current_tick(), original.current_tick());
    assert_eq!(restored.scheduled_count(), original.scheduled_count());
    assert_eq!(restored.pending_count(), original.pending_count());

    // Both runs must agree through the pulse expiry and beyond.
    for _ in 0..20 {
        original.tick(&world);
        restored.tick(&world);
        for (&pos, _) in world.iter() {
            assert_eq!(
                original.power_level(pos),
                restored.power_level(pos),
                "divergence at {pos:?} on tick {:?}",
                original.current_tick()
            );
        }
    }
    assert_eq!(restored.power_level(BlockPos::new(1, 1, 2)), 0, "pulse expired");
    assert_eq!(restored.power_level(BlockPos::new(1, 1, 0)), 15, "lever branch held");
}

#[test]
fn flipped_payload_byte_fails_the_checksum() {
    let world = button_circuit();
    let engine = mid_flight_engine(&world);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("engine.vvrs");
    save_snapshot(&engine, &path).expect("save");

    let mut bytes = fs::read(&path).expect("read");
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, &bytes).expect("write");

    let err = load_snapshot(&path).expect_err("corrupt snapshot must not load");
    assert!(err.to_string().contains("checksum"), "got: {err}");
}

#[test]
fn garbage_and_truncation_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");

    let garbage = dir.path().join("garbage.vvrs");
    fs::write(&garbage, b"this is not a snapshot file at all").expect("write");
    assert!(load_snapshot(&garbage).is_err());

    let short = dir.path().join("short.vvrs");
    fs::write(&short, [0u8; 6]).expect("write");
    let err = load_snapshot(&short).expect_err("truncated header must not load");
    assert!(err.to_string().contains("truncated"), "got: {err}");
}
