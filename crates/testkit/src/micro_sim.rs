//! Micro-sim harness for deterministic, tick-based circuit tests.
//!
//! A micro-sim is intentionally small: it steps a tiny simulation for a fixed
//! number of ticks and captures selected state each tick. Tests assert on the
//! captured frames directly.

use serde::Serialize;
use voxelvolt_core::SimTick;

/// Single frame captured at a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct MicroSimFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Captured payload.
    pub snapshot: S,
}

/// Step a simulation `ticks` times, capturing a frame at tick 0 and after
/// every step (so the result holds `ticks + 1` frames).
pub fn run_micro_sim<State, Snapshot, StepFn, SnapFn>(
    mut state: State,
    ticks: u64,
    mut step: StepFn,
    mut capture: SnapFn,
) -> Vec<MicroSimFrame<Snapshot>>
where
    StepFn: FnMut(SimTick, &mut State),
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(ticks as usize + 1);

    let mut tick = SimTick::ZERO;
    frames.push(MicroSimFrame {
        tick: tick.0,
        snapshot: capture(tick, &state),
    });

    for _ in 0..ticks {
        step(tick, &mut state);
        tick = tick.advance(1);
        frames.push(MicroSimFrame {
            tick: tick.0,
            snapshot: capture(tick, &state),
        });
    }

    frames
}
