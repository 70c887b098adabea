#![warn(missing_docs)]
//! Deterministic testing surfaces for headless circuit simulations.

mod circuit;
mod micro_sim;

use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use voxelvolt_core::SimTick;

pub use circuit::*;
pub use micro_sim::*;

/// One sampled power reading in a circuit trace log.
#[derive(Debug, Serialize)]
pub struct TraceRecord<'a> {
    /// Tick the sample was taken at.
    pub tick: SimTick,
    /// Which probe the sample belongs to (e.g. a named wire or lamp).
    pub probe: &'a str,
    /// Sampled power level.
    pub power: u8,
}

/// Newline-delimited JSON log for circuit traces.
///
/// One serialized record per line, so failed runs can be diffed or replayed
/// with standard line tools.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a trace log at `path`, truncating any previous run.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append one record as a JSON line.
    pub fn append<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
