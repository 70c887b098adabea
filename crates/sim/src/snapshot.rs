//! Engine state snapshots with zstd compression.
//!
//! Serializes the full contents of the power store, component store,
//! scheduled queue and burnout histories plus the tick counter. Each snapshot
//! file carries a magic/version header and a CRC32 over the compressed
//! payload, validated on load.

use crate::burnout::BurnoutTracker;
use crate::engine::RedstoneEngine;
use crate::schedule::UpdateQueue;
use crate::state::ComponentState;
use anyhow::{bail, Context, Result};
use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use voxelvolt_core::{BlockPos, SimTick};

/// Magic number for snapshot file identification ("VVRS" = voxelvolt redstone).
const SNAPSHOT_MAGIC: u32 = 0x56565253;

/// Current snapshot format version.
const SNAPSHOT_VERSION: u16 = 1;

/// Zstd compression level for snapshot payloads.
const COMPRESSION_LEVEL: i32 = 3;

/// Serializable image of every engine store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Power level store.
    pub power: BTreeMap<BlockPos, u8>,
    /// Component state store.
    pub components: BTreeMap<BlockPos, ComponentState>,
    /// Scheduled update queue.
    pub queue: UpdateQueue,
    /// Torch burnout histories.
    pub burnout: BurnoutTracker,
    /// Positions awaiting recomputation.
    pub pending: BTreeSet<BlockPos>,
    /// Last notified powered state per consumer.
    pub activated: BTreeMap<BlockPos, bool>,
    /// Tick counter at capture time.
    pub current_tick: SimTick,
}

/// Snapshot file header.
#[derive(Debug, Clone)]
struct SnapshotHeader {
    magic: u32,
    version: u16,
    crc32: u32,
    payload_len: u32,
}

impl SnapshotHeader {
    const LEN: usize = 14;

    fn new(crc32: u32, payload_len: u32) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: SNAPSHOT_VERSION,
            crc32,
            payload_len,
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::LEN);
        bytes.extend_from_slice(&self.magic.to_le_bytes());
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.crc32.to_le_bytes());
        bytes.extend_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::LEN {
            bail!("snapshot header truncated: {} bytes", bytes.len());
        }
        Ok(Self {
            magic: u32::from_le_bytes(bytes[0..4].try_into()?),
            version: u16::from_le_bytes(bytes[4..6].try_into()?),
            crc32: u32::from_le_bytes(bytes[6..10].try_into()?),
            payload_len: u32::from_le_bytes(bytes[10..14].try_into()?),
        })
    }
}

/// Write a snapshot of the engine state to `path`.
pub fn save_snapshot(engine: &RedstoneEngine, path: &Path) -> Result<()> {
    let snapshot = engine.to_snapshot();
    let payload = bincode::serialize(&snapshot).context("failed to serialize snapshot")?;
    let compressed = zstd::encode_all(payload.as_slice(), COMPRESSION_LEVEL)
        .context("failed to compress snapshot")?;

    let mut hasher = Hasher::new();
    hasher.update(&compressed);
    let header = SnapshotHeader::new(hasher.finalize(), compressed.len() as u32);

    let mut file = File::create(path)
        .with_context(|| format!("failed to create snapshot at {}", path.display()))?;
    file.write_all(&header.to_bytes())?;
    file.write_all(&compressed)?;
    tracing::debug!(path = %path.display(), bytes = compressed.len(), "wrote snapshot");
    Ok(())
}

/// Read a snapshot from `path` and rebuild the engine.
pub fn load_snapshot(path: &Path) -> Result<RedstoneEngine> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open snapshot at {}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let header = SnapshotHeader::from_bytes(&bytes)?;
    if header.magic != SNAPSHOT_MAGIC {
        bail!("not a snapshot file: bad magic {:#010x}", header.magic);
    }
    if header.version != SNAPSHOT_VERSION {
        bail!(
            "unsupported snapshot version {} (expected {})",
            header.version,
            SNAPSHOT_VERSION
        );
    }

    let payload = &bytes[SnapshotHeader::LEN..];
    if payload.len() != header.payload_len as usize {
        bail!(
            "snapshot payload length mismatch: header says {}, file has {}",
            header.payload_len,
            payload.len()
        );
    }

    let mut hasher = Hasher::new();
    hasher.update(payload);
    let crc = hasher.finalize();
    if crc != header.crc32 {
        bail!(
            "snapshot checksum mismatch: expected {:#010x}, got {:#010x}",
            header.crc32,
            crc
        );
    }

    let decompressed = zstd::decode_all(payload).context("failed to decompress snapshot")?;
    let snapshot: EngineSnapshot =
        bincode::deserialize(&decompressed).context("failed to deserialize snapshot")?;
    Ok(RedstoneEngine::from_snapshot(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let header = SnapshotHeader::new(0xDEADBEEF, 1234);
        let bytes = header.to_bytes();
        let parsed = SnapshotHeader::from_bytes(&bytes).expect("parse");
        assert_eq!(parsed.magic, SNAPSHOT_MAGIC);
        assert_eq!(parsed.version, SNAPSHOT_VERSION);
        assert_eq!(parsed.crc32, 0xDEADBEEF);
        assert_eq!(parsed.payload_len, 1234);
    }

    #[test]
    fn test_truncated_header_is_rejected() {
        assert!(SnapshotHeader::from_bytes(&[0u8; 5]).is_err());
    }
}
