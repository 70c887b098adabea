use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::fmt;
use voxelvolt_core::{BlockKind, BlockPos, GridWorld};
use voxelvolt_sim::{save_snapshot, RedstoneEngine};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a redstone circuit and report power levels", long_about = None)]
struct Args {
    /// Circuit description file (JSON)
    circuit: PathBuf,
    /// Game ticks to simulate
    #[arg(long, default_value_t = 20)]
    ticks: u64,
    /// Levers to toggle before the run, as x,y,z (repeatable)
    #[arg(long = "toggle", value_parser = parse_pos)]
    toggles: Vec<BlockPos>,
    /// Write the engine state here after the run
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct CircuitFile {
    blocks: Vec<CircuitBlock>,
}

#[derive(Debug, Deserialize)]
struct CircuitBlock {
    pos: [i32; 3],
    kind: BlockKind,
}

fn parse_pos(raw: &str) -> Result<BlockPos, String> {
    let parts: Vec<&str> = raw.split(',').collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got {raw:?}"));
    };
    let parse = |s: &str| {
        s.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate {s:?}: {e}"))
    };
    Ok(BlockPos::new(parse(x)?, parse(y)?, parse(z)?))
}

fn load_circuit(args: &Args) -> Result<GridWorld> {
    let raw = fs::read_to_string(&args.circuit)
        .with_context(|| format!("failed to read circuit {}", args.circuit.display()))?;
    let file: CircuitFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse circuit {}", args.circuit.display()))?;

    let mut world = GridWorld::new();
    for block in file.blocks {
        let [x, y, z] = block.pos;
        world.set(BlockPos::new(x, y, z), block.kind);
    }
    Ok(world)
}

fn run(args: &Args) -> Result<()> {
    let world = load_circuit(args)?;
    tracing::info!(blocks = world.len(), ticks = args.ticks, "circuit loaded");

    let mut engine = RedstoneEngine::new();
    let seeds: Vec<BlockPos> = world
        .iter()
        .filter(|(_, kind)| kind.is_redstone_relevant())
        .map(|(pos, _)| *pos)
        .collect();
    for pos in seeds {
        engine.update_block(pos, &world);
    }
    engine.tick(&world);

    for &pos in &args.toggles {
        let on = engine.toggle_lever(pos, &world);
        tracing::info!(?pos, on, "lever toggled");
    }

    for _ in 0..args.ticks {
        engine.tick(&world);
    }

    for (&pos, kind) in world.iter() {
        let power = engine.power_level(pos);
        if kind.is_redstone_relevant() || power > 0 {
            println!("{:>4},{:>4},{:>4}  {:?}  power={}", pos.x, pos.y, pos.z, kind, power);
        }
    }
    for event in engine.take_activation_events() {
        println!("activated {:?} -> {}", event.pos, event.powered);
    }

    if let Some(path) = &args.snapshot {
        save_snapshot(&engine, path)?;
        tracing::info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}

fn main() -> Result<()> {
    let _ = fmt().with_max_level(Level::INFO).try_init();
    let args = Args::parse();
    run(&args)
}
