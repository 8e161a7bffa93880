use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::{DungeonGenerator, EntityRoster, SeededRandom, compute_fov, render_ascii};
use serde_json::json;
use tools::logging::init_tracing;
use tools::overrides::ConfigOverrides;
use tools::seed::LevelSeed;

#[derive(Parser)]
#[command(author, version, about = "Generate a dungeon level and print it", long_about = None)]
struct Args {
    /// Level seed; a runtime seed is generated when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    #[command(flatten)]
    overrides: ConfigOverrides,
    /// Light the level from the spawn cell with this field-of-view radius
    #[arg(long)]
    fov: Option<i32>,
    /// Hide cells that were never seen
    #[arg(long)]
    fog: bool,
    /// Write the effective config to this path
    #[arg(long)]
    save_config: Option<PathBuf>,
    /// Print rooms, spawn and report as JSON instead of the text summary
    #[arg(long)]
    json: bool,
    /// Tracing filter directive, e.g. `debug` or `dungeon_core=trace`
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref())?;

    let config = args.overrides.resolve()?;
    if let Some(path) = &args.save_config {
        config
            .write_atomic(path)
            .with_context(|| format!("failed to write config file: {}", path.display()))?;
    }

    let seed = LevelSeed::resolve(args.seed);
    tracing::info!(seed = seed.value, source = seed.source(), ?config, "generating level");
    let mut rng = SeededRandom::new(seed.value);
    let mut roster = EntityRoster::new();
    let mut dungeon = DungeonGenerator::new(config)
        .generate(&mut rng, &mut roster, &mut ())
        .context("level generation failed")?;

    if let Some(radius) = args.fov {
        let lit = compute_fov(&dungeon.grid, dungeon.spawn_cell, radius);
        dungeon.grid.update_visibility(lit, &mut ());
    }

    if args.json {
        let summary = json!({
            "seed": seed.value,
            "rooms": dungeon.rooms,
            "spawn": dungeon.spawn_cell,
            "spawns": dungeon.spawns,
            "report": dungeon.report,
            "fingerprint": format!("{:016x}", dungeon.fingerprint()),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print!("{}", render_ascii(&dungeon.grid, &roster, args.fog));
    println!("Seed: {} ({})", seed.value, seed.source());
    println!("Rooms: {}", dungeon.rooms.len());
    for (index, room) in dungeon.rooms.iter().enumerate() {
        println!(
            "  #{index}: x={} y={} {}x{} centre=({}, {})",
            room.x,
            room.y,
            room.width,
            room.height,
            room.center().x,
            room.center().y
        );
    }
    println!("Spawn: ({}, {})", dungeon.spawn_cell.x, dungeon.spawn_cell.y);
    println!("Entities: {}", roster.len());
    if args.fov.is_some() {
        println!("In view: {}", roster.visible_entities(&dungeon.grid).len());
    }
    println!("Report: {:?}", dungeon.report);
    println!("Fingerprint: {:016x}", dungeon.fingerprint());

    Ok(())
}
