use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::{GenerationConfig, generate_dungeon};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use dungeon_core::invariants::check_level;
use tools::logging::init_tracing;

#[derive(Parser)]
#[command(author, version, about = "Sweep seeds and check level invariants", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    levels: u32,
    #[arg(long)]
    log_level: Option<String>,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref())?;

    let profiles = [
        GenerationConfig::default(),
        GenerationConfig::new(50, 30, 6, 10, 5, 2, 2),
        GenerationConfig::new(80, 50, 4, 12, 25, 4, 5),
        GenerationConfig::new(20, 12, 5, 9, 10, 6, 6),
        GenerationConfig::new(12, 10, 11, 14, 4, 1, 1),
    ];

    println!("Sweeping {} levels from seed {}...", args.levels, args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut failures = 0_u32;

    for _ in 0..args.levels {
        let level_seed = rng.next_u64();
        let config = choose(&mut rng, &profiles);
        let (dungeon, roster) = generate_dungeon(level_seed, config.clone())?;

        let violations = check_level(&dungeon, &roster, &config);
        tracing::debug!(
            level_seed,
            rooms = dungeon.rooms.len(),
            violations = violations.len(),
            "level checked"
        );
        if !violations.is_empty() {
            failures += 1;
            println!("seed {level_seed} with {config:?}:");
            for violation in violations {
                println!("  {violation}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} levels violated invariants", args.levels);
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
