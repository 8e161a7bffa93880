//! Procedural level generation split into coherent submodules.

pub mod layout;
pub mod line;
pub mod model;
pub mod spawns;

mod generator;

pub use generator::DungeonGenerator;
pub use line::{Line, line};
pub use model::{Dungeon, EntitySpawn, GenerationReport, Room};

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::rng::SeededRandom;
use crate::roster::EntityRoster;

/// Generates a level from a seed into a fresh in-memory roster, without rendering.
pub fn generate_dungeon(seed: u64, config: GenerationConfig) -> Result<(Dungeon, EntityRoster)> {
    let mut rng = SeededRandom::new(seed);
    let mut roster = EntityRoster::new();
    let dungeon = DungeonGenerator::new(config).generate(&mut rng, &mut roster, &mut ())?;
    Ok((dungeon, roster))
}
