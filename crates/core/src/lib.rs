pub mod config;
pub mod error;
pub mod grid;
pub mod invariants;
pub mod mapgen;
pub mod render;
pub mod rng;
pub mod roster;
pub mod types;
pub mod visibility;

pub use config::{DEFAULT_PLACEMENT_ATTEMPTS, GenerationConfig, MAX_CONTENT_PER_ROOM};
pub use error::{DungeonError, Result};
pub use grid::{Grid, REMEMBERED_ALPHA, Tile, TileSink, VISIBLE_ALPHA};
pub use mapgen::{Dungeon, DungeonGenerator, EntitySpawn, GenerationReport, Room, generate_dungeon};
pub use render::render_ascii;
pub use rng::{RandomSource, SeededRandom};
pub use roster::{Entity, EntityFactory, EntityRoster, Roster};
pub use types::*;
pub use visibility::compute_fov;
