//! Level generation orchestration: rooms, tunnels, the player spawn, then room content.

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::grid::{Grid, TileSink};
use crate::rng::RandomSource;
use crate::roster::{EntityFactory, Roster};
use crate::types::{EntityKind, Pos};

use super::layout::{Placement, RoomPlacer, carve_tunnel};
use super::model::{Dungeon, EntitySpawn, GenerationReport, Room};
use super::spawns::{PlacementContext, populate_room, select_spawn};

pub struct DungeonGenerator {
    config: GenerationConfig,
}

/// Mutable state threaded through one generation run.
struct LevelBuild {
    grid: Grid,
    placer: RoomPlacer,
    report: GenerationReport,
    spawns: Vec<EntitySpawn>,
}

impl DungeonGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Builds one level, spawning the player and room content through `world`.
    ///
    /// The configuration is validated first. When no room could be placed a single
    /// centred room is carved instead and flagged in the report.
    pub fn generate<W>(
        &self,
        rng: &mut impl RandomSource,
        world: &mut W,
        sink: &mut impl TileSink,
    ) -> Result<Dungeon>
    where
        W: EntityFactory + Roster,
    {
        self.config.validate()?;

        let mut build = LevelBuild {
            grid: Grid::new(self.config.map_width, self.config.map_height),
            placer: RoomPlacer::new(),
            report: GenerationReport::default(),
            spawns: Vec::new(),
        };
        let mut spawn_cell = None;

        for attempt in 0..self.config.max_rooms {
            build.report.room_attempts += 1;
            let previous = build.placer.last();
            let room = match build.placer.attempt(&self.config, rng, &mut build.grid, sink) {
                Placement::Accepted(room) => room,
                Placement::RejectedOverlap(room) => {
                    build.report.rooms_rejected_overlap += 1;
                    tracing::trace!(attempt, ?room, "room rejected: overlap");
                    continue;
                }
                Placement::RejectedBounds(room) => {
                    build.report.rooms_rejected_bounds += 1;
                    tracing::trace!(attempt, ?room, "room rejected: out of bounds");
                    continue;
                }
            };
            let index = build.placer.rooms().len() - 1;
            tracing::trace!(attempt, ?room, index, "room accepted");

            match previous {
                Some(previous) => {
                    carve_tunnel(&mut build.grid, previous, room, rng, sink);
                }
                None => spawn_cell = Some(spawn_player(&mut build, rng, world)?),
            }
            self.populate(&mut build, room, index, rng, world);
        }

        let spawn_cell = match spawn_cell {
            Some(cell) => cell,
            None => {
                let room = self.fallback_room();
                tracing::warn!(
                    attempts = build.report.room_attempts,
                    ?room,
                    "no room could be placed; carving fallback room"
                );
                build.placer.force(room, &mut build.grid, sink);
                build.report.used_fallback_room = true;
                let cell = spawn_player(&mut build, rng, world)?;
                self.populate(&mut build, room, 0, rng, world);
                cell
            }
        };

        let LevelBuild { grid, placer, report, spawns } = build;
        let rooms = placer.into_rooms();
        tracing::debug!(
            rooms = rooms.len(),
            attempts = report.room_attempts,
            rejected_overlap = report.rooms_rejected_overlap,
            rejected_bounds = report.rooms_rejected_bounds,
            monsters = report.monsters_placed,
            items = report.items_placed,
            skipped = report.entities_skipped,
            "dungeon generated"
        );

        Ok(Dungeon { grid, rooms, spawn_cell, spawns, report })
    }

    fn populate<W>(
        &self,
        build: &mut LevelBuild,
        room: Room,
        room_index: usize,
        rng: &mut impl RandomSource,
        world: &mut W,
    ) where
        W: EntityFactory + Roster,
    {
        let context = PlacementContext {
            grid: &build.grid,
            room,
            room_index,
            max_monsters: self.config.max_monsters_per_room,
            max_items: self.config.max_items_per_room,
            attempts: self.config.placement_attempts,
        };
        let content = populate_room(&context, rng, world);
        build.report.monsters_placed += content.monsters_placed;
        build.report.items_placed += content.items_placed;
        build.report.entities_skipped += content.skipped;
        build.spawns.extend(content.spawns);
    }

    fn fallback_room(&self) -> Room {
        let width = self.config.room_min_size.min(self.config.map_width);
        let height = self.config.room_min_size.min(self.config.map_height);
        Room {
            x: (self.config.map_width - width) / 2,
            y: (self.config.map_height - height) / 2,
            width,
            height,
        }
    }
}

/// Places the player in the first room before any content so nothing lands on it.
fn spawn_player<W: EntityFactory>(
    build: &mut LevelBuild,
    rng: &mut impl RandomSource,
    world: &mut W,
) -> Result<Pos> {
    let cell = select_spawn(build.placer.rooms(), rng)?;
    world.spawn(EntityKind::Player, cell.to_world());
    build.spawns.push(EntitySpawn { kind: EntityKind::Player, cell, room: 0 });
    Ok(cell)
}
