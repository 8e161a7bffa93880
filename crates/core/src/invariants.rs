//! Structural checks over a generated level, shared by tests and the fuzz harness.

use std::collections::{BTreeSet, VecDeque};

use crate::config::GenerationConfig;
use crate::grid::Grid;
use crate::mapgen::Dungeon;
use crate::roster::EntityRoster;
use crate::types::{EntityKind, Pos};

/// Floor cells reachable from `start` through 8-connected floor.
pub fn reachable_floor(grid: &Grid, start: Pos) -> BTreeSet<Pos> {
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in pos.neighbors8() {
            if grid.is_walkable(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Every violated level property, as human-readable lines. Empty means the level is sound.
pub fn check_level(
    dungeon: &Dungeon,
    roster: &EntityRoster,
    config: &GenerationConfig,
) -> Vec<String> {
    let mut violations = Vec::new();

    if dungeon.rooms.is_empty() {
        violations.push("level has no rooms".to_string());
    }
    let budget = config.max_rooms.max(1) as usize;
    if dungeon.rooms.len() > budget {
        violations.push(format!("{} rooms exceed the budget of {budget}", dungeon.rooms.len()));
    }
    for (index, room) in dungeon.rooms.iter().enumerate() {
        if !room.fits_within(config.map_width, config.map_height) {
            violations.push(format!("room {index} leaves the map: {room:?}"));
        }
        for other in &dungeon.rooms[index + 1..] {
            if room.overlaps(other) {
                violations.push(format!("rooms overlap: {room:?} / {other:?}"));
            }
        }
    }

    let spawn = dungeon.spawn_cell;
    if !dungeon.spawn_room().is_some_and(|room| room.interior_contains(spawn)) {
        violations.push(format!("spawn {spawn:?} outside the first room's interior"));
    }
    if !dungeon.grid.is_walkable(spawn) {
        violations.push(format!("spawn {spawn:?} is not floor"));
    }

    let reachable = reachable_floor(&dungeon.grid, spawn);
    for room in dungeon.rooms.iter().filter(|room| !reachable.contains(&room.center())) {
        violations.push(format!("room {room:?} unreachable from spawn"));
    }

    let mut occupied = BTreeSet::new();
    for entity in roster.iter() {
        let cell = entity.cell();
        if !dungeon.grid.is_walkable(cell) {
            violations.push(format!("{} stands on non-floor {cell:?}", entity.kind.tag()));
        }
        if !occupied.insert(cell) {
            violations.push(format!("cell {cell:?} holds more than one entity"));
        }
    }
    if roster.iter().filter(|entity| entity.kind == EntityKind::Player).count() != 1 {
        violations.push("level must hold exactly one player".to_string());
    }

    violations
}
