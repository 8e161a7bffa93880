//! Player spawn selection and per-room monster/item scattering.

use crate::error::{DungeonError, Result};
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::roster::{EntityFactory, Roster};
use crate::types::{EntityKind, ItemKind, MonsterKind, Pos};

use super::model::{EntitySpawn, Room};

const COMMON_MONSTER_CHANCE: f32 = 0.8;
const COMMON_ITEM_CHANCE: f32 = 0.7;
const UNCOMMON_ITEM_CHANCE: f32 = 0.85;
const RARE_ITEM_SPLIT: f32 = 0.925;

/// Player start cell inside the first room.
///
/// Keeps the room centre unless it sits within one cell of a wall, in which case an
/// interior cell is drawn (`x` then `y`).
pub fn select_spawn(rooms: &[Room], rng: &mut impl RandomSource) -> Result<Pos> {
    let Some(&room) = rooms.first() else {
        return Err(DungeonError::NoRoomsPlaced);
    };

    let center = room.center();
    let near_wall = center.x <= room.x + 1
        || center.x >= room.right() - 1
        || center.y <= room.y + 1
        || center.y >= room.bottom() - 1;
    if !near_wall {
        return Ok(center);
    }

    Ok(random_interior_cell(room, rng))
}

fn random_interior_cell(room: Room, rng: &mut impl RandomSource) -> Pos {
    let x = rng.range(room.x + 1, room.right());
    let y = rng.range(room.y + 1, room.bottom());
    Pos { y, x }
}

pub fn pick_monster_kind(rng: &mut impl RandomSource) -> MonsterKind {
    if rng.value() < COMMON_MONSTER_CHANCE { MonsterKind::FireSprite } else { MonsterKind::FlyMob }
}

pub fn pick_item_kind(rng: &mut impl RandomSource) -> ItemKind {
    let roll = rng.value();
    if roll < COMMON_ITEM_CHANCE {
        ItemKind::PotionOfHeart
    } else if roll < UNCOMMON_ITEM_CHANCE {
        ItemKind::ConfusionScroll
    } else if roll < RARE_ITEM_SPLIT {
        ItemKind::FireballScroll
    } else {
        ItemKind::LightningScroll
    }
}

/// Exclusive upper bound for a count draw in `[0, cap]`, saturating at `i32::MAX`.
fn count_bound(cap: u32) -> i32 {
    i32::try_from(cap).map_or(i32::MAX, |cap| cap.saturating_add(1))
}

pub struct PlacementContext<'a> {
    pub grid: &'a Grid,
    pub room: Room,
    pub room_index: usize,
    pub max_monsters: u32,
    pub max_items: u32,
    pub attempts: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomContent {
    pub spawns: Vec<EntitySpawn>,
    pub monsters_placed: u32,
    pub items_placed: u32,
    pub skipped: u32,
}

/// Scatters monsters, then items, in the interior of one room.
///
/// Each entity gets at most `attempts` candidate cells; an entity that finds no free
/// floor is skipped and counted.
pub fn populate_room<W>(
    context: &PlacementContext<'_>,
    rng: &mut impl RandomSource,
    world: &mut W,
) -> RoomContent
where
    W: EntityFactory + Roster,
{
    let mut content = RoomContent::default();

    let monster_count = rng.range(0, count_bound(context.max_monsters));
    for _ in 0..monster_count {
        match find_free_cell(context, rng, &*world) {
            Some(cell) => {
                let kind = EntityKind::Monster(pick_monster_kind(rng));
                world.spawn(kind, cell.to_world());
                content.spawns.push(EntitySpawn { kind, cell, room: context.room_index });
                content.monsters_placed += 1;
            }
            None => content.skipped += 1,
        }
    }

    let item_count = rng.range(0, count_bound(context.max_items));
    for _ in 0..item_count {
        match find_free_cell(context, rng, &*world) {
            Some(cell) => {
                let kind = EntityKind::Item(pick_item_kind(rng));
                world.spawn(kind, cell.to_world());
                content.spawns.push(EntitySpawn { kind, cell, room: context.room_index });
                content.items_placed += 1;
            }
            None => content.skipped += 1,
        }
    }

    if content.skipped > 0 {
        tracing::debug!(
            room = context.room_index,
            skipped = content.skipped,
            attempts = context.attempts,
            "room content placement exhausted"
        );
    }
    content
}

fn find_free_cell(
    context: &PlacementContext<'_>,
    rng: &mut impl RandomSource,
    world: &impl Roster,
) -> Option<Pos> {
    (0..context.attempts).find_map(|_| {
        let cell = random_interior_cell(context.room, rng);
        let free = context.grid.in_bounds(cell)
            && context.grid.is_walkable(cell)
            && !world.is_occupied(cell);
        free.then_some(cell)
    })
}
