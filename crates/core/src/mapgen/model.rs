//! Public data models for generated levels: rooms, spawns, and diagnostics.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::grid::Grid;
use crate::types::{EntityKind, ItemKind, MonsterKind, Pos, TileKind};

/// Axis-aligned room. The outermost ring of cells is wall, the rest is floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    /// True when the two rectangles share at least one cell. Edge-adjacent rooms do not
    /// overlap.
    pub fn overlaps(self, other: &Room) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn overlaps_any(self, rooms: &[Room]) -> bool {
        rooms.iter().any(|room| self.overlaps(room))
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    /// Strictly inside the wall ring.
    pub fn interior_contains(self, pos: Pos) -> bool {
        pos.x > self.x && pos.x < self.right() && pos.y > self.y && pos.y < self.bottom()
    }

    pub fn is_border(self, pos: Pos) -> bool {
        self.contains(pos) && !self.interior_contains(pos)
    }

    pub fn fits_within(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x + self.width <= width && self.y + self.height <= height
    }

    pub fn cells(self) -> impl Iterator<Item = Pos> {
        (self.y..=self.bottom())
            .flat_map(move |y| (self.x..=self.right()).map(move |x| Pos { y, x }))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpawn {
    pub kind: EntityKind,
    pub cell: Pos,
    /// Index into [`Dungeon::rooms`] of the room the entity was scattered in.
    pub room: usize,
}

/// Counters for everything the generator skipped instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub room_attempts: u32,
    pub rooms_rejected_overlap: u32,
    pub rooms_rejected_bounds: u32,
    pub monsters_placed: u32,
    pub items_placed: u32,
    pub entities_skipped: u32,
    pub used_fallback_room: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dungeon {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub spawn_cell: Pos,
    pub spawns: Vec<EntitySpawn>,
    pub report: GenerationReport,
}

impl Dungeon {
    pub fn spawn_room(&self) -> Option<&Room> {
        self.rooms.first()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.grid.width().to_le_bytes());
        bytes.extend(self.grid.height().to_le_bytes());

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.x.to_le_bytes());
            bytes.extend(room.y.to_le_bytes());
            bytes.extend(room.width.to_le_bytes());
            bytes.extend(room.height.to_le_bytes());
        }

        for (pos, tile) in self.grid.tiles() {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
            bytes.push(match tile.terrain {
                TileKind::Empty => 0,
                TileKind::Wall => 1,
                TileKind::Floor => 2,
            });
        }

        bytes.extend(self.spawn_cell.y.to_le_bytes());
        bytes.extend(self.spawn_cell.x.to_le_bytes());

        bytes.extend((self.spawns.len() as u32).to_le_bytes());
        for spawn in &self.spawns {
            bytes.push(match spawn.kind {
                EntityKind::Player => 0,
                EntityKind::Monster(MonsterKind::FireSprite) => 1,
                EntityKind::Monster(MonsterKind::FlyMob) => 2,
                EntityKind::Item(ItemKind::PotionOfHeart) => 3,
                EntityKind::Item(ItemKind::ConfusionScroll) => 4,
                EntityKind::Item(ItemKind::FireballScroll) => 5,
                EntityKind::Item(ItemKind::LightningScroll) => 6,
            });
            bytes.extend(spawn.cell.y.to_le_bytes());
            bytes.extend(spawn.cell.x.to_le_bytes());
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_uses_integer_halves() {
        assert_eq!(Room::new(10, 4, 7, 6).center(), Pos::new(13, 7));
        assert_eq!(Room::new(0, 0, 3, 3).center(), Pos::new(1, 1));
    }

    #[test]
    fn shared_cells_overlap_but_touching_edges_do_not() {
        let a = Room::new(0, 0, 5, 5);
        assert!(a.overlaps(&Room::new(4, 4, 5, 5)), "corner cell shared");
        assert!(a.overlaps(&Room::new(1, 1, 2, 2)), "nested");
        assert!(!a.overlaps(&Room::new(5, 0, 5, 5)), "edge-adjacent");
        assert!(!a.overlaps(&Room::new(0, 5, 5, 5)), "edge-adjacent");
        assert!(!a.overlaps(&Room::new(20, 20, 3, 3)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Room::new(3, 2, 6, 4);
        let b = Room::new(7, 5, 4, 4);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert!(a.overlaps_any(&[Room::new(40, 40, 3, 3), b]));
    }

    #[test]
    fn interior_excludes_wall_ring() {
        let room = Room::new(2, 2, 4, 5);
        assert!(room.interior_contains(Pos::new(3, 3)));
        assert!(room.interior_contains(Pos::new(4, 5)));
        assert!(!room.interior_contains(Pos::new(2, 3)));
        assert!(!room.interior_contains(Pos::new(5, 3)));
        assert!(room.is_border(Pos::new(5, 6)));
        assert!(!room.contains(Pos::new(6, 3)));
    }

    #[test]
    fn cells_cover_the_whole_rectangle_once() {
        let room = Room::new(1, 2, 4, 3);
        let cells: Vec<_> = room.cells().collect();
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|&pos| room.contains(pos)));
        let interior = cells.iter().filter(|&&pos| room.interior_contains(pos)).count();
        assert_eq!(interior, 2);
    }

    #[test]
    fn fits_within_requires_whole_rectangle_in_bounds() {
        assert!(Room::new(0, 0, 10, 10).fits_within(10, 10));
        assert!(!Room::new(1, 0, 10, 10).fits_within(10, 10));
        assert!(!Room::new(-1, 0, 3, 3).fits_within(10, 10));
    }
}
