//! Room placement and corridor carving for the base level topology.

use crate::config::GenerationConfig;
use crate::grid::{Grid, TileSink};
use crate::rng::RandomSource;
use crate::types::Pos;

use super::line::Line;
use super::model::Room;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Accepted(Room),
    RejectedOverlap(Room),
    RejectedBounds(Room),
}

/// Accumulates non-overlapping rooms, one attempt at a time.
#[derive(Clone, Debug, Default)]
pub struct RoomPlacer {
    rooms: Vec<Room>,
}

impl RoomPlacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn last(&self) -> Option<Room> {
        self.rooms.last().copied()
    }

    pub fn into_rooms(self) -> Vec<Room> {
        self.rooms
    }

    /// One placement attempt. Draws width, height, x, y in that order; an accepted
    /// room is carved into `grid` before returning.
    pub fn attempt(
        &mut self,
        config: &GenerationConfig,
        rng: &mut impl RandomSource,
        grid: &mut Grid,
        sink: &mut impl TileSink,
    ) -> Placement {
        let room = sample_room(config, rng);
        if !room.fits_within(config.map_width, config.map_height) {
            return Placement::RejectedBounds(room);
        }
        if room.overlaps_any(&self.rooms) {
            return Placement::RejectedOverlap(room);
        }
        carve_room(grid, room, sink);
        self.rooms.push(room);
        Placement::Accepted(room)
    }

    /// Adds a room without drawing from the random stream.
    pub fn force(&mut self, room: Room, grid: &mut Grid, sink: &mut impl TileSink) {
        carve_room(grid, room, sink);
        self.rooms.push(room);
    }
}

fn sample_room(config: &GenerationConfig, rng: &mut impl RandomSource) -> Room {
    let width = rng.range(config.room_min_size, config.room_max_size);
    let height = rng.range(config.room_min_size, config.room_max_size);

    let x = rng
        .range(0, config.map_width - width - 1)
        .clamp(0, (config.map_width - width).max(0));
    let y = rng
        .range(0, config.map_height - height - 1)
        .clamp(0, (config.map_height - height).max(0));

    Room { x, y, width, height }
}

/// Rooms only, without tunnels or content. Rejected attempts are skipped.
pub fn build_room_layout(
    config: &GenerationConfig,
    rng: &mut impl RandomSource,
    grid: &mut Grid,
    sink: &mut impl TileSink,
) -> Vec<Room> {
    let mut placer = RoomPlacer::new();
    for _ in 0..config.max_rooms {
        placer.attempt(config, rng, grid, sink);
    }
    placer.into_rooms()
}

pub fn carve_room(grid: &mut Grid, room: Room, sink: &mut impl TileSink) {
    for pos in room.cells() {
        if room.is_border(pos) {
            grid.set_wall_if_not_floor(pos, sink);
        } else {
            grid.set_floor(pos, sink);
        }
    }
}

/// Picks the corridor elbow between two room centres. One float draw.
pub fn tunnel_corner(old_center: Pos, new_center: Pos, rng: &mut impl RandomSource) -> Pos {
    if rng.value() < 0.5 {
        Pos { y: old_center.y, x: new_center.x }
    } else {
        Pos { y: new_center.y, x: old_center.x }
    }
}

/// L-shaped corridor from the centre of `old` to the centre of `new`. Returns the
/// carved path, elbow cell included twice.
pub fn carve_tunnel(
    grid: &mut Grid,
    old: Room,
    new: Room,
    rng: &mut impl RandomSource,
    sink: &mut impl TileSink,
) -> Vec<Pos> {
    let old_center = old.center();
    let new_center = new.center();
    let corner = tunnel_corner(old_center, new_center, rng);

    let path: Vec<Pos> =
        Line::new(old_center, corner).chain(Line::new(corner, new_center)).collect();
    for &cell in &path {
        grid.set_floor(cell, sink);
        for neighbor in cell.neighbors8() {
            grid.set_wall_if_not_floor(neighbor, sink);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;
    use crate::rng::testing::ScriptedRandom;
    use crate::types::TileKind;

    #[test]
    fn carved_room_has_wall_ring_and_floor_interior() {
        let mut grid = Grid::new(20, 20);
        let room = Room::new(2, 3, 6, 5);
        carve_room(&mut grid, room, &mut ());

        for pos in room.cells() {
            let expected = if room.is_border(pos) { TileKind::Wall } else { TileKind::Floor };
            assert_eq!(grid.terrain_at(pos), expected, "{pos:?}");
        }
        assert_eq!(grid.count_terrain(TileKind::Floor), 4 * 3);
        assert_eq!(grid.terrain_at(Pos::new(1, 3)), TileKind::Empty);
    }

    #[test]
    fn room_border_does_not_wall_over_existing_floor() {
        let mut grid = Grid::new(20, 20);
        grid.set_floor(Pos::new(2, 5), &mut ());
        carve_room(&mut grid, Room::new(2, 3, 6, 5), &mut ());
        assert_eq!(grid.terrain_at(Pos::new(2, 5)), TileKind::Floor);
    }

    #[test]
    fn attempt_draws_width_height_x_y_in_order() {
        let config = GenerationConfig::new(50, 30, 6, 10, 5, 0, 0);
        let mut rng = ScriptedRandom::new(&[7, 8, 12, 4], &[]);
        let mut grid = Grid::new(50, 30);
        let mut placer = RoomPlacer::new();

        let placement = placer.attempt(&config, &mut rng, &mut grid, &mut ());
        assert_eq!(placement, Placement::Accepted(Room::new(12, 4, 7, 8)));
        assert_eq!(placer.rooms(), &[Room::new(12, 4, 7, 8)]);
    }

    #[test]
    fn overlapping_attempt_is_rejected_and_not_carved() {
        let config = GenerationConfig::new(50, 30, 6, 10, 5, 0, 0);
        let mut rng = ScriptedRandom::new(&[6, 6, 10, 10, 6, 6, 12, 12, 6, 6, 16, 10], &[]);
        let mut grid = Grid::new(50, 30);
        let mut placer = RoomPlacer::new();

        placer.attempt(&config, &mut rng, &mut grid, &mut ());
        let before = grid.clone();
        let rejected = placer.attempt(&config, &mut rng, &mut grid, &mut ());
        assert_eq!(rejected, Placement::RejectedOverlap(Room::new(12, 12, 6, 6)));
        assert_eq!(grid, before);

        let touching = placer.attempt(&config, &mut rng, &mut grid, &mut ());
        assert_eq!(touching, Placement::Accepted(Room::new(16, 10, 6, 6)));
        assert_eq!(placer.rooms().len(), 2);
    }

    #[test]
    fn room_larger_than_map_is_rejected_for_bounds() {
        let config = GenerationConfig::new(8, 8, 9, 12, 3, 0, 0);
        let mut rng = SeededRandom::new(5);
        let mut grid = Grid::new(8, 8);
        let rooms = build_room_layout(&config, &mut rng, &mut grid, &mut ());
        assert!(rooms.is_empty());
        assert_eq!(grid.tiles().count(), 0);
    }

    #[test]
    fn layout_rooms_fit_and_never_share_cells() {
        let config = GenerationConfig::new(80, 50, 5, 12, 30, 0, 0);
        for seed in [1_u64, 7, 42, 1_234, 99_999] {
            let mut rng = SeededRandom::new(seed);
            let mut grid = Grid::new(config.map_width, config.map_height);
            let rooms = build_room_layout(&config, &mut rng, &mut grid, &mut ());

            assert!(!rooms.is_empty() && rooms.len() <= 30);
            for (index, room) in rooms.iter().enumerate() {
                assert!(room.fits_within(config.map_width, config.map_height), "{room:?}");
                assert!(room.width >= 5 && room.width < 12);
                assert!(room.height >= 5 && room.height < 12);
                for other in &rooms[index + 1..] {
                    assert!(!room.overlaps(other), "seed={seed}: {room:?} vs {other:?}");
                }
            }
        }
    }

    #[test]
    fn straight_tunnel_is_floor_lined_with_walls() {
        let mut grid = Grid::new(30, 12);
        let a = Room::new(3, 3, 5, 5);
        let b = Room::new(18, 3, 5, 5);
        assert_eq!(a.center(), Pos::new(5, 5));
        assert_eq!(b.center(), Pos::new(20, 5));

        let mut rng = ScriptedRandom::new(&[], &[0.25]);
        let path = carve_tunnel(&mut grid, a, b, &mut rng, &mut ());

        assert_eq!(path.first(), Some(&Pos::new(5, 5)));
        assert_eq!(path.last(), Some(&Pos::new(20, 5)));
        for x in 5..=20 {
            assert_eq!(grid.terrain_at(Pos::new(x, 5)), TileKind::Floor, "x={x}");
            assert_eq!(grid.terrain_at(Pos::new(x, 4)), TileKind::Wall, "x={x}");
            assert_eq!(grid.terrain_at(Pos::new(x, 6)), TileKind::Wall, "x={x}");
        }
    }

    #[test]
    fn tunnel_clears_room_walls_but_keeps_room_floor() {
        let mut grid = Grid::new(40, 20);
        let a = Room::new(2, 2, 7, 7);
        let b = Room::new(20, 10, 7, 7);
        carve_room(&mut grid, a, &mut ());
        carve_room(&mut grid, b, &mut ());
        let floor_before: Vec<_> = grid
            .tiles()
            .filter(|(_, tile)| tile.terrain == TileKind::Floor)
            .map(|(pos, _)| pos)
            .collect();

        let mut rng = ScriptedRandom::new(&[], &[0.75]);
        let path = carve_tunnel(&mut grid, a, b, &mut rng, &mut ());

        assert!(path.contains(&Pos::new(5, 13)), "vertical leg first through the elbow");
        assert!(path.iter().all(|&cell| grid.terrain_at(cell) == TileKind::Floor));
        assert!(floor_before.iter().all(|&pos| grid.terrain_at(pos) == TileKind::Floor));
    }

    #[test]
    fn corner_choice_follows_the_float_draw() {
        let old = Pos::new(2, 3);
        let new = Pos::new(9, 8);
        let mut rng = ScriptedRandom::new(&[], &[0.1, 0.5]);
        assert_eq!(tunnel_corner(old, new, &mut rng), Pos::new(9, 3));
        assert_eq!(tunnel_corner(old, new, &mut rng), Pos::new(2, 8));
    }
}
