use std::collections::BTreeSet;

use dungeon_core::{GenerationConfig, Pos, compute_fov, generate_dungeon};

#[test]
fn test_explored_cells_only_grow_while_walking_the_level() {
    let (mut dungeon, roster) =
        generate_dungeon(777, GenerationConfig::new(60, 40, 6, 12, 8, 1, 1)).expect("generation");
    let spawn = dungeon.spawn_cell;
    assert_eq!(roster.player().map(|player| player.cell()), Some(spawn));

    // Row-then-column walk through every room centre; cells off the floor are skipped.
    let mut path = vec![spawn];
    for room in &dungeon.rooms {
        let target = room.center();
        let Some(&from) = path.last() else { break };
        let mut x = from.x;
        while x != target.x {
            x += (target.x - x).signum();
            path.push(Pos::new(x, from.y));
        }
        let mut y = from.y;
        while y != target.y {
            y += (target.y - y).signum();
            path.push(Pos::new(target.x, y));
        }
    }

    let mut explored_before: BTreeSet<Pos> = BTreeSet::new();
    for origin in path {
        if !dungeon.grid.is_walkable(origin) {
            continue;
        }
        let fov = compute_fov(&dungeon.grid, origin, 8);
        dungeon.grid.update_visibility(fov.iter().copied(), &mut ());

        let explored: BTreeSet<Pos> =
            dungeon.grid.tiles().filter(|(_, tile)| tile.is_explored).map(|(pos, _)| pos).collect();
        assert!(explored.is_superset(&explored_before), "explored set shrank at {origin:?}");
        explored_before = explored;

        let visible = dungeon.grid.visible_cells();
        assert!(visible.iter().all(|pos| dungeon.grid.tile(*pos).is_some()));
        assert!(visible.iter().all(|pos| dungeon.grid.is_visible(*pos)));
        assert!(dungeon.grid.tiles().filter(|(_, tile)| tile.is_visible).count() == visible.len());
    }
}

#[test]
fn test_spawn_room_is_lit_on_the_first_turn() {
    let (mut dungeon, roster) =
        generate_dungeon(31, GenerationConfig::new(60, 40, 6, 10, 6, 2, 2)).expect("generation");
    let room = *dungeon.spawn_room().expect("spawn room");

    let fov = compute_fov(&dungeon.grid, dungeon.spawn_cell, 30);
    dungeon.grid.update_visibility(fov, &mut ());

    for pos in room.cells().filter(|&pos| room.interior_contains(pos)) {
        assert!(dungeon.grid.is_visible(pos), "{pos:?} in spawn room should be lit");
    }
    let visible = roster.visible_entities(&dungeon.grid);
    for id in visible {
        let entity = roster.get(id).expect("live entity");
        assert!(dungeon.grid.is_visible(entity.cell()));
    }
}

#[test]
fn test_huge_fov_radius_lights_the_level_without_overflow() {
    let (mut dungeon, _) =
        generate_dungeon(8, GenerationConfig::new(50, 30, 6, 10, 5, 2, 2)).expect("generation");
    let spawn = dungeon.spawn_cell;

    let unlimited = compute_fov(&dungeon.grid, spawn, 50_000);
    assert_eq!(unlimited, compute_fov(&dungeon.grid, spawn, 80));
    assert!(unlimited.contains(&spawn));

    dungeon.grid.update_visibility(unlimited, &mut ());
    assert!(dungeon.grid.is_visible(spawn));
}
