//! Sparse per-cell terrain and visibility state for one level.
//!
//! Tiles exist only where terrain was carved; every other in-bounds cell reads as
//! [`TileKind::Empty`]. Visibility flags are driven by [`Grid::update_visibility`] and
//! `is_explored` never reverts once set.

use std::collections::{BTreeMap, BTreeSet};
use std::mem;

use crate::types::{Pos, TileKind, WorldPos};

/// Overlay alpha painted on cells that left the field of view.
pub const REMEMBERED_ALPHA: f32 = 0.5;
/// Overlay alpha painted on cells inside the field of view.
pub const VISIBLE_ALPHA: f32 = 0.0;

/// Receives paint calls after each state change. Rendering is not the source of truth.
pub trait TileSink {
    fn set_terrain(&mut self, pos: Pos, kind: TileKind);
    fn set_overlay_alpha(&mut self, pos: Pos, alpha: f32);
}

/// Sink for callers that do not render.
impl TileSink for () {
    fn set_terrain(&mut self, _pos: Pos, _kind: TileKind) {}
    fn set_overlay_alpha(&mut self, _pos: Pos, _alpha: f32) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub terrain: TileKind,
    pub is_explored: bool,
    pub is_visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: BTreeMap<Pos, Tile>,
    visible: BTreeSet<Pos>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, tiles: BTreeMap::new(), visible: BTreeSet::new() }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Pos, &Tile)> {
        self.tiles.iter().map(|(&pos, tile)| (pos, tile))
    }

    pub fn terrain_at(&self, pos: Pos) -> TileKind {
        self.tiles.get(&pos).map_or(TileKind::Empty, |tile| tile.terrain)
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.terrain_at(pos) == TileKind::Floor
    }

    /// Movement check for continuous positions: in bounds and not an obstacle.
    pub fn is_valid_world_position(&self, world: WorldPos) -> bool {
        self.is_walkable(world.to_cell())
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.tiles.get(&pos).is_some_and(|tile| tile.is_explored)
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.tiles.get(&pos).is_some_and(|tile| tile.is_visible)
    }

    pub fn visible_cells(&self) -> &BTreeSet<Pos> {
        &self.visible
    }

    /// Carves floor, clearing any wall. Out-of-bounds cells are ignored.
    pub fn set_floor(&mut self, pos: Pos, sink: &mut impl TileSink) {
        if !self.in_bounds(pos) {
            return;
        }
        self.tiles.entry(pos).or_default().terrain = TileKind::Floor;
        sink.set_terrain(pos, TileKind::Floor);
    }

    /// Places a wall unless the cell is already floor. Returns `true` when the cell was
    /// left untouched because it is floor.
    pub fn set_wall_if_not_floor(&mut self, pos: Pos, sink: &mut impl TileSink) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let tile = self.tiles.entry(pos).or_default();
        if tile.terrain == TileKind::Floor {
            return true;
        }
        if tile.terrain != TileKind::Wall {
            tile.terrain = TileKind::Wall;
            sink.set_terrain(pos, TileKind::Wall);
        }
        false
    }

    pub fn mark_explored(&mut self, cells: impl IntoIterator<Item = Pos>) {
        for pos in cells {
            if let Some(tile) = self.tiles.get_mut(&pos) {
                tile.is_explored = true;
            }
        }
    }

    /// Lights `cells` and adds them to the visible set. Cells without a tile are skipped.
    pub fn mark_visible(&mut self, cells: impl IntoIterator<Item = Pos>) {
        for pos in cells {
            if let Some(tile) = self.tiles.get_mut(&pos) {
                tile.is_visible = true;
                self.visible.insert(pos);
            }
        }
    }

    /// Replaces the visible set with `new_cells`.
    ///
    /// Cells leaving view become explored and are painted dimmed; cells entering view
    /// are painted clear. Coordinates that were never carved are not lit.
    pub fn update_visibility(
        &mut self,
        new_cells: impl IntoIterator<Item = Pos>,
        sink: &mut impl TileSink,
    ) {
        let previous = mem::take(&mut self.visible);
        for &pos in &previous {
            if let Some(tile) = self.tiles.get_mut(&pos) {
                tile.is_explored = true;
                tile.is_visible = false;
            }
            sink.set_overlay_alpha(pos, REMEMBERED_ALPHA);
        }

        for pos in new_cells {
            let Some(tile) = self.tiles.get_mut(&pos) else {
                continue;
            };
            tile.is_visible = true;
            sink.set_overlay_alpha(pos, VISIBLE_ALPHA);
            self.visible.insert(pos);
        }
    }

    pub fn count_terrain(&self, kind: TileKind) -> usize {
        self.tiles.values().filter(|tile| tile.terrain == kind).count()
    }
}
