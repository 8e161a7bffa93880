//! Field-of-view computation feeding [`Grid::update_visibility`].
//! Floor is transparent; walls and never-carved cells block sight but are themselves lit
//! when they bound the view.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::mapgen::line::Line;
use crate::types::{Pos, TileKind};

fn transform_octant(orig: Pos, x: i32, y: i32, oct: u8) -> Pos {
    match oct {
        0 => Pos { y: orig.y - y, x: orig.x + x },
        1 => Pos { y: orig.y - x, x: orig.x + y },
        2 => Pos { y: orig.y - x, x: orig.x - y },
        3 => Pos { y: orig.y - y, x: orig.x - x },
        4 => Pos { y: orig.y + y, x: orig.x - x },
        5 => Pos { y: orig.y + x, x: orig.x - y },
        6 => Pos { y: orig.y + x, x: orig.x + y },
        7 => Pos { y: orig.y + y, x: orig.x + x },
        _ => orig,
    }
}

fn is_opaque(grid: &Grid, pos: Pos) -> bool {
    grid.terrain_at(pos) != TileKind::Floor
}

fn within_radius(origin: Pos, pos: Pos, radius: i32) -> bool {
    let dx = i64::from(pos.x) - i64::from(origin.x);
    let dy = i64::from(pos.y) - i64::from(origin.y);
    let radius = i64::from(radius);
    dx * dx + dy * dy <= radius * radius
}

/// Cells visible from `origin` within `radius`. Only cells that carry a tile are
/// returned, so the result can be passed straight to `update_visibility`.
///
/// A radius larger than the grid is treated as unlimited.
pub fn compute_fov(grid: &Grid, origin: Pos, radius: i32) -> BTreeSet<Pos> {
    let mut lit = BTreeSet::new();
    if grid.tile(origin).is_none() || radius < 0 {
        return lit;
    }
    let radius = radius.min(grid.width().saturating_add(grid.height()));
    lit.insert(origin);

    let mut scan = OctantScan { grid, origin, radius, lit: &mut lit };
    for octant in 0..8 {
        scan.scan(1, Slope::new(1, 1), Slope::new(0, 1), octant);
    }

    lit.retain(|&pos| pos == origin || has_direct_line_of_sight(grid, origin, pos));
    lit
}

#[derive(Clone, Copy)]
struct Slope {
    y: i32,
    x: i32,
}

impl Slope {
    fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn greater_or_equal(&self, other: &Slope) -> bool {
        self.y * other.x >= other.y * self.x
    }

    fn greater_than(&self, other: &Slope) -> bool {
        self.y * other.x > other.y * self.x
    }
}

struct OctantScan<'a> {
    grid: &'a Grid,
    origin: Pos,
    radius: i32,
    lit: &'a mut BTreeSet<Pos>,
}

impl OctantScan<'_> {
    fn scan(&mut self, dist: i32, start: Slope, end: Slope, oct: u8) {
        if dist > self.radius {
            return;
        }
        let mut blocked = false;
        let mut cur_start = start;
        for y in (0..=dist).rev() {
            let top = Slope::new(2 * y + 1, 2 * dist - 1);
            let bot = Slope::new(2 * y - 1, 2 * dist + 1);
            if !(cur_start.greater_or_equal(&bot) && top.greater_than(&end)) {
                continue;
            }

            let p = transform_octant(self.origin, dist, y, oct);
            if within_radius(self.origin, p, self.radius) && self.grid.tile(p).is_some() {
                self.lit.insert(p);
            }
            if is_opaque(self.grid, p) {
                if !blocked {
                    self.scan(dist + 1, cur_start, top, oct);
                    blocked = true;
                }
                cur_start = bot;
            } else if blocked {
                blocked = false;
            }
        }
        if !blocked {
            self.scan(dist + 1, cur_start, end, oct);
        }
    }
}

/// Every cell strictly between the endpoints is transparent.
fn has_direct_line_of_sight(grid: &Grid, origin: Pos, target: Pos) -> bool {
    Line::new(origin, target)
        .skip(1)
        .take_while(|&pos| pos != target)
        .all(|pos| !is_opaque(grid, pos))
}
