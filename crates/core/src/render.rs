//! Plain-text view of a level for tools and test diagnostics.

use std::collections::BTreeMap;

use crate::grid::Grid;
use crate::roster::EntityRoster;
use crate::types::{EntityKind, Pos, TileKind};

fn glyph_priority(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::Player => 2,
        EntityKind::Monster(_) => 1,
        EntityKind::Item(_) => 0,
    }
}

/// One character per cell, one line per row: `#` wall, `.` floor, blank for never-carved
/// cells, entity glyphs on top. With `fog` set, cells never seen are blank and entities
/// other than the player only show on visible cells.
pub fn render_ascii(grid: &Grid, roster: &EntityRoster, fog: bool) -> String {
    let mut glyphs: BTreeMap<Pos, EntityKind> = BTreeMap::new();
    for entity in roster.iter() {
        let cell = entity.cell();
        if fog && entity.kind != EntityKind::Player && !grid.is_visible(cell) {
            continue;
        }
        let replace = glyphs
            .get(&cell)
            .is_none_or(|&shown| glyph_priority(entity.kind) > glyph_priority(shown));
        if replace {
            glyphs.insert(cell, entity.kind);
        }
    }

    let mut text = String::with_capacity(((grid.width() + 1) * grid.height()).max(0) as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Pos { y, x };
            let c = if let Some(kind) = glyphs.get(&pos) {
                kind.glyph()
            } else if fog && !grid.is_visible(pos) && !grid.is_explored(pos) {
                ' '
            } else {
                match grid.terrain_at(pos) {
                    TileKind::Wall => '#',
                    TileKind::Floor => '.',
                    TileKind::Empty => ' ',
                }
            };
            text.push(c);
        }
        text.push('\n');
    }
    text
}
