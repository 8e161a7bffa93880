//! Integer line rasterization used for tunnels and line-of-sight checks.

use crate::types::Pos;

/// Bresenham walk from `start` to `end`, both endpoints included.
#[derive(Clone, Debug)]
pub struct Line {
    current: Pos,
    end: Pos,
    dx: i32,
    dy: i32,
    step_x: i32,
    step_y: i32,
    error: i32,
    done: bool,
}

impl Line {
    pub fn new(start: Pos, end: Pos) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        Self {
            current: start,
            end,
            dx,
            dy,
            step_x: if start.x < end.x { 1 } else { -1 },
            step_y: if start.y < end.y { 1 } else { -1 },
            error: dx + dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.done {
            return None;
        }
        let out = self.current;
        if out == self.end {
            self.done = true;
            return Some(out);
        }

        let doubled = 2 * self.error;
        if doubled >= self.dy {
            self.error += self.dy;
            self.current.x += self.step_x;
        }
        if doubled <= self.dx {
            self.error += self.dx;
            self.current.y += self.step_y;
        }
        Some(out)
    }
}

pub fn line(start: Pos, end: Pos) -> Vec<Pos> {
    Line::new(start, end).collect()
}
