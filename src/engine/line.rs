//! Line rasterizer for drag gestures.
//!
//! Integer-only error-accumulator line drawing: every step moves one cell in
//! x, y or both, so a fast pointer never leaves gaps between samples.

use crate::types::CellCoord;

/// The cells from `from` to `to`, both inclusive, in drawing order.
pub struct Line {
    x: i64,
    y: i64,
    sx: i64,
    sy: i64,
    dx: i64,
    /// Stored negated so one error term handles both axes.
    dy: i64,
    err: i64,
    remaining: usize,
}

impl Line {
    pub fn new(from: CellCoord, to: CellCoord) -> Self {
        let (x0, y0) = (from.x as i64, from.y as i64);
        let (x1, y1) = (to.x as i64, to.y as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        Line {
            x: x0,
            y: y0,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            dx,
            dy,
            err: dx + dy,
            remaining: dx.max(-dy) as usize + 1,
        }
    }
}

impl Iterator for Line {
    type Item = CellCoord;

    fn next(&mut self) -> Option<CellCoord> {
        if self.remaining == 0 {
            return None;
        }
        let cell = CellCoord::new(self.x as i32, self.y as i32);
        self.remaining -= 1;

        if self.remaining > 0 {
            let e2 = 2 * self.err;
            if e2 >= self.dy {
                self.err += self.dy;
                self.x += self.sx;
            }
            if e2 <= self.dx {
                self.err += self.dx;
                self.y += self.sy;
            }
        }

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Line {}

/// Cells to paint for one pointer sample.
///
/// Without a previous cell the gesture has just started and only the target
/// is painted.
pub fn rasterize(prev: Option<CellCoord>, target: CellCoord) -> Vec<CellCoord> {
    match prev {
        Some(from) => Line::new(from, target).collect(),
        None => vec![target],
    }
}
