//! Fixed canvas geometry and sync cadence.

use std::time::Duration;

use crate::types::GridSize;

/// Canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 512;
/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 320;
/// Edge length of one square cell, in pixels.
pub const CELL_SIZE: u32 = 16;

pub const COLS: u32 = CANVAS_WIDTH / CELL_SIZE;
pub const ROWS: u32 = CANVAS_HEIGHT / CELL_SIZE;

pub const GRID: GridSize = GridSize { cols: COLS, rows: ROWS };

/// How often pending changes are shipped to the transport.
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_derived_from_canvas() {
        assert_eq!(COLS, 32);
        assert_eq!(ROWS, 20);
        assert_eq!(GRID.cell_count(), 640);
        assert_eq!(CANVAS_WIDTH % CELL_SIZE, 0);
        assert_eq!(CANVAS_HEIGHT % CELL_SIZE, 0);
    }
}
