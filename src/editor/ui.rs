use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, CELL_SIZE, COLS, ROWS};
use crate::renderer::terminal::COLUMNS_PER_CELL;
use crate::types::CellCoord;

/// Rows reserved above the canvas for the toolbar.
pub const TOOLBAR_HEIGHT: u16 = 1;
/// Rows reserved below the canvas for the status line.
pub const STATUS_HEIGHT: u16 = 1;

pub struct Layout {
    pub canvas_x: u16,
    pub canvas_y: u16,
    pub canvas_width: u16,
    pub canvas_height: u16,
    pub status_y: u16,
}

impl Layout {
    pub fn new() -> Self {
        let canvas_width = COLS as u16 * COLUMNS_PER_CELL;
        let canvas_height = ROWS as u16;
        Layout {
            canvas_x: 0,
            canvas_y: TOOLBAR_HEIGHT,
            canvas_width,
            canvas_height,
            status_y: TOOLBAR_HEIGHT + canvas_height,
        }
    }

    /// Smallest terminal that fits toolbar, canvas and status line.
    pub fn required_size(&self) -> (u16, u16) {
        (
            self.canvas_x + self.canvas_width,
            TOOLBAR_HEIGHT + self.canvas_height + STATUS_HEIGHT,
        )
    }

    pub fn fits(&self, term_width: u16, term_height: u16) -> bool {
        let (w, h) = self.required_size();
        term_width >= w && term_height >= h
    }

    /// Canvas pixel position of the left/top edge of a terminal position.
    ///
    /// Positions left of or above the canvas come out negative.
    pub fn pointer_to_pixel(&self, column: u16, row: u16) -> (i32, i32) {
        let px_per_col = (CELL_SIZE / COLUMNS_PER_CELL as u32) as i32;
        let px_per_row = CELL_SIZE as i32;
        (
            (column as i32 - self.canvas_x as i32) * px_per_col,
            (row as i32 - self.canvas_y as i32) * px_per_row,
        )
    }

    /// Resolve a terminal position to the grid cell under it.
    pub fn resolve_cell(&self, column: u16, row: u16) -> CellCoord {
        let (px, py) = self.pointer_to_pixel(column, row);
        CellCoord::from_pixel(px, py, CELL_SIZE)
    }

    pub fn origin(&self) -> (u16, u16) {
        (self.canvas_x, self.canvas_y)
    }

    pub fn canvas_pixels(&self) -> (u32, u32) {
        (CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_columns_per_cell() {
        let layout = Layout::new();
        assert_eq!(layout.resolve_cell(0, 1), CellCoord::new(0, 0));
        assert_eq!(layout.resolve_cell(1, 1), CellCoord::new(0, 0));
        assert_eq!(layout.resolve_cell(2, 1), CellCoord::new(1, 0));
        assert_eq!(layout.resolve_cell(9, 4), CellCoord::new(4, 3));
    }

    #[test]
    fn toolbar_row_resolves_above_grid() {
        let layout = Layout::new();
        assert_eq!(layout.resolve_cell(4, 0), CellCoord::new(2, -1));
    }

    #[test]
    fn required_size_matches_default_grid() {
        let layout = Layout::new();
        assert_eq!(layout.required_size(), (64, 22));
        assert!(layout.fits(80, 24));
        assert!(!layout.fits(63, 24));
    }
}
