//! Renderer — full-surface redraw from the grid store.
//!
//! The renderer is pure and stateless: clear the surface, lay down the
//! background lattice, then fill one cell-sized rectangle per painted cell.
//! It works in canvas pixels; the `Surface` decides what a pixel is.

pub mod terminal;

use anyhow::Result;

use crate::engine::grid::GridStore;
use crate::types::Color;

/// Anything that can rasterize filled rectangles in canvas pixel space.
pub trait Surface {
    fn clear(&mut self) -> Result<()>;
    fn draw_lattice(&mut self, cell_size: u32, width: u32, height: u32) -> Result<()>;
    fn fill_rect(&mut self, x: u32, y: u32, size: u32, color: &Color) -> Result<()>;
    /// Make everything drawn since `clear` visible.
    fn present(&mut self) -> Result<()>;
}

pub struct Renderer;

impl Renderer {
    pub fn render(surface: &mut dyn Surface, grid: &GridStore, cell_size: u32) -> Result<()> {
        let size = grid.size();
        surface.clear()?;
        surface.draw_lattice(cell_size, size.cols * cell_size, size.rows * cell_size)?;

        for (cell, color) in grid.iter() {
            // Keys are always in bounds, so never negative.
            let x = cell.x as u32 * cell_size;
            let y = cell.y as u32 * cell_size;
            surface.fill_rect(x, y, cell_size, color)?;
        }

        surface.present()
    }
}
