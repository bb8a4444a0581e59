//! Grid store — the authoritative cell → color mapping.
//!
//! An erased cell is simply absent; there are no tombstones. Every key lies
//! inside the grid bounds.

use std::collections::HashMap;

use crate::types::{CellCoord, Color, GridSize, Tool};

#[derive(Debug, Clone)]
pub struct GridStore {
    size: GridSize,
    cells: HashMap<CellCoord, Color>,
}

impl GridStore {
    pub fn new(size: GridSize) -> Self {
        GridStore {
            size,
            cells: HashMap::new(),
        }
    }

    /// Apply one batch of candidate cells. Out-of-bounds cells are skipped.
    ///
    /// Returns how many cells were inside the grid.
    pub(crate) fn apply_cells(&mut self, cells: &[CellCoord], tool: Tool, color: &Color) -> usize {
        let mut applied = 0;
        for &cell in cells {
            if !self.size.contains(cell) {
                continue;
            }
            match tool {
                Tool::Paint => {
                    self.cells.insert(cell, color.clone());
                }
                Tool::Erase => {
                    self.cells.remove(&cell);
                }
            }
            applied += 1;
        }
        applied
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn get(&self, cell: CellCoord) -> Option<&Color> {
        self.cells.get(&cell)
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Painted cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Color)> {
        self.cells.iter().map(|(cell, color)| (*cell, color))
    }
}
