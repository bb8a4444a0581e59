//! Pending-change tracker — cells mutated since the last flush.
//!
//! Uses the same key space as the grid store but answers a different
//! question: which cells does the remote peer not know about yet.
//!
//! # Erase semantics
//!
//! Erasing a cell *removes* it from the tracker instead of recording a
//! deletion. The wire format can only say "this cell is now color C", so:
//!
//! - a cell painted and erased between two flushes is never sent at all;
//! - a cell erased after it was already flushed stays painted on the remote
//!   side.
//!
//! Both cases let the remote view diverge from the local grid without any
//! local error. Fixing that needs a protocol extension (e.g. a null color
//! token meaning "erased").

use std::collections::BTreeMap;

use crate::sync::serializer;
use crate::types::{Batch, CellCoord, Color, GridSize, Tool};

#[derive(Debug, Clone)]
pub struct PendingChanges {
    size: GridSize,
    // Ordered so that draining produces a reproducible batch.
    cells: BTreeMap<CellCoord, Color>,
}

impl PendingChanges {
    pub fn new(size: GridSize) -> Self {
        PendingChanges {
            size,
            cells: BTreeMap::new(),
        }
    }

    /// Mirror one batch applied to the grid store.
    pub(crate) fn apply_cells(&mut self, cells: &[CellCoord], tool: Tool, color: &Color) {
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
        }
    }

    /// Serialize every pending entry and empty the tracker.
    pub(crate) fn drain(&mut self) -> Batch {
        let cells = std::mem::take(&mut self.cells);
        serializer::group_by_color(&cells)
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
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

    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Color)> {
        self.cells.iter().map(|(cell, color)| (*cell, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PendingChanges {
        PendingChanges::new(GridSize { cols: 4, rows: 4 })
    }

    #[test]
    fn paint_then_erase_drops_entry() {
        let mut pending = tracker();
        let cell = CellCoord::new(1, 2);
        pending.apply_cells(&[cell], Tool::Paint, &Color::from("#0f0"));
        assert!(pending.contains(cell));
        pending.apply_cells(&[cell], Tool::Erase, &Color::from("#0f0"));
        assert!(!pending.contains(cell));
        assert!(pending.drain().is_empty());
    }

    #[test]
    fn keeps_most_recent_color() {
        let mut pending = tracker();
        let cell = CellCoord::new(0, 0);
        for token in ["#100", "#200", "#300"] {
            pending.apply_cells(&[cell], Tool::Paint, &Color::from(token));
        }
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.get(cell), Some(&Color::from("#300")));
    }

    #[test]
    fn drain_empties_tracker() {
        let mut pending = tracker();
        pending.apply_cells(
            &[CellCoord::new(0, 0), CellCoord::new(3, 3)],
            Tool::Paint,
            &Color::from("#fff"),
        );
        let first = pending.drain();
        assert_eq!(first.cell_count(), 2);
        assert!(pending.is_empty());
        assert!(pending.drain().is_empty());
    }

    #[test]
    fn ignores_out_of_bounds() {
        let mut pending = tracker();
        pending.apply_cells(&[CellCoord::new(4, 0)], Tool::Paint, &Color::from("#fff"));
        assert!(pending.is_empty());
    }
}
