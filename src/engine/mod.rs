//! Engine — the drawing session.
//!
//! `Canvas` owns two views of the same grid: the `GridStore` (what the user
//! sees) and the `PendingChanges` tracker (what the remote peer has not been
//! sent yet). Every mutation goes through one entry point that updates both
//! before anyone can observe either, then notifies observers once.
//!
//! The engine never deals with terminals or transports.

pub mod grid;
pub mod line;
pub mod pending;

use tracing::debug;

use crate::config;
use crate::types::{Batch, CellCoord, Color, GridSize, Tool};
use grid::GridStore;
use pending::PendingChanges;

/// What a committed mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// A batch of cells was painted or erased.
    Applied { tool: Tool, cells: usize },
    /// Every cell was removed.
    Cleared,
}

/// Called after every commit with the grid as it now stands.
pub type Observer = Box<dyn FnMut(&Change, &GridStore)>;

pub struct Canvas {
    grid: GridStore,
    pending: PendingChanges,
    observers: Vec<Observer>,
    revision: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(config::GRID)
    }
}

impl Canvas {
    pub fn new(size: GridSize) -> Self {
        Canvas {
            grid: GridStore::new(size),
            pending: PendingChanges::new(size),
            observers: Vec::new(),
            revision: 0,
        }
    }

    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    /// Apply one batch of candidate cells to both stores.
    ///
    /// Out-of-bounds cells are dropped silently. Returns the number of cells
    /// that landed on the grid; observers are only notified when that is
    /// non-zero.
    pub fn apply(&mut self, cells: &[CellCoord], tool: Tool, color: &Color) -> usize {
        let applied = self.grid.apply_cells(cells, tool, color);
        self.pending.apply_cells(cells, tool, color);

        if applied > 0 {
            debug!(tool = tool.label(), cells = applied, "applied cells");
            self.commit(Change::Applied { tool, cells: applied });
        }
        applied
    }

    /// Rasterize `prev → target` and apply the path as one batch.
    pub fn stroke(
        &mut self,
        prev: Option<CellCoord>,
        target: CellCoord,
        tool: Tool,
        color: &Color,
    ) -> usize {
        let path = line::rasterize(prev, target);
        self.apply(&path, tool, color)
    }

    /// Empty the grid and forget every pending change.
    ///
    /// Nothing is sent for the cleared cells; the remote keeps whatever it
    /// already received.
    pub fn clear(&mut self) {
        let dropped = self.pending.len();
        self.grid.clear();
        self.pending.clear();
        debug!(dropped_pending = dropped, "cleared canvas");
        self.commit(Change::Cleared);
    }

    /// Read-only view of the grid for rendering.
    pub fn snapshot(&self) -> &GridStore {
        &self.grid
    }

    pub fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Serialize the pending set and reset it in one step.
    pub fn drain_pending(&mut self) -> Batch {
        self.pending.drain()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&Change, &GridStore) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Number of commits so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn commit(&mut self, change: Change) {
        self.revision += 1;
        for observer in &mut self.observers {
            observer(&change, &self.grid);
        }
    }
}
