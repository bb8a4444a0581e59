//! Shared boundary types for the delta canvas.
//!
//! This module defines the two key data contracts:
//! - Pointer → Engine (in-memory): `CellCoord`s painted with a `Tool` and `Color`
//! - Engine → Transport (wire): `Batch` containing `PixelGroup`s

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Grid geometry
// ---------------------------------------------------------------------------

/// A cell position on the grid, in cell units (not pixels).
///
/// Candidate cells coming from pointer motion may lie outside the grid,
/// including negative positions; the stores discard those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        CellCoord { x, y }
    }

    /// Resolve a pixel position to the cell containing it.
    ///
    /// Floors rather than truncates so that pixels left of or above the
    /// canvas origin land on negative cells.
    pub fn from_pixel(px: i32, py: i32, cell_size: u32) -> Self {
        let size = cell_size.max(1) as i32;
        CellCoord {
            x: px.div_euclid(size),
            y: py.div_euclid(size),
        }
    }

    /// Wire form: `[x, y]`.
    pub fn to_pair(self) -> [i32; 2] {
        [self.x, self.y]
    }

    /// Whether the two cells touch, including diagonally.
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

impl GridSize {
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.cols && (cell.y as u32) < self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

// ---------------------------------------------------------------------------
// Painting primitives
// ---------------------------------------------------------------------------

/// An opaque color token, e.g. `"#ff0000"`.
///
/// The engine never interprets it; only the renderer tries to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(token: impl Into<String>) -> Self {
        Color(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(token: &str) -> Self {
        Color(token.to_string())
    }
}

impl From<String> for Color {
    fn from(token: String) -> Self {
        Color(token)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Paint,
    Erase,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Tool::Paint => "paint",
            Tool::Erase => "erase",
        }
    }
}

// ---------------------------------------------------------------------------
// Engine → Transport boundary (serialized on every flush)
// ---------------------------------------------------------------------------

/// Every pending cell carrying one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelGroup {
    pub color: Color,
    pub pixels: Vec<[i32; 2]>,
}

/// The payload handed to the transport: one group per distinct color.
///
/// Serializes as a bare JSON array with no envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch(pub Vec<PixelGroup>);

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn groups(&self) -> &[PixelGroup] {
        &self.0
    }

    pub fn group_count(&self) -> usize {
        self.0.len()
    }

    pub fn cell_count(&self) -> usize {
        self.0.iter().map(|g| g.pixels.len()).sum()
    }

    /// Pixels of the group carrying `color`, if any.
    pub fn pixels_for(&self, color: &Color) -> Option<&[[i32; 2]]> {
        self.0
            .iter()
            .find(|g| &g.color == color)
            .map(|g| g.pixels.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixel_floors_negative_positions() {
        assert_eq!(CellCoord::from_pixel(0, 0, 16), CellCoord::new(0, 0));
        assert_eq!(CellCoord::from_pixel(15, 31, 16), CellCoord::new(0, 1));
        assert_eq!(CellCoord::from_pixel(-1, -16, 16), CellCoord::new(-1, -1));
        assert_eq!(CellCoord::from_pixel(-17, 5, 16), CellCoord::new(-2, 0));
    }

    #[test]
    fn grid_size_bounds() {
        let size = GridSize { cols: 4, rows: 3 };
        assert!(size.contains(CellCoord::new(0, 0)));
        assert!(size.contains(CellCoord::new(3, 2)));
        assert!(!size.contains(CellCoord::new(4, 2)));
        assert!(!size.contains(CellCoord::new(3, 3)));
        assert!(!size.contains(CellCoord::new(-1, 0)));
        assert_eq!(size.cell_count(), 12);
    }

    #[test]
    fn batch_serializes_without_envelope() {
        let batch = Batch(vec![PixelGroup {
            color: Color::from("#f00"),
            pixels: vec![[0, 0], [1, 0]],
        }]);
        let json = serde_json::to_string(&batch).unwrap();
        assert_eq!(json, r##"[{"color":"#f00","pixels":[[0,0],[1,0]]}]"##);
    }

    #[test]
    fn adjacency_includes_diagonals() {
        let c = CellCoord::new(5, 5);
        assert!(c.is_adjacent(CellCoord::new(6, 6)));
        assert!(c.is_adjacent(CellCoord::new(5, 4)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(CellCoord::new(7, 5)));
    }
}
