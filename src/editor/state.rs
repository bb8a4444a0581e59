use crate::sync::FlushOutcome;
use crate::types::{CellCoord, Color, Tool};

use super::config::EditorConfig;

/// One pointer sample to rasterize: from the previous resolved cell (if the
/// gesture was already under way) to the newly resolved one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Option<CellCoord>,
    pub to: CellCoord,
}

/// Tracks the last resolved cell of an active drag.
#[derive(Debug, Default)]
pub struct Gesture {
    last: Option<CellCoord>,
}

impl Gesture {
    /// Pointer down: start a gesture at `cell`.
    pub fn begin(&mut self, cell: CellCoord) -> Segment {
        self.last = Some(cell);
        Segment { from: None, to: cell }
    }

    /// Pointer move: yields a segment only while a gesture is active and the
    /// pointer has reached a different cell.
    pub fn extend(&mut self, cell: CellCoord) -> Option<Segment> {
        let last = self.last?;
        if last == cell {
            return None;
        }
        self.last = Some(cell);
        Some(Segment { from: Some(last), to: cell })
    }

    /// Pointer up / leave. Whatever was painted stays painted.
    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}

pub struct EditorState {
    pub config: EditorConfig,
    pub tool: Tool,
    pub palette: Vec<Color>,
    pub color_index: usize,
    pub gesture: Gesture,
    pub status_message: Option<String>,
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        let mut palette: Vec<Color> = config.palette.iter().map(|t| Color::new(t.as_str())).collect();
        if palette.is_empty() {
            palette.push(Color::from("#000000"));
        }
        EditorState {
            config,
            tool: Tool::Paint,
            palette,
            color_index: 0,
            gesture: Gesture::default(),
            status_message: None,
        }
    }

    /// The color applied on paint.
    pub fn active_color(&self) -> &Color {
        &self.palette[self.color_index]
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % self.palette.len();
    }

    pub fn prev_color(&mut self) {
        let n = self.palette.len();
        self.color_index = if self.color_index == 0 { n - 1 } else { self.color_index - 1 };
    }

    /// Select a palette entry by 1-based number; out-of-range numbers are ignored.
    pub fn pick_color(&mut self, number: usize) -> bool {
        if number >= 1 && number <= self.palette.len() {
            self.color_index = number - 1;
            true
        } else {
            false
        }
    }

    pub fn record_flush(&mut self, outcome: FlushOutcome) {
        self.status_message = match outcome {
            FlushOutcome::Skipped => Some("Nothing to sync".into()),
            FlushOutcome::Delivered { groups, cells } => {
                Some(format!("Synced {cells} cells in {groups} colors"))
            }
            FlushOutcome::Lost { cells, .. } => Some(format!("Sync failed, {cells} cells dropped")),
        };
    }
}
