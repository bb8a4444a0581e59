use std::io::Write;

use crossterm::{cursor, queue, style, terminal};

use crate::engine::Canvas;
use crate::menubar::print_hint;
use crate::renderer::terminal::to_ct_color;
use crate::sync::{FlushOutcome, SyncScheduler};
use crate::types::Tool;

use super::state::EditorState;
use super::ui::Layout;

/// Top row: tool and sync key hints, with the active tool highlighted and a
/// swatch of the active color.
pub fn render_toolbar<W: Write>(out: &mut W, state: &EditorState) -> anyhow::Result<()> {
    let keys = &state.config.key_bindings;
    let items = [
        (format!("[{}] paint", keys.paint_tool), state.tool == Tool::Paint),
        (format!("[{}] erase", keys.erase_tool), state.tool == Tool::Erase),
        (format!("[{}/1-9] color", keys.next_color), false),
        (format!("[{}] clear", keys.clear), false),
        (format!("[{}] sync", keys.flush), false),
        (format!("[{}] quit", keys.quit), false),
    ];

    queue!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    for (i, (item, active)) in items.iter().enumerate() {
        if i > 0 {
            queue!(out, style::Print("  "))?;
        }
        print_hint(out, item, *active)?;
    }
    queue!(
        out,
        style::Print("  "),
        style::SetBackgroundColor(to_ct_color(state.active_color())),
        style::Print("  "),
        style::ResetColor,
        style::Print(format!(" {}", state.active_color())),
    )?;
    Ok(())
}

/// Bottom row: pending count, delivery totals and the latest message.
pub fn status_line(state: &EditorState, canvas: &Canvas, scheduler: &SyncScheduler) -> String {
    let mut line = format!(
        " {} | {} | pending {} | sent {} batches / {} cells",
        state.tool.label(),
        state.active_color(),
        canvas.pending().len(),
        scheduler.batches_delivered(),
        scheduler.cells_delivered(),
    );
    if let Some(FlushOutcome::Lost { .. }) = scheduler.last_outcome() {
        line.push_str(" | last sync failed");
    }
    if let Some(msg) = &state.status_message {
        line.push_str(" | ");
        line.push_str(msg);
    }
    line
}

pub fn render_status<W: Write>(
    out: &mut W,
    layout: &Layout,
    state: &EditorState,
    canvas: &Canvas,
    scheduler: &SyncScheduler,
) -> anyhow::Result<()> {
    let mut cs = style::ContentStyle::default();
    cs.attributes.set(style::Attribute::Dim);
    queue!(
        out,
        cursor::MoveTo(0, layout.status_y),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::PrintStyledContent(style::StyledContent::new(
            cs,
            status_line(state, canvas, scheduler)
        )),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::editor::config::EditorConfig;
    use crate::types::{CellCoord, GridSize};

    #[test]
    fn status_line_reports_pending_and_message() {
        let mut state = EditorState::new(EditorConfig::default());
        let mut canvas = Canvas::new(GridSize { cols: 4, rows: 4 });
        let scheduler = SyncScheduler::new(Duration::from_secs(1));
        canvas.apply(&[CellCoord::new(0, 0), CellCoord::new(1, 0)], Tool::Paint, state.active_color());
        state.status_message = Some("hello".into());

        let line = status_line(&state, &canvas, &scheduler);

        assert!(line.contains("paint"));
        assert!(line.contains("pending 2"));
        assert!(line.contains("sent 0 batches"));
        assert!(line.ends_with("| hello"));
    }
}
